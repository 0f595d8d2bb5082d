use super::state::AppState;
use super::ui;
use crate::core::commodity::WalletType;
use crate::core::market::{ConnectWalletRequest, MarketplaceActions, RegisterRequest};
use crate::core::token::{User, Wallet};
use crate::store::{self, SessionStore};
use anyhow::{Context, Result};
use rand::Rng;
use tracing::{info, warn};

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const HEX: &[u8] = b"0123456789abcdef";

fn random_chars<R: Rng>(rng: &mut R, alphabet: &[u8], len: usize) -> String {
    (0..len)
        .map(|_| alphabet[rng.random_range(0..alphabet.len())] as char)
        .collect()
}

/// Demo username: `user_` followed by six base-36 characters.
pub fn generate_username() -> String {
    let mut rng = rand::rng();
    format!("user_{}", random_chars(&mut rng, BASE36, 6))
}

/// Simulated wallet address in its shortened display form, `0x<12>...<4>`.
pub fn simulated_address() -> String {
    let mut rng = rand::rng();
    format!(
        "0x{}...{}",
        random_chars(&mut rng, HEX, 12),
        random_chars(&mut rng, HEX, 4)
    )
}

async fn register_demo_user(api: &dyn MarketplaceActions) -> Result<User> {
    let username = generate_username();
    let request = RegisterRequest {
        email: format!("{username}@example.com"),
        username,
    };
    let user = api
        .register_user(&request)
        .await
        .with_context(|| format!("Failed to register user {}", request.username))?;
    info!("Registered user {} (id {})", user.username, user.id);
    Ok(user)
}

/// Connects a simulated wallet, registering a demo user first if needed.
///
/// The user and wallet are persisted so later commands run connected.
pub async fn connect(
    state: &mut AppState,
    wallet_type: WalletType,
    api: &dyn MarketplaceActions,
    sessions: &dyn SessionStore,
) -> Result<Wallet> {
    let user_id = match &state.user {
        Some(user) => user.id,
        None => {
            let user = register_demo_user(api).await?;
            if let Err(e) = store::save_user(sessions, &user).await {
                warn!(error = %e, "Failed to persist user session");
            }
            let id = user.id;
            state.user = Some(user);
            id
        }
    };

    let request = ConnectWalletRequest {
        user_id,
        address: simulated_address(),
        wallet_type,
    };
    let wallet = api.connect_wallet(&request).await.with_context(|| {
        format!("Failed to connect {}", wallet_type.display_name())
    })?;

    if let Err(e) = store::save_wallet(sessions, &wallet).await {
        warn!(error = %e, "Failed to persist wallet session");
    }
    state.wallet = Some(wallet.clone());

    println!(
        "{}",
        ui::style_text(
            &format!("{} connected", wallet_type.display_name()),
            ui::StyleType::Success
        )
    );
    println!("{}", render_wallet(&wallet));
    Ok(wallet)
}

pub fn render_wallet(wallet: &Wallet) -> String {
    format!(
        "{}  {}",
        ui::style_text(&wallet.address, ui::StyleType::TotalLabel),
        ui::style_text(
            &format!("{:.2} AGROX", wallet.balance()),
            ui::StyleType::TotalValue
        )
    )
}

/// Forgets the stored user and wallet.
pub async fn logout(state: &mut AppState, sessions: &dyn SessionStore) -> Result<()> {
    store::clear_session(sessions)
        .await
        .context("Failed to clear the stored session")?;
    if let Some(user) = state.user.take() {
        info!("Logged out {}", user.username);
    }
    state.wallet = None;
    println!("{}", ui::style_text("Wallet disconnected", ui::StyleType::Subtle));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::AppError;
    use crate::core::market::{ImageUpload, StakeReceipt, StakeRequest, TokenReceipt};
    use crate::core::token::CreateTokenRequest;
    use crate::store::MemorySessionStore;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeMarketplace {
        registered: Mutex<Vec<RegisterRequest>>,
        connected: Mutex<Vec<ConnectWalletRequest>>,
        reject_wallet: bool,
    }

    #[async_trait]
    impl MarketplaceActions for FakeMarketplace {
        async fn register_user(&self, request: &RegisterRequest) -> crate::core::Result<User> {
            self.registered.lock().unwrap().push(request.clone());
            Ok(User {
                id: 5,
                username: request.username.clone(),
                email: request.email.clone(),
                extra: HashMap::new(),
            })
        }
        async fn connect_wallet(
            &self,
            request: &ConnectWalletRequest,
        ) -> crate::core::Result<Wallet> {
            if self.reject_wallet {
                return Err(AppError::Api {
                    status: 400,
                    message: "Wallet already linked".to_string(),
                });
            }
            self.connected.lock().unwrap().push(request.clone());
            Ok(Wallet {
                address: request.address.clone(),
                balance_agrox: Some(1000.0),
                wallet_type: Some(request.wallet_type.as_str().to_string()),
            })
        }
        async fn lock_stake(&self, _request: &StakeRequest) -> crate::core::Result<StakeReceipt> {
            unimplemented!()
        }
        async fn create_token(
            &self,
            _request: &CreateTokenRequest,
        ) -> crate::core::Result<TokenReceipt> {
            unimplemented!()
        }
        async fn upload_image(&self, _upload: &ImageUpload) -> crate::core::Result<String> {
            unimplemented!()
        }
    }

    #[test]
    fn test_generated_username_shape() {
        let username = generate_username();
        let suffix = username.strip_prefix("user_").unwrap();
        assert_eq!(suffix.len(), 6);
        assert!(suffix.bytes().all(|b| BASE36.contains(&b)));
    }

    #[test]
    fn test_simulated_address_shape() {
        let address = simulated_address();
        let (head, tail) = address.split_once("...").unwrap();
        let head = head.strip_prefix("0x").unwrap();
        assert_eq!(head.len(), 12);
        assert_eq!(tail.len(), 4);
        assert!(head.bytes().chain(tail.bytes()).all(|b| HEX.contains(&b)));
    }

    #[tokio::test]
    async fn test_connect_registers_and_persists() {
        let api = FakeMarketplace::default();
        let sessions = MemorySessionStore::new();
        let mut state = AppState::new();

        let wallet = connect(&mut state, WalletType::TrustWallet, &api, &sessions)
            .await
            .unwrap();

        {
            let registered = api.registered.lock().unwrap();
            assert_eq!(registered.len(), 1);
            assert_eq!(
                registered[0].email,
                format!("{}@example.com", registered[0].username)
            );

            let connected = api.connected.lock().unwrap();
            assert_eq!(connected[0].user_id, 5);
            assert_eq!(connected[0].wallet_type, WalletType::TrustWallet);
        }

        let session = store::load_session(&sessions).await;
        assert_eq!(session.user.map(|u| u.id), Some(5));
        assert_eq!(session.wallet, Some(wallet));
        assert!(state.connected("stake").is_ok());
    }

    #[tokio::test]
    async fn test_connect_reuses_existing_user() {
        let api = FakeMarketplace::default();
        let sessions = MemorySessionStore::new();
        let mut state = AppState::new();
        state.user = Some(User {
            id: 9,
            username: "user_000001".to_string(),
            email: "user_000001@example.com".to_string(),
            extra: HashMap::new(),
        });

        connect(&mut state, WalletType::MetaMask, &api, &sessions)
            .await
            .unwrap();
        assert!(api.registered.lock().unwrap().is_empty());
        assert_eq!(api.connected.lock().unwrap()[0].user_id, 9);
    }

    #[tokio::test]
    async fn test_connect_failure_leaves_wallet_unset() {
        let api = FakeMarketplace {
            reject_wallet: true,
            ..Default::default()
        };
        let sessions = MemorySessionStore::new();
        let mut state = AppState::new();

        let err = connect(&mut state, WalletType::Binance, &api, &sessions)
            .await
            .unwrap_err();
        assert!(format!("{err:#}").contains("Wallet already linked"));
        assert!(state.wallet.is_none());
        assert!(store::load_session(&sessions).await.wallet.is_none());
    }

    #[tokio::test]
    async fn test_logout_clears_session() {
        let api = FakeMarketplace::default();
        let sessions = MemorySessionStore::new();
        let mut state = AppState::new();
        connect(&mut state, WalletType::WalletConnect, &api, &sessions)
            .await
            .unwrap();

        logout(&mut state, &sessions).await.unwrap();
        assert!(state.user.is_none());
        assert!(state.wallet.is_none());
        assert_eq!(store::load_session(&sessions).await, store::Session::default());
    }
}
