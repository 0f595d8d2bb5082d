//! Local persistence of the user session.
pub mod disk;
pub mod memory;

use crate::core::error::{AppError, Result};
use crate::core::token::{User, Wallet};
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

pub use disk::DiskSessionStore;
pub use memory::MemorySessionStore;

/// Key the serialized user record is stored under.
pub const USER_KEY: &str = "user";
pub const WALLET_KEY: &str = "wallet";

/// Byte-oriented key-value storage for session records.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;
    async fn put(&self, key: &str, value: &[u8]) -> Result<()>;
    async fn remove(&self, key: &str) -> Result<()>;
}

/// The records restored at startup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub user: Option<User>,
    pub wallet: Option<Wallet>,
}

/// Reads the stored session. Unreadable or corrupt records are skipped.
pub async fn load_session(store: &dyn SessionStore) -> Session {
    Session {
        user: load_record(store, USER_KEY).await,
        wallet: load_record(store, WALLET_KEY).await,
    }
}

async fn load_record<T: DeserializeOwned>(store: &dyn SessionStore, key: &str) -> Option<T> {
    let bytes = match store.get(key).await {
        Ok(Some(bytes)) => bytes,
        Ok(None) => {
            debug!("No stored {} record", key);
            return None;
        }
        Err(e) => {
            warn!(error = %e, "Failed to read stored {} record", key);
            return None;
        }
    };
    match serde_json::from_slice(&bytes) {
        Ok(record) => Some(record),
        Err(e) => {
            warn!(error = %e, "Ignoring corrupt {} record", key);
            None
        }
    }
}

async fn save_record<T: Serialize + Sync>(
    store: &dyn SessionStore,
    key: &str,
    record: &T,
) -> Result<()> {
    let bytes = serde_json::to_vec(record).map_err(|e| AppError::Session(e.to_string()))?;
    store.put(key, &bytes).await?;
    debug!("Stored {} record", key);
    Ok(())
}

pub async fn save_user(store: &dyn SessionStore, user: &User) -> Result<()> {
    save_record(store, USER_KEY, user).await
}

pub async fn save_wallet(store: &dyn SessionStore, wallet: &Wallet) -> Result<()> {
    save_record(store, WALLET_KEY, wallet).await
}

pub async fn clear_session(store: &dyn SessionStore) -> Result<()> {
    store.remove(WALLET_KEY).await?;
    store.remove(USER_KEY).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn user() -> User {
        User {
            id: 7,
            username: "user_abc123".to_string(),
            email: "user_abc123@example.com".to_string(),
            extra: HashMap::new(),
        }
    }

    #[tokio::test]
    async fn test_session_round_trip() {
        let store = MemorySessionStore::new();
        assert_eq!(load_session(&store).await, Session::default());

        save_user(&store, &user()).await.unwrap();
        let wallet = Wallet {
            address: "0x1234".to_string(),
            balance_agrox: Some(50.0),
            wallet_type: Some("metamask".to_string()),
        };
        save_wallet(&store, &wallet).await.unwrap();

        let session = load_session(&store).await;
        assert_eq!(session.user, Some(user()));
        assert_eq!(session.wallet, Some(wallet));

        clear_session(&store).await.unwrap();
        assert_eq!(load_session(&store).await, Session::default());
    }

    #[tokio::test]
    async fn test_corrupt_record_is_ignored() {
        let store = MemorySessionStore::new();
        store.put(USER_KEY, b"{not json").await.unwrap();
        assert!(load_session(&store).await.user.is_none());
    }

    #[tokio::test]
    async fn test_user_is_stored_as_json_under_fixed_key() {
        let store = MemorySessionStore::new();
        save_user(&store, &user()).await.unwrap();
        let raw = store.get(USER_KEY).await.unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_slice(&raw).unwrap();
        assert_eq!(value["username"], "user_abc123");
    }
}
