use crate::core::commodity::{CommodityType, Country};
use crate::core::error::{AppError, Result};
use crate::core::leaderboard::{Category, LeaderboardEngine};
use crate::core::token::{User, Wallet};
use crate::core::yield_calculator::RateTable;
use crate::providers::FallbackMarketData;
use crate::store::{self, SessionStore};
use tracing::{debug, info};

/// Everything the shell knows about the marketplace and the current user.
///
/// Owned by the command being run and passed by reference to each handler.
#[derive(Debug, Default)]
pub struct AppState {
    pub user: Option<User>,
    pub wallet: Option<Wallet>,
    pub leaderboard: LeaderboardEngine,
    pub apy_rates: RateTable,
    pub countries: Vec<Country>,
    pub token_types: Vec<CommodityType>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores the stored user and wallet, if any.
    pub async fn restore_session(&mut self, sessions: &dyn SessionStore) {
        let session = store::load_session(sessions).await;
        if let Some(user) = &session.user {
            info!("Restored session for {}", user.username);
        }
        self.user = session.user;
        self.wallet = session.wallet;
    }

    /// Fetches leaderboards, rates and catalogs concurrently.
    pub async fn refresh(&mut self, market: &FallbackMarketData) {
        let (market_cap, winners, rates, countries, token_types) = tokio::join!(
            market.leaderboard(Category::MarketCap),
            market.leaderboard(Category::Winners),
            market.apy_rates(),
            market.countries(),
            market.token_types(),
        );
        self.leaderboard.load(Category::MarketCap, market_cap);
        self.leaderboard.load(Category::Winners, winners);
        self.apy_rates = rates;
        self.countries = countries;
        self.token_types = token_types;
        debug!(
            "Refreshed state: {} rates, {} countries, {} token types",
            self.apy_rates.len(),
            self.countries.len(),
            self.token_types.len()
        );
    }

    pub async fn refresh_leaderboards(&mut self, market: &FallbackMarketData) {
        let (market_cap, winners) = tokio::join!(
            market.leaderboard(Category::MarketCap),
            market.leaderboard(Category::Winners),
        );
        self.leaderboard.load(Category::MarketCap, market_cap);
        self.leaderboard.load(Category::Winners, winners);
    }

    /// The connected user and wallet, required by every write action.
    pub fn connected(&self, action: &str) -> Result<(&User, &Wallet)> {
        match (&self.user, &self.wallet) {
            (Some(user), Some(wallet)) => Ok((user, wallet)),
            _ => Err(AppError::validation(format!(
                "connect your wallet to {action} (run `agrox connect`)"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::market::MarketDataProvider;
    use crate::core::token::{Staking, Token};
    use crate::providers::FallbackData;
    use crate::store::MemorySessionStore;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Arc;

    /// Serves a fixed leaderboard but has no rates endpoint.
    struct PartialProvider;

    #[async_trait]
    impl MarketDataProvider for PartialProvider {
        async fn fetch_leaderboard(&self, category: Category) -> Result<Vec<Token>> {
            let mut tokens = FallbackData::demo().tokens;
            tokens.truncate(2);
            if category == Category::Winners {
                tokens.reverse();
            }
            Ok(tokens)
        }
        async fn fetch_apy_rates(&self) -> Result<RateTable> {
            Err(AppError::Api {
                status: 404,
                message: "Not found".to_string(),
            })
        }
        async fn fetch_countries(&self) -> Result<Vec<Country>> {
            Ok(vec![Country::Brazil])
        }
        async fn fetch_token_types(&self) -> Result<Vec<CommodityType>> {
            Ok(vec![CommodityType::Coffee])
        }
        async fn fetch_user_stakings(&self, _user_id: u64) -> Result<Vec<Staking>> {
            Ok(vec![])
        }
    }

    #[tokio::test]
    async fn test_refresh_mixes_live_and_fallback_data() {
        let market = FallbackMarketData::new(Arc::new(PartialProvider), FallbackData::demo());
        let mut state = AppState::new();
        state.refresh(&market).await;

        assert_eq!(state.apy_rates, RateTable::default_table());
        assert_eq!(state.countries, vec![Country::Brazil]);
        assert_eq!(state.token_types, vec![CommodityType::Coffee]);

        // Winners arrive in the wrong order and are re-ranked
        let winners: Vec<&str> = state
            .leaderboard
            .ranked(Category::Winners)
            .iter()
            .map(|t| t.symbol.as_str())
            .collect();
        assert_eq!(winners, vec!["FVSOJA", "CAFEMT"]);
    }

    #[tokio::test]
    async fn test_restore_session() {
        let sessions = MemorySessionStore::new();
        let user = User {
            id: 3,
            username: "user_x1y2z3".to_string(),
            email: "user_x1y2z3@example.com".to_string(),
            extra: HashMap::new(),
        };
        store::save_user(&sessions, &user).await.unwrap();

        let mut state = AppState::new();
        state.restore_session(&sessions).await;
        assert_eq!(state.user, Some(user));
        assert!(state.wallet.is_none());
        assert!(matches!(
            state.connected("stake"),
            Err(AppError::Validation(_))
        ));
    }
}
