use crate::core::commodity::{CommodityType, Country};
use crate::core::error::Result;
use crate::core::leaderboard::Category;
use crate::core::market::MarketDataProvider;
use crate::core::token::{Staking, TOKEN_IMAGE_PLACEHOLDER, Token};
use crate::core::yield_calculator::RateTable;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Awaits `fetch`, substituting `default()` if it fails.
///
/// Failures are logged and never reach the caller.
pub async fn fetch_with_default<T, Fut, D>(what: &str, fetch: Fut, default: D) -> T
where
    Fut: Future<Output = Result<T>>,
    D: FnOnce() -> T,
{
    match fetch.await {
        Ok(value) => value,
        Err(e) if e.is_network() => {
            warn!(error = %e, "Failed to fetch {}, using fallback data", what);
            default()
        }
        Err(e) => {
            error!(error = %e, "Unusable {} response, using fallback data", what);
            default()
        }
    }
}

/// Datasets served while the marketplace is unreachable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FallbackData {
    pub tokens: Vec<Token>,
    pub rates: RateTable,
    pub countries: Vec<Country>,
    pub token_types: Vec<CommodityType>,
}

impl FallbackData {
    /// Demonstration data that keeps every view populated.
    pub fn demo() -> Self {
        let token = |id: u64,
                     name: &str,
                     symbol: &str,
                     commodity: CommodityType,
                     country: Country,
                     price: f64,
                     change: f64,
                     cap: f64| Token {
            id,
            name: name.to_string(),
            symbol: symbol.to_string(),
            commodity,
            country,
            price,
            price_change_24h: change,
            market_cap: cap,
            token_image: Some(TOKEN_IMAGE_PLACEHOLDER.to_string()),
        };

        Self {
            tokens: vec![
                token(
                    1,
                    "Fazenda Verde Soja",
                    "FVSOJA",
                    CommodityType::Soybean,
                    Country::Brazil,
                    1.25,
                    5.2,
                    1_250_000.0,
                ),
                token(
                    2,
                    "Café Montanhas",
                    "CAFEMT",
                    CommodityType::Coffee,
                    Country::Brazil,
                    0.85,
                    -1.8,
                    850_000.0,
                ),
                token(
                    3,
                    "Cana Dourada",
                    "CANAD",
                    CommodityType::Sugarcane,
                    Country::Brazil,
                    0.45,
                    12.5,
                    450_000.0,
                ),
                token(
                    4,
                    "Gado Premium",
                    "GADOP",
                    CommodityType::Livestock,
                    Country::Argentina,
                    0.75,
                    8.3,
                    750_000.0,
                ),
            ],
            rates: RateTable::default_table(),
            countries: ["BR", "AR", "US", "CA", "AU", "IN", "CN"]
                .into_iter()
                .map(Country::from)
                .collect(),
            token_types: CommodityType::CREATABLE.to_vec(),
        }
    }

    /// No substitute data: failed fetches leave the views empty.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Read-side wrapper that never fails: each fetch falls back to the matching
/// dataset in `defaults`.
#[derive(Clone)]
pub struct FallbackMarketData {
    inner: Arc<dyn MarketDataProvider>,
    defaults: FallbackData,
}

impl FallbackMarketData {
    pub fn new(inner: Arc<dyn MarketDataProvider>, defaults: FallbackData) -> Self {
        Self { inner, defaults }
    }

    pub async fn leaderboard(&self, category: Category) -> Vec<Token> {
        fetch_with_default(
            &format!("{category} leaderboard"),
            self.inner.fetch_leaderboard(category),
            || self.defaults.tokens.clone(),
        )
        .await
    }

    pub async fn apy_rates(&self) -> RateTable {
        fetch_with_default("APY rates", self.inner.fetch_apy_rates(), || {
            self.defaults.rates.clone()
        })
        .await
    }

    pub async fn countries(&self) -> Vec<Country> {
        fetch_with_default("countries", self.inner.fetch_countries(), || {
            self.defaults.countries.clone()
        })
        .await
    }

    pub async fn token_types(&self) -> Vec<CommodityType> {
        fetch_with_default("token types", self.inner.fetch_token_types(), || {
            self.defaults.token_types.clone()
        })
        .await
    }

    /// Stakings have no substitute dataset; failures are returned.
    pub async fn user_stakings(&self, user_id: u64) -> Result<Vec<Staking>> {
        debug!("Fetching stakings for user {}", user_id);
        self.inner.fetch_user_stakings(user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::AppError;
    use crate::core::leaderboard::LeaderboardEngine;
    use crate::core::yield_calculator::compute_quote;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Provider whose every call fails like an unreachable backend.
    struct FailingProvider {
        call_count: AtomicUsize,
    }

    impl FailingProvider {
        fn new() -> Self {
            Self {
                call_count: AtomicUsize::new(0),
            }
        }

        fn fail<T>(&self) -> Result<T> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            Err(AppError::Api {
                status: 503,
                message: "Service unavailable".to_string(),
            })
        }
    }

    #[async_trait]
    impl MarketDataProvider for FailingProvider {
        async fn fetch_leaderboard(&self, _category: Category) -> Result<Vec<Token>> {
            self.fail()
        }
        async fn fetch_apy_rates(&self) -> Result<RateTable> {
            self.fail()
        }
        async fn fetch_countries(&self) -> Result<Vec<Country>> {
            self.fail()
        }
        async fn fetch_token_types(&self) -> Result<Vec<CommodityType>> {
            self.fail()
        }
        async fn fetch_user_stakings(&self, _user_id: u64) -> Result<Vec<Staking>> {
            self.fail()
        }
    }

    #[tokio::test]
    async fn test_fetch_with_default_passes_success_through() {
        let value = fetch_with_default("numbers", async { Ok(vec![1, 2]) }, || vec![9]).await;
        assert_eq!(value, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_fetch_with_default_substitutes_on_failure() {
        let value = fetch_with_default(
            "numbers",
            async { Err(AppError::Decode("bad".to_string())) },
            || vec![9],
        )
        .await;
        assert_eq!(value, vec![9]);
    }

    #[tokio::test]
    async fn test_failed_rate_fetch_uses_default_table() {
        let provider = Arc::new(FailingProvider::new());
        let market = FallbackMarketData::new(provider.clone(), FallbackData::demo());

        let rates = market.apy_rates().await;
        assert_eq!(rates, RateTable::default_table());
        assert_eq!(provider.call_count.load(Ordering::SeqCst), 1);

        let quote = compute_quote(1000.0, &CommodityType::Soy, 365, &rates).unwrap();
        assert!((quote.projected_yield - 180.0).abs() < 1e-9);
        let quote = compute_quote(1000.0, &CommodityType::Corn, 365, &rates).unwrap();
        assert!((quote.projected_yield - 100.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_failed_leaderboard_fetch_is_ranked_by_engine() {
        let market = FallbackMarketData::new(Arc::new(FailingProvider::new()), FallbackData::demo());
        let mut engine = LeaderboardEngine::new();
        for category in Category::ALL {
            engine.load(category, market.leaderboard(category).await);
        }

        let symbols = |category| {
            engine
                .ranked(category)
                .iter()
                .map(|t| t.symbol.as_str())
                .collect::<Vec<_>>()
        };
        assert_eq!(
            symbols(Category::MarketCap),
            vec!["FVSOJA", "CAFEMT", "GADOP", "CANAD"]
        );
        assert_eq!(
            symbols(Category::Winners),
            vec!["CANAD", "GADOP", "FVSOJA", "CAFEMT"]
        );
    }

    #[tokio::test]
    async fn test_empty_defaults_leave_views_empty() {
        let market = FallbackMarketData::new(Arc::new(FailingProvider::new()), FallbackData::empty());
        assert!(market.leaderboard(Category::MarketCap).await.is_empty());
        assert!(market.apy_rates().await.is_empty());
        assert!(market.countries().await.is_empty());
        assert!(market.token_types().await.is_empty());
    }

    #[tokio::test]
    async fn test_catalog_defaults() {
        let market = FallbackMarketData::new(Arc::new(FailingProvider::new()), FallbackData::demo());
        let countries = market.countries().await;
        assert_eq!(countries.len(), 7);
        assert_eq!(countries[0], Country::Brazil);
        let types = market.token_types().await;
        assert_eq!(types.len(), 10);
        assert!(types.iter().all(CommodityType::is_known));
    }

    #[tokio::test]
    async fn test_stakings_failure_is_not_absorbed() {
        let market = FallbackMarketData::new(Arc::new(FailingProvider::new()), FallbackData::demo());
        assert!(market.user_stakings(1).await.is_err());
    }
}
