//! Ranked token leaderboards and their filtered views.
use crate::core::commodity::{CommodityType, Country};
use crate::core::token::Token;
use anyhow::anyhow;
use std::cmp::Ordering;
use std::fmt::Display;
use std::str::FromStr;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Ranked by market capitalization.
    MarketCap,
    /// Ranked by 24 hour price change.
    Winners,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::MarketCap, Category::Winners];

    /// Value of the `category` query parameter.
    pub fn as_query(&self) -> &'static str {
        match self {
            Category::MarketCap => "market_cap",
            Category::Winners => "winners",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Category::MarketCap => "Top Market Cap",
            Category::Winners => "Top Winners (24h)",
        }
    }

    fn sort_key(&self, token: &Token) -> f64 {
        let key = match self {
            Category::MarketCap => token.market_cap,
            Category::Winners => token.price_change_24h,
        };
        if key.is_nan() { f64::NEG_INFINITY } else { key }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_query())
    }
}

impl FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "market_cap" | "marketcap" => Ok(Category::MarketCap),
            "winners" => Ok(Category::Winners),
            _ => Err(anyhow!("Invalid leaderboard category: {}", s)),
        }
    }
}

/// Sorts tokens by the category key, descending. The sort is stable so equal
/// keys keep their input order.
pub fn rank(category: Category, tokens: &mut [Token]) {
    tokens.sort_by(|a, b| {
        category
            .sort_key(b)
            .partial_cmp(&category.sort_key(a))
            .unwrap_or(Ordering::Equal)
    });
}

/// Optional constraints on commodity type and country. `None` matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeaderboardFilter {
    pub commodity: Option<CommodityType>,
    pub country: Option<Country>,
}

impl LeaderboardFilter {
    /// Builds a filter from raw selections, where empty strings mean "all".
    pub fn new(commodity: Option<&str>, country: Option<&str>) -> Self {
        fn non_empty(s: Option<&str>) -> Option<&str> {
            s.map(str::trim).filter(|s| !s.is_empty())
        }
        Self {
            commodity: non_empty(commodity).map(CommodityType::from),
            country: non_empty(country).map(Country::from),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.commodity.is_none() && self.country.is_none()
    }

    pub fn matches(&self, token: &Token) -> bool {
        self.commodity
            .as_ref()
            .is_none_or(|commodity| token.commodity == *commodity)
            && self
                .country
                .as_ref()
                .is_none_or(|country| token.country == *country)
    }
}

/// Holds the latest snapshot of each leaderboard category.
///
/// The two lists are loaded independently and are not kept consistent with
/// each other.
#[derive(Debug, Clone, Default)]
pub struct LeaderboardEngine {
    market_cap: Option<Vec<Token>>,
    winners: Option<Vec<Token>>,
}

impl LeaderboardEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the snapshot for `category`, ranking it first.
    pub fn load(&mut self, category: Category, mut tokens: Vec<Token>) {
        rank(category, &mut tokens);
        debug!("Loaded {} tokens into {} leaderboard", tokens.len(), category);
        *self.slot_mut(category) = Some(tokens);
    }

    pub fn is_loaded(&self, category: Category) -> bool {
        self.slot(category).is_some()
    }

    /// Full ranked list for `category`, empty if never loaded.
    pub fn ranked(&self, category: Category) -> &[Token] {
        self.slot(category).as_deref().unwrap_or(&[])
    }

    /// Tokens of `category` that satisfy `filter`, in ranked order.
    pub fn filter(&self, category: Category, filter: &LeaderboardFilter) -> Vec<&Token> {
        self.ranked(category)
            .iter()
            .filter(|token| filter.matches(token))
            .collect()
    }

    fn slot(&self, category: Category) -> &Option<Vec<Token>> {
        match category {
            Category::MarketCap => &self.market_cap,
            Category::Winners => &self.winners,
        }
    }

    fn slot_mut(&mut self, category: Category) -> &mut Option<Vec<Token>> {
        match category {
            Category::MarketCap => &mut self.market_cap,
            Category::Winners => &mut self.winners,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(id: u64, commodity: &str, country: &str, market_cap: f64, change: f64) -> Token {
        Token {
            id,
            name: format!("Token {id}"),
            symbol: format!("TK{id}"),
            commodity: CommodityType::from(commodity),
            country: Country::from(country),
            price: 1.0,
            price_change_24h: change,
            market_cap,
            token_image: None,
        }
    }

    fn sample() -> Vec<Token> {
        vec![
            token(1, "SOYBEAN", "BR", 1_250_000.0, 5.2),
            token(2, "COFFEE", "BR", 850_000.0, -1.8),
            token(3, "SUGARCANE", "BR", 450_000.0, 12.5),
            token(4, "LIVESTOCK", "AR", 750_000.0, 8.3),
            token(5, "COFFEE", "AR", 300_000.0, 2.0),
        ]
    }

    fn ids(tokens: &[&Token]) -> Vec<u64> {
        tokens.iter().map(|t| t.id).collect()
    }

    #[test]
    fn test_market_cap_ranking() {
        let tokens = vec![
            token(1, "SOYBEAN", "BR", 450_000.0, 0.0),
            token(2, "SOYBEAN", "BR", 1_250_000.0, 0.0),
            token(3, "SOYBEAN", "BR", 850_000.0, 0.0),
            token(4, "SOYBEAN", "BR", 750_000.0, 0.0),
        ];
        let mut engine = LeaderboardEngine::new();
        engine.load(Category::MarketCap, tokens);

        let caps: Vec<f64> = engine
            .ranked(Category::MarketCap)
            .iter()
            .map(|t| t.market_cap)
            .collect();
        assert_eq!(caps, vec![1_250_000.0, 850_000.0, 750_000.0, 450_000.0]);
    }

    #[test]
    fn test_winners_ranking_handles_negative_change() {
        let mut engine = LeaderboardEngine::new();
        engine.load(Category::Winners, sample());
        let all = engine.filter(Category::Winners, &LeaderboardFilter::default());
        assert_eq!(ids(&all), vec![3, 4, 1, 5, 2]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let mut tokens = vec![
            token(1, "CORN", "US", 100.0, 1.0),
            token(2, "CORN", "US", 200.0, 1.0),
            token(3, "CORN", "US", 100.0, 1.0),
            token(4, "CORN", "US", 200.0, 1.0),
        ];
        rank(Category::MarketCap, &mut tokens);
        let order: Vec<u64> = tokens.iter().map(|t| t.id).collect();
        assert_eq!(order, vec![2, 4, 1, 3]);

        rank(Category::Winners, &mut tokens);
        let order: Vec<u64> = tokens.iter().map(|t| t.id).collect();
        assert_eq!(order, vec![2, 4, 1, 3]);
    }

    #[test]
    fn test_ranking_is_idempotent() {
        let mut once = sample();
        rank(Category::MarketCap, &mut once);
        let mut twice = once.clone();
        rank(Category::MarketCap, &mut twice);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_nan_keys_rank_last() {
        let mut tokens = vec![
            token(1, "CORN", "US", f64::NAN, 0.0),
            token(2, "CORN", "US", 10.0, 0.0),
            token(3, "CORN", "US", 0.0, 0.0),
        ];
        rank(Category::MarketCap, &mut tokens);
        let order: Vec<u64> = tokens.iter().map(|t| t.id).collect();
        assert_eq!(order, vec![2, 3, 1]);
    }

    #[test]
    fn test_filter_composition_preserves_order() {
        let mut engine = LeaderboardEngine::new();
        engine.load(Category::MarketCap, sample());

        let everything = engine.filter(Category::MarketCap, &LeaderboardFilter::default());
        let coffee = engine.filter(
            Category::MarketCap,
            &LeaderboardFilter::new(Some("COFFEE"), None),
        );
        let coffee_ar = engine.filter(
            Category::MarketCap,
            &LeaderboardFilter::new(Some("COFFEE"), Some("AR")),
        );

        assert_eq!(ids(&everything), vec![1, 2, 4, 3, 5]);
        assert_eq!(ids(&coffee), vec![2, 5]);
        assert_eq!(ids(&coffee_ar), vec![5]);

        let is_subsequence = |sub: &[u64], full: &[u64]| {
            let mut rest = full.iter();
            sub.iter().all(|id| rest.any(|other| other == id))
        };
        assert!(is_subsequence(&ids(&coffee_ar), &ids(&coffee)));
        assert!(is_subsequence(&ids(&coffee), &ids(&everything)));
    }

    #[test]
    fn test_country_only_filter() {
        let mut engine = LeaderboardEngine::new();
        engine.load(Category::Winners, sample());
        let argentina = engine.filter(
            Category::Winners,
            &LeaderboardFilter::new(Some(""), Some("AR")),
        );
        assert_eq!(ids(&argentina), vec![4, 5]);
    }

    #[test]
    fn test_filter_with_no_matches_is_empty() {
        let mut engine = LeaderboardEngine::new();
        engine.load(Category::MarketCap, sample());
        let none = engine.filter(
            Category::MarketCap,
            &LeaderboardFilter::new(Some("RUBBER"), Some("BR")),
        );
        assert!(none.is_empty());
    }

    #[test]
    fn test_unloaded_category_is_empty() {
        let mut engine = LeaderboardEngine::new();
        engine.load(Category::MarketCap, sample());
        assert!(!engine.is_loaded(Category::Winners));
        assert!(
            engine
                .filter(Category::Winners, &LeaderboardFilter::default())
                .is_empty()
        );
    }

    #[test]
    fn test_reload_replaces_snapshot() {
        let mut engine = LeaderboardEngine::new();
        engine.load(Category::MarketCap, sample());
        engine.load(
            Category::MarketCap,
            vec![token(9, "RICE", "IN", 10.0, 0.0)],
        );
        assert_eq!(engine.ranked(Category::MarketCap).len(), 1);
        assert_eq!(engine.ranked(Category::MarketCap)[0].id, 9);
    }

    #[test]
    fn test_filter_from_raw_selection() {
        assert!(LeaderboardFilter::new(None, Some("  ")).is_empty());
        let filter = LeaderboardFilter::new(Some("coffee"), Some("br"));
        assert_eq!(filter.commodity, Some(CommodityType::Coffee));
        assert_eq!(filter.country, Some(Country::Brazil));
    }

    #[test]
    fn test_category_parsing() {
        assert_eq!("market_cap".parse::<Category>().unwrap(), Category::MarketCap);
        assert_eq!("market-cap".parse::<Category>().unwrap(), Category::MarketCap);
        assert_eq!("Winners".parse::<Category>().unwrap(), Category::Winners);
        assert!("losers".parse::<Category>().is_err());
    }
}
