//! Core business logic: marketplace records, yield projection and leaderboards

pub mod commodity;
pub mod config;
pub mod error;
pub mod leaderboard;
pub mod log;
pub mod market;
pub mod token;
pub mod yield_calculator;

// Re-export main types for cleaner imports
pub use commodity::{CommodityType, Country, WalletType};
pub use error::{AppError, Result};
pub use leaderboard::{Category, LeaderboardEngine, LeaderboardFilter};
pub use market::{MarketDataProvider, MarketplaceActions};
pub use token::{Staking, Token, User, Wallet};
pub use yield_calculator::{RateTable, StakingQuote, compute_quote, parse_principal};
