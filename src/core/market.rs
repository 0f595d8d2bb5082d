//! Marketplace service abstractions: read-side market data and write-side actions.

use crate::core::commodity::{CommodityType, Country, WalletType};
use crate::core::error::Result;
use crate::core::leaderboard::Category;
use crate::core::token::{CreateTokenRequest, Staking, Token, User, Wallet};
use crate::core::yield_calculator::{RateTable, StakingQuote};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectWalletRequest {
    pub user_id: u64,
    pub address: String,
    pub wallet_type: WalletType,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StakeRequest {
    pub user_id: u64,
    pub amount: f64,
    pub apy_type: CommodityType,
    pub duration_days: u32,
}

impl StakeRequest {
    pub fn from_quote(user_id: u64, commodity: CommodityType, quote: &StakingQuote) -> Self {
        Self {
            user_id,
            amount: quote.principal,
            apy_type: commodity,
            duration_days: quote.duration_days,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StakeReceipt {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub staking_id: Option<u64>,
    #[serde(default)]
    pub end_date: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TokenReceipt {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub token: Option<Token>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Token,
    Farm,
}

impl ImageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageKind::Token => "token",
            ImageKind::Farm => "farm",
        }
    }
}

/// An image file read from disk, ready to be uploaded.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub kind: ImageKind,
}

/// Read side of the marketplace.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    async fn fetch_leaderboard(&self, category: Category) -> Result<Vec<Token>>;
    async fn fetch_apy_rates(&self) -> Result<RateTable>;
    async fn fetch_countries(&self) -> Result<Vec<Country>>;
    async fn fetch_token_types(&self) -> Result<Vec<CommodityType>>;
    async fn fetch_user_stakings(&self, user_id: u64) -> Result<Vec<Staking>>;
}

/// Write side of the marketplace. Failures here are reported to the user.
#[async_trait]
pub trait MarketplaceActions: Send + Sync {
    async fn register_user(&self, request: &RegisterRequest) -> Result<User>;
    async fn connect_wallet(&self, request: &ConnectWalletRequest) -> Result<Wallet>;
    async fn lock_stake(&self, request: &StakeRequest) -> Result<StakeReceipt>;
    async fn create_token(&self, request: &CreateTokenRequest) -> Result<TokenReceipt>;
    /// Uploads an image and returns the path the marketplace serves it from.
    async fn upload_image(&self, upload: &ImageUpload) -> Result<String>;
}
