//! Marketplace records: tokens, users, wallets and staking positions.
use crate::core::commodity::{CommodityType, Country};
use crate::core::error::{AppError, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

pub const TOKEN_IMAGE_PLACEHOLDER: &str = "/images/token-placeholder.png";

/// Balance shown for a connected wallet the backend reports without one.
pub const DEMO_WALLET_BALANCE: f64 = 1000.0;

/// Price every new token is listed at.
pub const INITIAL_TOKEN_PRICE: f64 = 0.01;

/// Immutable snapshot of a token as reported by the marketplace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: u64,
    pub name: String,
    pub symbol: String,
    #[serde(rename = "type")]
    pub commodity: CommodityType,
    pub country: Country,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price_change_24h: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub market_cap: f64,
    #[serde(default)]
    pub token_image: Option<String>,
}

// Freshly created tokens come back with null price fields.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Token {
    pub fn image(&self) -> &str {
        self.token_image
            .as_deref()
            .filter(|path| !path.is_empty())
            .unwrap_or(TOKEN_IMAGE_PLACEHOLDER)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    pub email: String,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wallet {
    pub address: String,
    #[serde(default)]
    pub balance_agrox: Option<f64>,
    #[serde(default)]
    pub wallet_type: Option<String>,
}

impl Wallet {
    pub fn balance(&self) -> f64 {
        self.balance_agrox.unwrap_or(DEMO_WALLET_BALANCE)
    }
}

/// A staking position held by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Staking {
    pub id: u64,
    pub amount: f64,
    pub apy_type: CommodityType,
    pub apy_rate: f64,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub is_active: bool,
    #[serde(default)]
    pub rewards_earned: Option<f64>,
    #[serde(default)]
    pub current_rewards: Option<f64>,
    #[serde(default)]
    pub projected_rewards: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SocialNetworks {
    pub instagram: String,
    pub website: String,
}

/// Body of `POST /token/create`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateTokenRequest {
    pub creator_id: u64,
    pub name: String,
    pub symbol: String,
    #[serde(rename = "type")]
    pub commodity: CommodityType,
    pub initial_supply: u64,
    pub farm_location: String,
    pub country: Country,
    pub farm_size: Option<f64>,
    pub social_networks: SocialNetworks,
    pub price: f64,
    pub token_image: String,
    pub farm_images: Vec<String>,
}

/// Token creation form as entered by the user, before any upload happens.
#[derive(Debug, Clone, Default)]
pub struct TokenDraft {
    pub name: String,
    pub symbol: String,
    pub commodity: String,
    pub initial_supply: String,
    pub farm_location: String,
    pub country: String,
    pub farm_size: Option<String>,
    pub instagram: Option<String>,
    pub website: Option<String>,
    pub token_image: Option<std::path::PathBuf>,
    pub farm_images: Vec<std::path::PathBuf>,
}

impl TokenDraft {
    /// Checks the required fields and parses the numeric ones.
    pub fn validate(&self) -> Result<ValidDraft> {
        let required = [
            ("name", &self.name),
            ("symbol", &self.symbol),
            ("type", &self.commodity),
            ("initial supply", &self.initial_supply),
            ("farm location", &self.farm_location),
            ("country", &self.country),
        ];
        let missing: Vec<&str> = required
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(field, _)| *field)
            .collect();
        if !missing.is_empty() {
            return Err(AppError::validation(format!(
                "missing required fields: {}",
                missing.join(", ")
            )));
        }

        let initial_supply: u64 = self.initial_supply.trim().parse().map_err(|_| {
            AppError::validation(format!(
                "initial supply must be a whole number, got '{}'",
                self.initial_supply
            ))
        })?;
        if initial_supply == 0 {
            return Err(AppError::validation("initial supply must be positive"));
        }

        let farm_size = match self.farm_size.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(raw.parse::<f64>().map_err(|_| {
                AppError::validation(format!("farm size must be a number, got '{raw}'"))
            })?),
        };

        Ok(ValidDraft {
            name: self.name.trim().to_string(),
            symbol: self.symbol.trim().to_uppercase(),
            commodity: CommodityType::from(self.commodity.as_str()),
            initial_supply,
            farm_location: self.farm_location.trim().to_string(),
            country: Country::from(self.country.as_str()),
            farm_size,
            social_networks: SocialNetworks {
                instagram: self.instagram.clone().unwrap_or_default(),
                website: self.website.clone().unwrap_or_default(),
            },
        })
    }
}

/// A draft whose fields passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidDraft {
    pub name: String,
    pub symbol: String,
    pub commodity: CommodityType,
    pub initial_supply: u64,
    pub farm_location: String,
    pub country: Country,
    pub farm_size: Option<f64>,
    pub social_networks: SocialNetworks,
}

impl ValidDraft {
    pub fn into_request(
        self,
        creator_id: u64,
        token_image: Option<String>,
        farm_images: Vec<String>,
    ) -> CreateTokenRequest {
        CreateTokenRequest {
            creator_id,
            name: self.name,
            symbol: self.symbol,
            commodity: self.commodity,
            initial_supply: self.initial_supply,
            farm_location: self.farm_location,
            country: self.country,
            farm_size: self.farm_size,
            social_networks: self.social_networks,
            price: INITIAL_TOKEN_PRICE,
            token_image: token_image.unwrap_or_else(|| TOKEN_IMAGE_PLACEHOLDER.to_string()),
            farm_images,
        }
    }
}
