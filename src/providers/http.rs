use crate::core::commodity::{CommodityType, Country};
use crate::core::error::{AppError, Result};
use crate::core::leaderboard::Category;
use crate::core::market::{
    ConnectWalletRequest, ImageUpload, MarketDataProvider, MarketplaceActions, RegisterRequest,
    StakeReceipt, StakeRequest, TokenReceipt,
};
use crate::core::token::{CreateTokenRequest, Staking, Token, User, Wallet};
use crate::core::yield_calculator::RateTable;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Client for the marketplace REST API.
pub struct HttpMarketplace {
    base_url: String,
    client: reqwest::Client,
}

impl HttpMarketplace {
    /// `base_url` includes the `/api` prefix, e.g. `http://localhost:5000/api`.
    pub fn new(base_url: &str, user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder().user_agent(user_agent).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, failure: &str) -> Result<T> {
        let url = self.url(path);
        debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        read_response(response, failure).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B, failure: &str) -> Result<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        debug!("POST {}", url);
        let response = self.client.post(&url).json(body).send().await?;
        read_response(response, failure).await
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Turns a response into `T`, or into an `Api` error carrying the backend's
/// `error` message (or `failure` when it has none).
async fn read_response<T: DeserializeOwned>(
    response: reqwest::Response,
    failure: &str,
) -> Result<T> {
    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        let message = serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(|body| body.error)
            .unwrap_or_else(|| failure.to_string());
        debug!(status = status.as_u16(), %message, "Marketplace returned an error");
        return Err(AppError::Api {
            status: status.as_u16(),
            message,
        });
    }

    // Some endpoints acknowledge with an empty body
    let body = if text.trim().is_empty() { "{}" } else { text.as_str() };
    serde_json::from_str(body)
        .map_err(|e| AppError::Decode(format!("{failure}: {e}. Response: '{text}'")))
}

#[derive(Debug, Deserialize)]
struct LeaderboardResponse {
    #[serde(default)]
    tokens: Vec<Token>,
}

#[derive(Debug, Deserialize)]
struct RatesResponse {
    #[serde(default)]
    apy_rates: RateTable,
}

#[derive(Debug, Deserialize)]
struct CountriesResponse {
    #[serde(default)]
    countries: Vec<Country>,
}

#[derive(Debug, Deserialize)]
struct TypesResponse {
    #[serde(default)]
    types: Vec<CommodityType>,
}

#[derive(Debug, Deserialize)]
struct StakingsResponse {
    #[serde(default)]
    stakings: Vec<Staking>,
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    user: User,
}

#[derive(Debug, Deserialize)]
struct WalletResponse {
    wallet: Wallet,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    path: String,
}

#[async_trait]
impl MarketDataProvider for HttpMarketplace {
    async fn fetch_leaderboard(&self, category: Category) -> Result<Vec<Token>> {
        let path = format!("/token/leaderboard?category={}", category.as_query());
        let response: LeaderboardResponse = self
            .get_json(&path, "Failed to fetch leaderboard")
            .await?;
        debug!(
            "Fetched {} tokens for {} leaderboard",
            response.tokens.len(),
            category
        );
        Ok(response.tokens)
    }

    async fn fetch_apy_rates(&self) -> Result<RateTable> {
        let response: RatesResponse = self
            .get_json("/staking/apy/rates", "Failed to fetch APY rates")
            .await?;
        Ok(response.apy_rates)
    }

    async fn fetch_countries(&self) -> Result<Vec<Country>> {
        let response: CountriesResponse = self
            .get_json("/token/countries", "Failed to fetch countries")
            .await?;
        Ok(response.countries)
    }

    async fn fetch_token_types(&self) -> Result<Vec<CommodityType>> {
        let response: TypesResponse = self
            .get_json("/token/types", "Failed to fetch token types")
            .await?;
        Ok(response.types)
    }

    async fn fetch_user_stakings(&self, user_id: u64) -> Result<Vec<Staking>> {
        let response: StakingsResponse = self
            .get_json(
                &format!("/staking/user/{user_id}"),
                "Failed to fetch stakings",
            )
            .await?;
        Ok(response.stakings)
    }
}

#[async_trait]
impl MarketplaceActions for HttpMarketplace {
    async fn register_user(&self, request: &RegisterRequest) -> Result<User> {
        let response: UserResponse = self
            .post_json("/user/register", request, "Failed to register user")
            .await?;
        Ok(response.user)
    }

    async fn connect_wallet(&self, request: &ConnectWalletRequest) -> Result<Wallet> {
        let response: WalletResponse = self
            .post_json("/wallet/connect", request, "Failed to connect wallet")
            .await?;
        Ok(response.wallet)
    }

    async fn lock_stake(&self, request: &StakeRequest) -> Result<StakeReceipt> {
        self.post_json("/staking/lock", request, "Failed to stake tokens")
            .await
    }

    async fn create_token(&self, request: &CreateTokenRequest) -> Result<TokenReceipt> {
        self.post_json("/token/create", request, "Failed to create token")
            .await
    }

    async fn upload_image(&self, upload: &ImageUpload) -> Result<String> {
        let url = self.url("/token/upload/image");
        debug!("POST {} ({} bytes)", url, upload.bytes.len());
        let form = Form::new()
            .part(
                "image",
                Part::bytes(upload.bytes.clone()).file_name(upload.file_name.clone()),
            )
            .text("type", upload.kind.as_str());
        let response = self.client.post(&url).multipart(form).send().await?;
        let uploaded: UploadResponse = read_response(response, "Failed to upload image").await?;
        Ok(uploaded.path)
    }
}
