pub mod cli;
pub mod core;
pub mod providers;
pub mod store;

use crate::cli::AppState;
use crate::core::config::AppConfig;
use crate::core::leaderboard::{Category, LeaderboardFilter};
use crate::core::token::TokenDraft;
use crate::core::{CommodityType, WalletType};
use crate::providers::{FallbackData, FallbackMarketData, HttpMarketplace};
use crate::store::{DiskSessionStore, MemorySessionStore, SessionStore};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// A command the shell runs against the marketplace.
#[derive(Debug, Clone)]
pub enum AppCommand {
    Rates,
    Quote {
        amount: String,
        commodity: CommodityType,
        days: u32,
    },
    Leaderboard {
        category: Option<Category>,
        commodity: Option<String>,
        country: Option<String>,
    },
    Connect {
        wallet: WalletType,
    },
    Stake {
        amount: String,
        commodity: CommodityType,
        days: u32,
    },
    CreateToken(TokenDraft),
    Stakings,
    Countries,
    Types,
    Logout,
}

impl AppCommand {
    /// Whether the command reads the leaderboards, rates or catalogs.
    fn needs_market_data(&self) -> bool {
        !matches!(
            self,
            AppCommand::Connect { .. }
                | AppCommand::CreateToken(_)
                | AppCommand::Stakings
                | AppCommand::Logout
        )
    }
}

fn open_session_store(config: &AppConfig) -> Arc<dyn SessionStore> {
    let opened = config.default_data_path().and_then(|dir| {
        DiskSessionStore::open(&dir.join("session")).map_err(anyhow::Error::from)
    });
    match opened {
        Ok(store) => Arc::new(store),
        Err(e) => {
            warn!(error = %e, "Session store unavailable, the session will not be saved");
            Arc::new(MemorySessionStore::new())
        }
    }
}

/// Runs one command and returns the state it ran against.
pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<AppState> {
    info!("AgroX starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let api = Arc::new(
        HttpMarketplace::new(&config.api.base_url, &config.api.user_agent)
            .context("Failed to create marketplace client")?,
    );
    let defaults = if config.demo_fallback {
        FallbackData::demo()
    } else {
        FallbackData::empty()
    };
    let market = FallbackMarketData::new(api.clone(), defaults);
    let sessions = open_session_store(&config);

    let mut state = AppState::new();
    state.restore_session(sessions.as_ref()).await;

    if command.needs_market_data() {
        let pb = cli::ui::new_spinner("Loading marketplace data...");
        state.refresh(&market).await;
        pb.finish_and_clear();
    }

    match command {
        AppCommand::Rates => println!("{}", cli::staking::render_rates(&state)),
        AppCommand::Quote {
            amount,
            commodity,
            days,
        } => {
            let quote = cli::staking::quote(&state, &amount, &commodity, days)?;
            println!("{}", cli::staking::render_quote(&commodity, &quote));
        }
        AppCommand::Leaderboard {
            category,
            commodity,
            country,
        } => {
            let filter = LeaderboardFilter::new(commodity.as_deref(), country.as_deref());
            cli::leaderboard::run(&state, category, &filter);
        }
        AppCommand::Connect { wallet } => {
            cli::wallet::connect(&mut state, wallet, api.as_ref(), sessions.as_ref()).await?;
        }
        AppCommand::Stake {
            amount,
            commodity,
            days,
        } => {
            cli::staking::stake(&state, &amount, &commodity, days, api.as_ref()).await?;
        }
        AppCommand::CreateToken(draft) => {
            cli::token::create(&mut state, &draft, api.as_ref(), &market).await?;
        }
        AppCommand::Stakings => {
            cli::staking::list(&state, &market).await?;
        }
        AppCommand::Countries => println!("{}", cli::catalog::render_countries(&state)),
        AppCommand::Types => println!("{}", cli::catalog::render_token_types(&state)),
        AppCommand::Logout => cli::wallet::logout(&mut state, sessions.as_ref()).await?,
    }

    Ok(state)
}
