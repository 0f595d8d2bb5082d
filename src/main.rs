use agrox::core::leaderboard::Category;
use agrox::core::log::init_logging;
use agrox::core::token::TokenDraft;
use agrox::core::{CommodityType, WalletType};
use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, ValueEnum)]
enum WalletArg {
    Metamask,
    Walletconnect,
    Trustwallet,
    Binance,
}

impl From<WalletArg> for WalletType {
    fn from(arg: WalletArg) -> WalletType {
        match arg {
            WalletArg::Metamask => WalletType::MetaMask,
            WalletArg::Walletconnect => WalletType::WalletConnect,
            WalletArg::Trustwallet => WalletType::TrustWallet,
            WalletArg::Binance => WalletType::Binance,
        }
    }
}

#[derive(Args)]
struct StakeArgs {
    /// Amount of AGROX to stake
    #[arg(short, long)]
    amount: String,

    /// Commodity type whose APY applies, e.g. COFFEE
    #[arg(short = 't', long = "type")]
    commodity: String,

    /// Staking duration in days
    #[arg(short, long, default_value_t = 365)]
    days: u32,
}

#[derive(Args)]
struct CreateTokenArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    symbol: String,
    /// Commodity type, see `agrox types`
    #[arg(long = "type")]
    commodity: String,
    #[arg(long)]
    supply: String,
    #[arg(long)]
    location: String,
    /// ISO-2 country code, see `agrox countries`
    #[arg(long)]
    country: String,
    /// Farm size in hectares
    #[arg(long)]
    farm_size: Option<String>,
    #[arg(long)]
    instagram: Option<String>,
    #[arg(long)]
    website: Option<String>,
    /// Token logo
    #[arg(long)]
    image: Option<PathBuf>,
    /// Farm photo, may be repeated
    #[arg(long = "farm-image")]
    farm_images: Vec<PathBuf>,
}

impl From<CreateTokenArgs> for TokenDraft {
    fn from(args: CreateTokenArgs) -> TokenDraft {
        TokenDraft {
            name: args.name,
            symbol: args.symbol,
            commodity: args.commodity,
            initial_supply: args.supply,
            farm_location: args.location,
            country: args.country,
            farm_size: args.farm_size,
            instagram: args.instagram,
            website: args.website,
            token_image: args.image,
            farm_images: args.farm_images,
        }
    }
}

impl From<Commands> for agrox::AppCommand {
    fn from(cmd: Commands) -> agrox::AppCommand {
        match cmd {
            Commands::Rates => agrox::AppCommand::Rates,
            Commands::Quote(args) => agrox::AppCommand::Quote {
                amount: args.amount,
                commodity: CommodityType::from(args.commodity),
                days: args.days,
            },
            Commands::Leaderboard {
                category,
                commodity,
                country,
            } => agrox::AppCommand::Leaderboard {
                category,
                commodity,
                country,
            },
            Commands::Connect { wallet } => agrox::AppCommand::Connect {
                wallet: wallet.into(),
            },
            Commands::Stake(args) => agrox::AppCommand::Stake {
                amount: args.amount,
                commodity: CommodityType::from(args.commodity),
                days: args.days,
            },
            Commands::CreateToken(args) => agrox::AppCommand::CreateToken(args.into()),
            Commands::Stakings => agrox::AppCommand::Stakings,
            Commands::Countries => agrox::AppCommand::Countries,
            Commands::Types => agrox::AppCommand::Types,
            Commands::Logout => agrox::AppCommand::Logout,
            Commands::Setup { .. } => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup {
        /// Marketplace API base URL, e.g. https://host/api
        #[arg(long)]
        api_url: Option<String>,
    },
    /// Show staking APY per commodity type
    Rates,
    /// Project the yield of a stake without locking it
    Quote(StakeArgs),
    /// Show the top tokens by market cap and 24h change
    Leaderboard {
        /// market_cap or winners; both when omitted
        #[arg(long)]
        category: Option<Category>,
        /// Only tokens of this commodity type
        #[arg(short = 't', long = "type")]
        commodity: Option<String>,
        /// Only tokens from this country code
        #[arg(long)]
        country: Option<String>,
    },
    /// Connect a demo wallet, registering a user if needed
    Connect {
        #[arg(short, long, value_enum, default_value = "metamask")]
        wallet: WalletArg,
    },
    /// Lock AGROX in staking
    Stake(StakeArgs),
    /// Tokenize a farm
    CreateToken(CreateTokenArgs),
    /// List your stakings
    Stakings,
    /// List supported countries
    Countries,
    /// List token commodity types
    Types,
    /// Disconnect the wallet and forget the stored user
    Logout,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup { api_url }) => {
            agrox::cli::setup::setup(cli.config_path.as_deref(), api_url.as_deref()).map(|_| ())
        }
        Some(cmd) => agrox::run_command(cmd.into(), cli.config_path.as_deref())
            .await
            .map(|_| ()),
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
