//! Closed enumerations for commodity types, countries and wallet kinds, with
//! their display metadata.
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use tracing::debug;

pub const DEFAULT_COMMODITY_ICON: &str = "/images/commodities/default.svg";

/// Category of tokenized agricultural asset.
///
/// Identifiers the client does not know are kept as `Other` so that tokens from a
/// newer backend still load, filter and round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CommodityType {
    Soybean,
    Corn,
    Sugarcane,
    Coffee,
    Livestock,
    Cotton,
    Rice,
    Wheat,
    Cocoa,
    Rubber,
    Soy,
    Basket,
    Other(String),
}

impl CommodityType {
    /// Types a new token can be created with, in form order.
    pub const CREATABLE: [CommodityType; 10] = [
        CommodityType::Soybean,
        CommodityType::Corn,
        CommodityType::Sugarcane,
        CommodityType::Coffee,
        CommodityType::Livestock,
        CommodityType::Cotton,
        CommodityType::Rice,
        CommodityType::Wheat,
        CommodityType::Cocoa,
        CommodityType::Rubber,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            CommodityType::Soybean => "SOYBEAN",
            CommodityType::Corn => "CORN",
            CommodityType::Sugarcane => "SUGARCANE",
            CommodityType::Coffee => "COFFEE",
            CommodityType::Livestock => "LIVESTOCK",
            CommodityType::Cotton => "COTTON",
            CommodityType::Rice => "RICE",
            CommodityType::Wheat => "WHEAT",
            CommodityType::Cocoa => "COCOA",
            CommodityType::Rubber => "RUBBER",
            CommodityType::Soy => "SOY",
            CommodityType::Basket => "BASKET",
            CommodityType::Other(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, CommodityType::Other(_))
    }

    /// Returns display name and emoji for the commodity
    pub fn display_info(&self) -> (&str, &'static str) {
        match self {
            CommodityType::Soybean => ("Soybean", "🌱"),
            CommodityType::Corn => ("Corn", "🌽"),
            CommodityType::Sugarcane => ("Sugarcane", "🎋"),
            CommodityType::Coffee => ("Coffee", "☕"),
            CommodityType::Livestock => ("Livestock", "🐄"),
            CommodityType::Cotton => ("Cotton", "☁️"),
            CommodityType::Rice => ("Rice", "🍚"),
            CommodityType::Wheat => ("Wheat", "🌾"),
            CommodityType::Cocoa => ("Cocoa", "🍫"),
            CommodityType::Rubber => ("Rubber", "🌳"),
            CommodityType::Soy => ("Soy", "🌱"),
            CommodityType::Basket => ("Diversity Basket", "🧺"),
            CommodityType::Other(raw) => (raw, "❓"),
        }
    }

    pub fn display_name(&self) -> &str {
        self.display_info().0
    }

    pub fn icon_path(&self) -> String {
        match self {
            CommodityType::Soy | CommodityType::Basket | CommodityType::Other(_) => {
                DEFAULT_COMMODITY_ICON.to_string()
            }
            known => format!(
                "/images/commodities/{}.svg",
                known.as_str().to_ascii_lowercase()
            ),
        }
    }
}

impl From<&str> for CommodityType {
    fn from(s: &str) -> Self {
        let id = s.trim().to_uppercase();
        match id.as_str() {
            "SOYBEAN" => CommodityType::Soybean,
            "CORN" => CommodityType::Corn,
            "SUGARCANE" => CommodityType::Sugarcane,
            "COFFEE" => CommodityType::Coffee,
            "LIVESTOCK" => CommodityType::Livestock,
            "COTTON" => CommodityType::Cotton,
            "RICE" => CommodityType::Rice,
            "WHEAT" => CommodityType::Wheat,
            "COCOA" => CommodityType::Cocoa,
            "RUBBER" => CommodityType::Rubber,
            "SOY" => CommodityType::Soy,
            "BASKET" => CommodityType::Basket,
            _ => {
                debug!("Unknown commodity type '{}', keeping it as {}", s, id);
                CommodityType::Other(id)
            }
        }
    }
}

impl From<String> for CommodityType {
    fn from(s: String) -> Self {
        CommodityType::from(s.as_str())
    }
}

impl From<CommodityType> for String {
    fn from(c: CommodityType) -> Self {
        match c {
            CommodityType::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl Display for CommodityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// ISO-2 country code of the farm backing a token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Country {
    Brazil,
    Argentina,
    UnitedStates,
    Canada,
    Australia,
    India,
    China,
    Other(String),
}

impl Country {
    pub fn code(&self) -> &str {
        match self {
            Country::Brazil => "BR",
            Country::Argentina => "AR",
            Country::UnitedStates => "US",
            Country::Canada => "CA",
            Country::Australia => "AU",
            Country::India => "IN",
            Country::China => "CN",
            Country::Other(code) => code,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Country::Brazil => "Brazil",
            Country::Argentina => "Argentina",
            Country::UnitedStates => "United States",
            Country::Canada => "Canada",
            Country::Australia => "Australia",
            Country::India => "India",
            Country::China => "China",
            Country::Other(code) => code,
        }
    }
}

impl From<&str> for Country {
    fn from(s: &str) -> Self {
        let code = s.trim().to_uppercase();
        match code.as_str() {
            "BR" => Country::Brazil,
            "AR" => Country::Argentina,
            "US" => Country::UnitedStates,
            "CA" => Country::Canada,
            "AU" => Country::Australia,
            "IN" => Country::India,
            "CN" => Country::China,
            _ => {
                debug!("Unknown country code '{}', keeping it as {}", s, code);
                Country::Other(code)
            }
        }
    }
}

impl From<String> for Country {
    fn from(s: String) -> Self {
        Country::from(s.as_str())
    }
}

impl From<Country> for String {
    fn from(c: Country) -> Self {
        match c {
            Country::Other(code) => code,
            known => known.code().to_string(),
        }
    }
}

impl Display for Country {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Wallet software a user can connect with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WalletType {
    MetaMask,
    WalletConnect,
    TrustWallet,
    Binance,
}

impl WalletType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WalletType::MetaMask => "metamask",
            WalletType::WalletConnect => "walletconnect",
            WalletType::TrustWallet => "trustwallet",
            WalletType::Binance => "binance",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            WalletType::MetaMask => "MetaMask",
            WalletType::WalletConnect => "WalletConnect",
            WalletType::TrustWallet => "Trust Wallet",
            WalletType::Binance => "Binance Wallet",
        }
    }
}
