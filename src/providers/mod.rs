pub mod fallback;
pub mod http;

pub use fallback::{FallbackData, FallbackMarketData, fetch_with_default};
pub use http::HttpMarketplace;
