//! Error taxonomy shared by the calculator, the API client and the session store.

use thiserror::Error;

pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum AppError {
    /// Bad user input. Raised before any network call is made.
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("{message} (HTTP {status})")]
    Api { status: u16, message: String },

    #[error("Malformed response: {0}")]
    Decode(String),

    #[error("Session store error: {0}")]
    Session(String),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation(message.into())
    }

    /// Transport failures and non-success responses are handled alike.
    pub fn is_network(&self) -> bool {
        matches!(self, AppError::Network(_) | AppError::Api { .. })
    }
}
