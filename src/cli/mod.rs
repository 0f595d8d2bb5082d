//! Command handlers and terminal rendering.
pub mod catalog;
pub mod leaderboard;
pub mod setup;
pub mod staking;
pub mod state;
pub mod token;
pub mod ui;
pub mod wallet;

pub use state::AppState;
