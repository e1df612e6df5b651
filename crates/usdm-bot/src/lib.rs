//! CLI order bot for Binance USDT-M futures testnet.
//!
//! Parses one order from the command line, runs it through the
//! normalization pipeline, and submits it with retries.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;

pub use app::Application;
pub use cli::Args;
pub use config::AppConfig;
pub use error::{AppError, AppResult};
