//! Monitor Feed - cached live data for a wall of simulated CRT monitors.
//!
//! ## Architecture
//!
//! - `config` - Environment configuration
//! - `source` - Provider adapters (crypto, weather, news, images)
//! - `cache` - Last good value per source, with freshness windows
//! - `service` - Fetch orchestration: cache-first, single-flight, stale fallback
//! - `sentiment` - Market sentiment derived from crypto changes
//! - `server` - HTTP surface (axum)
//! - `utils` - Utility functions

pub mod cache;
pub mod config;
pub mod error;
pub mod sentiment;
pub mod server;
pub mod service;
pub mod source;
pub mod utils;

pub use config::Config;
pub use error::{ConfigError, FetchError};
pub use service::DataService;
