//! Cache module - per-source value store using Moka.
//!
//! ## Architecture
//!
//! - `CacheStore` - last good value per source, with its fetch time
//! - `FreshnessPolicy` - how long each source's value is served as-is
//!
//! The store keeps expired values on purpose: the data service serves
//! them when a refresh fails.
//!
//! ## Usage
//!
//! ```rust
//! use monitor_feed::cache::{CacheStore, FreshnessPolicy};
//! use monitor_feed::source::{Headlines, Payload, SourceKey};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let store = CacheStore::new(FreshnessPolicy::default());
//! store.put(Headlines(vec!["hello".into()]).into_value());
//! assert!(store.is_fresh(SourceKey::News));
//! # }
//! ```

mod policy;
mod store;

pub use policy::{FALLBACK_WINDOW, FreshnessPolicy};
pub use store::{CacheEntry, CacheStore};
