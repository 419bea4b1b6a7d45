//! Freshness windows.

use std::collections::HashMap;
use std::time::Duration;

use crate::source::SourceKey;

/// Window applied to keys without an explicit one.
pub const FALLBACK_WINDOW: Duration = Duration::from_secs(60);

/// Maximum age at which a cached value is served without refetching.
#[derive(Debug, Clone)]
pub struct FreshnessPolicy {
    windows: HashMap<SourceKey, Duration>,
    fallback: Duration,
}

impl Default for FreshnessPolicy {
    fn default() -> Self {
        Self::uniform(FALLBACK_WINDOW)
            .with_window(SourceKey::Crypto, Duration::from_secs(30))
            .with_window(SourceKey::Weather, Duration::from_secs(300)) // 5 minutes
            .with_window(SourceKey::News, Duration::from_secs(600)) // 10 minutes
            .with_window(SourceKey::Images, Duration::from_secs(120)) // 2 minutes
            .with_window(SourceKey::Sentiment, Duration::from_secs(10))
    }
}

impl FreshnessPolicy {
    /// Same window for every key.
    pub fn uniform(window: Duration) -> Self {
        Self {
            windows: HashMap::new(),
            fallback: window,
        }
    }

    /// Set the window for one key (builder pattern).
    #[must_use]
    pub fn with_window(mut self, key: SourceKey, window: Duration) -> Self {
        self.windows.insert(key, window);
        self
    }

    /// Set the window used for keys without their own.
    #[must_use]
    pub fn fallback(mut self, window: Duration) -> Self {
        self.fallback = window;
        self
    }

    pub fn window(&self, key: SourceKey) -> Duration {
        self.windows.get(&key).copied().unwrap_or(self.fallback)
    }

    /// `true` while `age` is strictly below the key's window.
    pub fn is_fresh(&self, key: SourceKey, age: Duration) -> bool {
        age < self.window(key)
    }
}
