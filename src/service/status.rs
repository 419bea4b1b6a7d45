//! Diagnostics for the status overlay.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::Serialize;

use crate::source::{SourceKey, SourceValue};

/// Snapshot of one cached source.
#[derive(Debug, Clone, Serialize)]
pub struct CacheStatus {
    pub source: SourceKey,
    pub age_secs: u64,
    /// Same age, formatted as `"<n>s"`.
    pub age: String,
    /// `true` once the entry is outside its freshness window.
    pub expired: bool,
    pub window_secs: u64,
    pub fetched_at: DateTime<Utc>,
    pub value: SourceValue,
    #[serde(flatten)]
    pub counters: SourceCounters,
}

/// Per-source counters.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SourceCounters {
    /// Reads served straight from a fresh entry.
    pub hits: u64,
    /// Reads that had to wait for a fetch (started or joined).
    pub misses: u64,
    /// Adapter calls actually made.
    pub fetches: u64,
    pub failures: u64,
    /// Failed refreshes answered with an expired entry.
    pub stale_served: u64,
    pub last_error: Option<String>,
    pub last_failure_at: Option<DateTime<Utc>>,
}

impl SourceCounters {
    pub fn hit_rate(&self) -> f64 {
        let reads = self.hits + self.misses;
        if reads == 0 {
            0.0
        } else {
            self.hits as f64 / reads as f64
        }
    }
}

/// Counters for one source, as reported to the status overlay.
#[derive(Debug, Clone, Serialize)]
pub struct SourceStats {
    pub source: SourceKey,
    pub enabled: bool,
    /// Share of reads served from a fresh entry.
    pub hit_rate: f64,
    #[serde(flatten)]
    pub counters: SourceCounters,
}

/// Lock-free counters keyed by source.
#[derive(Debug, Default)]
pub(crate) struct FetchStats {
    data: DashMap<SourceKey, SourceCounters>,
}

impl FetchStats {
    pub fn hit(&self, key: SourceKey) {
        self.data.entry(key).or_default().hits += 1;
    }

    pub fn miss(&self, key: SourceKey) {
        self.data.entry(key).or_default().misses += 1;
    }

    pub fn fetch(&self, key: SourceKey) {
        self.data.entry(key).or_default().fetches += 1;
    }

    pub fn failure(&self, key: SourceKey, error: &str) {
        let mut counters = self.data.entry(key).or_default();
        counters.failures += 1;
        counters.last_error = Some(error.to_string());
        counters.last_failure_at = Some(Utc::now());
    }

    pub fn stale_served(&self, key: SourceKey) {
        self.data.entry(key).or_default().stale_served += 1;
    }

    pub fn get(&self, key: SourceKey) -> SourceCounters {
        self.data
            .get(&key)
            .map(|c| c.clone())
            .unwrap_or_default()
    }
}
