//! News headlines.
//!
//! There is no live provider for news; the adapter serves a fixed feed.

use async_trait::async_trait;
use serde::Serialize;

use super::SourceAdapter;
use crate::error::FetchError;

const STUB_HEADLINES: [&str; 5] = [
    "PROTOCOL 7: New network nodes detected in sector 4",
    "LAYER:07: Quantum encryption protocols updated",
    "WIRED: Global connectivity reaches 97.3%",
    "SYSTEM: Neural interface bandwidth increased",
    "ALERT: Anomalous data patterns in eastern grid",
];

/// Ordered list of headline strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Headlines(pub Vec<String>);

#[derive(Debug, Clone, Default)]
pub struct NewsAdapter;

#[async_trait]
impl SourceAdapter for NewsAdapter {
    type Output = Headlines;

    async fn fetch(&self) -> Result<Headlines, FetchError> {
        Ok(Headlines(
            STUB_HEADLINES.iter().map(|s| s.to_string()).collect(),
        ))
    }
}
