//! Data sources and their adapters.
//!
//! A source is one named provider. Each adapter knows how to call its
//! provider and normalize the answer into a fixed payload type; the payload
//! type is tied to its cache key through [`Payload`], so typed call sites
//! never have to inspect a [`SourceValue`] at runtime.

mod crypto;
mod http;
mod image;
mod news;
mod weather;

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::{ConfigError, FetchError};
use crate::sentiment::SentimentResult;

pub use crypto::{CoinQuote, CryptoAdapter, CryptoSnapshot};
pub use http::HttpFetcher;
pub use image::{ImageAdapter, ImageRef};
pub use news::{Headlines, NewsAdapter};
pub use weather::{WeatherAdapter, WeatherCondition, WeatherLocation, WeatherSnapshot};

/// Cache key: one per data source, plus the derived sentiment metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKey {
    Crypto,
    Weather,
    News,
    Images,
    Sentiment,
}

impl SourceKey {
    pub const ALL: [SourceKey; 5] = [
        SourceKey::Crypto,
        SourceKey::Weather,
        SourceKey::News,
        SourceKey::Images,
        SourceKey::Sentiment,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SourceKey::Crypto => "crypto",
            SourceKey::Weather => "weather",
            SourceKey::News => "news",
            SourceKey::Images => "images",
            SourceKey::Sentiment => "sentiment",
        }
    }

    /// Prefix used for per-source environment variables (`CRYPTO_TTL`, ...).
    pub fn env_prefix(self) -> &'static str {
        match self {
            SourceKey::Crypto => "CRYPTO",
            SourceKey::Weather => "WEATHER",
            SourceKey::News => "NEWS",
            SourceKey::Images => "IMAGES",
            SourceKey::Sentiment => "SENTIMENT",
        }
    }
}

impl fmt::Display for SourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SourceKey::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownSource(s.to_string()))
    }
}

/// A cached value, tagged by the source that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "source", content = "data", rename_all = "lowercase")]
pub enum SourceValue {
    Crypto(CryptoSnapshot),
    Weather(WeatherSnapshot),
    News(Headlines),
    Images(ImageRef),
    Sentiment(SentimentResult),
}

impl SourceValue {
    pub fn key(&self) -> SourceKey {
        match self {
            SourceValue::Crypto(_) => SourceKey::Crypto,
            SourceValue::Weather(_) => SourceKey::Weather,
            SourceValue::News(_) => SourceKey::News,
            SourceValue::Images(_) => SourceKey::Images,
            SourceValue::Sentiment(_) => SourceKey::Sentiment,
        }
    }
}

/// A normalized payload stored under a fixed cache key.
pub trait Payload: Clone + Send + Sync + 'static {
    const KEY: SourceKey;

    fn into_value(self) -> SourceValue;

    /// Extract the payload back out. `None` if the variant does not match.
    fn from_value(value: SourceValue) -> Option<Self>;
}

macro_rules! impl_payload {
    ($ty:ty, $variant:ident) => {
        impl Payload for $ty {
            const KEY: SourceKey = SourceKey::$variant;

            fn into_value(self) -> SourceValue {
                SourceValue::$variant(self)
            }

            fn from_value(value: SourceValue) -> Option<Self> {
                match value {
                    SourceValue::$variant(inner) => Some(inner),
                    _ => None,
                }
            }
        }
    };
}

impl_payload!(CryptoSnapshot, Crypto);
impl_payload!(WeatherSnapshot, Weather);
impl_payload!(Headlines, News);
impl_payload!(ImageRef, Images);
impl_payload!(SentimentResult, Sentiment);

/// One provider call plus normalization.
///
/// Implementations must enforce their own request deadline and must return
/// an error (never a default value) when the payload is incomplete, so the
/// data service can fall back to the last good value.
#[async_trait]
pub trait SourceAdapter: Send + Sync + 'static {
    type Output: Payload;

    async fn fetch(&self) -> Result<Self::Output, FetchError>;
}
