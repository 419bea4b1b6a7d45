//! Market sentiment derived from the crypto snapshot.
//!
//! BTC moves are weighted more heavily than ETH, the weighted average is
//! amplified for visual range and clamped to [-100, 100], then mapped to one
//! of five bands.

use serde::Serialize;

use crate::source::CryptoSnapshot;

const BTC_WEIGHT: f64 = 2.0;
const ETH_WEIGHT: f64 = 1.5;
const AMPLIFICATION: f64 = 5.0;
const SCORE_LIMIT: f64 = 100.0;

/// Ordered sentiment bands, most bullish first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SentimentBand {
    #[serde(rename = "VERY BULLISH")]
    VeryBullish,
    #[serde(rename = "BULLISH")]
    Bullish,
    #[serde(rename = "NEUTRAL")]
    Neutral,
    #[serde(rename = "BEARISH")]
    Bearish,
    #[serde(rename = "VERY BEARISH")]
    VeryBearish,
}

impl SentimentBand {
    /// Thresholds are strict: a score of exactly 50 is `Bullish`.
    pub fn from_score(score: f64) -> Self {
        if score > 50.0 {
            Self::VeryBullish
        } else if score > 20.0 {
            Self::Bullish
        } else if score > -20.0 {
            Self::Neutral
        } else if score > -50.0 {
            Self::Bearish
        } else {
            Self::VeryBearish
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::VeryBullish => "VERY BULLISH",
            Self::Bullish => "BULLISH",
            Self::Neutral => "NEUTRAL",
            Self::Bearish => "BEARISH",
            Self::VeryBearish => "VERY BEARISH",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::VeryBullish => "#00FF00",
            Self::Bullish => "#40FF40",
            Self::Neutral => "#4A8FBD",
            Self::Bearish => "#FF4040",
            Self::VeryBearish => "#FF0000",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentResult {
    pub score: f64,
    #[serde(rename = "label")]
    pub band: SentimentBand,
    pub color: &'static str,
}

impl SentimentResult {
    pub fn from_score(score: f64) -> Self {
        let band = SentimentBand::from_score(score);
        Self {
            score,
            band,
            color: band.color(),
        }
    }

    /// Shown when no crypto data is available.
    pub fn neutral() -> Self {
        Self::from_score(0.0)
    }

    pub fn from_snapshot(snapshot: &CryptoSnapshot) -> Self {
        Self::from_score(score_from_changes(
            snapshot.btc.change_or_zero(),
            snapshot.eth.change_or_zero(),
        ))
    }
}

/// Weighted, amplified, clamped score from 24h percentage changes.
pub fn score_from_changes(btc_change: f64, eth_change: f64) -> f64 {
    let btc = btc_change * BTC_WEIGHT;
    let eth = eth_change * ETH_WEIGHT;
    let raw = (btc + eth) / 2.0 * AMPLIFICATION;

    if raw.is_nan() {
        return 0.0;
    }
    raw.clamp(-SCORE_LIMIT, SCORE_LIMIT)
}
