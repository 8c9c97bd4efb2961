//! Shared models: candles, timeframes, computed snapshots, and the Binance
//! REST payloads they are parsed from.

pub mod binance;
pub mod candle;
pub mod snapshot;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use candle::Candle;
pub use snapshot::{IndicatorSeries, MarketContext, MarketSnapshot, OpenInterest, TimeframeContext};

/// Candle sampling intervals supported by the futures API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "1m")]
    M1,
    #[serde(rename = "3m")]
    M3,
    #[serde(rename = "5m")]
    M5,
    #[serde(rename = "15m")]
    M15,
    #[serde(rename = "30m")]
    M30,
    #[serde(rename = "1h")]
    H1,
    #[serde(rename = "2h")]
    H2,
    #[serde(rename = "4h")]
    H4,
    #[serde(rename = "6h")]
    H6,
    #[serde(rename = "8h")]
    H8,
    #[serde(rename = "12h")]
    H12,
    #[serde(rename = "1d")]
    D1,
    #[serde(rename = "3d")]
    D3,
    #[serde(rename = "1w")]
    W1,
}

impl Timeframe {
    pub const ALL: [Timeframe; 14] = [
        Self::M1,
        Self::M3,
        Self::M5,
        Self::M15,
        Self::M30,
        Self::H1,
        Self::H2,
        Self::H4,
        Self::H6,
        Self::H8,
        Self::H12,
        Self::D1,
        Self::D3,
        Self::W1,
    ];

    /// Returns the wire-format interval name expected by the exchange.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::M1 => "1m",
            Self::M3 => "3m",
            Self::M5 => "5m",
            Self::M15 => "15m",
            Self::M30 => "30m",
            Self::H1 => "1h",
            Self::H2 => "2h",
            Self::H4 => "4h",
            Self::H6 => "6h",
            Self::H8 => "8h",
            Self::H12 => "12h",
            Self::D1 => "1d",
            Self::D3 => "3d",
            Self::W1 => "1w",
        }
    }

    /// Length of one candle in minutes.
    pub fn minutes(&self) -> u32 {
        match self {
            Self::M1 => 1,
            Self::M3 => 3,
            Self::M5 => 5,
            Self::M15 => 15,
            Self::M30 => 30,
            Self::H1 => 60,
            Self::H2 => 120,
            Self::H4 => 240,
            Self::H6 => 360,
            Self::H8 => 480,
            Self::H12 => 720,
            Self::D1 => 1_440,
            Self::D3 => 4_320,
            Self::W1 => 10_080,
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tf| tf.as_str() == s)
            .ok_or_else(|| format!("unknown timeframe: {s:?}"))
    }
}

/// The three sampling intervals combined into one snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeframeSet {
    /// Intraday series; price changes over the last 20 bars are read here.
    pub short: Timeframe,
    pub medium: Timeframe,
    /// Higher-timeframe trend; the previous bar anchors the 4h change.
    pub long: Timeframe,
}

impl Default for TimeframeSet {
    fn default() -> Self {
        Self {
            short: Timeframe::M5,
            medium: Timeframe::M30,
            long: Timeframe::H4,
        }
    }
}
