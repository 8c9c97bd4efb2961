//! Crate-level error types.
//!
//! [`ConfluenceError`] unifies every error source (configuration, HTTP,
//! JSON, candle collaborators) behind a single enum so callers can match on
//! the variant they care about while still using the `?` operator.
//!
//! Insufficient indicator history has no variant: short series
//! degrade to `0` / empty values instead of failing.

use crate::models::Timeframe;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ConfluenceError>;

/// Top-level error type returned by all public APIs.
#[derive(Debug, thiserror::Error)]
pub enum ConfluenceError {
    /// An environment variable held an invalid value.
    #[error("configuration error: {0}")]
    Config(String),

    /// An HTTP request failed or returned a non-success status.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization or deserialization failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The exchange rejected a request with a structured error body.
    #[error("exchange error {code}: {msg}")]
    Api { code: i64, msg: String },

    /// A payload parsed but one of its fields is unusable.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// The candle source failed for one of the required timeframes.
    #[error("failed to fetch {timeframe} candles: {source}")]
    CandleFetch {
        timeframe: Timeframe,
        #[source]
        source: Box<ConfluenceError>,
    },

    /// The candle source answered with an empty series.
    #[error("no {timeframe} candles available")]
    EmptySeries { timeframe: Timeframe },

    /// A blocking aggregation task panicked or was cancelled.
    #[error("aggregation task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl ConfluenceError {
    /// Wraps a candle-source error with the timeframe that was requested.
    pub fn candle_fetch(timeframe: Timeframe, source: ConfluenceError) -> Self {
        Self::CandleFetch {
            timeframe,
            source: Box::new(source),
        }
    }

    /// Returns the timeframe a fatal candle error refers to, if any.
    pub fn timeframe(&self) -> Option<Timeframe> {
        match self {
            Self::CandleFetch { timeframe, .. } | Self::EmptySeries { timeframe } => {
                Some(*timeframe)
            }
            _ => None,
        }
    }
}
