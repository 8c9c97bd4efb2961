//! Binance USDT-M futures REST payloads.
//!
//! Decimal fields arrive as JSON strings and are parsed into [`Decimal`]
//! before conversion to `f64`, so a non-numeric field is a parse error
//! rather than a silent zero.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Deserialize;

use super::Candle;
use crate::{ConfluenceError, Result};

/// One row of `GET /fapi/v1/klines`.
///
/// Wire layout: `[openTime, open, high, low, close, volume, closeTime,
/// quoteVolume, trades, takerBuyBase, takerBuyQuote, ignore]`.
#[derive(Debug, Clone, Deserialize)]
pub struct KlineRow(
    pub i64,
    pub Decimal,
    pub Decimal,
    pub Decimal,
    pub Decimal,
    pub Decimal,
    pub i64,
    pub Decimal,
    pub u64,
    pub Decimal,
    pub Decimal,
    pub serde_json::Value,
);

impl KlineRow {
    /// Converts the wire row into a [`Candle`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfluenceError::MalformedPayload`] if a price or volume
    /// does not fit in an `f64`.
    pub fn to_candle(&self) -> Result<Candle> {
        Ok(Candle {
            open_time: self.0,
            close_time: self.6,
            open: to_f64(self.1, "open")?,
            high: to_f64(self.2, "high")?,
            low: to_f64(self.3, "low")?,
            close: to_f64(self.4, "close")?,
            volume: to_f64(self.5, "volume")?,
        })
    }
}

/// Response of `GET /fapi/v1/openInterest`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenInterestResponse {
    pub symbol: String,
    pub open_interest: Decimal,
    pub time: i64,
}

/// One bucket of `GET /futures/data/openInterestHist`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenInterestHistEntry {
    pub symbol: String,
    pub sum_open_interest: Decimal,
    /// Notional value of the open interest in USDT.
    pub sum_open_interest_value: Decimal,
    pub timestamp: i64,
}

/// Response of `GET /fapi/v1/premiumIndex`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PremiumIndexResponse {
    pub symbol: String,
    pub mark_price: Decimal,
    pub index_price: Decimal,
    pub last_funding_rate: Decimal,
    pub next_funding_time: i64,
    #[serde(default)]
    pub interest_rate: Option<Decimal>,
    pub time: i64,
}

/// Error body returned alongside non-2xx statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub code: i64,
    pub msg: String,
}

/// Parses a klines body into candles, oldest first.
///
/// # Errors
///
/// Returns [`ConfluenceError::Json`] if the body is not an array of kline
/// rows, or [`ConfluenceError::MalformedPayload`] if a value is unusable.
pub fn parse_klines(body: &str) -> Result<Vec<Candle>> {
    let rows: Vec<KlineRow> = serde_json::from_str(body)?;
    rows.iter().map(KlineRow::to_candle).collect()
}

/// Parses the latest open interest.
///
/// # Errors
///
/// Returns an error if the body does not match [`OpenInterestResponse`].
pub fn parse_open_interest(body: &str) -> Result<f64> {
    let response: OpenInterestResponse = serde_json::from_str(body)?;
    to_f64(response.open_interest, "openInterest")
}

/// Parses an open-interest history body and returns the mean of its
/// `sumOpenInterest` buckets, or `None` when the history is empty.
///
/// # Errors
///
/// Returns an error if the body does not match [`OpenInterestHistEntry`].
pub fn parse_open_interest_average(body: &str) -> Result<Option<f64>> {
    let entries: Vec<OpenInterestHistEntry> = serde_json::from_str(body)?;
    if entries.is_empty() {
        return Ok(None);
    }
    let sum: Decimal = entries.iter().map(|e| e.sum_open_interest).sum();
    let mean = sum / Decimal::from(entries.len());
    to_f64(mean, "sumOpenInterest").map(Some)
}

/// Parses the last funding rate from a premium-index body.
///
/// # Errors
///
/// Returns an error if the body does not match [`PremiumIndexResponse`].
pub fn parse_funding_rate(body: &str) -> Result<f64> {
    let response: PremiumIndexResponse = serde_json::from_str(body)?;
    to_f64(response.last_funding_rate, "lastFundingRate")
}

fn to_f64(value: Decimal, field: &str) -> Result<f64> {
    value
        .to_f64()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ConfluenceError::MalformedPayload(format!("{field} out of range: {value}")))
}
