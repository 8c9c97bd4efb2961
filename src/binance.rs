//! Binance USDT-M futures REST client.
//!
//! Implements [`CandleSource`] and [`MarketContextSource`] over the public
//! market-data endpoints. Only public data is requested, so no request is
//! signed; an API key, when configured, is attached as `X-MBX-APIKEY` for
//! the higher rate-limit tier.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::{debug, warn};

use crate::Result;
use crate::config::BinanceConfig;
use crate::models::binance::{
    ApiErrorResponse, parse_funding_rate, parse_klines, parse_open_interest,
    parse_open_interest_average,
};
use crate::models::{Candle, OpenInterest, Timeframe};
use crate::source::{CandleSource, MarketContextSource};

const KLINES_PATH: &str = "/fapi/v1/klines";
const OPEN_INTEREST_PATH: &str = "/fapi/v1/openInterest";
const OPEN_INTEREST_HIST_PATH: &str = "/futures/data/openInterestHist";
const PREMIUM_INDEX_PATH: &str = "/fapi/v1/premiumIndex";

/// HTTP client for the futures market-data endpoints.
#[derive(Debug, Clone)]
pub struct BinanceClient {
    http: reqwest::Client,
    rest_url: String,
    kline_limit: u16,
    oi_period: Timeframe,
    oi_limit: u16,
}

impl BinanceClient {
    /// Builds a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfluenceError::Config`](crate::ConfluenceError::Config)
    /// if the API key is not a valid header value, or
    /// [`ConfluenceError::Http`](crate::ConfluenceError::Http) if the
    /// underlying client cannot be built.
    pub fn new(config: &BinanceConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(key) = &config.api_key {
            let mut value = HeaderValue::from_str(key).map_err(|e| {
                crate::ConfluenceError::Config(format!("invalid BINANCE_API_KEY: {e}"))
            })?;
            value.set_sensitive(true);
            headers.insert("X-MBX-APIKEY", value);
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            rest_url: config.rest_url.clone(),
            kline_limit: config.kline_limit,
            oi_period: config.oi_period,
            oi_limit: config.oi_limit,
        })
    }

    /// Sends a GET request and returns the body of a successful response.
    ///
    /// Non-2xx responses carrying `{"code", "msg"}` become
    /// [`ConfluenceError::Api`](crate::ConfluenceError::Api).
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<String> {
        let url = format!("{}{path}", self.rest_url);
        debug!(path, ?query, "GET");

        let response = self.http.get(&url).query(query).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response.text().await?);
        }

        let body = response.text().await.unwrap_or_default();
        match serde_json::from_str::<ApiErrorResponse>(&body) {
            Ok(err) => Err(crate::ConfluenceError::Api {
                code: err.code,
                msg: err.msg,
            }),
            Err(_) => Err(crate::ConfluenceError::MalformedPayload(format!(
                "{path} returned {status}: {body}"
            ))),
        }
    }
}

#[async_trait]
impl CandleSource for BinanceClient {
    async fn candles(&self, symbol: &str, timeframe: Timeframe) -> Result<Vec<Candle>> {
        let body = self
            .get(
                KLINES_PATH,
                &[
                    ("symbol", symbol.to_string()),
                    ("interval", timeframe.as_str().to_string()),
                    ("limit", self.kline_limit.to_string()),
                ],
            )
            .await?;
        let candles = parse_klines(&body)?;
        debug!(symbol, timeframe = timeframe.as_str(), count = candles.len(), "Fetched candles");
        Ok(candles)
    }
}

#[async_trait]
impl MarketContextSource for BinanceClient {
    /// Latest open interest plus the mean over the configured history.
    ///
    /// Only the latest value is required. A failed or empty history falls
    /// back to the latest value as the average.
    async fn open_interest(&self, symbol: &str) -> Result<OpenInterest> {
        let symbol_query = [("symbol", symbol.to_string())];
        let hist_query = [
            ("symbol", symbol.to_string()),
            ("period", self.oi_period.as_str().to_string()),
            ("limit", self.oi_limit.to_string()),
        ];

        let (latest_body, hist_body) = tokio::join!(
            self.get(OPEN_INTEREST_PATH, &symbol_query),
            self.get(OPEN_INTEREST_HIST_PATH, &hist_query),
        );

        let latest = parse_open_interest(&latest_body?)?;
        let average = match hist_body.and_then(|body| parse_open_interest_average(&body)) {
            Ok(Some(average)) => average,
            Ok(None) => {
                warn!(symbol, "Open interest history empty, averaging over latest");
                latest
            }
            Err(e) => {
                warn!(symbol, error = %e, "Open interest history unavailable, averaging over latest");
                latest
            }
        };
        Ok(OpenInterest { latest, average })
    }

    async fn funding_rate(&self, symbol: &str) -> Result<f64> {
        let body = self
            .get(PREMIUM_INDEX_PATH, &[("symbol", symbol.to_string())])
            .await?;
        parse_funding_rate(&body)
    }
}
