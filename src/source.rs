//! Collaborator capabilities consumed by the snapshot service.
//!
//! [`CandleSource`] and [`MarketContextSource`] are injected at
//! construction time, so tests substitute in-memory fakes and the binary
//! plugs in [`BinanceClient`](crate::binance::BinanceClient). Retries, if
//! any, belong to the implementations.

use async_trait::async_trait;
use tracing::warn;

use crate::Result;
use crate::models::{Candle, MarketContext, OpenInterest, Timeframe};

/// Supplies candle history for one symbol and timeframe.
#[async_trait]
pub trait CandleSource: Send + Sync {
    /// Returns candles ordered oldest to latest.
    async fn candles(&self, symbol: &str, timeframe: Timeframe) -> Result<Vec<Candle>>;
}

/// Supplies derivatives market data for one symbol.
#[async_trait]
pub trait MarketContextSource: Send + Sync {
    async fn open_interest(&self, symbol: &str) -> Result<OpenInterest>;

    async fn funding_rate(&self, symbol: &str) -> Result<f64>;
}

/// Queries open interest and funding rate concurrently.
///
/// Neither failure is fatal: each is logged and replaced by its default
/// (`{latest: 0, average: 0}` and `0.0`).
pub async fn gather_market_context(source: &dyn MarketContextSource, symbol: &str) -> MarketContext {
    let (open_interest, funding_rate) =
        tokio::join!(source.open_interest(symbol), source.funding_rate(symbol));

    let open_interest = open_interest.unwrap_or_else(|e| {
        warn!(symbol, error = %e, "Open interest unavailable, using default");
        OpenInterest::default()
    });
    let funding_rate = funding_rate.unwrap_or_else(|e| {
        warn!(symbol, error = %e, "Funding rate unavailable, using default");
        0.0
    });

    MarketContext {
        open_interest,
        funding_rate,
    }
}
