//! Snapshot service: wires the collaborators to the pure core.

use std::sync::Arc;

use tracing::{debug, info};

use crate::aggregate::{SeriesProfile, aggregate};
use crate::models::{Candle, MarketSnapshot, Timeframe, TimeframeSet};
use crate::snapshot::{PriceChanges, assemble};
use crate::source::{CandleSource, MarketContextSource, gather_market_context};
use crate::symbol::normalize;
use crate::{ConfluenceError, Result};

/// Builds [`MarketSnapshot`]s from injected candle and market-context
/// sources.
#[derive(Clone)]
pub struct SnapshotService {
    candles: Arc<dyn CandleSource>,
    market: Arc<dyn MarketContextSource>,
    timeframes: TimeframeSet,
}

impl SnapshotService {
    /// Creates a service over the default 5m / 30m / 4h timeframes.
    pub fn new(candles: Arc<dyn CandleSource>, market: Arc<dyn MarketContextSource>) -> Self {
        Self {
            candles,
            market,
            timeframes: TimeframeSet::default(),
        }
    }

    /// Overrides the timeframes combined into each snapshot.
    #[must_use]
    pub fn with_timeframes(mut self, timeframes: TimeframeSet) -> Self {
        self.timeframes = timeframes;
        self
    }

    pub fn timeframes(&self) -> TimeframeSet {
        self.timeframes
    }

    /// Fetches, aggregates and assembles a snapshot for `symbol`.
    ///
    /// The three candle series and the market context are fetched
    /// concurrently; each series is then aggregated on its own blocking
    /// task, which takes ownership of its candles.
    ///
    /// # Errors
    ///
    /// Returns [`ConfluenceError::CandleFetch`] or
    /// [`ConfluenceError::EmptySeries`] naming the failed timeframe, or
    /// [`ConfluenceError::Task`] if an aggregation task panics. Market
    /// context failures never fail the snapshot.
    pub async fn snapshot(&self, symbol: &str) -> Result<MarketSnapshot> {
        let symbol = normalize(symbol);
        let tf = self.timeframes;

        let (series, context) = tokio::join!(
            async {
                tokio::try_join!(
                    self.fetch(&symbol, tf.short),
                    self.fetch(&symbol, tf.medium),
                    self.fetch(&symbol, tf.long),
                )
            },
            gather_market_context(self.market.as_ref(), &symbol),
        );
        let (short, medium, long) = series?;

        let prices = PriceChanges::from_series(&short, &long);

        let intraday =
            tokio::task::spawn_blocking(move || aggregate(tf.short, &short, SeriesProfile::Intraday));
        let medium_term =
            tokio::task::spawn_blocking(move || aggregate(tf.medium, &medium, SeriesProfile::Trend));
        let long_term =
            tokio::task::spawn_blocking(move || aggregate(tf.long, &long, SeriesProfile::Trend));
        let (intraday, medium_term, long_term) = tokio::try_join!(intraday, medium_term, long_term)?;

        let snapshot = assemble(symbol, prices, intraday, medium_term, long_term, context);
        info!(
            symbol = %snapshot.symbol,
            price = snapshot.current_price,
            change_1h = snapshot.price_change_1h,
            change_4h = snapshot.price_change_4h,
            "Built market snapshot"
        );
        Ok(snapshot)
    }

    /// Fetches one series, tagging any failure with its timeframe.
    async fn fetch(&self, symbol: &str, timeframe: Timeframe) -> Result<Vec<Candle>> {
        let candles = self
            .candles
            .candles(symbol, timeframe)
            .await
            .map_err(|e| ConfluenceError::candle_fetch(timeframe, e))?;
        if candles.is_empty() {
            return Err(ConfluenceError::EmptySeries { timeframe });
        }
        debug!(symbol, timeframe = timeframe.as_str(), count = candles.len(), "Candles ready");
        Ok(candles)
    }
}
