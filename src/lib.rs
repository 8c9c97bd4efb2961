//! Multi-timeframe technical-indicator snapshots for perpetual futures.
//!
//! Turns candle series at three sampling intervals into one immutable
//! [`MarketSnapshot`](models::MarketSnapshot): EMA, MACD, RSI, ATR and ADX
//! per timeframe, cross-timeframe price changes, open interest and funding
//! rate. Candle and market-context data come from injected collaborators;
//! [`binance::BinanceClient`] is the bundled REST implementation.

pub mod aggregate;
pub mod binance;
pub mod config;
pub mod error;
pub mod indicators;
pub mod models;
pub mod service;
pub mod snapshot;
pub mod source;
pub mod symbol;

pub use error::{ConfluenceError, Result};
pub use service::SnapshotService;
