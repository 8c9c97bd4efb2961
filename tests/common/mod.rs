//! In-memory collaborators and candle generators shared by the service
//! tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use confluence::models::{Candle, OpenInterest, Timeframe};
use confluence::source::{CandleSource, MarketContextSource};
use confluence::{ConfluenceError, Result};

/// Candle source answering from a fixed per-timeframe table and recording
/// every requested symbol.
#[derive(Default)]
pub struct FixedCandles {
    series: HashMap<Timeframe, Vec<Candle>>,
    failing: Option<Timeframe>,
    requested: Mutex<Vec<(String, Timeframe)>>,
}

impl FixedCandles {
    /// Serves the three series on the default 5m / 30m / 4h timeframes.
    pub fn new(short: Vec<Candle>, medium: Vec<Candle>, long: Vec<Candle>) -> Self {
        Self::empty()
            .with_series(Timeframe::M5, short)
            .with_series(Timeframe::M30, medium)
            .with_series(Timeframe::H4, long)
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_series(mut self, timeframe: Timeframe, candles: Vec<Candle>) -> Self {
        self.series.insert(timeframe, candles);
        self
    }

    /// Makes every request for `timeframe` fail.
    pub fn failing_on(mut self, timeframe: Timeframe) -> Self {
        self.failing = Some(timeframe);
        self
    }

    pub fn requested_symbols(&self) -> Vec<String> {
        self.requested.lock().unwrap().iter().map(|(s, _)| s.clone()).collect()
    }

    /// Requested timeframes, sorted so concurrent fetch order does not matter.
    pub fn requested_timeframes(&self) -> Vec<Timeframe> {
        let mut timeframes: Vec<Timeframe> =
            self.requested.lock().unwrap().iter().map(|(_, tf)| *tf).collect();
        timeframes.sort_by_key(|tf| tf.minutes());
        timeframes
    }
}

#[async_trait]
impl CandleSource for FixedCandles {
    async fn candles(&self, symbol: &str, timeframe: Timeframe) -> Result<Vec<Candle>> {
        self.requested
            .lock()
            .unwrap()
            .push((symbol.to_string(), timeframe));
        if self.failing == Some(timeframe) {
            return Err(ConfluenceError::Api {
                code: -1003,
                msg: "Too many requests.".to_string(),
            });
        }
        Ok(self.series.get(&timeframe).cloned().unwrap_or_default())
    }
}

/// Market-context source with fixed answers.
pub struct FixedMarket {
    pub open_interest: OpenInterest,
    pub funding_rate: f64,
}

#[async_trait]
impl MarketContextSource for FixedMarket {
    async fn open_interest(&self, _symbol: &str) -> Result<OpenInterest> {
        Ok(self.open_interest)
    }

    async fn funding_rate(&self, _symbol: &str) -> Result<f64> {
        Ok(self.funding_rate)
    }
}

/// Market-context source whose every query fails.
pub struct BrokenMarket;

#[async_trait]
impl MarketContextSource for BrokenMarket {
    async fn open_interest(&self, _symbol: &str) -> Result<OpenInterest> {
        Err(ConfluenceError::MalformedPayload("openInterest".to_string()))
    }

    async fn funding_rate(&self, _symbol: &str) -> Result<f64> {
        Err(ConfluenceError::Api {
            code: -1121,
            msg: "Invalid symbol.".to_string(),
        })
    }
}

/// Flat candles at `price`.
pub fn constant_candles(n: usize, price: f64) -> Vec<Candle> {
    (0..n)
        .map(|_| Candle::from_ohlcv(price, price, price, price, 100.0))
        .collect()
}

/// A rising zig-zag with a one-point high/low spread.
pub fn zigzag_candles(n: usize, start: f64) -> Vec<Candle> {
    (0..n)
        .map(|i| {
            let drift = i as f64 * 0.5;
            let wiggle = if i % 2 == 0 { 1.25 } else { -0.75 };
            let close = start + drift + wiggle;
            Candle::from_ohlcv(close - 0.25, close + 1.0, close - 1.0, close, 50.0 + i as f64)
        })
        .collect()
}

/// Canned HTTP response for one request path.
#[derive(Debug, Clone)]
pub struct Route {
    pub path: &'static str,
    pub status: u16,
    pub body: String,
}

impl Route {
    pub fn new(path: &'static str, status: u16, body: impl Into<String>) -> Self {
        Self {
            path,
            status,
            body: body.into(),
        }
    }
}

/// Minimal HTTP/1.1 server on a loopback port answering from fixed routes.
///
/// Unknown paths get a plain-text 404. Every request target (path and
/// query) is recorded.
pub struct StubServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl StubServer {
    pub async fn start(routes: Vec<Route>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let routes = Arc::new(routes);
        let requests = Arc::new(Mutex::new(Vec::new()));

        let recorded = requests.clone();
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let routes = routes.clone();
                let recorded = recorded.clone();
                tokio::spawn(async move { respond(stream, &routes, &recorded).await });
            }
        });

        Self { base_url, requests }
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

async fn respond(mut stream: TcpStream, routes: &[Route], recorded: &Mutex<Vec<String>>) {
    let mut request = Vec::new();
    let mut buf = [0u8; 1024];
    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut buf).await {
            Ok(0) | Err(_) => return,
            Ok(n) => request.extend_from_slice(&buf[..n]),
        }
    }

    let head = String::from_utf8_lossy(&request);
    let target = head.split_whitespace().nth(1).unwrap_or("/").to_string();
    let path = target.split('?').next().unwrap_or("/");
    recorded.lock().unwrap().push(target.clone());

    let (status, body) = routes
        .iter()
        .find(|r| r.path == path)
        .map_or((404, "not found".to_string()), |r| (r.status, r.body.clone()));
    let reason = match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        429 => "Too Many Requests",
        _ => "Error",
    };
    let response = format!(
        "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    let _ = stream.write_all(response.as_bytes()).await;
    let _ = stream.shutdown().await;
}
