//! Application configuration loaded from environment variables.
//!
//! Every variable is optional:
//! - `BINANCE_REST_URL`: futures REST endpoint (default `https://fapi.binance.com`)
//! - `BINANCE_API_KEY`: sent as `X-MBX-APIKEY` when present
//! - `CONFLUENCE_KLINE_LIMIT`: candles requested per timeframe (1..=1500)
//! - `CONFLUENCE_OI_PERIOD`: open-interest history bucket (e.g. `5m`)
//! - `CONFLUENCE_OI_LIMIT`: open-interest history points averaged (1..=500)
//! - `CONFLUENCE_HTTP_TIMEOUT_SECS`: per-request timeout
//!
//! Credentials never live in source text.

use std::str::FromStr;
use std::time::Duration;

use crate::models::Timeframe;

/// Default public futures REST endpoint.
const DEFAULT_REST_URL: &str = "https://fapi.binance.com";

const DEFAULT_KLINE_LIMIT: u16 = 200;
const MAX_KLINE_LIMIT: u16 = 1500;
const DEFAULT_OI_LIMIT: u16 = 30;
const MAX_OI_LIMIT: u16 = 500;
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Top-level application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub binance: BinanceConfig,
}

/// Binance-specific configuration values.
#[derive(Debug, Clone)]
pub struct BinanceConfig {
    pub rest_url: String,
    pub api_key: Option<String>,
    /// Number of candles fetched per timeframe.
    pub kline_limit: u16,
    /// Bucket size of the open-interest history used for the average.
    pub oi_period: Timeframe,
    /// Number of history buckets averaged.
    pub oi_limit: u16,
    pub timeout: Duration,
}

impl Default for BinanceConfig {
    fn default() -> Self {
        Self {
            rest_url: DEFAULT_REST_URL.to_string(),
            api_key: None,
            kline_limit: DEFAULT_KLINE_LIMIT,
            oi_period: Timeframe::M5,
            oi_limit: DEFAULT_OI_LIMIT,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Bucket sizes accepted by the open-interest history endpoint.
pub const OPEN_INTEREST_PERIODS: [Timeframe; 9] = [
    Timeframe::M5,
    Timeframe::M15,
    Timeframe::M30,
    Timeframe::H1,
    Timeframe::H2,
    Timeframe::H4,
    Timeframe::H6,
    Timeframe::H12,
    Timeframe::D1,
];

/// Loads the application configuration from environment variables.
///
/// # Errors
///
/// Returns [`ConfluenceError::Config`](crate::ConfluenceError::Config) if a
/// numeric variable does not parse or falls outside its range, or if the
/// open-interest period is not one of [`OPEN_INTEREST_PERIODS`].
pub fn fetch_config() -> crate::Result<AppConfig> {
    let rest_url = non_empty_var("BINANCE_REST_URL")
        .map(|url| url.trim_end_matches('/').to_string())
        .unwrap_or_else(|| DEFAULT_REST_URL.to_string());

    let api_key = non_empty_var("BINANCE_API_KEY");

    let kline_limit = bounded_var("CONFLUENCE_KLINE_LIMIT", DEFAULT_KLINE_LIMIT, MAX_KLINE_LIMIT)?;
    let oi_limit = bounded_var("CONFLUENCE_OI_LIMIT", DEFAULT_OI_LIMIT, MAX_OI_LIMIT)?;

    let oi_period = match non_empty_var("CONFLUENCE_OI_PERIOD") {
        Some(raw) => {
            let period = Timeframe::from_str(&raw).map_err(crate::ConfluenceError::Config)?;
            if !OPEN_INTEREST_PERIODS.contains(&period) {
                return Err(crate::ConfluenceError::Config(format!(
                    "CONFLUENCE_OI_PERIOD {period} is not an open-interest history period"
                )));
            }
            period
        }
        None => Timeframe::M5,
    };

    let timeout_secs = match non_empty_var("CONFLUENCE_HTTP_TIMEOUT_SECS") {
        Some(raw) => match raw.parse::<u64>() {
            Ok(secs) if secs > 0 => secs,
            _ => {
                return Err(crate::ConfluenceError::Config(format!(
                    "CONFLUENCE_HTTP_TIMEOUT_SECS must be a positive integer, got {raw:?}"
                )));
            }
        },
        None => DEFAULT_TIMEOUT_SECS,
    };

    Ok(AppConfig {
        binance: BinanceConfig {
            rest_url,
            api_key,
            kline_limit,
            oi_period,
            oi_limit,
            timeout: Duration::from_secs(timeout_secs),
        },
    })
}

/// Returns the value of an environment variable if it exists and is non-empty.
fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

/// Parses an optional integer variable constrained to `1..=max`.
fn bounded_var(name: &str, default: u16, max: u16) -> crate::Result<u16> {
    let Some(raw) = non_empty_var(name) else {
        return Ok(default);
    };
    match raw.parse::<u16>() {
        Ok(value) if (1..=max).contains(&value) => Ok(value),
        _ => Err(crate::ConfluenceError::Config(format!(
            "{name} must be an integer in 1..={max}, got {raw:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_VARS: [&str; 6] = [
        "BINANCE_REST_URL",
        "BINANCE_API_KEY",
        "CONFLUENCE_KLINE_LIMIT",
        "CONFLUENCE_OI_PERIOD",
        "CONFLUENCE_OI_LIMIT",
        "CONFLUENCE_HTTP_TIMEOUT_SECS",
    ];

    /// Helper that temporarily sets env vars, runs `f`, then restores originals.
    ///
    /// Variables not listed in `vars` are cleared for the duration of `f`.
    ///
    /// # Safety
    ///
    /// Tests using this helper must not race with other threads reading
    /// these env vars; the shared lock below serializes them.
    fn with_env<F: FnOnce()>(vars: &[(&str, &str)], f: F) {
        static LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
        let _guard = LOCK.lock().unwrap_or_else(|e| e.into_inner());

        let originals: Vec<(&str, Option<String>)> = ALL_VARS
            .iter()
            .map(|k| (*k, std::env::var(k).ok()))
            .collect();

        for k in ALL_VARS {
            // SAFETY: serialized by LOCK.
            unsafe {
                match vars.iter().find(|(name, _)| *name == k) {
                    Some((_, val)) => std::env::set_var(k, val),
                    None => std::env::remove_var(k),
                }
            }
        }

        f();

        for (k, original) in originals {
            // SAFETY: restoring original values under the same lock.
            unsafe {
                match original {
                    Some(val) => std::env::set_var(k, val),
                    None => std::env::remove_var(k),
                }
            }
        }
    }

    #[test]
    fn defaults_without_env_vars() {
        with_env(&[], || {
            let config = fetch_config().unwrap();
            assert_eq!(config.binance.rest_url, DEFAULT_REST_URL);
            assert!(config.binance.api_key.is_none());
            assert_eq!(config.binance.kline_limit, 200);
            assert_eq!(config.binance.oi_period, Timeframe::M5);
            assert_eq!(config.binance.oi_limit, 30);
            assert_eq!(config.binance.timeout, Duration::from_secs(10));
        });
    }

    #[test]
    fn custom_values_from_env() {
        with_env(
            &[
                ("BINANCE_REST_URL", "https://testnet.binancefuture.com/"),
                ("BINANCE_API_KEY", "test-key"),
                ("CONFLUENCE_KLINE_LIMIT", "500"),
                ("CONFLUENCE_OI_PERIOD", "1h"),
                ("CONFLUENCE_OI_LIMIT", "24"),
                ("CONFLUENCE_HTTP_TIMEOUT_SECS", "3"),
            ],
            || {
                let config = fetch_config().unwrap();
                assert_eq!(config.binance.rest_url, "https://testnet.binancefuture.com");
                assert_eq!(config.binance.api_key.as_deref(), Some("test-key"));
                assert_eq!(config.binance.kline_limit, 500);
                assert_eq!(config.binance.oi_period, Timeframe::H1);
                assert_eq!(config.binance.oi_limit, 24);
                assert_eq!(config.binance.timeout, Duration::from_secs(3));
            },
        );
    }

    #[test]
    fn rejects_out_of_range_kline_limit() {
        with_env(&[("CONFLUENCE_KLINE_LIMIT", "0")], || {
            let err = fetch_config().unwrap_err();
            assert!(err.to_string().contains("CONFLUENCE_KLINE_LIMIT"));
        });
        with_env(&[("CONFLUENCE_KLINE_LIMIT", "2000")], || {
            assert!(fetch_config().is_err());
        });
    }

    #[test]
    fn rejects_unknown_oi_period() {
        with_env(&[("CONFLUENCE_OI_PERIOD", "7m")], || {
            let err = fetch_config().unwrap_err();
            assert!(err.to_string().contains("unknown timeframe"));
        });
    }

    #[test]
    fn rejects_oi_period_without_history_buckets() {
        for raw in ["1m", "3m", "8h", "3d", "1w"] {
            with_env(&[("CONFLUENCE_OI_PERIOD", raw)], || {
                let err = fetch_config().unwrap_err();
                assert!(matches!(err, crate::ConfluenceError::Config(_)));
                assert!(err.to_string().contains("not an open-interest history period"));
            });
        }
        with_env(&[("CONFLUENCE_OI_PERIOD", "1d")], || {
            assert_eq!(fetch_config().unwrap().binance.oi_period, Timeframe::D1);
        });
    }

    #[test]
    fn rejects_zero_timeout() {
        with_env(&[("CONFLUENCE_HTTP_TIMEOUT_SECS", "0")], || {
            let err = fetch_config().unwrap_err();
            assert!(err.to_string().contains("CONFLUENCE_HTTP_TIMEOUT_SECS"));
        });
    }

    #[test]
    fn empty_values_treated_as_absent() {
        with_env(
            &[
                ("BINANCE_REST_URL", ""),
                ("BINANCE_API_KEY", ""),
                ("CONFLUENCE_KLINE_LIMIT", ""),
            ],
            || {
                let config = fetch_config().unwrap();
                assert_eq!(config.binance.rest_url, DEFAULT_REST_URL);
                assert!(config.binance.api_key.is_none());
                assert_eq!(config.binance.kline_limit, 200);
            },
        );
    }
}
