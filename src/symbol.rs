//! Symbol canonicalization for USDT-margined perpetuals.

/// Quote currency every perpetual symbol is settled in.
pub const QUOTE_ASSET: &str = "USDT";

/// Uppercases `symbol` and appends [`QUOTE_ASSET`] unless already present.
///
/// ```
/// assert_eq!(confluence::symbol::normalize("btc"), "BTCUSDT");
/// assert_eq!(confluence::symbol::normalize("ETHUSDT"), "ETHUSDT");
/// ```
pub fn normalize(symbol: &str) -> String {
    let symbol = symbol.to_uppercase();
    if symbol.ends_with(QUOTE_ASSET) {
        symbol
    } else {
        format!("{symbol}{QUOTE_ASSET}")
    }
}
