use std::sync::Arc;

use confluence::binance::BinanceClient;
use confluence::config::fetch_config;
use confluence::{ConfluenceError, SnapshotService};

#[tokio::main]
async fn main() -> Result<(), ConfluenceError> {
    // Initialize tracing subscriber for logging output.
    tracing_subscriber::fmt::init();

    let app_config = fetch_config()?;
    let symbol = std::env::args().nth(1).unwrap_or_else(|| "BTC".to_string());

    let client = Arc::new(BinanceClient::new(&app_config.binance)?);
    let service = SnapshotService::new(client.clone(), client);

    let snapshot = service.snapshot(&symbol).await?;
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    Ok(())
}
