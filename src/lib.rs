//! # Coin Market SDK
//!
//! Data access for a cryptocurrency price dashboard: coin listings, market
//! snapshots and historical price series from the CoinGecko REST API, plus
//! the formatters used to display them.
//!
//! ## Usage
//!
//! ```no_run
//! use coin_market_sdk::{format, MarketDataClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = MarketDataClient::new()?;
//!
//! // Top 20 coins by market cap, for a selection list
//! for coin in client.popular_coins().await? {
//!     println!("{} ({})", coin.name, coin.symbol.to_uppercase());
//! }
//!
//! // Market snapshot for one coin
//! if let Some(btc) = client.coin_by_id("bitcoin").await? {
//!     println!("BTC: {}", format::format_currency(btc.current_price));
//!     println!("Volume: {}", format::format_large_number(btc.total_volume));
//! }
//!
//! // 30 days of history
//! let history = client.coin_history("bitcoin", Some(30)).await?;
//! println!("Last: {}", format::format_price(history.latest_price()));
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! ```no_run
//! use coin_market_sdk::{LookupStage, MarketDataClient, MarketDataError};
//!
//! # async fn example(client: MarketDataClient) {
//! match client.coins_by_symbol("eth").await {
//!     Ok(coins) => println!("{} coins use ETH", coins.len()),
//!     Err(MarketDataError::NotFound { symbol }) => println!("No coin called {}", symbol),
//!     Err(e) if e.lookup_stage() == Some(LookupStage::Catalog) => {
//!         eprintln!("Catalog unavailable: {}", e)
//!     }
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! # }
//! ```
//!
//! Nothing is retried or cached. Failures are logged through `tracing` and
//! returned; deciding whether to try again is up to the caller.

pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod format;
pub mod transport;
pub mod transports;
pub mod types;

// Re-export commonly used types
pub use client::MarketDataClient;
pub use config::{ClientConfig, PacingPolicy};
pub use error::{FailureKind, LookupStage, MarketDataError, TransportError};
pub use format::{format_currency, format_currency_with, format_large_number, format_price};
pub use transport::{ApiRequest, MarketDataTransport};
pub use types::{CatalogEntry, Coin, CoinHistory, HistoryPoint, PopularCoin};
