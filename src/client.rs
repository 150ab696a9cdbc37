//! Market data client
//!
//! Thin request/response layer over the CoinGecko REST API. Every call is
//! independent: nothing is cached and nothing is retried. Failures are
//! logged through `tracing` and handed back to the caller unchanged.

use crate::{
    config::{ClientConfig, PacingPolicy},
    constants::{
        market_chart_endpoint, COIN_LIST_ENDPOINT, DAILY_INTERVAL_THRESHOLD_DAYS,
        DEFAULT_HISTORY_DAYS, MARKETS_ENDPOINT, POPULAR_ORDER, POPULAR_PAGE_SIZE, VS_CURRENCY,
    },
    error::{LookupStage, MarketDataError, TransportError},
    transport::{ApiRequest, MarketDataTransport},
    transports::HttpTransport,
    types::{CatalogEntry, Coin, CoinHistory, PopularCoin},
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// Client for coin listings, market snapshots and price history
///
/// # Example
/// ```no_run
/// use coin_market_sdk::MarketDataClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = MarketDataClient::new()?;
/// let coins = client.coins_by_symbol("BTC").await?;
/// for coin in coins {
///     println!("{} ({}): {:?}", coin.name, coin.id, coin.current_price);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct MarketDataClient {
    transport: Arc<dyn MarketDataTransport>,
    history_pacing: PacingPolicy,
    history_timeout: Duration,
}

impl MarketDataClient {
    /// Creates a client for the public API
    ///
    /// The base URL can be overridden with the `COINGECKO_API_URL`
    /// environment variable.
    pub fn new() -> Result<Self, TransportError> {
        Self::with_config(ClientConfig::from_env())
    }

    /// Creates a client over HTTP with explicit settings
    pub fn with_config(config: ClientConfig) -> Result<Self, TransportError> {
        let transport = Arc::new(HttpTransport::new(&config)?);
        Ok(Self::with_transport(transport, &config))
    }

    /// Creates a client over a custom transport
    pub fn with_transport(transport: Arc<dyn MarketDataTransport>, config: &ClientConfig) -> Self {
        Self {
            transport,
            history_pacing: config.history_pacing,
            history_timeout: config.history_timeout,
        }
    }

    /// Returns the name of the underlying transport
    pub fn transport_name(&self) -> &'static str {
        self.transport.transport_name()
    }

    /// Sends a request and decodes the JSON body
    async fn fetch<T: DeserializeOwned>(&self, request: &ApiRequest) -> Result<T, MarketDataError> {
        let body = self.transport.get(request).await?;
        serde_json::from_str(&body).map_err(|e| MarketDataError::decode(&request.path, e))
    }

    /// Market snapshot request filtered to a comma-separated id list
    fn markets_for_ids(ids: &str) -> ApiRequest {
        ApiRequest::get(MARKETS_ENDPOINT)
            .param("vs_currency", VS_CURRENCY)
            .param("ids", ids)
            .param("sparkline", false)
    }

    /// Gets the top coins by market capitalization
    ///
    /// # Returns
    /// The first page of 20 coins, reduced to id, name and symbol
    pub async fn popular_coins(&self) -> Result<Vec<PopularCoin>, MarketDataError> {
        let request = ApiRequest::get(MARKETS_ENDPOINT)
            .param("vs_currency", VS_CURRENCY)
            .param("order", POPULAR_ORDER)
            .param("per_page", POPULAR_PAGE_SIZE)
            .param("page", 1)
            .param("sparkline", false);

        let coins = self
            .fetch::<Vec<PopularCoin>>(&request)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Error fetching coin list"))?;

        tracing::debug!(count = coins.len(), "Fetched popular coins");
        Ok(coins)
    }

    /// Gets the full coin catalog (id, symbol, name for every listed coin)
    pub async fn catalog(&self) -> Result<Vec<CatalogEntry>, MarketDataError> {
        self.fetch(&ApiRequest::get(COIN_LIST_ENDPOINT))
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Error fetching coin catalog"))
    }

    /// Gets market data for every coin carrying the given symbol
    ///
    /// Several coins can share a symbol, so the catalog is searched first
    /// (case-insensitively) and market data is then requested for all
    /// matching ids.
    ///
    /// # Returns
    /// The matching market rows. An empty vector is a valid result when the
    /// catalog matched but the market endpoint returned no rows.
    ///
    /// # Errors
    /// `NotFound` if no catalog entry matches, before any market request is
    /// made. Failures of either request come back as `SymbolLookup` tagged
    /// with the stage that failed.
    pub async fn coins_by_symbol(&self, symbol: &str) -> Result<Vec<Coin>, MarketDataError> {
        self.lookup_symbol(symbol).await.inspect_err(|e| {
            tracing::error!(symbol = %symbol, error = %e, "Error fetching coin data")
        })
    }

    async fn lookup_symbol(&self, symbol: &str) -> Result<Vec<Coin>, MarketDataError> {
        let catalog: Vec<CatalogEntry> = self
            .fetch(&ApiRequest::get(COIN_LIST_ENDPOINT))
            .await
            .map_err(|e| e.in_lookup(symbol, LookupStage::Catalog))?;

        let ids = catalog
            .iter()
            .filter(|entry| entry.matches_symbol(symbol))
            .map(|entry| entry.id.as_str())
            .collect::<Vec<_>>();

        if ids.is_empty() {
            return Err(MarketDataError::not_found(symbol));
        }

        tracing::debug!(symbol = %symbol, ids = ?ids, "Resolved symbol to coin ids");

        let coins: Option<Vec<Coin>> = self
            .fetch(&Self::markets_for_ids(&ids.join(",")))
            .await
            .map_err(|e| e.in_lookup(symbol, LookupStage::Markets))?;

        Ok(coins.unwrap_or_default())
    }

    /// Gets the market snapshot for a single coin id
    ///
    /// # Returns
    /// The coin, or `None` if the API has no market row for this id
    pub async fn coin_by_id(&self, coin_id: &str) -> Result<Option<Coin>, MarketDataError> {
        let coins: Option<Vec<Coin>> = self
            .fetch(&Self::markets_for_ids(coin_id))
            .await
            .inspect_err(|e| {
                tracing::error!(coin_id = %coin_id, error = %e, "Error fetching coin data")
            })?;

        Ok(coins.and_then(|rows| rows.into_iter().next()))
    }

    /// Gets price, market cap and volume history for a coin
    ///
    /// Waits according to the configured pacing policy before sending the
    /// request. Windows longer than 90 days ask for daily samples.
    ///
    /// # Arguments
    /// * `coin_id` - API coin identifier
    /// * `days` - Window length in days, 7 when `None`
    ///
    /// # Errors
    /// `InvalidFormat` if the response has no `prices` series; transport
    /// errors are returned as-is after being logged by category.
    pub async fn coin_history(
        &self,
        coin_id: &str,
        days: Option<u32>,
    ) -> Result<CoinHistory, MarketDataError> {
        let days = days.unwrap_or(DEFAULT_HISTORY_DAYS);

        self.history_pacing.wait().await;

        let mut request = ApiRequest::get(market_chart_endpoint(coin_id))
            .param("vs_currency", VS_CURRENCY)
            .param("days", days);
        if days > DAILY_INTERVAL_THRESHOLD_DAYS {
            request = request.param("interval", "daily");
        }
        let request = request.timeout(self.history_timeout);

        self.fetch_history(&request)
            .await
            .inspect_err(|e| log_history_failure(coin_id, e))
    }

    async fn fetch_history(&self, request: &ApiRequest) -> Result<CoinHistory, MarketDataError> {
        let body = self.transport.get(request).await?;

        let payload = match serde_json::from_str::<Value>(&body) {
            Ok(payload) if has_price_series(&payload) => payload,
            _ => {
                tracing::error!(payload = %body, "Invalid response format from CoinGecko API");
                return Err(MarketDataError::InvalidFormat);
            }
        };

        serde_json::from_value(payload).map_err(|e| MarketDataError::decode(&request.path, e))
    }
}

/// True when the payload carries a usable `prices` field
///
/// Missing, `null`, `false`, `0` and `""` all count as absent.
fn has_price_series(payload: &Value) -> bool {
    match payload.get("prices") {
        None | Some(Value::Null) | Some(Value::Bool(false)) => false,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

/// Logs a history failure according to where the request broke down
fn log_history_failure(coin_id: &str, error: &MarketDataError) {
    match error.transport() {
        Some(TransportError::Status {
            status,
            status_text,
            body,
        }) => {
            tracing::error!(
                coin_id = %coin_id,
                status = *status,
                status_text = %status_text,
                body = %body,
                "API error response"
            );
            if *status == 429 {
                tracing::error!("Rate limit exceeded for CoinGecko API. Please try again later.");
            }
        }
        Some(TransportError::NoResponse {
            request,
            reason,
            timed_out,
        }) => {
            tracing::error!(
                coin_id = %coin_id,
                request = %request,
                reason = %reason,
                timed_out = *timed_out,
                "No response received from API"
            );
        }
        Some(TransportError::Setup(message)) => {
            tracing::error!(
                coin_id = %coin_id,
                message = %message,
                "Error setting up API request"
            );
        }
        None => {
            tracing::error!(coin_id = %coin_id, error = %error, "Error processing API response");
        }
    }
}
