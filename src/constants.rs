//! Constants for the market data client
//!
//! Compile-time defaults for the client. `ClientConfig` starts from these
//! values and only the base URL can be overridden from the environment.

/// CoinGecko API base URL
pub const COINGECKO_API_URL: &str = "https://api.coingecko.com/api/v3";

/// Environment variable that overrides the API base URL
pub const BASE_URL_ENV_VAR: &str = "COINGECKO_API_URL";

/// Market snapshot endpoint
pub const MARKETS_ENDPOINT: &str = "/coins/markets";

/// Full coin catalog endpoint
pub const COIN_LIST_ENDPOINT: &str = "/coins/list";

/// Quote currency for every request
pub const VS_CURRENCY: &str = "usd";

/// Ordering used for the popular coin list
pub const POPULAR_ORDER: &str = "market_cap_desc";

/// Page size for the popular coin list
pub const POPULAR_PAGE_SIZE: u32 = 20;

/// Default day window for history requests
pub const DEFAULT_HISTORY_DAYS: u32 = 7;

/// Windows longer than this many days request daily granularity
pub const DAILY_INTERVAL_THRESHOLD_DAYS: u32 = 90;

/// Delay before a history request (in milliseconds)
pub const HISTORY_REQUEST_DELAY_MS: u64 = 300;

/// HTTP request timeout for history requests (in seconds)
pub const HISTORY_TIMEOUT_SECS: u64 = 10;

/// User agent for HTTP requests
pub const USER_AGENT: &str = "coin-market-sdk/0.1.0";

/// Builds the history endpoint path for a coin id
pub fn market_chart_endpoint(coin_id: &str) -> String {
    format!("/coins/{}/market_chart", coin_id)
}
