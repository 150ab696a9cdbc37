//! Client configuration

use crate::constants::{
    BASE_URL_ENV_VAR, COINGECKO_API_URL, HISTORY_REQUEST_DELAY_MS, HISTORY_TIMEOUT_SECS,
    USER_AGENT,
};
use std::time::Duration;
use tokio::time::sleep;

/// Delay applied before paced requests (history fetches)
///
/// Spaces out chart requests to stay under the public API's rate limit.
/// There is no escalation: the same delay is applied on every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacingPolicy {
    /// Wait a fixed duration before each request
    Fixed(Duration),
    /// Issue requests immediately
    Disabled,
}

impl PacingPolicy {
    /// Delay this policy applies before a request
    pub fn delay(&self) -> Duration {
        match self {
            PacingPolicy::Fixed(delay) => *delay,
            PacingPolicy::Disabled => Duration::ZERO,
        }
    }

    /// Suspends the current task according to the policy
    pub async fn wait(&self) {
        let delay = self.delay();
        if !delay.is_zero() {
            sleep(delay).await;
        }
    }
}

impl Default for PacingPolicy {
    fn default() -> Self {
        PacingPolicy::Fixed(Duration::from_millis(HISTORY_REQUEST_DELAY_MS))
    }
}

/// Settings for `MarketDataClient` and `HttpTransport`
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL, without trailing slash
    pub base_url: String,
    /// User agent sent with every request
    pub user_agent: String,
    /// Delay policy for history requests
    pub history_pacing: PacingPolicy,
    /// Timeout for history requests
    pub history_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: COINGECKO_API_URL.to_string(),
            user_agent: USER_AGENT.to_string(),
            history_pacing: PacingPolicy::default(),
            history_timeout: Duration::from_secs(HISTORY_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    /// Defaults, with the base URL taken from `COINGECKO_API_URL` when set
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var(BASE_URL_ENV_VAR) {
            if !url.trim().is_empty() {
                config = config.with_base_url(url);
            }
        }
        config
    }

    /// Overrides the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim().trim_end_matches('/').to_string();
        self
    }

    /// Overrides the history pacing policy
    pub fn with_history_pacing(mut self, pacing: PacingPolicy) -> Self {
        self.history_pacing = pacing;
        self
    }

    /// Overrides the history request timeout
    pub fn with_history_timeout(mut self, timeout: Duration) -> Self {
        self.history_timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_public_api() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "https://api.coingecko.com/api/v3");
        assert_eq!(config.history_pacing.delay(), Duration::from_millis(300));
        assert_eq!(config.history_timeout, Duration::from_secs(10));
    }

    #[test]
    fn base_url_loses_trailing_slash() {
        let config = ClientConfig::default().with_base_url("http://localhost:8080/api/v3/");
        assert_eq!(config.base_url, "http://localhost:8080/api/v3");
    }

    #[test]
    fn disabled_pacing_has_no_delay() {
        assert_eq!(PacingPolicy::Disabled.delay(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn fixed_pacing_sleeps() {
        let start = tokio::time::Instant::now();
        PacingPolicy::Fixed(Duration::from_millis(300)).wait().await;
        assert!(start.elapsed() >= Duration::from_millis(300));
    }
}
