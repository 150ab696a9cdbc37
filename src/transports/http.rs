//! reqwest-backed transport implementation

use crate::{
    config::ClientConfig,
    error::TransportError,
    transport::{ApiRequest, MarketDataTransport},
};
use async_trait::async_trait;
use reqwest::Client;

/// HTTP transport for the CoinGecko REST API
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    /// Creates a new HTTP transport from the client configuration
    ///
    /// No global timeout is set; only requests carrying their own timeout
    /// are bounded.
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| TransportError::Setup(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    /// Builds the absolute URL for an endpoint path
    fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Maps a reqwest error raised before any response was read
    fn classify_send_error(request: &ApiRequest, error: reqwest::Error) -> TransportError {
        if error.is_builder() {
            return TransportError::Setup(error.to_string());
        }

        TransportError::NoResponse {
            request: request.describe(),
            reason: error.to_string(),
            timed_out: error.is_timeout(),
        }
    }
}

#[async_trait]
impl MarketDataTransport for HttpTransport {
    async fn get(&self, request: &ApiRequest) -> Result<String, TransportError> {
        let url = self.build_url(&request.path);
        tracing::debug!(url = %url, query = ?request.query, "Sending market data request");

        let mut builder = self.client.get(&url).query(&request.query);
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        let http_request = builder
            .build()
            .map_err(|e| TransportError::Setup(e.to_string()))?;

        let response = self
            .client
            .execute(http_request)
            .await
            .map_err(|e| Self::classify_send_error(request, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| Self::classify_send_error(request, e))?;

        tracing::debug!(
            url = %url,
            bytes = body.len(),
            "Received market data response"
        );

        Ok(body)
    }

    fn transport_name(&self) -> &'static str {
        "http"
    }
}
