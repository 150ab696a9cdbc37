//! Transport abstraction for issuing GET requests against the market data API

use crate::error::TransportError;
use async_trait::async_trait;
use std::time::Duration;

/// A GET request relative to the API base URL
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// Endpoint path, starting with `/`
    pub path: String,
    /// Query parameters in the order they are sent
    pub query: Vec<(&'static str, String)>,
    /// Per-request timeout, if any
    pub timeout: Option<Duration>,
}

impl ApiRequest {
    /// Creates a request for the given endpoint path
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: Vec::new(),
            timeout: None,
        }
    }

    /// Appends a query parameter
    pub fn param(mut self, key: &'static str, value: impl ToString) -> Self {
        self.query.push((key, value.to_string()));
        self
    }

    /// Sets the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Value of a query parameter
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Short description used in logs
    pub fn describe(&self) -> String {
        if self.query.is_empty() {
            return format!("GET {}", self.path);
        }
        let query = self
            .query
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");
        format!("GET {}?{}", self.path, query)
    }
}

/// Trait for market data transports
///
/// Implementations perform a single GET and hand back the raw response
/// body. Decoding is left to the client.
#[async_trait]
pub trait MarketDataTransport: Send + Sync {
    /// Performs the request and returns the body of a 2xx response
    ///
    /// # Arguments
    /// * `request` - Endpoint, query and timeout
    ///
    /// # Returns
    /// The response body, or a `TransportError` classifying the failure
    async fn get(&self, request: &ApiRequest) -> Result<String, TransportError>;

    /// Returns the name of this transport
    fn transport_name(&self) -> &'static str;
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_query_in_order() {
        let request = ApiRequest::get("/coins/markets")
            .param("vs_currency", "usd")
            .param("per_page", 20)
            .param("sparkline", false);

        assert_eq!(request.query_value("per_page"), Some("20"));
        assert_eq!(request.query_value("sparkline"), Some("false"));
        assert_eq!(request.query_value("ids"), None);
        assert_eq!(
            request.describe(),
            "GET /coins/markets?vs_currency=usd&per_page=20&sparkline=false"
        );
    }

    #[test]
    fn describe_without_query() {
        assert_eq!(ApiRequest::get("/coins/list").describe(), "GET /coins/list");
    }
}
