//! Error types for the market data client

use std::fmt;
use thiserror::Error;

/// Errors raised by a transport while performing a request
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// Server answered with a non-2xx status
    #[error("HTTP {status} {status_text}: {body}")]
    Status {
        status: u16,
        status_text: String,
        body: String,
    },

    /// Request was sent but no response arrived
    #[error("No response for {request}: {reason}")]
    NoResponse {
        request: String,
        reason: String,
        timed_out: bool,
    },

    /// Request could not be built or sent
    #[error("Request setup failed: {0}")]
    Setup(String),
}

/// Diagnostic category of a transport failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Server responded with an error status
    ServerResponse,
    /// Request went out, nothing came back
    NoResponse,
    /// Request never left the client
    Setup,
}

impl TransportError {
    /// Returns the diagnostic category of this failure
    pub fn kind(&self) -> FailureKind {
        match self {
            TransportError::Status { .. } => FailureKind::ServerResponse,
            TransportError::NoResponse { .. } => FailureKind::NoResponse,
            TransportError::Setup(_) => FailureKind::Setup,
        }
    }

    /// HTTP status code, if the server responded
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the server rejected the request with 429
    pub fn is_rate_limited(&self) -> bool {
        self.status() == Some(429)
    }
}

/// Stage of the two-step symbol lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupStage {
    /// Fetching the full coin catalog
    Catalog,
    /// Fetching market data for the matched ids
    Markets,
}

impl fmt::Display for LookupStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupStage::Catalog => write!(f, "catalog"),
            LookupStage::Markets => write!(f, "markets"),
        }
    }
}

/// Errors returned by `MarketDataClient` operations
#[derive(Debug, Error)]
pub enum MarketDataError {
    /// Transport or server failure
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Response body did not match the expected shape
    #[error("Failed to decode {endpoint} response: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    /// No catalog entry carries the requested symbol
    #[error("Cryptocurrency with symbol {symbol} not found")]
    NotFound { symbol: String },

    /// History response is missing its price series
    #[error("Invalid data format received from API")]
    InvalidFormat,

    /// One stage of a symbol lookup failed
    #[error("Symbol lookup for {symbol} failed at {stage} stage: {source}")]
    SymbolLookup {
        symbol: String,
        stage: LookupStage,
        #[source]
        source: Box<MarketDataError>,
    },
}

impl MarketDataError {
    /// Creates a Decode error
    pub fn decode(endpoint: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Decode {
            endpoint: endpoint.into(),
            source,
        }
    }

    /// Creates a NotFound error
    pub fn not_found(symbol: &str) -> Self {
        Self::NotFound {
            symbol: symbol.to_string(),
        }
    }

    /// Wraps an error with the symbol lookup stage it came from
    pub fn in_lookup(self, symbol: &str, stage: LookupStage) -> Self {
        Self::SymbolLookup {
            symbol: symbol.to_string(),
            stage,
            source: Box::new(self),
        }
    }

    /// The transport error at the root of this error, if any
    pub fn transport(&self) -> Option<&TransportError> {
        match self {
            MarketDataError::Transport(e) => Some(e),
            MarketDataError::SymbolLookup { source, .. } => source.transport(),
            _ => None,
        }
    }

    /// The lookup stage that failed, for symbol lookups
    pub fn lookup_stage(&self) -> Option<LookupStage> {
        match self {
            MarketDataError::SymbolLookup { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}
