//! Market data transport implementations

pub mod http;

pub use http::HttpTransport;
