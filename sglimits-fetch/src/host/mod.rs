//! Host APIs used by provider implementations.
//!
//! - [`http`] - HTTP client with tracing, bearer auth, and timeouts

pub mod http;

pub use http::HttpClient;
