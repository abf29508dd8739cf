//! Generation-provider implementations.

mod http;

pub use http::HttpProvider;
