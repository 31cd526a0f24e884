//! HTTP plumbing: a configured reqwest client and the `Transport` adapter
//! built on it.

pub mod client;
pub mod transport;

pub use client::{HttpClient, HttpClientBuilder};
pub use transport::HttpTransport;
