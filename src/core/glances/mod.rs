//! Metric source client for Glances-compatible hosts.
//!
//! One GET per endpoint; the parsed body lives only for the poll cycle that
//! fetched it.

mod client;
mod endpoint;
pub mod link;

pub use client::{GlancesClient, REQUEST_TIMEOUT};
pub use endpoint::Endpoint;
pub use link::{is_loopback_host, NetworkLink, StaticLink, SystemLink};

use serde_json::Value;

use crate::error::FetchError;

/// Parsed body of one endpoint response.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSnapshot(Value);

impl MetricSnapshot {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn parse(body: &str) -> Result<Self, FetchError> {
        serde_json::from_str(body)
            .map(Self)
            .map_err(|e| FetchError::ParseError(e.to_string()))
    }

    pub fn value(&self) -> &Value {
        &self.0
    }
}

/// Outcome of a single fetch.
pub type EndpointResult = Result<MetricSnapshot, FetchError>;

/// Anything that can answer endpoint fetches.
pub trait MetricSource {
    fn fetch(&mut self, endpoint: Endpoint) -> EndpointResult;

    /// Point the source at a new host. Sources without a target ignore it.
    fn reconfigure(&mut self, _host: &str, _port: u16) {}
}
