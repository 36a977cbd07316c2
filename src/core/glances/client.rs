use std::time::Duration;

use crate::core::config::Settings;
use crate::error::{FetchError, Result};

use super::link::{is_loopback_host, NetworkLink, SystemLink};
use super::{Endpoint, EndpointResult, MetricSnapshot, MetricSource};

/// Per-request timeout; a timed-out request is an ordinary failed fetch.
pub const REQUEST_TIMEOUT: Duration = Duration::from_millis(5000);

/// Blocking HTTP client for a Glances-compatible host.
pub struct GlancesClient {
    http: reqwest::blocking::Client,
    host: String,
    port: u16,
    link: Box<dyn NetworkLink + Send>,
}

impl GlancesClient {
    pub fn new(host: impl Into<String>, port: u16) -> Result<Self> {
        Self::with_link(host, port, Box::new(SystemLink::new()))
    }

    pub fn with_link(
        host: impl Into<String>,
        port: u16,
        link: Box<dyn NetworkLink + Send>,
    ) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("glance-panel/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            host: host.into(),
            port,
            link,
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(settings.glances_host.clone(), settings.glances_port)
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn url_for(&self, endpoint: Endpoint) -> String {
        format!("http://{}:{}{}", self.host, self.port, endpoint.path())
    }
}

impl MetricSource for GlancesClient {
    fn fetch(&mut self, endpoint: Endpoint) -> EndpointResult {
        if !is_loopback_host(&self.host) && !self.link.is_up() {
            log::warn!("Network not connected for Glances API");
            return Err(FetchError::NetworkUnavailable);
        }

        if self.host.is_empty() {
            log::warn!("Glances host not configured");
            return Err(FetchError::HostUnconfigured);
        }

        let url = self.url_for(endpoint);
        log::debug!("Fetching: {}", url);

        let response = match self.http.get(&url).send() {
            Ok(response) => response,
            Err(e) => {
                log::warn!("Request failed for endpoint {}: {}", endpoint, e);
                return Err(FetchError::NetworkUnavailable);
            }
        };

        let status = response.status();
        if !status.is_success() {
            log::warn!("HTTP error {} for endpoint {}", status.as_u16(), endpoint);
            return Err(FetchError::HttpError(status.as_u16()));
        }

        let body = response.text().map_err(|e| {
            log::warn!("Failed to read body for {}: {}", endpoint, e);
            FetchError::ParseError(e.to_string())
        })?;

        MetricSnapshot::parse(&body).map_err(|e| {
            log::warn!("JSON parse error for {}: {}", endpoint, e);
            e
        })
    }

    /// Keeps the HTTP pool; only the target changes.
    fn reconfigure(&mut self, host: &str, port: u16) {
        if self.host != host || self.port != port {
            log::info!("Glances target changed to {}:{}", host, port);
            self.host = host.to_string();
            self.port = port;
        }
    }
}
