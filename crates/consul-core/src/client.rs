//! Reqwest-backed HTTP transport for the Consul agent API.
//!
//! [`Consul`] is the shared connection object API clients borrow. It joins request paths
//! onto the agent address, encodes optional parameters into the query string, and maps
//! non-2xx responses onto [`Error`] variants. It performs no retries and no caching.

use crate::config::ConsulConfig;
use crate::params::{self, Param};
use crate::query::QueryParams;
use crate::transport::Transport;
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, StatusCode};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;
use validator::Validate;

// Connection pool settings

/// Default idle timeout for connection pools (seconds)
pub const DEFAULT_POOL_IDLE_TIMEOUT: u64 = 90;

/// Default maximum idle connections per host
pub const DEFAULT_POOL_MAX_IDLE_PER_HOST: usize = 10;

/// Default TCP connect timeout (seconds)
pub const DEFAULT_CONNECT_TIMEOUT: u64 = 10;

const USER_AGENT: &str = concat!("consul-core/", env!("CARGO_PKG_VERSION"));

/// Builder for [`Consul`].
#[derive(Debug, Clone)]
pub struct ConsulBuilder {
    config: ConsulConfig,
}

impl ConsulBuilder {
    /// Create a builder for the agent at `address` (e.g. `http://127.0.0.1:8500`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the address is not a valid URL.
    pub fn new(address: impl AsRef<str>) -> Result<Self> {
        let config = ConsulConfig::new(address.as_ref())?;
        Ok(Self { config })
    }

    /// Create a builder from a prepared configuration.
    #[must_use]
    pub fn from_config(config: ConsulConfig) -> Self {
        Self { config }
    }

    /// Set the datacenter sent with every request.
    #[must_use]
    pub fn with_datacenter(mut self, datacenter: impl Into<String>) -> Self {
        self.config = self.config.with_datacenter(datacenter);
        self
    }

    /// Set request timeout in seconds.
    #[must_use]
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.config = self.config.with_timeout(seconds);
        self
    }

    /// Set whether to verify TLS certificates.
    #[must_use]
    pub fn with_tls_verify(mut self, verify: bool) -> Self {
        self.config = self.config.with_tls_verify(verify);
        self
    }

    /// Enable or disable response compression.
    #[must_use]
    pub fn with_compression(mut self, enabled: bool) -> Self {
        self.config = self.config.with_compression(enabled);
        self
    }

    /// Build the transport.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the configuration is invalid or the HTTP client
    /// cannot be constructed.
    pub fn build(self) -> Result<Consul> {
        self.config.validate()?;
        let base_url = with_trailing_slash(self.config.parse_address()?);

        let mut builder = ClientBuilder::new()
            .timeout(self.config.timeout())
            .user_agent(USER_AGENT)
            .pool_idle_timeout(Duration::from_secs(DEFAULT_POOL_IDLE_TIMEOUT))
            .pool_max_idle_per_host(DEFAULT_POOL_MAX_IDLE_PER_HOST)
            .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT))
            .danger_accept_invalid_certs(!self.config.tls_verify);

        if !self.config.enable_compression {
            builder = builder.no_gzip();
        }

        let http = builder
            .build()
            .map_err(|err| Error::ConfigError(format!("Failed to build Consul HTTP client: {err}")))?;

        Ok(Consul {
            http,
            base_url,
            datacenter: self.config.datacenter,
        })
    }
}

/// Connection to a Consul agent.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct Consul {
    http: Client,
    base_url: Url,
    datacenter: Option<String>,
}

impl Consul {
    /// Create a transport for the agent at `address` with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the address is invalid.
    pub fn new(address: impl AsRef<str>) -> Result<Self> {
        ConsulBuilder::new(address)?.build()
    }

    /// Create a transport from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the configuration is invalid.
    pub fn from_config(config: ConsulConfig) -> Result<Self> {
        ConsulBuilder::from_config(config).build()
    }

    /// Access the agent base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Datacenter sent with every request, if any.
    #[must_use]
    pub fn datacenter(&self) -> Option<&str> {
        self.datacenter.as_deref()
    }

    fn build_url(&self, path: &str) -> Result<Url> {
        let normalized = path.trim_start_matches('/');

        self.base_url
            .join(normalized)
            .map_err(|err| Error::InvalidEndpoint(format!("Invalid Consul path `{path}`: {err}")))
    }
}

#[async_trait]
impl Transport for Consul {
    async fn get(&self, path: &str, params: &[Param]) -> Result<String> {
        let url = self.build_url(path)?;

        let mut query = QueryParams::new();
        query.extend(params::to_query(params));
        query.push_opt("dc", self.datacenter.as_deref());
        let query = query.into_pairs();

        debug!(path, params = params.len(), "Consul request");

        let response = self
            .http
            .get(url)
            .query(&query)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return response.text().await.map_err(Error::from);
        }

        let text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        warn!(path, %status, "Consul request failed");

        Err(map_status_to_error(status, text))
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

fn map_status_to_error(status: StatusCode, text: String) -> Error {
    match status {
        StatusCode::NOT_FOUND => Error::NotFound(text),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            Error::InvalidRequest(format!("Consul permission denied: {text}"))
        }
        StatusCode::BAD_REQUEST => Error::InvalidRequest(text),
        StatusCode::TOO_MANY_REQUESTS
        | StatusCode::BAD_GATEWAY
        | StatusCode::SERVICE_UNAVAILABLE
        | StatusCode::GATEWAY_TIMEOUT => {
            Error::ServiceUnavailable(format!("Consul temporarily unavailable: {text}"))
        }
        status if status.is_server_error() => {
            Error::ServiceUnavailable(format!("Consul server error {status}: {text}"))
        }
        _ => Error::HttpError(format!("Consul error {status}: {text}")),
    }
}
