//! Configuration structures for Consul clients.
//!
//! [`ConsulConfig`] describes how to reach a Consul agent. It is serde-friendly so it can
//! be embedded in an application's own configuration file, and validated on construction.

use crate::Error;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;
use validator::Validate;

/// Default agent HTTP address.
pub const DEFAULT_ADDRESS: &str = "http://127.0.0.1:8500";

/// Connection settings for a Consul agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ConsulConfig {
    /// Agent base URL
    #[validate(url)]
    #[serde(default = "default_address")]
    pub address: String,

    /// Datacenter sent as `dc` on every request; the agent's own datacenter when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1))]
    pub datacenter: Option<String>,

    /// Request timeout in seconds; must cover the longest blocking query wait
    #[validate(range(min = 1, max = 900))]
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Whether to verify TLS certificates
    #[serde(default = "default_tls_verify")]
    pub tls_verify: bool,

    /// Whether to accept gzip-compressed responses
    #[serde(default = "default_enable_compression")]
    pub enable_compression: bool,
}

fn default_address() -> String {
    DEFAULT_ADDRESS.to_string()
}

// Consul caps blocking waits at 10 minutes; leave headroom for the response itself.
const fn default_request_timeout_secs() -> u64 {
    660
}

const fn default_tls_verify() -> bool {
    true
}

const fn default_enable_compression() -> bool {
    true
}

impl ConsulConfig {
    /// Create a configuration for the given agent address.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the address is not a valid URL.
    pub fn new(address: impl Into<String>) -> Result<Self, Error> {
        let config = Self {
            address: address.into(),
            ..Self::default()
        };

        config
            .validate()
            .map_err(|e| Error::ConfigError(format!("Invalid configuration: {e}")))?;

        Ok(config)
    }

    /// Set the datacenter queried by default.
    #[must_use]
    pub fn with_datacenter(mut self, datacenter: impl Into<String>) -> Self {
        self.datacenter = Some(datacenter.into());
        self
    }

    /// Set request timeout in seconds.
    #[must_use]
    pub const fn with_timeout(mut self, seconds: u64) -> Self {
        self.request_timeout_secs = seconds;
        self
    }

    /// Set whether to verify TLS certificates.
    #[must_use]
    pub const fn with_tls_verify(mut self, verify: bool) -> Self {
        self.tls_verify = verify;
        self
    }

    /// Enable or disable response compression.
    #[must_use]
    pub const fn with_compression(mut self, enabled: bool) -> Self {
        self.enable_compression = enabled;
        self
    }

    /// Get the request timeout as a Duration.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Parse the agent address.
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be parsed.
    pub fn parse_address(&self) -> Result<Url, Error> {
        Url::parse(&self.address)
            .map_err(|e| Error::ConfigError(format!("Invalid Consul address: {e}")))
    }
}

impl Default for ConsulConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            datacenter: None,
            request_timeout_secs: default_request_timeout_secs(),
            tls_verify: default_tls_verify(),
            enable_compression: default_enable_compression(),
        }
    }
}
