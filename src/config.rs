//! Configuration for registry lookups

use crate::error::RegistryError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default whois server queried for route objects
pub const DEFAULT_WHOIS_SERVER: &str = "whois.radb.net";
/// Default whois TCP port
pub const DEFAULT_WHOIS_PORT: u16 = 43;
/// Default timeout for one whois exchange in milliseconds
pub const DEFAULT_QUERY_TIMEOUT_MS: u64 = 10_000;
/// Environment variable overriding the default whois server
pub const WHOIS_SERVER_ENV: &str = "ASNROUTES_WHOIS_SERVER";

/// Settings for talking to a routing registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Whois server hostname or IP address
    pub server: String,
    /// Whois server port (default: 43)
    pub port: u16,
    /// Timeout covering connect, query and full response (default: 10s)
    pub timeout: Duration,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        let server = std::env::var(WHOIS_SERVER_ENV)
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_WHOIS_SERVER.to_string());
        Self {
            server,
            port: DEFAULT_WHOIS_PORT,
            timeout: Duration::from_millis(DEFAULT_QUERY_TIMEOUT_MS),
        }
    }
}

impl RegistryConfig {
    /// Create a new RegistryConfig builder
    pub fn builder() -> RegistryConfigBuilder {
        RegistryConfigBuilder::new()
    }

    /// `host:port` string to dial
    pub fn address(&self) -> String {
        if self.server.contains(':') && !self.server.starts_with('[') {
            // bare IPv6 literal
            format!("[{}]:{}", self.server, self.port)
        } else {
            format!("{}:{}", self.server, self.port)
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), RegistryError> {
        if self.server.trim().is_empty() {
            return Err(RegistryError::Config("server must be specified".to_string()));
        }
        if self.port == 0 {
            return Err(RegistryError::Config("port must be greater than 0".to_string()));
        }
        if self.timeout.is_zero() {
            return Err(RegistryError::Config(
                "timeout must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for RegistryConfig
pub struct RegistryConfigBuilder {
    config: RegistryConfig,
}

impl RegistryConfigBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            config: RegistryConfig::default(),
        }
    }

    /// Set the whois server
    pub fn server(mut self, server: impl Into<String>) -> Self {
        self.config.server = server.into();
        self
    }

    /// Set the whois port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Set the query timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<RegistryConfig, RegistryError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for RegistryConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
