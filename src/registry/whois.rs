//! Whois client for RPSL routing registries

use crate::asn::Asn;
use crate::config::RegistryConfig;
use crate::error::RegistryError;
use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;

/// Source of route objects for an origin AS
///
/// Implemented by [`WhoisClient`]; tests supply canned responses.
#[async_trait]
pub trait RouteRegistry: Send + Sync {
    /// Return the raw response lines for an inverse `origin` query
    async fn query_origin(&self, asn: Asn) -> Result<Vec<String>, RegistryError>;
}

/// Query text sent for an inverse lookup on the `origin` attribute
pub fn origin_query(asn: Asn) -> String {
    format!("-i origin {asn}\r\n")
}

/// Line-oriented whois client over TCP
#[derive(Debug, Clone)]
pub struct WhoisClient {
    config: RegistryConfig,
}

impl WhoisClient {
    /// Create a client for the given registry
    pub fn new(config: RegistryConfig) -> Self {
        Self { config }
    }

    /// Registry settings in use
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Send `query` and collect every response line until the server closes
    pub async fn query(&self, query: &str) -> Result<Vec<String>, RegistryError> {
        let server = self.config.address();
        let mut stream = TcpStream::connect(&server)
            .await
            .map_err(|source| RegistryError::Connect {
                server: server.clone(),
                source,
            })?;
        tracing::debug!(%server, query = query.trim_end(), "sending whois query");

        stream.write_all(query.as_bytes()).await?;
        stream.flush().await?;

        // Registry objects may carry Latin-1 text, so decode lossily per line
        let mut reader = BufReader::new(stream);
        let mut buf = Vec::new();
        let mut result = Vec::new();
        while reader.read_until(b'\n', &mut buf).await? > 0 {
            result.push(decode_line(&buf));
            buf.clear();
        }
        tracing::debug!(%server, lines = result.len(), "whois response received");
        Ok(result)
    }
}

fn decode_line(raw: &[u8]) -> String {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    String::from_utf8_lossy(raw).into_owned()
}

#[async_trait]
impl RouteRegistry for WhoisClient {
    async fn query_origin(&self, asn: Asn) -> Result<Vec<String>, RegistryError> {
        let timeout = self.config.timeout;
        tokio::time::timeout(timeout, self.query(&origin_query(asn)))
            .await
            .map_err(|_| RegistryError::Timeout {
                asn,
                timeout_ms: timeout.as_millis(),
            })?
    }
}
