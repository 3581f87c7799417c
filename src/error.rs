//! Error types for prefix handling and registry lookups

use crate::asn::Asn;
use thiserror::Error;

/// Errors raised while building or inspecting a [`Prefix`](crate::Prefix)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrefixError {
    /// The text or bytes do not describe a valid network
    ///
    /// Raised for malformed CIDR syntax, a prefix length outside the
    /// family's range, or a raw address whose length is neither 4 nor 16 bytes.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),
}

/// Errors that can occur while querying a routing registry
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Could not open a connection to the registry server
    #[error("Error connecting to whois server {server}: {source}")]
    Connect {
        /// `host:port` that was dialed
        server: String,
        /// Underlying socket error
        #[source]
        source: std::io::Error,
    },

    /// Reading or writing the query failed mid-exchange
    #[error("I/O error talking to whois server: {0}")]
    Io(#[from] std::io::Error),

    /// The exchange did not finish within the configured timeout
    #[error("Whois query for {asn} timed out after {timeout_ms}ms")]
    Timeout {
        /// ASN being queried
        asn: Asn,
        /// Configured timeout in milliseconds
        timeout_ms: u128,
    },

    /// A route line carried text that is not a valid CIDR
    #[error("Unexpected IP range format: {source} ({line})")]
    InvalidRoute {
        /// The offending registry line
        line: String,
        /// Parse failure
        #[source]
        source: PrefixError,
    },

    /// Invalid registry configuration
    #[error("Invalid configuration: {0}")]
    Config(String),
}
