//! Address-family aware network prefixes
//!
//! A [`Prefix`] always stores the network address: host bits are cleared
//! when it is built, so two spellings of the same network compare equal.

use crate::error::PrefixError;
use crate::range::{range, AddressSpan};
use ipnet::{IpNet, Ipv4Net, Ipv6Net};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

/// IP address family of a prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AddressFamily {
    /// 32-bit IPv4 addresses
    Ipv4,
    /// 128-bit IPv6 addresses
    Ipv6,
}

impl AddressFamily {
    /// Longest valid prefix length for the family
    pub const fn max_prefix_len(self) -> u8 {
        match self {
            AddressFamily::Ipv4 => 32,
            AddressFamily::Ipv6 => 128,
        }
    }

    /// Family of an address
    pub fn of(addr: &IpAddr) -> Self {
        match addr {
            IpAddr::V4(_) => AddressFamily::Ipv4,
            IpAddr::V6(_) => AddressFamily::Ipv6,
        }
    }
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressFamily::Ipv4 => write!(f, "IPv4"),
            AddressFamily::Ipv6 => write!(f, "IPv6"),
        }
    }
}

/// A network address plus prefix length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Prefix {
    net: IpNet,
}

impl Prefix {
    /// Build a prefix from an address and a prefix length, masking host bits
    pub fn new(addr: IpAddr, prefix_len: u8) -> Result<Self, PrefixError> {
        let family = AddressFamily::of(&addr);
        let net = IpNet::new(addr, prefix_len).map_err(|_| {
            PrefixError::InvalidAddress(format!(
                "prefix length {} exceeds {} for {} address {}",
                prefix_len,
                family.max_prefix_len(),
                family,
                addr
            ))
        })?;
        Ok(Self { net: net.trunc() })
    }

    /// Build a prefix from raw network-order address bytes
    ///
    /// Only 4-byte (IPv4) and 16-byte (IPv6) addresses are accepted.
    pub fn from_bytes(bytes: &[u8], prefix_len: u8) -> Result<Self, PrefixError> {
        let addr = if let Ok(octets) = <[u8; 4]>::try_from(bytes) {
            IpAddr::V4(Ipv4Addr::from(octets))
        } else if let Ok(octets) = <[u8; 16]>::try_from(bytes) {
            IpAddr::V6(Ipv6Addr::from(octets))
        } else {
            return Err(PrefixError::InvalidAddress(format!(
                "unsupported address length of {} bytes",
                bytes.len()
            )));
        };
        Self::new(addr, prefix_len)
    }

    /// Parse CIDR text such as `10.1.0.0/16` or `2001:db8::/32`
    ///
    /// Surrounding whitespace is ignored. Host bits set in the address are
    /// cleared, so `10.1.2.3/8` yields `10.0.0.0/8`.
    pub fn parse(cidr: &str) -> Result<Self, PrefixError> {
        let text = cidr.trim();
        let net = text
            .parse::<IpNet>()
            .map_err(|e| PrefixError::InvalidAddress(format!("{text}: {e}")))?;
        Ok(Self { net: net.trunc() })
    }

    /// Address family of this prefix
    pub fn family(&self) -> AddressFamily {
        match self.net {
            IpNet::V4(_) => AddressFamily::Ipv4,
            IpNet::V6(_) => AddressFamily::Ipv6,
        }
    }

    /// Network (base) address
    pub fn network(&self) -> IpAddr {
        self.net.network()
    }

    /// Prefix length in bits
    pub fn prefix_len(&self) -> u8 {
        self.net.prefix_len()
    }

    /// Inclusive span of addresses covered by this prefix
    pub fn span(&self) -> AddressSpan {
        range(self)
    }

    /// Whether `addr` falls inside this prefix
    pub fn contains(&self, addr: &IpAddr) -> bool {
        self.net.contains(addr)
    }

    /// The underlying [`IpNet`]
    pub fn as_ipnet(&self) -> &IpNet {
        &self.net
    }
}

impl FromStr for Prefix {
    type Err = PrefixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Prefix {
    type Error = PrefixError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Prefix> for String {
    fn from(prefix: Prefix) -> Self {
        prefix.to_string()
    }
}

impl From<Ipv4Net> for Prefix {
    fn from(net: Ipv4Net) -> Self {
        Self {
            net: IpNet::V4(net.trunc()),
        }
    }
}

impl From<Ipv6Net> for Prefix {
    fn from(net: Ipv6Net) -> Self {
        Self {
            net: IpNet::V6(net.trunc()),
        }
    }
}

impl From<IpNet> for Prefix {
    fn from(net: IpNet) -> Self {
        Self { net: net.trunc() }
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.net.network(), self.net.prefix_len())
    }
}
