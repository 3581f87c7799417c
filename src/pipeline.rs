//! From origin ASNs to an aggregated, printable route table

use crate::aggregate::{aggregate, RangeSet};
use crate::asn::Asn;
use crate::error::RegistryError;
use crate::prefix::{AddressFamily, Prefix};
use crate::registry::RouteLookup;
use serde::{Deserialize, Serialize};

/// Route prefixes bucketed by address family
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteTable {
    /// IPv4 prefixes
    pub ipv4: RangeSet,
    /// IPv6 prefixes
    pub ipv6: RangeSet,
}

impl RouteTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a prefix to the bucket of its family
    pub fn insert(&mut self, prefix: Prefix) {
        match prefix.family() {
            AddressFamily::Ipv4 => self.ipv4.push(prefix),
            AddressFamily::Ipv6 => self.ipv6.push(prefix),
        }
    }

    /// Total number of prefixes
    pub fn len(&self) -> usize {
        self.ipv4.len() + self.ipv6.len()
    }

    /// Whether both buckets are empty
    pub fn is_empty(&self) -> bool {
        self.ipv4.is_empty() && self.ipv6.is_empty()
    }

    /// Sort each family widest-first and drop contained prefixes
    ///
    /// IPv4 is reduced first, then IPv6.
    pub fn aggregate(mut self) -> Self {
        self.ipv4.sort_by_prefix_len();
        self.ipv6.sort_by_prefix_len();
        Self {
            ipv4: aggregate(self.ipv4),
            ipv6: aggregate(self.ipv6),
        }
    }

    /// All prefixes, IPv4 first, then IPv6
    pub fn iter(&self) -> impl Iterator<Item = &Prefix> {
        self.ipv4.iter().chain(self.ipv6.iter())
    }

    /// One CIDR per line, IPv4 first
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for prefix in self.iter() {
            out.push_str(&prefix.to_string());
            out.push('\n');
        }
        out
    }
}

impl Extend<Prefix> for RouteTable {
    fn extend<T: IntoIterator<Item = Prefix>>(&mut self, iter: T) {
        for prefix in iter {
            self.insert(prefix);
        }
    }
}

impl FromIterator<Prefix> for RouteTable {
    fn from_iter<T: IntoIterator<Item = Prefix>>(iter: T) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}

/// Look up every ASN and bucket the announced prefixes, without aggregating
pub async fn collect_routes(lookup: &RouteLookup, asns: &[Asn]) -> Result<RouteTable, RegistryError> {
    let mut table = RouteTable::new();
    for (_, prefixes) in lookup.lookup_all(asns).await? {
        table.extend(prefixes);
    }
    tracing::debug!(
        ipv4 = table.ipv4.len(),
        ipv6 = table.ipv6.len(),
        "collected routes"
    );
    Ok(table)
}

/// Look up every ASN and reduce the result to a minimal covering set
pub async fn resolve(lookup: &RouteLookup, asns: &[Asn]) -> Result<RouteTable, RegistryError> {
    let table = collect_routes(lookup, asns).await?.aggregate();
    tracing::info!(
        ipv4 = table.ipv4.len(),
        ipv6 = table.ipv6.len(),
        "aggregated route table"
    );
    Ok(table)
}
