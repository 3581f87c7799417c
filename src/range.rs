//! First/last address computation for a prefix

use crate::prefix::{AddressFamily, Prefix};
use ipnet::IpNet;
use serde::Serialize;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Inclusive span of addresses covered by a prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct AddressSpan {
    /// Network address (all host bits cleared)
    pub first: IpAddr,
    /// Last address (all host bits set)
    pub last: IpAddr,
}

impl AddressSpan {
    /// Address family of the span
    pub fn family(&self) -> AddressFamily {
        AddressFamily::of(&self.first)
    }

    /// Whether `addr` lies within the span; always false across families
    pub fn contains(&self, addr: &IpAddr) -> bool {
        AddressFamily::of(addr) == self.family() && self.first <= *addr && *addr <= self.last
    }

    /// Whether `other` lies entirely within this span
    pub fn covers(&self, other: &AddressSpan) -> bool {
        self.contains(&other.first) && self.contains(&other.last)
    }
}

/// Compute the first and last address of `prefix`
///
/// `last` is the network address OR'd with the inverted netmask, byte by byte.
pub fn range(prefix: &Prefix) -> AddressSpan {
    match prefix.as_ipnet() {
        IpNet::V4(net) => {
            let first = net.network();
            let last = fill_host_bits(first.octets(), net.netmask().octets());
            AddressSpan {
                first: IpAddr::V4(first),
                last: IpAddr::V4(Ipv4Addr::from(last)),
            }
        }
        IpNet::V6(net) => {
            let first = net.network();
            let last = fill_host_bits(first.octets(), net.netmask().octets());
            AddressSpan {
                first: IpAddr::V6(first),
                last: IpAddr::V6(Ipv6Addr::from(last)),
            }
        }
    }
}

fn fill_host_bits<const N: usize>(mut addr: [u8; N], mask: [u8; N]) -> [u8; N] {
    for (byte, mask) in addr.iter_mut().zip(mask) {
        *byte |= !mask;
    }
    addr
}
