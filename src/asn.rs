//! Autonomous System Number value type

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An Autonomous System Number
///
/// Parses from `64512`, `AS64512` or `as64512` and renders as `AS64512`,
/// which is also the form whois registries expect in `origin` queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Asn(u32);

impl Asn {
    /// Wrap a raw AS number
    pub const fn new(number: u32) -> Self {
        Self(number)
    }

    /// The raw AS number
    pub const fn number(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Asn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AS{}", self.0)
    }
}

impl From<u32> for Asn {
    fn from(number: u32) -> Self {
        Self(number)
    }
}

impl FromStr for Asn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = match (trimmed.get(..2), trimmed.get(2..)) {
            (Some(tag), Some(rest)) if tag.eq_ignore_ascii_case("as") => rest,
            _ => trimmed,
        };
        digits
            .parse::<u32>()
            .map(Self)
            .map_err(|_| format!("invalid AS number: {s:?}"))
    }
}
