//! asnroutes - routes announced by an AS, reduced for ACLs
//!
//! This library looks up the route objects registered for one or more
//! origin ASNs in a whois routing registry and reduces them to the smallest
//! set of prefixes in which no prefix is contained in another.
//!
//! ```
//! use asnroutes::{aggregate, Prefix, RangeSet};
//!
//! let mut set: RangeSet = ["10.1.0.0/16", "10.0.0.0/8", "192.0.2.0/24"]
//!     .iter()
//!     .map(|s| Prefix::parse(s))
//!     .collect::<Result<_, _>>()?;
//! set.sort_by_prefix_len();
//!
//! let minimal = aggregate(set);
//! let cidrs: Vec<String> = minimal.iter().map(ToString::to_string).collect();
//! assert_eq!(cidrs, ["10.0.0.0/8", "192.0.2.0/24"]);
//! # Ok::<(), asnroutes::PrefixError>(())
//! ```

pub mod aggregate;
pub mod asn;
pub mod config;
pub mod error;
pub mod overlap;
pub mod pipeline;
pub mod prefix;
pub mod range;
pub mod registry;

// Re-export core types for library users
pub use aggregate::{aggregate, RangeSet};
pub use asn::Asn;
pub use config::{RegistryConfig, RegistryConfigBuilder};
pub use error::{PrefixError, RegistryError};
pub use overlap::overlaps;
pub use pipeline::{collect_routes, resolve, RouteTable};
pub use prefix::{AddressFamily, Prefix};
pub use range::{range, AddressSpan};
pub use registry::{InvalidRoutePolicy, RouteLookup, RouteRegistry, WhoisClient};
