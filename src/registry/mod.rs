//! Routing registry access: whois transport, response parsing and caching

pub mod cache;
pub mod parser;
pub mod service;
pub mod whois;

pub use cache::RouteCache;
pub use parser::{parse_routes, route_text, InvalidRoutePolicy};
pub use service::RouteLookup;
pub use whois::{RouteRegistry, WhoisClient};
