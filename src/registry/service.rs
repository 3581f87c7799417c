//! Route lookup service
//!
//! Wraps a [`RouteRegistry`] with response parsing and a per-ASN cache.

use super::cache::RouteCache;
use super::parser::{parse_routes, InvalidRoutePolicy};
use super::whois::{RouteRegistry, WhoisClient};
use crate::asn::Asn;
use crate::config::RegistryConfig;
use crate::error::RegistryError;
use crate::prefix::Prefix;
use futures::future::join_all;
use std::fmt;
use std::sync::Arc;

/// Resolves the prefixes announced by origin ASNs
///
/// # Examples
///
/// ```no_run
/// use asnroutes::{Asn, RegistryConfig, RouteLookup};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let lookup = RouteLookup::new(RegistryConfig::default());
///     for prefix in lookup.lookup(Asn::new(15169)).await? {
///         println!("{prefix}");
///     }
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct RouteLookup {
    registry: Arc<dyn RouteRegistry>,
    cache: Arc<RouteCache>,
    policy: InvalidRoutePolicy,
}

impl RouteLookup {
    /// Create a lookup service backed by a whois client
    pub fn new(config: RegistryConfig) -> Self {
        Self::with_registry(Arc::new(WhoisClient::new(config)))
    }

    /// Create a lookup service over any registry implementation
    pub fn with_registry(registry: Arc<dyn RouteRegistry>) -> Self {
        Self {
            registry,
            cache: Arc::new(RouteCache::new()),
            policy: InvalidRoutePolicy::default(),
        }
    }

    /// Set how unparseable route lines are handled
    pub fn invalid_route_policy(mut self, policy: InvalidRoutePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Prefixes announced by `asn`, in registry order
    pub async fn lookup(&self, asn: Asn) -> Result<Vec<Prefix>, RegistryError> {
        if let Some(cached) = self.cache.get(asn) {
            tracing::debug!(%asn, routes = cached.len(), "route cache hit");
            return Ok(cached);
        }

        let lines = self.registry.query_origin(asn).await?;
        let prefixes = parse_routes(&lines, self.policy)?;
        tracing::info!(%asn, routes = prefixes.len(), "resolved routes");

        self.cache.insert(asn, prefixes.clone());
        Ok(prefixes)
    }

    /// Look up several ASNs concurrently
    ///
    /// Repeated ASNs are queried once. Results come back in the order the
    /// ASNs were first given; the first failure is returned.
    pub async fn lookup_all(&self, asns: &[Asn]) -> Result<Vec<(Asn, Vec<Prefix>)>, RegistryError> {
        let mut unique = Vec::with_capacity(asns.len());
        for asn in asns {
            if !unique.contains(asn) {
                unique.push(*asn);
            }
        }

        let results = join_all(unique.iter().map(|asn| self.lookup(*asn))).await;
        unique
            .into_iter()
            .zip(results)
            .map(|(asn, result)| result.map(|prefixes| (asn, prefixes)))
            .collect()
    }

    /// Whether routes for `asn` are cached
    pub fn is_cached(&self, asn: Asn) -> bool {
        self.cache.get(asn).is_some()
    }

    /// Number of cached ASNs
    pub fn cached_asns(&self) -> usize {
        self.cache.len()
    }

    /// Drop all cached routes
    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}

impl fmt::Debug for RouteLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteLookup")
            .field("cache", &self.cache)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
