//! Per-ASN route caching

use crate::asn::Asn;
use crate::prefix::Prefix;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Thread-safe cache of parsed route prefixes keyed by origin AS
#[derive(Debug)]
pub struct RouteCache {
    cache: Arc<Mutex<HashMap<Asn, Vec<Prefix>>>>,
}

impl RouteCache {
    /// Create a new empty cache
    pub fn new() -> Self {
        Self {
            cache: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Look up the routes of an AS
    pub fn get(&self, asn: Asn) -> Option<Vec<Prefix>> {
        let cache = self.cache.lock().expect("mutex poisoned");
        cache.get(&asn).cloned()
    }

    /// Store the routes of an AS
    pub fn insert(&self, asn: Asn, prefixes: Vec<Prefix>) {
        let mut cache = self.cache.lock().expect("mutex poisoned");
        cache.insert(asn, prefixes);
    }

    /// Get the number of cached ASNs
    pub fn len(&self) -> usize {
        let cache = self.cache.lock().expect("mutex poisoned");
        cache.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        let cache = self.cache.lock().expect("mutex poisoned");
        cache.is_empty()
    }

    /// Clear all entries from the cache
    pub fn clear(&self) {
        let mut cache = self.cache.lock().expect("mutex poisoned");
        cache.clear();
    }
}

impl Default for RouteCache {
    fn default() -> Self {
        Self::new()
    }
}
