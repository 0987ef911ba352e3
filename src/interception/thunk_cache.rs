// src/interception/thunk_cache.rs
//! Per-identifier memo of substitute values
//!
//! Entries are created lazily on the first intercepted load of an
//! identifier and live only as long as the session that owns the cache.

use crate::interception::selector::Targets;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Which entries a clear removes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheScope {
    /// Every entry
    All,

    /// Only the listed identifiers; absent ones are ignored
    Targets(Targets),
}

impl From<Targets> for CacheScope {
    fn from(targets: Targets) -> Self {
        CacheScope::Targets(targets)
    }
}

impl From<&str> for CacheScope {
    fn from(target: &str) -> Self {
        CacheScope::Targets(target.into())
    }
}

impl From<Vec<String>> for CacheScope {
    fn from(targets: Vec<String>) -> Self {
        CacheScope::Targets(targets.into())
    }
}

impl<const N: usize> From<[&str; N]> for CacheScope {
    fn from(targets: [&str; N]) -> Self {
        CacheScope::Targets(targets.into())
    }
}

/// Thunk cache
pub struct ThunkCache<T> {
    entries: HashMap<String, Arc<T>>,
}

impl<T> ThunkCache<T> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Cached value for `id`, sharing the stored allocation
    pub fn get(&self, id: &str) -> Option<Arc<T>> {
        self.entries.get(id).cloned()
    }

    /// Store (or overwrite) the value for `id`
    pub fn put(&mut self, id: impl Into<String>, value: Arc<T>) {
        self.entries.insert(id.into(), value);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Remove entries in `scope`, returning how many were dropped
    pub fn clear(&mut self, scope: impl Into<CacheScope>) -> usize {
        match scope.into() {
            CacheScope::All => {
                let removed = self.entries.len();
                self.entries.clear();
                debug!("Cleared all {} thunk cache entries", removed);
                removed
            }
            CacheScope::Targets(targets) => {
                let removed = targets
                    .iter()
                    .filter(|id| self.entries.remove(*id).is_some())
                    .count();
                debug!("Cleared {} thunk cache entries by target", removed);
                removed
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cached identifiers, sorted
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.keys().cloned().collect();
        keys.sort();
        keys
    }
}

impl<T> Default for ThunkCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn populated() -> ThunkCache<u32> {
        let mut cache = ThunkCache::new();
        cache.put("net", Arc::new(1));
        cache.put("http", Arc::new(2));
        cache.put("https", Arc::new(3));
        cache
    }

    #[test]
    fn test_get_returns_same_allocation() {
        let cache = populated();
        let first = cache.get("net").unwrap();
        let second = cache.get("net").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert!(cache.get("fs").is_none());
    }

    #[test]
    fn test_put_overwrites() {
        let mut cache = populated();
        cache.put("net", Arc::new(10));
        assert_eq!(*cache.get("net").unwrap(), 10);
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn test_clear_all() {
        let mut cache = populated();
        assert_eq!(cache.clear(CacheScope::All), 3);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_clear_single_keeps_siblings() {
        let mut cache = populated();
        assert_eq!(cache.clear("http"), 1);
        assert!(!cache.contains("http"));
        assert!(cache.contains("https"));
        assert!(cache.contains("net"));
    }

    #[test]
    fn test_clear_list_ignores_absent() {
        let mut cache = populated();
        assert_eq!(cache.clear(["http", "fs", "net"]), 2);
        assert_eq!(cache.keys(), vec!["https".to_string()]);
    }

    #[test]
    fn test_wildcard_is_not_special_when_clearing() {
        let mut cache = populated();
        assert_eq!(cache.clear("*"), 0);
        assert_eq!(cache.len(), 3);
    }
}
