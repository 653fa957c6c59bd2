//! Bounded term-lookup cache for advanced rules
//!
//! Term matching against fixed vocabularies is the hot path of the
//! categorized-term rules. Each advanced rule instance owns one
//! `TermCache`; lookups are keyed by the normalized input text plus
//! the ordered term tuple, so a repeated evaluation of the same text
//! is a map hit instead of a rescan.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use crate::logging::ResourceMetrics;

/// Default number of `(text, terms)` entries retained per rule instance
pub const DEFAULT_CAPACITY: usize = 64;

type Key = (String, Vec<String>);

#[derive(Debug, Default)]
struct CacheState {
    map: HashMap<Key, Vec<String>>,
    /// Insertion/recency order, oldest at the front
    order: VecDeque<Key>,
}

/// LRU cache mapping `(normalized text, ordered terms)` to the terms
/// found in the text. Keys are owned value tuples; the cache never
/// observes later mutation of the caller's input.
#[derive(Debug)]
pub struct TermCache {
    capacity: usize,
    state: Mutex<CacheState>,
    metrics: ResourceMetrics,
}

impl TermCache {
    /// Create a cache retaining up to `capacity` entries
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            state: Mutex::new(CacheState::default()),
            metrics: ResourceMetrics::new(),
        }
    }

    /// Return the terms (by original spelling) found in `text` via
    /// case-insensitive substring match, memoized.
    pub fn find_terms(&self, text: &str, terms: &[String]) -> Vec<String> {
        let key: Key = (normalize(text), terms.to_vec());

        let mut state = self.state.lock().expect("term cache poisoned");
        if let Some(found) = state.map.get(&key) {
            self.metrics.record_cache_hit();
            let found = found.clone();
            touch(&mut state.order, &key);
            return found;
        }

        self.metrics.record_cache_miss();
        let haystack = &key.0;
        let found: Vec<String> = terms
            .iter()
            .filter(|term| haystack.contains(&term.to_lowercase()))
            .cloned()
            .collect();

        state.map.insert(key.clone(), found.clone());
        state.order.push_back(key);
        while state.order.len() > self.capacity {
            if let Some(evicted) = state.order.pop_front() {
                state.map.remove(&evicted);
            }
        }

        tracing::trace!(
            hits = self.metrics.cache_hits(),
            misses = self.metrics.cache_misses(),
            hit_rate = self.metrics.cache_hit_rate(),
            "term_cache_lookup"
        );

        found
    }

    /// Number of cached entries
    pub fn len(&self) -> usize {
        self.state.lock().expect("term cache poisoned").map.len()
    }

    /// Whether the cache is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cache hit/miss counters
    pub fn metrics(&self) -> &ResourceMetrics {
        &self.metrics
    }
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

fn touch(order: &mut VecDeque<Key>, key: &Key) {
    if let Some(pos) = order.iter().position(|k| k == key) {
        if let Some(k) = order.remove(pos) {
            order.push_back(k);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_find_terms_case_insensitive() {
        let cache = TermCache::new(8);
        let found = cache.find_terms(
            "Encryption and FIREWALL rules",
            &terms(&["encryption", "firewall", "audit"]),
        );
        assert_eq!(found, terms(&["encryption", "firewall"]));
    }

    #[test]
    fn test_repeat_lookup_is_a_hit() {
        let cache = TermCache::new(8);
        let t = terms(&["alpha", "beta"]);
        cache.find_terms("alpha beta gamma", &t);
        cache.find_terms("alpha beta gamma", &t);
        assert_eq!(cache.metrics().cache_hits(), 1);
        assert_eq!(cache.metrics().cache_misses(), 1);
    }

    #[test]
    fn test_different_terms_are_different_keys() {
        let cache = TermCache::new(8);
        cache.find_terms("alpha", &terms(&["alpha"]));
        cache.find_terms("alpha", &terms(&["beta"]));
        assert_eq!(cache.metrics().cache_misses(), 2);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_capacity_is_bounded() {
        let cache = TermCache::new(2);
        let t = terms(&["x"]);
        cache.find_terms("one", &t);
        cache.find_terms("two", &t);
        cache.find_terms("three", &t);
        assert_eq!(cache.len(), 2);

        // Oldest entry was evicted, so looking it up again is a miss
        cache.find_terms("one", &t);
        assert_eq!(cache.metrics().cache_hits(), 0);
        assert_eq!(cache.metrics().cache_misses(), 4);
    }

    #[test]
    fn test_recency_updates_on_hit() {
        let cache = TermCache::new(2);
        let t = terms(&["x"]);
        cache.find_terms("one", &t);
        cache.find_terms("two", &t);
        cache.find_terms("one", &t); // refresh "one"
        cache.find_terms("three", &t); // evicts "two"

        cache.find_terms("one", &t);
        assert_eq!(cache.metrics().cache_hits(), 2);
    }
}
