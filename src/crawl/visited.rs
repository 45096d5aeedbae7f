// src/crawl/visited.rs
// =============================================================================
// The set of normalized URLs a crawl has already claimed.
//
// It is the only mutable state shared by all crawl tasks. A single mutex
// guards it, and the one operation that matters, `claim`, does its
// test-and-insert inside one critical section. Entries are never removed.
//
// Rust concepts:
// - Mutex<HashSet<String>>: interior mutability, so `claim` only needs &self
//   and the registry can be shared through the crawler's Arc
// - MutexGuard: the lock is released when the guard goes out of scope,
//   which here is the end of each one-line method
// =============================================================================

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
pub struct VisitedRegistry {
    keys: Mutex<HashSet<String>>,
}

impl VisitedRegistry {
    pub fn from_keys<I>(keys: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self {
            keys: Mutex::new(keys.into_iter().collect()),
        }
    }

    // Marks `key` as visited and reports whether it was already there
    //
    // Among any number of concurrent callers with the same key, exactly
    // one gets `false` back and goes on to fetch the page.
    pub fn claim(&self, key: &str) -> bool {
        !self.lock().insert(key.to_string())
    }

    #[cfg(test)]
    pub fn contains(&self, key: &str) -> bool {
        self.lock().contains(key)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    // A panic in another task cannot leave the set half-updated, so a
    // poisoned lock is still safe to use.
    fn lock(&self) -> MutexGuard<'_, HashSet<String>> {
        self.keys.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
