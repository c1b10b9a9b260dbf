//! LRU Tracker Module
//!
//! Access-order bookkeeping used to pick an eviction victim when the
//! cache reaches capacity.

use std::collections::VecDeque;

// == LRU Tracker ==
/// Keys ordered by last write or read.
///
/// Front = most recently used, back = next eviction victim.
#[derive(Debug, Default)]
pub struct LruTracker {
    order: VecDeque<String>,
}

impl LruTracker {
    pub fn new() -> Self {
        Self::default()
    }

    // == Touch ==
    /// Marks `key` as the most recently used key.
    pub fn touch(&mut self, key: &str) {
        if let Some(pos) = self.order.iter().position(|k| k == key) {
            if pos == 0 {
                return;
            }
            if let Some(existing) = self.order.remove(pos) {
                self.order.push_front(existing);
                return;
            }
        }
        self.order.push_front(key.to_string());
    }

    // == Remove ==
    /// Stops tracking `key`. No-op if it is not tracked.
    pub fn remove(&mut self, key: &str) {
        self.order.retain(|k| k != key);
    }

    // == Evict Oldest ==
    /// Pops the least recently used key.
    pub fn evict_oldest(&mut self) -> Option<String> {
        self.order.pop_back()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.order.len()
    }
}
