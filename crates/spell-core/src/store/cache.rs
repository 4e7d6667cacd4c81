use std::collections::VecDeque;

use ahash::AHashMap;

/// Bounded term → count memoization for the hot lookup path.
///
/// Deliberately not a strict LRU: hits do no bookkeeping, and when the map
/// reaches capacity the oldest half (by insertion order) is dropped in one
/// step. Misses are memoized too (count 0), since absent terms are the
/// common case during segmentation.
pub(super) struct CountCache {
    capacity: usize,
    map: AHashMap<String, u64>,
    order: VecDeque<String>,
}

impl CountCache {
    pub(super) fn new(capacity: usize) -> Self {
        Self {
            capacity,
            map: AHashMap::with_capacity(capacity.min(1024)),
            order: VecDeque::with_capacity(capacity.min(1024)),
        }
    }

    pub(super) fn get(&self, term: &str) -> Option<u64> {
        self.map.get(term).copied()
    }

    pub(super) fn insert(&mut self, term: String, count: u64) {
        if self.capacity == 0 || self.map.contains_key(&term) {
            return;
        }
        if self.map.len() >= self.capacity {
            let drop = (self.capacity / 2).max(1);
            for _ in 0..drop {
                if let Some(old) = self.order.pop_front() {
                    self.map.remove(&old);
                }
            }
        }
        self.order.push_back(term.clone());
        self.map.insert(term, count);
    }

    #[cfg(test)]
    pub(super) fn len(&self) -> usize {
        self.map.len()
    }
}
