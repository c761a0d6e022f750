//! Reusable entity pools
//!
//! Fragments, enemies and bullets churn constantly; recycling them keeps the
//! per-tick allocation count at zero once a run has warmed up. Live instances
//! are owned by the live collections on `GameState` and only inactive ones
//! sit in the free list, so every instance is in exactly one place.

use serde::{Deserialize, Serialize};

/// A LIFO free list of inactive entity instances.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pool<T> {
    free: Vec<T>,
    constructed: usize,
}

impl<T: Default> Pool<T> {
    pub fn new() -> Self {
        Self {
            free: Vec::new(),
            constructed: 0,
        }
    }

    /// Reuse the most recently released instance, or construct a new one.
    ///
    /// The caller is expected to overwrite the instance's fields and push it
    /// onto the matching live collection.
    pub fn acquire(&mut self) -> T {
        self.free.pop().unwrap_or_else(|| {
            self.constructed += 1;
            T::default()
        })
    }

    /// Return an instance to the free list for later reuse.
    pub fn release(&mut self, instance: T) {
        self.free.push(instance);
    }

    /// Number of instances currently waiting for reuse.
    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    /// Total instances this pool has ever constructed.
    ///
    /// Never exceeds the historical peak concurrent demand: an acquire only
    /// constructs when the free list is empty.
    pub fn constructed_count(&self) -> usize {
        self.constructed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquire_reuses_most_recently_released() {
        let mut pool: Pool<u8> = Pool::new();
        pool.release(1);
        pool.release(2);
        assert_eq!(pool.acquire(), 2);
        assert_eq!(pool.acquire(), 1);
    }

    #[test]
    fn test_acquire_constructs_when_empty() {
        let mut pool: Pool<u8> = Pool::new();
        assert_eq!(pool.acquire(), 0);
        assert_eq!(pool.constructed_count(), 1);
    }

    #[test]
    fn test_constructed_count_matches_peak_demand() {
        let mut pool: Pool<u8> = Pool::new();

        // Peak demand of 3, then full churn through the free list
        let a = pool.acquire();
        let b = pool.acquire();
        let c = pool.acquire();
        pool.release(a);
        pool.release(b);
        pool.release(c);
        for _ in 0..10 {
            let x = pool.acquire();
            pool.release(x);
        }

        assert_eq!(pool.constructed_count(), 3);
        assert_eq!(pool.free_count(), 3);
    }
}
