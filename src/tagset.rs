//! Shared sorted tag collection.
//!
//! A companion structure to the sampling engine: a set of integer tags kept
//! in ascending order, mutated concurrently by worker threads. Each
//! operation is atomic with respect to the others behind a single coarse
//! lock over a contiguous `Vec`. The coarse lock deliberately replaces any
//! per-node linked ownership: with one lock there is no lock ordering to
//! get wrong and no way for a remove to race an insert mid-traversal.
//!
//! Unlike the epoch buffer, producers and consumers here interleave freely
//! with no completion barrier, so a remover can run ahead of the matching
//! inserter and find nothing to remove. `remove` returns whether a tag was
//! actually taken so callers can observe that.

use std::sync::Mutex;

/// Ascending collection of integer tags behind one coarse lock
#[derive(Debug, Default)]
pub struct SortedTagSet {
    tags: Mutex<Vec<i64>>,
}

impl SortedTagSet {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `tag`, keeping ascending order. Duplicates are kept.
    pub fn insert(&self, tag: i64) {
        let mut tags = self.tags.lock().expect("tag set mutex poisoned");
        let idx = tags.partition_point(|&t| t < tag);
        tags.insert(idx, tag);
    }

    /// Remove one occurrence of `tag`. Returns whether one was present.
    pub fn remove(&self, tag: i64) -> bool {
        let mut tags = self.tags.lock().expect("tag set mutex poisoned");
        match tags.binary_search(&tag) {
            Ok(idx) => {
                tags.remove(idx);
                true
            }
            Err(_) => false,
        }
    }

    /// Whether `tag` is currently present
    pub fn contains(&self, tag: i64) -> bool {
        let tags = self.tags.lock().expect("tag set mutex poisoned");
        tags.binary_search(&tag).is_ok()
    }

    /// Number of tags currently held
    pub fn len(&self) -> usize {
        self.tags.lock().expect("tag set mutex poisoned").len()
    }

    /// Whether the collection is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy the tags out in ascending order
    pub fn to_vec(&self) -> Vec<i64> {
        self.tags.lock().expect("tag set mutex poisoned").clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_insert_keeps_ascending_order() {
        let set = SortedTagSet::new();
        for tag in [5, 1, 9, 3, 7] {
            set.insert(tag);
        }
        assert_eq!(set.to_vec(), vec![1, 3, 5, 7, 9]);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let set = SortedTagSet::new();
        set.insert(4);
        set.insert(4);
        assert_eq!(set.len(), 2);
        assert!(set.remove(4));
        assert!(set.contains(4));
        assert!(set.remove(4));
        assert!(!set.contains(4));
    }

    #[test]
    fn test_remove_missing_tag() {
        let set = SortedTagSet::new();
        set.insert(1);
        assert!(!set.remove(2));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_concurrent_inserts_all_land() {
        const WORKERS: usize = 4;
        const PER_WORKER: i64 = 250;

        let set = Arc::new(SortedTagSet::new());
        let handles: Vec<_> = (0..WORKERS as i64)
            .map(|w| {
                let set = set.clone();
                thread::spawn(move || {
                    for i in 0..PER_WORKER {
                        set.insert(w * PER_WORKER + i);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let tags = set.to_vec();
        assert_eq!(tags.len(), WORKERS * PER_WORKER as usize);
        assert!(tags.windows(2).all(|w| w[0] <= w[1]));
    }

    /// The classic interleaved exercise: workers split a tag range, even
    /// tags get inserted, odd tags get removed. The odd removes target tags
    /// nobody inserts, so they must all report false and every even tag
    /// must survive, in order. This is the produce/consume mismatch the
    /// sampling engine's completion barrier exists to prevent.
    #[test]
    fn test_interleaved_insert_remove_workers() {
        const WORKERS: i64 = 4;
        const TAGS: i64 = 100;

        let set = Arc::new(SortedTagSet::new());
        let per_worker = TAGS / WORKERS;
        let handles: Vec<_> = (0..WORKERS)
            .map(|w| {
                let set = set.clone();
                thread::spawn(move || {
                    for tag in w * per_worker..(w + 1) * per_worker {
                        if tag % 2 == 0 {
                            set.insert(tag);
                        } else {
                            set.remove(tag);
                        }
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let tags = set.to_vec();
        assert!(tags.iter().all(|t| t % 2 == 0));
        assert!(tags.windows(2).all(|w| w[0] <= w[1]));
        // Odd tags are only ever removed, never inserted, so every even
        // tag survives.
        assert_eq!(tags.len(), (TAGS / 2) as usize);
    }
}
