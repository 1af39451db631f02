//! Bidirectional point ↔ dense index registry.

use std::collections::{BTreeSet, HashMap};
use std::hash::Hash;

/// Assigns every live point a dense index in `[0, n)`.
///
/// Indices are recomputed lazily: any mutation marks the mapping stale and
/// the next lookup re-enumerates the whole set. Indices are therefore only
/// valid until the next `add`/`delete` and must not be cached across them.
///
/// Enumeration follows the points' `Ord`, so one snapshot always yields the
/// same indices for the same membership.
///
/// # Examples
///
/// ```
/// use pagefinder::knn::PointSpace;
///
/// let mut space = PointSpace::new();
/// space.add("b");
/// space.add("a");
/// assert_eq!(space.index_of(&"a"), Some(0));
/// assert_eq!(space.index_of(&"b"), Some(1));
/// assert_eq!(space.index_of(&"c"), None);
/// ```
#[derive(Debug, Clone)]
pub struct PointSpace<P> {
    points: BTreeSet<P>,
    index: HashMap<P, usize>,
    stale: bool,
}

impl<P: Clone + Ord + Hash> PointSpace<P> {
    /// Create an empty point space.
    #[must_use]
    pub fn new() -> Self {
        Self {
            points: BTreeSet::new(),
            index: HashMap::new(),
            stale: false,
        }
    }

    /// Add a point. Returns `false` if it was already present.
    pub fn add(&mut self, point: P) -> bool {
        let inserted = self.points.insert(point);
        self.stale |= inserted;
        inserted
    }

    /// Delete a point. Returns `false` if it was absent.
    pub fn delete(&mut self, point: &P) -> bool {
        let removed = self.points.remove(point);
        self.stale |= removed;
        removed
    }

    /// Membership test.
    #[must_use]
    pub fn contains(&self, point: &P) -> bool {
        self.points.contains(point)
    }

    /// Number of live points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when no point is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points in index order.
    pub fn iter(&self) -> impl Iterator<Item = &P> {
        self.points.iter()
    }

    /// Index of `point` in the current snapshot, re-enumerating if stale.
    pub fn index_of(&mut self, point: &P) -> Option<usize> {
        self.refresh();
        self.index.get(point).copied()
    }

    /// Re-enumerate indices if any mutation happened since the last lookup.
    pub fn refresh(&mut self) {
        if !self.stale {
            return;
        }
        self.index = self
            .points
            .iter()
            .enumerate()
            .map(|(i, p)| (p.clone(), i))
            .collect();
        self.stale = false;
    }

    /// Lookup against an already refreshed snapshot.
    pub(crate) fn lookup(&self, point: &P) -> Option<usize> {
        debug_assert!(!self.stale, "point space must be refreshed before lookup");
        self.index.get(point).copied()
    }
}

impl<P: Clone + Ord + Hash> Default for PointSpace<P> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_is_idempotent() {
        let mut space = PointSpace::new();
        assert!(space.add(1));
        assert!(!space.add(1));
        assert_eq!(space.len(), 1);
    }

    #[test]
    fn test_delete_absent_is_noop() {
        let mut space: PointSpace<u32> = PointSpace::new();
        assert!(!space.delete(&7));
        assert!(space.is_empty());
    }

    #[test]
    fn test_indices_are_dense_after_delete() {
        let mut space = PointSpace::new();
        for p in ["a", "b", "c", "d"] {
            space.add(p);
        }
        assert_eq!(space.index_of(&"d"), Some(3));
        space.delete(&"b");
        let mut seen: Vec<usize> = ["a", "c", "d"]
            .iter()
            .map(|p| space.index_of(p).expect("live point"))
            .collect();
        seen.sort_unstable();
        assert_eq!(seen, vec![0, 1, 2]);
        assert_eq!(space.index_of(&"b"), None);
    }

    #[test]
    fn test_iter_matches_index_order() {
        let mut space = PointSpace::new();
        for p in ["z", "m", "a"] {
            space.add(p.to_string());
        }
        let order: Vec<String> = space.iter().cloned().collect();
        for (i, p) in order.iter().enumerate() {
            assert_eq!(space.index_of(p), Some(i));
        }
    }
}
