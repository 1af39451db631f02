//! Bounded nearest-neighbor set for one reference point.

use crate::distance::Distance;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A candidate neighbor and its distance to the reference point.
#[derive(Debug, Clone, PartialEq)]
pub struct Neighbor<P> {
    /// The neighboring point
    pub point: P,
    /// Distance from `point` to the reference point
    pub distance: f64,
}

/// Heap entry ordered on distance only: the farthest kept neighbor sits on
/// top and is the first one evicted.
#[derive(Debug, Clone)]
struct Farthest<P>(Neighbor<P>);

impl<P> Ord for Farthest<P> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.distance.total_cmp(&other.0.distance)
    }
}

impl<P> PartialOrd for Farthest<P> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<P> PartialEq for Farthest<P> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<P> Eq for Farthest<P> {}

/// The up-to-k nearest points seen so far for one reference point.
///
/// Removing a neighbor does not backfill the slot: evicted candidates are not
/// retained, so after a deletion the neighborhood may hold fewer than `k`
/// entries until new points arrive.
///
/// # Examples
///
/// ```
/// use pagefinder::distance::Levenshtein;
/// use pagefinder::knn::Neighborhood;
///
/// let mut nb = Neighborhood::new("abc".to_string(), 2);
/// nb.consider("abd".to_string(), &Levenshtein);
/// nb.consider("xyz".to_string(), &Levenshtein);
/// nb.consider("abcd".to_string(), &Levenshtein);
///
/// assert_eq!(nb.len(), 2);
/// assert!(!nb.contains(&"xyz".to_string()));
/// ```
#[derive(Debug, Clone)]
pub struct Neighborhood<P> {
    reference: P,
    k: usize,
    near: BinaryHeap<Farthest<P>>,
}

impl<P: PartialEq> Neighborhood<P> {
    /// Create an empty neighborhood of capacity `k` around `reference`.
    #[must_use]
    pub fn new(reference: P, k: usize) -> Self {
        Self {
            reference,
            k,
            near: BinaryHeap::with_capacity(k + 1),
        }
    }

    /// The reference point.
    #[must_use]
    pub fn reference(&self) -> &P {
        &self.reference
    }

    /// Maximum number of kept neighbors.
    #[must_use]
    pub fn k(&self) -> usize {
        self.k
    }

    /// Number of kept neighbors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.near.len()
    }

    /// True when no neighbor is kept.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.near.is_empty()
    }

    /// Whether `point` is among the kept neighbors.
    #[must_use]
    pub fn contains(&self, point: &P) -> bool {
        self.near.iter().any(|n| n.0.point == *point)
    }

    /// Kept neighbors, in no particular order.
    pub fn neighbors(&self) -> impl Iterator<Item = &Neighbor<P>> {
        self.near.iter().map(|n| &n.0)
    }

    /// Distance to the farthest kept neighbor.
    #[must_use]
    pub fn radius(&self) -> Option<f64> {
        self.near.peek().map(|n| n.0.distance)
    }

    /// Offer `candidate` as a neighbor.
    ///
    /// The candidate is kept while there is room. Once full it replaces the
    /// farthest neighbor only if it is strictly closer. Returns whether the
    /// candidate was kept.
    pub fn consider<D>(&mut self, candidate: P, distance: &D) -> bool
    where
        D: Distance<P> + ?Sized,
    {
        if self.k == 0 || candidate == self.reference || self.contains(&candidate) {
            return false;
        }

        let d = distance.distance(&candidate, &self.reference);
        if self.near.len() < self.k {
            self.near.push(Farthest(Neighbor {
                point: candidate,
                distance: d,
            }));
            return true;
        }

        match self.near.peek() {
            Some(farthest) if d < farthest.0.distance => {
                self.near.pop();
                self.near.push(Farthest(Neighbor {
                    point: candidate,
                    distance: d,
                }));
                true
            }
            _ => false,
        }
    }

    /// Drop `point` if it is a kept neighbor. Returns whether it was present.
    pub fn remove(&mut self, point: &P) -> bool {
        let before = self.near.len();
        self.near.retain(|n| n.0.point != *point);
        self.near.len() != before
    }
}
