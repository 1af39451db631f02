//! Incremental k-nearest-neighbor graph over arbitrary points.
//!
//! Every point owns a [`Neighborhood`] of its up-to-k nearest other points
//! under a caller-supplied [`Distance`]. Points can be inserted and deleted
//! one at a time; insertion costs one distance evaluation per existing point
//! in each direction, so n insertions are O(n²). Callers bound n by pruning.
//!
//! The graph is not mutual: `q` can be one of `p`'s neighbors without `p`
//! being one of `q`'s, and the derived kernel is not symmetric.
//!
//! Candidates are offered in point order, so equidistant ties resolve the
//! same way for the same insertion sequence.
//!
//! # Examples
//!
//! ```
//! use pagefinder::distance::Levenshtein;
//! use pagefinder::knn::KnnGraph;
//!
//! let mut graph = KnnGraph::new(Levenshtein, 2);
//! for link in ["/news?p=1", "/news?p=2", "/news?p=3", "/about"] {
//!     graph.add_point(link.to_string());
//! }
//!
//! let kernel = graph.build_kernel(1.0).expect("sigma is positive");
//! assert_eq!(kernel.shape(), (4, 4));
//! ```

mod neighborhood;
mod point_space;

pub use neighborhood::{Neighbor, Neighborhood};
pub use point_space::PointSpace;

use crate::distance::Distance;
use crate::error::{PageFinderError, Result};
use crate::primitives::Matrix;
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::hash::Hash;

/// The set of all neighborhoods plus the shared [`PointSpace`].
#[derive(Debug, Clone)]
pub struct KnnGraph<P, D> {
    space: PointSpace<P>,
    neighborhoods: BTreeMap<P, Neighborhood<P>>,
    k: usize,
    distance: D,
}

impl<P, D> KnnGraph<P, D>
where
    P: Clone + Ord + Hash + Debug,
    D: Distance<P>,
{
    /// Create an empty graph keeping `k` neighbors per point.
    #[must_use]
    pub fn new(distance: D, k: usize) -> Self {
        Self {
            space: PointSpace::new(),
            neighborhoods: BTreeMap::new(),
            k,
            distance,
        }
    }

    /// Neighborhood size bound.
    #[must_use]
    pub fn k(&self) -> usize {
        self.k
    }

    /// The distance function.
    #[must_use]
    pub fn distance(&self) -> &D {
        &self.distance
    }

    /// Number of points in the graph.
    #[must_use]
    pub fn len(&self) -> usize {
        self.space.len()
    }

    /// True when the graph holds no point.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.space.is_empty()
    }

    /// Membership test.
    #[must_use]
    pub fn contains(&self, point: &P) -> bool {
        self.space.contains(point)
    }

    /// Points in snapshot index order.
    pub fn points(&self) -> impl Iterator<Item = &P> {
        self.space.iter()
    }

    /// The neighborhood of `point`, if present.
    #[must_use]
    pub fn neighborhood(&self, point: &P) -> Option<&Neighborhood<P>> {
        self.neighborhoods.get(point)
    }

    /// Index of `point` in the current snapshot.
    ///
    /// Only valid until the next `add_point`/`delete_point`.
    pub fn index_of(&mut self, point: &P) -> Option<usize> {
        self.space.index_of(point)
    }

    /// Insert `point`, updating every neighborhood. Returns `false` if it
    /// was already present.
    pub fn add_point(&mut self, point: P) -> bool {
        if !self.space.add(point.clone()) {
            return false;
        }

        let mut own = Neighborhood::new(point.clone(), self.k);
        for nb in self.neighborhoods.values_mut() {
            nb.consider(point.clone(), &self.distance);
            own.consider(nb.reference().clone(), &self.distance);
        }
        self.neighborhoods.insert(point, own);

        tracing::trace!(points = self.space.len(), "knn point added");
        true
    }

    /// Remove `point` and its neighborhood, and drop it from every other
    /// neighborhood. Returns `false` if it was absent.
    ///
    /// Neighborhoods that lose `point` are not backfilled.
    pub fn delete_point(&mut self, point: &P) -> bool {
        if !self.space.delete(point) {
            return false;
        }

        self.neighborhoods.remove(point);
        let mut shrunk = 0usize;
        for nb in self.neighborhoods.values_mut() {
            if nb.remove(point) {
                shrunk += 1;
            }
        }

        tracing::trace!(points = self.space.len(), shrunk, "knn point deleted");
        true
    }

    /// Gaussian similarity matrix over the kept neighbor edges.
    ///
    /// Entry (i, j) is `exp(-d(i, j)² / (2σ²))` when j is a kept neighbor of
    /// i and zero otherwise. Indices come from the current snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if `sigma` is not a positive finite number.
    pub fn build_kernel(&mut self, sigma: f64) -> Result<Matrix<f64>> {
        if !(sigma.is_finite() && sigma > 0.0) {
            return Err(PageFinderError::invalid_hyperparameter(
                "sigma",
                sigma,
                "sigma > 0",
            ));
        }

        self.space.refresh();
        let n = self.space.len();
        let two_sigma_sq = 2.0 * sigma * sigma;
        let mut kernel = Matrix::zeros(n, n);

        for (point, nb) in &self.neighborhoods {
            let i = self
                .space
                .lookup(point)
                .ok_or_else(|| PageFinderError::unknown_point(point))?;
            for neighbor in nb.neighbors() {
                let j = self
                    .space
                    .lookup(&neighbor.point)
                    .ok_or_else(|| PageFinderError::unknown_point(&neighbor.point))?;
                let d = neighbor.distance;
                kernel.set(i, j, (-(d * d) / two_sigma_sq).exp());
            }
        }

        Ok(kernel)
    }
}
