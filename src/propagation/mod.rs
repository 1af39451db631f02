//! Semi-supervised label propagation over a similarity graph.
//!
//! Implements the "local and global consistency" diffusion of Zhou et al.
//! (2003): with a kernel W, its degree vector D and the symmetric
//! normalization `S = D^(-1/2) W D^(-1/2)`, iterate
//!
//! ```text
//! F ← α·S·F + (1 − α)·Y
//! ```
//!
//! from `F = Y` until the largest element-wise change drops below `eps`.
//!
//! # References
//!
//! Zhou, Bousquet, Lal, Weston & Schölkopf (2003). "Learning with Local and
//! Global Consistency." NIPS.
//!
//! # Examples
//!
//! ```
//! use pagefinder::primitives::Matrix;
//! use pagefinder::propagation::label_propagation;
//!
//! // Two linked points, only the first one labeled "follow"
//! let w = Matrix::from_vec(2, 2, vec![0.0, 1.0, 1.0, 0.0]).expect("2x2");
//! let y = Matrix::from_vec(2, 2, vec![1.0, 0.0, 0.0, 0.0]).expect("2x2");
//!
//! let f = label_propagation(&w, &y, 0.5, 1e-6).expect("valid inputs");
//! assert!(f.get(1, 0) > 0.0);
//! assert_eq!(f.get(1, 1), 0.0);
//! ```

use crate::error::{PageFinderError, Result};
use crate::primitives::Matrix;

/// Run label propagation to convergence with no iteration cap.
///
/// # Errors
///
/// Returns an error if `kernel` is not square, `labels` does not have one row
/// per kernel row, an input entry is not finite (or a kernel entry is
/// negative), `alpha` is outside `[0, 1)` or `eps` is not positive.
pub fn label_propagation(
    kernel: &Matrix<f64>,
    labels: &Matrix<f64>,
    alpha: f64,
    eps: f64,
) -> Result<Matrix<f64>> {
    LabelPropagation::new()
        .with_alpha(alpha)?
        .with_eps(eps)?
        .propagate(kernel, labels)
}

/// Label propagation estimator.
///
/// # Examples
///
/// ```
/// use pagefinder::primitives::Matrix;
/// use pagefinder::propagation::LabelPropagation;
///
/// let w = Matrix::zeros(3, 3);
/// let y = Matrix::from_vec(3, 2, vec![1.0, 0.0, 0.0, 1.0, 0.0, 0.0]).expect("3x2");
///
/// let lp = LabelPropagation::new().with_alpha(0.9).expect("alpha in [0, 1)");
/// let f = lp.propagate(&w, &y).expect("valid inputs");
/// // Isolated points only keep their own scaled label
/// assert!((f.get(0, 0) - 0.1).abs() < 1e-12);
/// assert_eq!(f.get(2, 0), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LabelPropagation {
    alpha: f64,
    eps: f64,
    max_iter: Option<usize>,
}

impl LabelPropagation {
    /// Defaults: `alpha = 0.95`, `eps = 1e-3`, no iteration cap.
    #[must_use]
    pub fn new() -> Self {
        Self {
            alpha: 0.95,
            eps: 1e-3,
            max_iter: None,
        }
    }

    /// Unchecked constructor; `propagate` validates before iterating.
    pub(crate) fn from_parts(alpha: f64, eps: f64, max_iter: Option<usize>) -> Self {
        Self {
            alpha,
            eps,
            max_iter,
        }
    }

    /// Diffusion weight, in `[0, 1)`.
    ///
    /// # Errors
    ///
    /// Returns an error if `alpha` is out of range.
    pub fn with_alpha(mut self, alpha: f64) -> Result<Self> {
        check_alpha(alpha)?;
        self.alpha = alpha;
        Ok(self)
    }

    /// Convergence threshold on the max absolute change, `> 0`.
    ///
    /// # Errors
    ///
    /// Returns an error if `eps` is not positive.
    pub fn with_eps(mut self, eps: f64) -> Result<Self> {
        check_eps(eps)?;
        self.eps = eps;
        Ok(self)
    }

    /// Fail with [`PageFinderError::ConvergenceFailure`] after `max_iter`
    /// iterations instead of looping until convergence.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_iter` is zero.
    pub fn with_max_iter(mut self, max_iter: Option<usize>) -> Result<Self> {
        if max_iter == Some(0) {
            return Err(PageFinderError::invalid_hyperparameter(
                "max_iter",
                0,
                "max_iter >= 1",
            ));
        }
        self.max_iter = max_iter;
        Ok(self)
    }

    /// Diffusion weight.
    #[must_use]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Convergence threshold.
    #[must_use]
    pub fn eps(&self) -> f64 {
        self.eps
    }

    /// Iteration cap, if any.
    #[must_use]
    pub fn max_iter(&self) -> Option<usize> {
        self.max_iter
    }

    /// Diffuse `labels` (n×c) over `kernel` (n×n) until convergence.
    ///
    /// Always runs at least one iteration. Rows of `kernel` summing to zero
    /// get a unit degree, so isolated points end with `(1 − α)·Y`.
    ///
    /// # Errors
    ///
    /// Returns an error on shape mismatches, on a negative or non-finite
    /// kernel entry, on a non-finite label, or when an iteration cap is set
    /// and reached first.
    pub fn propagate(&self, kernel: &Matrix<f64>, labels: &Matrix<f64>) -> Result<Matrix<f64>> {
        check_alpha(self.alpha)?;
        check_eps(self.eps)?;
        if !kernel.is_square() {
            return Err(PageFinderError::DimensionMismatch {
                expected: format!("square kernel with {} rows", kernel.n_rows()),
                actual: format!("{}x{}", kernel.n_rows(), kernel.n_cols()),
            });
        }
        if labels.n_rows() != kernel.n_rows() {
            return Err(PageFinderError::dimension_mismatch(
                "label rows",
                kernel.n_rows(),
                labels.n_rows(),
            ));
        }

        if let Some((row, col, value)) = kernel.find_entry(|w| w.is_finite() && w >= 0.0) {
            return Err(PageFinderError::InvalidEntry {
                matrix: "kernel".to_string(),
                row,
                col,
                value,
            });
        }
        if let Some((row, col, value)) = labels.find_entry(f64::is_finite) {
            return Err(PageFinderError::InvalidEntry {
                matrix: "label".to_string(),
                row,
                col,
                value,
            });
        }

        tracing::trace!(
            n = kernel.n_rows(),
            classes = labels.n_cols(),
            alpha = self.alpha,
            "label propagation started"
        );
        let s = normalize(kernel)?;
        let seed = labels.mul_scalar(1.0 - self.alpha);

        let mut f = labels.clone();
        let mut iterations = 0usize;
        loop {
            let next = s.matmul(&f)?.mul_scalar(self.alpha).add(&seed)?;
            let residual = next.max_abs_diff(&f)?;
            f = next;
            iterations += 1;

            if residual < self.eps {
                tracing::debug!(
                    n = kernel.n_rows(),
                    iterations,
                    residual,
                    "label propagation converged"
                );
                return Ok(f);
            }
            if !residual.is_finite() {
                tracing::warn!(iterations, "label propagation diverged");
                return Err(PageFinderError::ConvergenceFailure {
                    iterations,
                    residual,
                });
            }
            if let Some(cap) = self.max_iter {
                if iterations >= cap {
                    tracing::warn!(iterations, residual, "label propagation hit iteration cap");
                    return Err(PageFinderError::ConvergenceFailure {
                        iterations,
                        residual,
                    });
                }
            }
        }
    }
}

impl Default for LabelPropagation {
    fn default() -> Self {
        Self::new()
    }
}

/// `D^(-1/2) · W · D^(-1/2)` with zero degrees replaced by one.
fn normalize(kernel: &Matrix<f64>) -> Result<Matrix<f64>> {
    let inv_sqrt: Vec<f64> = kernel
        .row_sums()
        .into_iter()
        .map(|d| if d == 0.0 { 1.0 } else { 1.0 / d.sqrt() })
        .collect();
    kernel.scale_rows_cols(&inv_sqrt, &inv_sqrt)
}

pub(crate) fn check_alpha(alpha: f64) -> Result<()> {
    if !(0.0..1.0).contains(&alpha) {
        return Err(PageFinderError::invalid_hyperparameter(
            "alpha",
            alpha,
            "0 <= alpha < 1",
        ));
    }
    Ok(())
}

pub(crate) fn check_eps(eps: f64) -> Result<()> {
    if !(eps.is_finite() && eps > 0.0) {
        return Err(PageFinderError::invalid_hyperparameter(
            "eps",
            eps,
            "eps > 0",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(n: usize) -> Matrix<f64> {
        let mut w = Matrix::zeros(n, n);
        for i in 0..n.saturating_sub(1) {
            w.set(i, i + 1, 1.0);
            w.set(i + 1, i, 1.0);
        }
        w
    }

    fn one_hot(n: usize, labeled: &[(usize, usize)]) -> Matrix<f64> {
        let mut y = Matrix::zeros(n, 2);
        for &(row, col) in labeled {
            y.set(row, col, 1.0);
        }
        y
    }

    #[test]
    fn test_alpha_zero_is_identity() {
        let w = chain(4);
        let y = one_hot(4, &[(0, 0), (3, 1)]);
        let f = label_propagation(&w, &y, 0.0, 1e-3).expect("valid inputs");
        assert_eq!(f, y);
    }

    #[test]
    fn test_labels_decay_along_chain() {
        let w = chain(5);
        let y = one_hot(5, &[(0, 0)]);
        let f = label_propagation(&w, &y, 0.9, 1e-9).expect("valid inputs");
        for i in 0..4 {
            assert!(f.get(i, 0) > f.get(i + 1, 0), "row {i} should beat row {}", i + 1);
        }
        assert!(f.as_slice().iter().skip(1).step_by(2).all(|&x| x == 0.0));
    }

    #[test]
    fn test_two_classes_split_the_chain() {
        let w = chain(6);
        let y = one_hot(6, &[(0, 0), (5, 1)]);
        let f = label_propagation(&w, &y, 0.9, 1e-9).expect("valid inputs");
        assert!(f.get(1, 0) > f.get(1, 1));
        assert!(f.get(4, 1) > f.get(4, 0));
    }

    #[test]
    fn test_converged_result_is_a_fixed_point() {
        let w = chain(4);
        let y = one_hot(4, &[(1, 0)]);
        let alpha = 0.8;
        let f = label_propagation(&w, &y, alpha, 1e-12).expect("valid inputs");

        let s = normalize(&w).expect("square");
        let again = s
            .matmul(&f)
            .expect("shapes")
            .mul_scalar(alpha)
            .add(&y.mul_scalar(1.0 - alpha))
            .expect("shapes");
        assert!(again.max_abs_diff(&f).expect("shapes") < 1e-10);
    }

    #[test]
    fn test_isolated_points_do_not_fail() {
        let w = Matrix::zeros(3, 3);
        let y = one_hot(3, &[(0, 1)]);
        let f = label_propagation(&w, &y, 0.5, 1e-6).expect("valid inputs");
        assert!((f.get(0, 1) - 0.5).abs() < 1e-12);
        assert_eq!(f.get(1, 0), 0.0);
        assert_eq!(f.get(1, 1), 0.0);
    }

    #[test]
    fn test_empty_inputs() {
        let f = label_propagation(&Matrix::zeros(0, 0), &Matrix::zeros(0, 2), 0.95, 1e-3)
            .expect("empty graph is valid");
        assert_eq!(f.shape(), (0, 2));
    }

    #[test]
    fn test_rejects_bad_hyperparameters() {
        let w = chain(2);
        let y = one_hot(2, &[]);
        assert!(label_propagation(&w, &y, 1.0, 1e-3).is_err());
        assert!(label_propagation(&w, &y, -0.1, 1e-3).is_err());
        assert!(label_propagation(&w, &y, 0.5, 0.0).is_err());
        assert!(LabelPropagation::new().with_max_iter(Some(0)).is_err());
    }

    #[test]
    fn test_rejects_bad_shapes() {
        let y = one_hot(2, &[]);
        assert!(label_propagation(&Matrix::zeros(2, 3), &y, 0.5, 1e-3).is_err());
        assert!(label_propagation(&chain(3), &y, 0.5, 1e-3).is_err());
    }

    #[test]
    fn test_rejects_nan_and_negative_kernel_entries() {
        let y = one_hot(2, &[(0, 0)]);
        let w = Matrix::from_vec(2, 2, vec![0.0, f64::NAN, 1.0, 0.0]).expect("2x2");
        match label_propagation(&w, &y, 0.5, 1e-6) {
            Err(PageFinderError::InvalidEntry { row, col, .. }) => assert_eq!((row, col), (0, 1)),
            other => panic!("expected invalid entry, got {other:?}"),
        }

        let w = Matrix::from_vec(2, 2, vec![0.0, -1.0, 1.0, 0.0]).expect("2x2");
        assert!(label_propagation(&w, &y, 0.5, 1e-6).is_err());

        let w = Matrix::from_vec(2, 2, vec![0.0, f64::INFINITY, 1.0, 0.0]).expect("2x2");
        assert!(label_propagation(&w, &y, 0.5, 1e-6).is_err());
    }

    #[test]
    fn test_rejects_non_finite_labels() {
        let mut y = one_hot(2, &[]);
        y.set(1, 1, f64::NAN);
        assert!(label_propagation(&chain(2), &y, 0.5, 1e-6).is_err());
    }

    #[test]
    fn test_iteration_cap() {
        let w = chain(10);
        let y = one_hot(10, &[(0, 0)]);
        let lp = LabelPropagation::new()
            .with_alpha(0.99)
            .and_then(|lp| lp.with_eps(1e-12))
            .and_then(|lp| lp.with_max_iter(Some(2)))
            .expect("valid config");
        match lp.propagate(&w, &y) {
            Err(PageFinderError::ConvergenceFailure { iterations, .. }) => {
                assert_eq!(iterations, 2);
            }
            other => panic!("expected convergence failure, got {other:?}"),
        }
    }
}
