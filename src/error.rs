//! Error types for pagefinder operations.
//!
//! Provides rich error context for library consumers.

use thiserror::Error;

/// Main error type for pagefinder operations.
///
/// # Examples
///
/// ```
/// use pagefinder::error::PageFinderError;
///
/// let err = PageFinderError::UnknownPoint {
///     point: "https://example.com/a".to_string(),
/// };
/// assert!(err.to_string().contains("unknown point"));
/// ```
#[derive(Debug, Error)]
pub enum PageFinderError {
    /// A score was requested for a point that was never added to the graph.
    #[error("unknown point: {point}")]
    UnknownPoint {
        /// Debug rendering of the missing point
        point: String,
    },

    /// Matrix dimensions don't match for the operation.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimensions description
        expected: String,
        /// Actual dimensions found
        actual: String,
    },

    /// Invalid hyperparameter value provided.
    #[error("invalid hyperparameter: {param} = {value}, expected {constraint}")]
    InvalidHyperparameter {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// A matrix entry is outside the domain the operation accepts.
    #[error("invalid {matrix} entry at ({row}, {col}): {value}")]
    InvalidEntry {
        /// Which input matrix
        matrix: String,
        /// Row of the offending entry
        row: usize,
        /// Column of the offending entry
        col: usize,
        /// The offending value
        value: f64,
    },

    /// Propagation hit its configured iteration cap before converging.
    #[error("convergence failure after {iterations} iterations, residual = {residual}")]
    ConvergenceFailure {
        /// Number of iterations attempted
        iterations: usize,
        /// Max absolute change of the last iteration
        residual: f64,
    },

    /// The link-extraction collaborator failed.
    #[error("link extraction failed: {0}")]
    Extraction(String),
}

impl PageFinderError {
    /// Create an unknown point error from any debuggable point.
    #[must_use]
    pub fn unknown_point<P: std::fmt::Debug + ?Sized>(point: &P) -> Self {
        Self::UnknownPoint {
            point: format!("{point:?}"),
        }
    }

    /// Create a dimension mismatch error with descriptive context
    #[must_use]
    pub fn dimension_mismatch(context: &str, expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch {
            expected: format!("{context}={expected}"),
            actual: format!("{actual}"),
        }
    }

    /// Create an invalid hyperparameter error.
    #[must_use]
    pub fn invalid_hyperparameter(param: &str, value: impl ToString, constraint: &str) -> Self {
        Self::InvalidHyperparameter {
            param: param.to_string(),
            value: value.to_string(),
            constraint: constraint.to_string(),
        }
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, PageFinderError>;
