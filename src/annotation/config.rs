//! Link annotation configuration.

use crate::error::{PageFinderError, Result};
use crate::propagation::{check_alpha, check_eps};
use serde::{Deserialize, Serialize};

/// Hyperparameters of a [`LinkAnnotation`](super::LinkAnnotation).
///
/// # Examples
///
/// ```
/// use pagefinder::annotation::LinkAnnotationConfig;
///
/// let config = LinkAnnotationConfig::default()
///     .with_k(8)
///     .and_then(|c| c.with_alpha(0.9))
///     .expect("valid hyperparameters");
/// assert!((config.effective_min_score() - 0.225).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkAnnotationConfig {
    /// Neighborhood size of the kNN graph (>= 1)
    pub k: usize,

    /// Diffusion weight of label propagation, in [0, 1)
    pub alpha: f64,

    /// Gaussian kernel bandwidth (> 0)
    pub sigma: f64,

    /// Propagation convergence threshold (> 0)
    pub eps: f64,

    /// Evidence needed to decide follow / don't follow.
    /// If None, uses alpha / 4
    pub min_score: Option<f64>,

    /// Optional propagation iteration cap; None runs to convergence
    pub max_iter: Option<usize>,
}

impl LinkAnnotationConfig {
    /// Defaults: `k = 5`, `alpha = 0.95`, `sigma = 1.0`, `eps = 1e-3`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            k: 5,
            alpha: 0.95,
            sigma: 1.0,
            eps: 1e-3,
            min_score: None,
            max_iter: None,
        }
    }

    /// Get the effective decision threshold (override or alpha / 4)
    #[must_use]
    pub fn effective_min_score(&self) -> f64 {
        self.min_score.unwrap_or(self.alpha / 4.0)
    }

    /// Validate configuration parameters
    ///
    /// # Errors
    ///
    /// Returns the first out-of-range parameter.
    pub fn validate(&self) -> Result<()> {
        check_k(self.k)?;
        check_alpha(self.alpha)?;
        check_sigma(self.sigma)?;
        check_eps(self.eps)?;
        if let Some(min_score) = self.min_score {
            check_min_score(min_score)?;
        }
        if self.max_iter == Some(0) {
            return Err(PageFinderError::invalid_hyperparameter(
                "max_iter",
                0,
                "max_iter >= 1",
            ));
        }
        Ok(())
    }

    /// Set neighborhood size with validation
    ///
    /// # Errors
    ///
    /// Returns an error if `k` is zero.
    pub fn with_k(mut self, k: usize) -> Result<Self> {
        check_k(k)?;
        self.k = k;
        Ok(self)
    }

    /// Set diffusion weight with validation
    ///
    /// # Errors
    ///
    /// Returns an error if `alpha` is outside [0, 1).
    pub fn with_alpha(mut self, alpha: f64) -> Result<Self> {
        check_alpha(alpha)?;
        self.alpha = alpha;
        Ok(self)
    }

    /// Set kernel bandwidth with validation
    ///
    /// # Errors
    ///
    /// Returns an error if `sigma` is not positive.
    pub fn with_sigma(mut self, sigma: f64) -> Result<Self> {
        check_sigma(sigma)?;
        self.sigma = sigma;
        Ok(self)
    }

    /// Set convergence threshold with validation
    ///
    /// # Errors
    ///
    /// Returns an error if `eps` is not positive.
    pub fn with_eps(mut self, eps: f64) -> Result<Self> {
        check_eps(eps)?;
        self.eps = eps;
        Ok(self)
    }

    /// Set decision threshold override with validation
    ///
    /// # Errors
    ///
    /// Returns an error if `min_score` is negative or not finite.
    pub fn with_min_score(mut self, min_score: f64) -> Result<Self> {
        check_min_score(min_score)?;
        self.min_score = Some(min_score);
        Ok(self)
    }

    /// Set propagation iteration cap
    ///
    /// # Errors
    ///
    /// Returns an error if the cap is zero.
    pub fn with_max_iter(mut self, max_iter: usize) -> Result<Self> {
        if max_iter == 0 {
            return Err(PageFinderError::invalid_hyperparameter(
                "max_iter",
                max_iter,
                "max_iter >= 1",
            ));
        }
        self.max_iter = Some(max_iter);
        Ok(self)
    }
}

impl Default for LinkAnnotationConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn check_k(k: usize) -> Result<()> {
    if k == 0 {
        return Err(PageFinderError::invalid_hyperparameter("k", k, "k >= 1"));
    }
    Ok(())
}

fn check_sigma(sigma: f64) -> Result<()> {
    if !(sigma.is_finite() && sigma > 0.0) {
        return Err(PageFinderError::invalid_hyperparameter(
            "sigma",
            sigma,
            "sigma > 0",
        ));
    }
    Ok(())
}

fn check_min_score(min_score: f64) -> Result<()> {
    if !(min_score.is_finite() && min_score >= 0.0) {
        return Err(PageFinderError::invalid_hyperparameter(
            "min_score",
            min_score,
            "min_score >= 0",
        ));
    }
    Ok(())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
