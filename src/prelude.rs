//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use pagefinder::prelude::*;
//! ```

pub use crate::annotation::{Decision, Evidence, LinkAnnotation, LinkAnnotationConfig};
pub use crate::distance::{Distance, Levenshtein};
pub use crate::error::PageFinderError;
pub use crate::extract::{LinkExtractor, StaticLinks};
pub use crate::knn::KnnGraph;
pub use crate::primitives::Matrix;
pub use crate::propagation::{label_propagation, LabelPropagation};
pub use crate::spider::Spider;
