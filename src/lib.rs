//! Pagefinder: semi-supervised link ranking for crawlers.
//!
//! Pagefinder decides which of the many outgoing links found while crawling
//! a site are worth visiting next. It learns from a handful of operator
//! labels ("follow" / "don't follow") and from the structural similarity of
//! link URLs, measured as an edit distance.
//!
//! # Quick Start
//!
//! ```
//! use pagefinder::prelude::*;
//!
//! let mut annotation = LinkAnnotation::new();
//! annotation.load_links([
//!     "https://example.com/blog/page/2",
//!     "https://example.com/about",
//!     "https://example.com/contact",
//! ]);
//! annotation.mark_link("https://example.com/blog/page/2", true);
//! annotation.load_links(["https://example.com/blog/page/3"]);
//!
//! let best = annotation.best_links_to_follow().unwrap();
//! assert_eq!(best[1], "https://example.com/blog/page/3");
//! ```
//!
//! # Modules
//!
//! - [`primitives`]: Dense matrix type
//! - [`distance`]: Point distances (Levenshtein edit distance)
//! - [`knn`]: Incremental k-nearest-neighbor graph and its Gaussian kernel
//! - [`propagation`]: Label propagation (Zhou et al. 2003)
//! - [`annotation`]: Link annotation service (labels, scores, ranking, pruning)
//! - [`extract`]: Link extraction seam for the crawler
//! - [`spider`]: Operator-guided crawl session

pub mod annotation;
pub mod distance;
pub mod error;
pub mod extract;
pub mod knn;
pub mod prelude;
pub mod primitives;
pub mod propagation;
pub mod spider;

pub use error::{PageFinderError, Result};
pub use primitives::Matrix;
