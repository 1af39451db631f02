//! Operator-guided crawl session.
//!
//! A [`Spider`] couples a [`LinkAnnotation`] with a [`LinkExtractor`]: every
//! page the operator chooses to visit is loaded into the graph and, except
//! for the start page, labeled as worth following. [`Spider::best`] then
//! proposes the next unvisited links. Presenting the choices is left to the
//! caller.
//!
//! # Examples
//!
//! ```
//! use pagefinder::extract::StaticLinks;
//! use pagefinder::spider::Spider;
//!
//! let pages = StaticLinks::new()
//!     .with_page("/", ["/news?p=2", "/about", "/contact"])
//!     .with_page("/news?p=2", ["/news?p=3", "/about"]);
//!
//! let mut spider = Spider::new(pages);
//! spider.visit("/", true).expect("start page is known");
//! spider.visit("/news?p=2", false).expect("page is known");
//!
//! let next = spider.best(1).expect("propagation converges");
//! assert_eq!(next, vec!["/news?p=3".to_string()]);
//! ```

use crate::annotation::LinkAnnotation;
use crate::distance::{Distance, Levenshtein};
use crate::error::Result;
use crate::extract::LinkExtractor;
use std::collections::HashSet;

/// Crawl session state.
#[derive(Debug)]
pub struct Spider<E, D = Levenshtein> {
    annotation: LinkAnnotation<D>,
    extractor: E,
    visited: HashSet<String>,
}

impl<E: LinkExtractor> Spider<E, Levenshtein> {
    /// Session with a default [`LinkAnnotation`].
    #[must_use]
    pub fn new(extractor: E) -> Self {
        Self::with_annotation(LinkAnnotation::new(), extractor)
    }
}

impl<E: LinkExtractor, D: Distance<String>> Spider<E, D> {
    /// Session over an existing annotation.
    #[must_use]
    pub fn with_annotation(annotation: LinkAnnotation<D>, extractor: E) -> Self {
        Self {
            annotation,
            extractor,
            visited: HashSet::new(),
        }
    }

    /// Load `page` and remember it as visited. Unless `start` is set the
    /// page also counts as a followed link.
    ///
    /// # Errors
    ///
    /// Returns the extractor's error; nothing is recorded in that case.
    pub fn visit(&mut self, page: &str, start: bool) -> Result<()> {
        let added = self.annotation.load(&self.extractor, page)?;
        self.visited.insert(page.to_string());
        if !start {
            self.annotation.mark_link(page, true);
        }
        tracing::debug!(page, start, added, "page visited");
        Ok(())
    }

    /// Up to `n` best links not visited yet.
    ///
    /// # Errors
    ///
    /// Returns a propagation error.
    pub fn best(&mut self, n: usize) -> Result<Vec<String>> {
        let visited = &self.visited;
        Ok(self
            .annotation
            .best_links_to_follow()?
            .into_iter()
            .filter(|link| !visited.contains(link))
            .take(n)
            .collect())
    }

    /// Every link discovered so far.
    #[must_use]
    pub fn all_links(&self) -> Vec<String> {
        self.annotation.links().map(str::to_string).collect()
    }

    /// Whether `page` was visited.
    #[must_use]
    pub fn is_visited(&self, page: &str) -> bool {
        self.visited.contains(page)
    }

    /// Number of visited pages.
    #[must_use]
    pub fn visited(&self) -> usize {
        self.visited.len()
    }

    /// The underlying annotation.
    #[must_use]
    pub fn annotation(&self) -> &LinkAnnotation<D> {
        &self.annotation
    }

    /// Mutable access, e.g. to add negative labels or prune.
    pub fn annotation_mut(&mut self) -> &mut LinkAnnotation<D> {
        &mut self.annotation
    }
}
