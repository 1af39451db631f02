//! Link extraction seam.
//!
//! Fetching pages and parsing HTML live outside this crate. A crawler plugs
//! its own extractor in through [`LinkExtractor`]; [`StaticLinks`] serves
//! pre-extracted link sets, e.g. for replaying a recorded crawl.

use crate::error::{PageFinderError, Result};
use std::collections::HashMap;

/// Produces the absolute outgoing links of a page.
///
/// `page` is whatever the implementation uses to identify a page, typically
/// its URL. The result may contain duplicates and has no particular order.
pub trait LinkExtractor {
    /// Links found on `page`.
    ///
    /// # Errors
    ///
    /// Returns [`PageFinderError::Extraction`] if the page cannot be read.
    fn extract_links(&self, page: &str) -> Result<Vec<String>>;
}

impl<E: LinkExtractor + ?Sized> LinkExtractor for &E {
    fn extract_links(&self, page: &str) -> Result<Vec<String>> {
        (**self).extract_links(page)
    }
}

/// In-memory page → links table.
///
/// # Examples
///
/// ```
/// use pagefinder::extract::{LinkExtractor, StaticLinks};
///
/// let mut pages = StaticLinks::new();
/// pages.insert("https://example.com/", ["https://example.com/a", "https://example.com/b"]);
///
/// let links = pages.extract_links("https://example.com/").expect("known page");
/// assert_eq!(links.len(), 2);
/// assert!(pages.extract_links("https://example.com/missing").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticLinks {
    pages: HashMap<String, Vec<String>>,
}

impl StaticLinks {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the links of `page`.
    pub fn insert<I, S>(&mut self, page: impl Into<String>, links: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pages
            .insert(page.into(), links.into_iter().map(Into::into).collect());
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with_page<I, S>(mut self, page: impl Into<String>, links: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(page, links);
        self
    }

    /// Number of registered pages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// True when no page is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

impl LinkExtractor for StaticLinks {
    fn extract_links(&self, page: &str) -> Result<Vec<String>> {
        self.pages
            .get(page)
            .cloned()
            .ok_or_else(|| PageFinderError::Extraction(format!("no links recorded for {page}")))
    }
}
