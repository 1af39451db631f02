//! Interactive link annotation: rank a crawl frontier from a few labels.
//!
//! A [`LinkAnnotation`] keeps every discovered link in a kNN graph under an
//! edit distance, records which links an operator chose to follow (or
//! rejected), and spreads those labels over the graph with label
//! propagation. Links structurally close to followed links rank high.
//!
//! Scores are recomputed lazily: any mutation marks them dirty and the next
//! read rebuilds the kernel and re-runs propagation.
//!
//! # Examples
//!
//! ```
//! use pagefinder::annotation::LinkAnnotation;
//!
//! let mut annotation = LinkAnnotation::new();
//! annotation.load_links([
//!     "https://news.ycombinator.com/news?p=2",
//!     "https://news.ycombinator.com/submit",
//!     "https://news.ycombinator.com/login",
//! ]);
//! annotation.mark_link("https://news.ycombinator.com/news?p=2", true);
//! annotation.load_links(["https://news.ycombinator.com/news?p=3"]);
//!
//! let best = annotation.best_links_to_follow().expect("propagation converges");
//! assert_eq!(best[0], "https://news.ycombinator.com/news?p=2");
//! assert_eq!(best[1], "https://news.ycombinator.com/news?p=3");
//! ```

mod config;
mod evidence;

pub use config::LinkAnnotationConfig;
pub use evidence::{Decision, Evidence};

use crate::distance::{Distance, Levenshtein};
use crate::error::{PageFinderError, Result};
use crate::extract::LinkExtractor;
use crate::knn::KnnGraph;
use crate::primitives::Matrix;
use crate::propagation::LabelPropagation;
use std::collections::{BTreeSet, HashMap};

/// Label column of follow evidence.
const FOLLOW: usize = 0;
/// Label column of don't-follow evidence.
const DONT_FOLLOW: usize = 1;

/// Link ranking service over a growing kNN graph of links.
#[derive(Debug, Clone)]
pub struct LinkAnnotation<D = Levenshtein> {
    graph: KnnGraph<String, D>,
    marked: HashMap<String, bool>,
    propagation: LabelPropagation,
    sigma: f64,
    min_score: f64,
    scores: Matrix<f64>,
    dirty: bool,
}

impl LinkAnnotation<Levenshtein> {
    /// Default configuration with Levenshtein distance between links.
    #[must_use]
    pub fn new() -> Self {
        Self::build(LinkAnnotationConfig::default(), Levenshtein)
    }

    /// Custom configuration with Levenshtein distance between links.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn with_config(config: LinkAnnotationConfig) -> Result<Self> {
        Self::with_distance(config, Levenshtein)
    }
}

impl Default for LinkAnnotation<Levenshtein> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Distance<String>> LinkAnnotation<D> {
    /// Custom configuration and link distance.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn with_distance(config: LinkAnnotationConfig, distance: D) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config, distance))
    }

    fn build(config: LinkAnnotationConfig, distance: D) -> Self {
        let propagation = LabelPropagation::from_parts(config.alpha, config.eps, config.max_iter);
        Self {
            graph: KnnGraph::new(distance, config.k),
            marked: HashMap::new(),
            propagation,
            sigma: config.sigma,
            min_score: config.effective_min_score(),
            scores: Matrix::zeros(0, 2),
            dirty: true,
        }
    }

    /// Number of known links.
    #[must_use]
    pub fn len(&self) -> usize {
        self.graph.len()
    }

    /// True when no link is known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }

    /// Whether `link` is known.
    #[must_use]
    pub fn contains(&self, link: &str) -> bool {
        self.graph.contains(&link.to_string())
    }

    /// Known links in snapshot order.
    pub fn links(&self) -> impl Iterator<Item = &str> {
        self.graph.points().map(String::as_str)
    }

    /// The operator label of `link`, if any.
    #[must_use]
    pub fn label(&self, link: &str) -> Option<bool> {
        self.marked.get(link).copied()
    }

    /// Decision threshold in effect.
    #[must_use]
    pub fn min_score(&self) -> f64 {
        self.min_score
    }

    /// The underlying kNN graph.
    #[must_use]
    pub fn graph(&self) -> &KnnGraph<String, D> {
        &self.graph
    }

    /// Add a single link. Returns `false` if it was already known.
    pub fn add_link(&mut self, link: impl Into<String>) -> bool {
        let added = self.graph.add_point(link.into());
        self.dirty |= added;
        added
    }

    /// Add the links of an already processed page, ignoring duplicates.
    /// Returns how many links were new.
    pub fn load_links<I, S>(&mut self, links: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let unique: BTreeSet<String> = links.into_iter().map(Into::into).collect();
        let total = unique.len();
        let added = unique
            .into_iter()
            .filter(|link| self.graph.add_point(link.clone()))
            .count();
        self.dirty = true;

        tracing::debug!(links = total, added, points = self.graph.len(), "page loaded");
        added
    }

    /// Extract the links of `page` and add them. Returns how many were new.
    ///
    /// # Errors
    ///
    /// Propagates the extractor's failure; the graph is left unchanged.
    pub fn load<E>(&mut self, extractor: &E, page: &str) -> Result<usize>
    where
        E: LinkExtractor + ?Sized,
    {
        let links = extractor.extract_links(page)?;
        Ok(self.load_links(links))
    }

    /// Label `link` as worth following or not, adding it if unknown.
    /// A later label for the same link replaces the earlier one.
    pub fn mark_link(&mut self, link: impl Into<String>, follow: bool) {
        let link = link.into();
        self.graph.add_point(link.clone());
        self.marked.insert(link, follow);
        self.dirty = true;
    }

    /// Forget `link` and its label. Returns `false` if it was unknown.
    pub fn delete_link(&mut self, link: &str) -> bool {
        self.marked.remove(link);
        let removed = self.graph.delete_point(&link.to_string());
        self.dirty |= removed;
        removed
    }

    /// Propagated evidence of `link`.
    ///
    /// # Errors
    ///
    /// Returns [`PageFinderError::UnknownPoint`] if `link` was never added, or
    /// a propagation error.
    pub fn score(&mut self, link: &str) -> Result<Evidence> {
        self.refresh()?;
        let i = self
            .graph
            .index_of(&link.to_string())
            .ok_or_else(|| PageFinderError::unknown_point(link))?;
        Ok(self.evidence_at(i))
    }

    /// Three-valued follow decision for `link`.
    ///
    /// # Errors
    ///
    /// Same as [`score`](Self::score).
    pub fn decision(&mut self, link: &str) -> Result<Decision> {
        Ok(self.score(link)?.decide(self.min_score))
    }

    /// `Some(true)` to follow, `Some(false)` to skip, `None` if undecided.
    ///
    /// # Errors
    ///
    /// Same as [`score`](Self::score).
    pub fn is_follow(&mut self, link: &str) -> Result<Option<bool>> {
        Ok(self.decision(link)?.as_bool())
    }

    /// Every link classified [`Decision::Follow`], in snapshot order.
    ///
    /// # Errors
    ///
    /// Returns a propagation error.
    pub fn follow_links(&mut self) -> Result<Vec<String>> {
        let min_score = self.min_score;
        Ok(self
            .scored()?
            .into_iter()
            .filter(|(_, ev)| ev.decide(min_score) == Decision::Follow)
            .map(|(link, _)| link)
            .collect())
    }

    /// Links with positive follow evidence, best first.
    ///
    /// Ranked by [`Evidence::preference`], descending; ties keep snapshot
    /// order.
    ///
    /// # Errors
    ///
    /// Returns a propagation error.
    pub fn best_links_to_follow(&mut self) -> Result<Vec<String>> {
        let mut ranked: Vec<(String, f64)> = self
            .scored()?
            .into_iter()
            .filter_map(|(link, ev)| ev.preference().map(|p| (link, p)))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        Ok(ranked.into_iter().map(|(link, _)| link).collect())
    }

    /// Shrink the graph to at most `max_points` links by deleting those with
    /// the lowest total evidence, then re-propagate immediately. Returns the
    /// deleted links, lowest total first.
    ///
    /// The pruned graph is propagated before anything is deleted, so on
    /// error the annotation is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns a propagation error.
    pub fn prune(&mut self, max_points: usize) -> Result<Vec<String>> {
        let before = self.graph.len();
        if before <= max_points {
            return Ok(Vec::new());
        }

        let scored = self.scored()?;
        let mut ranked: Vec<usize> = (0..scored.len()).collect();
        ranked.sort_by(|&a, &b| scored[a].1.total().total_cmp(&scored[b].1.total()));
        let (evicted, _) = ranked.split_at(before - max_points);

        let mut keep = vec![true; scored.len()];
        for &i in evicted {
            keep[i] = false;
        }
        let kept: Vec<usize> = (0..scored.len()).filter(|&i| keep[i]).collect();

        // Deletion never backfills, so the pruned kernel is the current one
        // restricted to the kept links.
        let kernel = self.graph.build_kernel(self.sigma)?.select(&kept, &kept);
        let mut labels = Matrix::zeros(kept.len(), 2);
        for (row, &i) in kept.iter().enumerate() {
            if let Some(&follow) = self.marked.get(&scored[i].0) {
                labels.set(row, if follow { FOLLOW } else { DONT_FOLLOW }, 1.0);
            }
        }
        let scores = self.propagation.propagate(&kernel, &labels)?;

        let evicted: Vec<String> = evicted.iter().map(|&i| scored[i].0.clone()).collect();
        for link in &evicted {
            self.delete_link(link);
        }
        self.scores = scores;
        self.dirty = false;

        tracing::info!(before, after = self.graph.len(), "graph pruned");
        Ok(evicted)
    }

    /// Recompute scores if anything changed since the last propagation.
    ///
    /// # Errors
    ///
    /// Returns a propagation error.
    pub fn refresh(&mut self) -> Result<()> {
        if self.dirty {
            self.propagate()?;
        }
        Ok(())
    }

    fn propagate(&mut self) -> Result<()> {
        let kernel = self.graph.build_kernel(self.sigma)?;
        let mut labels = Matrix::zeros(self.graph.len(), 2);
        for (link, &follow) in &self.marked {
            let i = self
                .graph
                .index_of(link)
                .ok_or_else(|| PageFinderError::unknown_point(link))?;
            let column = if follow { FOLLOW } else { DONT_FOLLOW };
            labels.set(i, column, 1.0);
        }

        self.scores = self.propagation.propagate(&kernel, &labels)?;
        self.dirty = false;
        Ok(())
    }

    fn evidence_at(&self, i: usize) -> Evidence {
        Evidence::new(self.scores.get(i, FOLLOW), self.scores.get(i, DONT_FOLLOW))
    }

    /// Every link with its evidence, in snapshot order.
    fn scored(&mut self) -> Result<Vec<(String, Evidence)>> {
        self.refresh()?;
        Ok(self
            .graph
            .points()
            .enumerate()
            .map(|(i, link)| (link.clone(), self.evidence_at(i)))
            .collect())
    }
}
