//! Propagated scores and the decisions derived from them.

use serde::{Deserialize, Serialize};

/// Propagated (follow, don't-follow) score pair of one link.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Evidence {
    /// Evidence that the link leads somewhere worth visiting
    pub follow: f64,
    /// Evidence that it does not
    pub dont_follow: f64,
}

impl Evidence {
    /// Create an evidence pair.
    #[must_use]
    pub fn new(follow: f64, dont_follow: f64) -> Self {
        Self {
            follow,
            dont_follow,
        }
    }

    /// Combined evidence; pruning drops the lowest totals first.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.follow + self.dont_follow
    }

    /// Ranking score of a follow candidate.
    ///
    /// `None` when there is no positive follow evidence. Otherwise the
    /// follow / don't-follow ratio, or the follow evidence alone when there
    /// is no don't-follow evidence.
    ///
    /// # Examples
    ///
    /// ```
    /// use pagefinder::annotation::Evidence;
    ///
    /// assert_eq!(Evidence::new(0.4, 0.2).preference(), Some(2.0));
    /// assert_eq!(Evidence::new(0.4, 0.0).preference(), Some(0.4));
    /// assert_eq!(Evidence::new(0.0, 0.3).preference(), None);
    /// ```
    #[must_use]
    pub fn preference(&self) -> Option<f64> {
        if self.follow <= 0.0 {
            return None;
        }
        if self.dont_follow > 0.0 {
            Some(self.follow / self.dont_follow)
        } else {
            Some(self.follow)
        }
    }

    /// Three-valued follow decision against `min_score`.
    ///
    /// Undecided unless at least one side reaches `min_score`; then ties go
    /// to [`Decision::Follow`].
    #[must_use]
    pub fn decide(&self, min_score: f64) -> Decision {
        if self.follow < min_score && self.dont_follow < min_score {
            Decision::Undecided
        } else if self.follow >= self.dont_follow {
            Decision::Follow
        } else {
            Decision::DontFollow
        }
    }
}

/// Outcome of classifying a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Decision {
    /// Worth visiting
    Follow,
    /// Not worth visiting
    DontFollow,
    /// Neither side has enough evidence
    Undecided,
}

impl Decision {
    /// `Some(true)` / `Some(false)` when decided, `None` when undecided.
    #[must_use]
    pub fn as_bool(self) -> Option<bool> {
        match self {
            Decision::Follow => Some(true),
            Decision::DontFollow => Some(false),
            Decision::Undecided => None,
        }
    }
}
