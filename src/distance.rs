//! Distances between points.
//!
//! The kNN graph is agnostic to what a point is; it only asks a [`Distance`]
//! for a nonnegative dissimilarity between two of them. Links are compared
//! with [`Levenshtein`] by default.
//!
//! # Quick Start
//!
//! ```
//! use pagefinder::distance::{Distance, Levenshtein};
//!
//! let d = Levenshtein.distance(&"kitten".to_string(), &"sitting".to_string());
//! assert_eq!(d, 3.0);
//! ```

/// A deterministic, nonnegative dissimilarity between two points.
///
/// Graph behavior is only meaningful for symmetric distances, but symmetry is
/// not enforced.
pub trait Distance<P: ?Sized> {
    /// Distance from `a` to `b`.
    fn distance(&self, a: &P, b: &P) -> f64;
}

impl<P: ?Sized, F> Distance<P> for F
where
    F: Fn(&P, &P) -> f64,
{
    fn distance(&self, a: &P, b: &P) -> f64 {
        self(a, b)
    }
}

/// Byte-level Levenshtein edit distance.
///
/// # Examples
///
/// ```
/// use pagefinder::distance::{Distance, Levenshtein};
///
/// let a = "https://news.ycombinator.com/news?p=2".to_string();
/// let b = "https://news.ycombinator.com/news?p=3".to_string();
/// assert_eq!(Levenshtein.distance(&a, &b), 1.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Levenshtein;

impl Distance<String> for Levenshtein {
    fn distance(&self, a: &String, b: &String) -> f64 {
        edit_distance(a.as_bytes(), b.as_bytes()) as f64
    }
}

impl Distance<str> for Levenshtein {
    fn distance(&self, a: &str, b: &str) -> f64 {
        edit_distance(a.as_bytes(), b.as_bytes()) as f64
    }
}

/// Minimum number of single-byte insertions, deletions or substitutions
/// turning `a` into `b`.
///
/// # Examples
///
/// ```
/// use pagefinder::distance::edit_distance;
///
/// assert_eq!(edit_distance(b"kitten", b"sitting"), 3); // k->s, e->i, +g
/// assert_eq!(edit_distance(b"", b"abc"), 3);
/// ```
#[must_use]
pub fn edit_distance(a: &[u8], b: &[u8]) -> usize {
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // Two rolling rows of the DP table
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j]
            } else {
                1 + prev[j + 1].min(curr[j]).min(prev[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_distance() {
        assert_eq!(edit_distance(b"kitten", b"sitting"), 3);
        assert_eq!(edit_distance(b"abc", b""), 3);
        assert_eq!(edit_distance(b"same", b"same"), 0);
        assert_eq!(edit_distance(b"flaw", b"lawn"), 2);
    }

    #[test]
    fn test_edit_distance_symmetric() {
        let a = b"https://example.com/page/1";
        let b = b"https://example.com/about";
        assert_eq!(edit_distance(a, b), edit_distance(b, a));
    }

    #[test]
    fn test_levenshtein_on_strings() {
        let a = "news?p=2".to_string();
        let b = "news?p=10".to_string();
        assert_eq!(Levenshtein.distance(&a, &b), 2.0);
        assert_eq!(Levenshtein.distance("abc", "abd"), 1.0);
    }

    #[test]
    fn test_closure_is_a_distance() {
        let abs = |a: &i64, b: &i64| (a - b).abs() as f64;
        assert_eq!(abs.distance(&3, &-2), 5.0);
    }
}
