//! A hierarchical class label such as `1.2.3` is a path
//! from the taxonomy root to a node.
//! [`LabelPath`] is the transient segment view of such a label,
//! used for ancestor tests and prefix intersections.
use std::fmt;

use super::constants::LABEL_SEPARATOR;


/// The segments of a hierarchical class label, root first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelPath<'a> {
    segments: Vec<&'a str>,
}


impl<'a> LabelPath<'a> {
    /// Split `label` on `.`.
    /// A label without a separator has depth `1`.
    #[inline]
    pub fn new(label: &'a str) -> Self {
        let segments = label.split(LABEL_SEPARATOR).collect();
        Self { segments }
    }


    /// Returns the number of segments.
    #[inline]
    pub fn depth(&self) -> usize {
        self.segments.len()
    }


    /// Returns the segments, root first.
    #[inline]
    pub fn segments(&self) -> &[&'a str] {
        &self.segments[..]
    }


    /// Returns the number of leading segments shared with `other`.
    /// The comparison stops at the first mismatch
    /// or when the shorter path ends.
    #[inline]
    pub fn common_prefix_len(&self, other: &LabelPath<'_>) -> usize {
        self.segments.iter()
            .zip(other.segments.iter())
            .take_while(|(s, t)| s == t)
            .count()
    }


    /// Returns `true` if `self` equals `other`
    /// or is one of its ancestors.
    #[inline]
    pub fn is_ancestor_or_equal(&self, other: &LabelPath<'_>) -> bool {
        self.depth() <= other.depth()
            && self.common_prefix_len(other) == self.depth()
    }
}


impl fmt::Display for LabelPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = LABEL_SEPARATOR.to_string();
        write!(f, "{}", self.segments.join(&sep))
    }
}


/// Returns the number of segments of `label`.
#[inline]
pub fn depth(label: &str) -> usize {
    label.split(LABEL_SEPARATOR).count()
}


/// Returns the number of leading segments `a` and `b` share.
#[inline]
pub fn intersection_depth(a: &str, b: &str) -> usize {
    LabelPath::new(a).common_prefix_len(&LabelPath::new(b))
}


/// Returns `true` iff the segments of `a` are a prefix of those of `b`.
/// Note that `1.2` is not an ancestor of `1.23`.
#[inline]
pub fn is_ancestor_or_equal(a: &str, b: &str) -> bool {
    LabelPath::new(a).is_ancestor_or_equal(&LabelPath::new(b))
}


/// Iterates over the ancestor-or-self prefixes of `label`, root first.
/// `1.2.3` yields `1`, `1.2`, `1.2.3`.
#[inline]
pub fn prefixes(label: &str) -> impl Iterator<Item = &str> + '_ {
    label.match_indices(LABEL_SEPARATOR)
        .map(move |(end, _)| &label[..end])
        .chain(std::iter::once(label))
}
