use serde::{
    Serialize,
    Deserialize,
};

use std::fmt;


/// The policies that decide which classes are evaluated
/// by the Naive Bayes scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaxonomyPolicy {
    /// Every class path and all of its ancestors are evaluated.
    FullHierarchy,
    /// Only classes without a registered descendant are evaluated
    /// (mandatory leaf-node prediction).
    MandatoryLeaf,
}


impl TaxonomyPolicy {
    /// Returns `MandatoryLeaf` if `flag` is `true`,
    /// `FullHierarchy` otherwise.
    #[inline]
    pub fn from_mandatory_leaf(flag: bool) -> Self {
        if flag { Self::MandatoryLeaf } else { Self::FullHierarchy }
    }
}


impl Default for TaxonomyPolicy {
    fn default() -> Self {
        Self::FullHierarchy
    }
}


impl fmt::Display for TaxonomyPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let policy = match self {
            Self::FullHierarchy => "Full hierarchy",
            Self::MandatoryLeaf => "Mandatory leaf node",
        };
        write!(f, "{policy}")
    }
}
