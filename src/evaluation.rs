//! Hierarchical evaluation metrics.
//!
//! A prediction is credited with the number of leading segments
//! it shares with the true label, so predicting `1.2` for `1.3`
//! still earns one point.

mod hierarchical;

pub use hierarchical::{
    EvaluationTotals,
    HierarchicalEvaluator,
    HierarchicalScores,
    evaluate,
};
