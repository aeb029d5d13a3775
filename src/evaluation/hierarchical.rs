use serde::{
    Serialize,
    Deserialize,
};

use std::fmt;

use crate::common::label_path;
use crate::error::{NBayesError, Result};


/// The running sums of a [`HierarchicalEvaluator`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationTotals {
    /// Number of `(true, predicted)` pairs.
    pub n_pairs: usize,
    /// Sum of the intersection depths.
    pub numerator: usize,
    /// Sum of the depths of the predicted labels.
    pub sum_predicted_depth: usize,
    /// Sum of the depths of the true labels.
    pub sum_true_depth: usize,
    /// Sum of `min(depth(true), depth(predicted))`.
    pub sum_min_depth: usize,
}


/// Hierarchical precision, recall and F-measure.
///
/// Precisions and recalls are fractions in `[0, 1]`,
/// F-measures are percentages in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HierarchicalScores {
    /// `numerator / sum_predicted_depth`.
    pub h_precision: f64,
    /// `numerator / sum_true_depth`.
    pub h_recall: f64,
    /// `200 hP hR / (hP + hR)`.
    pub h_fmeasure: f64,
    /// `numerator / sum_min_depth`.
    pub h_precision_alt: f64,
    /// F-measure of `h_precision_alt` and `h_recall`.
    pub h_fmeasure_alt: f64,
}


impl fmt::Display for HierarchicalScores {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "hP = {}", self.h_precision * 100.0)?;
        writeln!(f, "hR = {}", self.h_recall * 100.0)?;
        write!(f, "hF = {}", self.h_fmeasure)
    }
}


/// Accumulates `(true, predicted)` label pairs.
///
/// ```
/// use hnbayes::HierarchicalEvaluator;
///
/// let mut evaluator = HierarchicalEvaluator::new();
/// evaluator.push("1.2", "1.2");
/// evaluator.push("1.3", "1.2");
/// let scores = evaluator.scores().unwrap();
/// assert_eq!(scores.h_precision, 0.75);
/// assert_eq!(scores.h_fmeasure, 75.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct HierarchicalEvaluator {
    totals: EvaluationTotals,
}


impl HierarchicalEvaluator {
    /// Construct an empty evaluator.
    pub fn new() -> Self {
        Self::default()
    }


    /// Returns the number of leading segments `a` and `b` share.
    #[inline]
    pub fn intersection_depth(a: &str, b: &str) -> usize {
        label_path::intersection_depth(a, b)
    }


    /// Add one pair and return its intersection depth.
    pub fn push(&mut self, true_label: &str, predicted_label: &str) -> usize {
        let common = Self::intersection_depth(true_label, predicted_label);
        let true_depth = label_path::depth(true_label);
        let predicted_depth = label_path::depth(predicted_label);

        let totals = &mut self.totals;
        totals.n_pairs += 1;
        totals.numerator += common;
        totals.sum_true_depth += true_depth;
        totals.sum_predicted_depth += predicted_depth;
        totals.sum_min_depth += true_depth.min(predicted_depth);
        common
    }


    /// Returns the running sums.
    #[inline]
    pub fn totals(&self) -> EvaluationTotals {
        self.totals
    }


    /// Returns the scores of the pairs pushed so far.
    pub fn scores(&self) -> Result<HierarchicalScores> {
        let t = &self.totals;
        if t.n_pairs == 0 {
            return Err(NBayesError::EmptyEvaluationSet);
        }

        let numerator = t.numerator as f64;
        let h_precision = numerator / t.sum_predicted_depth as f64;
        let h_recall = numerator / t.sum_true_depth as f64;
        let h_precision_alt = numerator / t.sum_min_depth as f64;

        let scores = HierarchicalScores {
            h_precision,
            h_recall,
            h_fmeasure: f_measure(h_precision, h_recall),
            h_precision_alt,
            h_fmeasure_alt: f_measure(h_precision_alt, h_recall),
        };
        Ok(scores)
    }
}


impl<T, P> Extend<(T, P)> for HierarchicalEvaluator
    where T: AsRef<str>,
          P: AsRef<str>,
{
    fn extend<I: IntoIterator<Item = (T, P)>>(&mut self, pairs: I) {
        for (t, p) in pairs {
            self.push(t.as_ref(), p.as_ref());
        }
    }
}


/// Evaluate `(true, predicted)` pairs.
pub fn evaluate<I, T, P>(pairs: I) -> Result<HierarchicalScores>
    where I: IntoIterator<Item = (T, P)>,
          T: AsRef<str>,
          P: AsRef<str>,
{
    let mut evaluator = HierarchicalEvaluator::new();
    evaluator.extend(pairs);
    evaluator.scores()
}


/// F-measure as a percentage; `0` if both inputs are `0`.
fn f_measure(precision: f64, recall: f64) -> f64 {
    let denom = precision + recall;
    if denom == 0.0 {
        return 0.0;
    }
    200.0 * precision * recall / denom
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_pairs() {
        let mut evaluator = HierarchicalEvaluator::new();
        evaluator.extend([("1.2", "1.2"), ("1.3", "1.2")]);

        let totals = evaluator.totals();
        assert_eq!(totals.numerator, 3);
        assert_eq!(totals.sum_predicted_depth, 4);
        assert_eq!(totals.sum_true_depth, 4);
        assert_eq!(totals.sum_min_depth, 4);

        let scores = evaluator.scores().unwrap();
        assert_eq!(scores.h_precision, 0.75);
        assert_eq!(scores.h_recall, 0.75);
        assert_eq!(scores.h_fmeasure, 75.0);
        assert_eq!(scores.h_fmeasure_alt, 75.0);
    }

    #[test]
    fn test_alternative_precision() {
        // Predicting an ancestor costs recall but not the alternative precision.
        let scores = evaluate([("1.2.3", "1")]).unwrap();
        assert_eq!(scores.h_precision, 1.0);
        assert_eq!(scores.h_precision_alt, 1.0);
        assert!((scores.h_recall - 1.0 / 3.0).abs() < 1e-12);

        let scores = evaluate([("1", "1.2.3")]).unwrap();
        assert!((scores.h_precision - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(scores.h_precision_alt, 1.0);
        assert_eq!(scores.h_recall, 1.0);
        assert_eq!(scores.h_fmeasure_alt, 100.0);
    }

    #[test]
    fn test_disjoint_labels() {
        let scores = evaluate([("1.2", "2.1")]).unwrap();
        assert_eq!(scores.h_precision, 0.0);
        assert_eq!(scores.h_fmeasure, 0.0);
    }

    #[test]
    fn test_empty() {
        let pairs: [(&str, &str); 0] = [];
        assert!(matches!(
            evaluate(pairs),
            Err(NBayesError::EmptyEvaluationSet)
        ));
    }

    #[test]
    fn test_display() {
        let scores = evaluate([("1", "1")]).unwrap();
        assert_eq!(scores.to_string(), "hP = 100\nhR = 100\nhF = 100");
    }
}
