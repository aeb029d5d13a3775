//! Provides the `Classifier` trait.
use rayon::prelude::*;

use crate::Sample;
use crate::error::Result;


/// A trait that defines the behavior of a hierarchical classifier.
/// You only need to implement `predict` method.
pub trait Classifier: Sync {
    /// Predicts the class path of the `row`-th example of `sample`.
    fn predict(&self, sample: &Sample, row: usize) -> Result<String>;


    /// Predicts the class paths of all examples of `sample`.
    /// Rows are classified in parallel.
    /// Fails if any row fails.
    fn predict_all(&self, sample: &Sample) -> Result<Vec<String>> {
        let n_sample = sample.shape().0;
        (0..n_sample).into_par_iter()
            .map(|row| self.predict(sample, row))
            .collect::<Result<Vec<_>>>()
    }
}
