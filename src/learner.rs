//! Provides the `Learner` trait.
use crate::Sample;
use crate::error::Result;


/// A trait that defines the behavior of a learning algorithm.
/// Given a training sample, a `Learner` produces a hypothesis.
///
/// # Required Methods
/// - [`Learner::name`]
/// - [`Learner::produce`]
/// - [`Learner::info`] ... optional.
pub trait Learner {
    /// The hypothesis returned by this learner.
    type Hypothesis;


    /// Returns the name of the learning algorithm.
    fn name(&self) -> &str;


    /// Returns the settings of the learner as key/value pairs.
    /// `Logger` prints them before training.
    fn info(&self) -> Option<Vec<(&str, String)>> {
        None
    }


    /// Trains a hypothesis on `sample`.
    fn produce(&self, sample: &Sample) -> Result<Self::Hypothesis>;
}
