use serde::{
    Serialize,
    Deserialize,
};

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::{Classifier, Sample};
use crate::error::Result;

use super::scorer::BayesScorer;
use super::trainer::TrainedModel;


/// Hierarchical Naive Bayes classifier.
/// You can read/write this struct by `serde` trait.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HierarchicalNBClassifier {
    model: TrainedModel,
    usefulness: bool,
}


impl HierarchicalNBClassifier {
    /// Wrap a trained model.
    pub fn new(model: TrainedModel, usefulness: bool) -> Self {
        Self { model, usefulness }
    }


    /// Returns the trained model.
    #[inline]
    pub fn model(&self) -> &TrainedModel {
        &self.model
    }


    /// Returns `true` if the scores are weighted by usefulness.
    #[inline]
    pub fn is_usefulness_enabled(&self) -> bool {
        self.usefulness
    }


    /// Enable or disable the usefulness weighting.
    pub fn set_usefulness(&mut self, flag: bool) {
        self.usefulness = flag;
    }


    /// Returns a scorer over the trained model.
    pub fn scorer(&self) -> BayesScorer<'_> {
        BayesScorer::new(&self.model, self.usefulness)
    }


    /// Returns the most probable class of `values`.
    pub fn classify(&self, values: &[usize]) -> Result<&str> {
        self.scorer().classify(values)
    }


    /// Write `self` to `path` as JSON.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = BufWriter::new(File::create(path)?);
        serde_json::to_writer(file, self)?;
        Ok(())
    }


    /// Read a classifier written by [`HierarchicalNBClassifier::save_json`].
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = BufReader::new(File::open(path)?);
        let classifier = serde_json::from_reader(file)?;
        Ok(classifier)
    }
}


impl Classifier for HierarchicalNBClassifier {
    fn predict(&self, sample: &Sample, row: usize) -> Result<String> {
        self.classify(sample.at(row).values())
            .map(str::to_string)
    }
}
