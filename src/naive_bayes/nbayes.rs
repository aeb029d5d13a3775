use crate::{Learner, Sample};
use crate::common::checker;
use crate::common::constants::{
    DEFAULT_MANDATORY_LEAF,
    DEFAULT_USEFULNESS,
};
use crate::error::Result;

use super::model::TaxonomyPolicy;
use super::trainer::TrainingCorpusBuilder;
use super::nbayes_classifier::HierarchicalNBClassifier;


/// A factory that produces a [`HierarchicalNBClassifier`]
/// from a training sample.
///
/// # Example
/// ```no_run
/// use hnbayes::prelude::*;
///
/// let train = SampleReader::<_, &str>::default()
///     .file("/path/to/train.arff")
///     .read()
///     .unwrap();
/// let nbayes = HierarchicalNB::init(&train)
///     .mandatory_leaf(true)
///     .usefulness(true);
/// let f = nbayes.produce(&train).unwrap();
/// let predictions = f.predict_all(&train).unwrap();
/// ```
#[derive(Debug, Clone, Copy)]
pub struct HierarchicalNB {
    n_sample: usize,
    n_attributes: usize,
    n_classes: usize,
    policy: TaxonomyPolicy,
    usefulness: bool,
}


impl HierarchicalNB {
    /// Initializes the `HierarchicalNB` instance
    /// with the shape and the declared classes of `sample`.
    pub fn init(sample: &Sample) -> Self {
        let (n_sample, n_attributes) = sample.shape();
        Self {
            n_sample,
            n_attributes,
            n_classes: sample.class_values().len(),
            policy: TaxonomyPolicy::from_mandatory_leaf(DEFAULT_MANDATORY_LEAF),
            usefulness: DEFAULT_USEFULNESS,
        }
    }


    /// Restrict the candidate classes to the leaves of the taxonomy.
    /// Default is `false`.
    pub fn mandatory_leaf(mut self, flag: bool) -> Self {
        self.policy = TaxonomyPolicy::from_mandatory_leaf(flag);
        self
    }


    /// Weight the class probabilities by their usefulness.
    /// Default is `false`.
    pub fn usefulness(mut self, flag: bool) -> Self {
        self.usefulness = flag;
        self
    }
}


impl Learner for HierarchicalNB {
    type Hypothesis = HierarchicalNBClassifier;

    fn name(&self) -> &str {
        "Hierarchical Naive Bayes"
    }

    fn info(&self) -> Option<Vec<(&str, String)>> {
        let info = Vec::from([
            ("# of examples", format!("{}", self.n_sample)),
            ("# of attributes", format!("{}", self.n_attributes)),
            ("# of declared classes", format!("{}", self.n_classes)),
            ("Taxonomy", format!("{}", self.policy)),
            ("Usefulness", format!("{}", self.usefulness)),
        ]);
        Some(info)
    }

    fn produce(&self, sample: &Sample) -> Result<Self::Hypothesis> {
        checker::training_sample(sample)?;

        let cardinalities = sample.cardinalities();
        let mut builder = TrainingCorpusBuilder::new(&cardinalities, self.policy);
        for record in sample.records() {
            builder.ingest(record.values(), record.label())?;
        }
        let model = builder.finish(sample.class_values())?;

        Ok(HierarchicalNBClassifier::new(model, self.usefulness))
    }
}
