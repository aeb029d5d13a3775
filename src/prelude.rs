//! Exports the standard learner, traits, and helpers.
//!
pub use crate::naive_bayes::{
    HierarchicalNB,
    HierarchicalNBClassifier,
    TaxonomyPolicy,
};


pub use crate::learner::Learner;
pub use crate::classifier::Classifier;


pub use crate::sample::{
    Discretizer,
    Sample,
    SampleReader,
};


pub use crate::evaluation::{
    HierarchicalScores,
    evaluate,
};


pub use crate::research::Logger;
