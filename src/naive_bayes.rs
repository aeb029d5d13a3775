//! Hierarchical Naive Bayes.
//!
//! Training counts, for every class path and each of its ancestors,
//! how often each attribute value occurs.
//! Classification picks the registered class with
//! the largest (optionally usefulness-weighted) posterior.

/// Maps `(attribute, value)` pairs to slots.
pub mod attribute_catalog;
/// Per-class attribute-value counts.
pub mod frequency;
/// Taxonomy policies.
pub mod model;
/// Registered classes and their usefulness.
pub mod taxonomy;
/// Training pass and the trained model.
pub mod trainer;
/// Naive Bayes scoring.
pub mod scorer;

/// Defines the hierarchical Naive Bayes learner.
mod nbayes;
/// Defines the classifier returned by `HierarchicalNB`.
mod nbayes_classifier;


pub use attribute_catalog::AttributeCatalog;
pub use frequency::FrequencyModel;
pub use model::TaxonomyPolicy;
pub use taxonomy::{ClassTaxonomy, Classes};
pub use trainer::{TrainingCorpusBuilder, TrainedModel, train};
pub use scorer::{BayesScorer, classify};
pub use nbayes::HierarchicalNB;
pub use nbayes_classifier::HierarchicalNBClassifier;
