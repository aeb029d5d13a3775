#![warn(missing_docs)]

//!
//! A crate that provides a hierarchical Naive Bayes classifier.
//!
//! The class labels of the examples form a taxonomy
//! written as dot-separated paths (`1`, `1.2`, `1.2.3`, ...).
//! A training example of class `1.2.3` is also counted for
//! its ancestors `1.2` and `1`,
//! so every node of the taxonomy can be scored.
//!
//! Two switches control the classifier.
//!
//! - Mandatory leaf-node prediction
//!     Only the classes without a registered descendant
//!     are candidates.
//!
//! - Usefulness
//!     The posterior of each class is weighted by
//!     `1 - log2(treeSize) / log2(maxTreeSize + 1)`,
//!     which favors specific classes over broad ones.
//!
//! Predictions are evaluated with the hierarchical
//! precision, recall, and F-measure,
//! which give partial credit to a prediction
//! sharing a prefix with the true class.
//!
//! # Example
//! ```no_run
//! use hnbayes::prelude::*;
//!
//! let train = SampleReader::<_, &str>::default()
//!     .file("/path/to/train.arff")
//!     .read()
//!     .unwrap();
//! let test = SampleReader::<_, &str>::default()
//!     .file("/path/to/test.arff")
//!     .read()
//!     .unwrap();
//!
//! let nbayes = HierarchicalNB::init(&train)
//!     .mandatory_leaf(true)
//!     .usefulness(true);
//! let f = nbayes.produce(&train).unwrap();
//!
//! let predictions = f.predict_all(&test).unwrap();
//! let scores = evaluate(test.labels().zip(&predictions)).unwrap();
//! println!("{scores}");
//! ```

pub mod common;
pub mod error;
pub mod sample;
pub mod classifier;
pub mod learner;
pub mod naive_bayes;
pub mod evaluation;
pub mod research;
pub mod prelude;


pub use error::{NBayesError, Result};

pub use sample::{
    Sample,
    SampleReader,
    Attribute,
    Record,
    ArffFrame,
    Discretizer,
};

pub use classifier::Classifier;
pub use learner::Learner;

pub use naive_bayes::{
    AttributeCatalog,
    ClassTaxonomy,
    FrequencyModel,
    TaxonomyPolicy,
    TrainingCorpusBuilder,
    TrainedModel,
    BayesScorer,
    HierarchicalNB,
    HierarchicalNBClassifier,
    train,
    classify,
};

pub use evaluation::{
    EvaluationTotals,
    HierarchicalEvaluator,
    HierarchicalScores,
    evaluate,
};

pub use research::{
    Logger,
    nbayes,
};

pub use common::LabelPath;
