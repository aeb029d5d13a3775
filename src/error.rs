//! Error types of this crate.
//!
//! Every fallible operation returns [`Result`],
//! whose error type is [`NBayesError`].
//! None of the errors is recovered inside the crate;
//! they propagate to the caller,
//! which decides whether the classification run is aborted.

use std::io;

use thiserror::Error;


/// The error type for reading samples, training, and evaluation.
#[derive(Error, Debug)]
pub enum NBayesError {
    /// The number of fields in a data row disagrees with
    /// the number of declared attributes.
    #[error(
        "Training File Error: Inconsistent Number of Attributes \
         (line {line}: declared {declared}, found {found})"
    )]
    Consistency {
        /// 1-indexed line number of the offending row.
        line: usize,
        /// Number of attributes declared in the header.
        declared: usize,
        /// Number of fields found in the row.
        found: usize,
    },

    /// A training record holds a value index beyond
    /// the declared cardinality of its attribute.
    #[error(
        "Training File Error: Inconsistent Attribute Value \
         for AttributeId: {attribute_id} \
         (value {value}, cardinality {cardinality})"
    )]
    TrainingFile {
        /// The attribute whose value is out of range.
        attribute_id: usize,
        /// The offending value index.
        value: usize,
        /// The declared number of values of the attribute.
        cardinality: usize,
    },

    /// A slot was requested for a value index that does not exist.
    #[error(
        "value index {value} is out of range for attribute {attribute_id} \
         with {cardinality} values"
    )]
    ValueOutOfRange {
        /// The attribute id.
        attribute_id: usize,
        /// The requested value index.
        value: usize,
        /// The declared number of values of the attribute.
        cardinality: usize,
    },

    /// The attribute id is not in the catalog.
    #[error("attribute {0} does not exist")]
    UnknownAttribute(usize),

    /// A record handed to the model has the wrong number of values.
    #[error("expected {expected} attribute values, got {found}")]
    RecordLength {
        /// Number of non-class attributes of the model.
        expected: usize,
        /// Number of values in the record.
        found: usize,
    },

    /// A malformed ARFF or CSV file.
    #[error("parse error at line {line}: {message}")]
    Parse {
        /// 1-indexed line number (`0` if not line related).
        line: usize,
        /// What went wrong.
        message: String,
    },

    /// No registered class has been trained on.
    #[error("no registered class has a nonzero training frequency")]
    NoScorableClass,

    /// Training was requested on zero records.
    #[error("the training set has no examples")]
    EmptyTrainingSet,

    /// Evaluation was requested on zero pairs.
    #[error("the evaluation set has no examples; metrics are undefined")]
    EmptyEvaluationSet,

    /// I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON (de)serialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors raised by `polars`.
    #[error("polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),
}


/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, NBayesError>;


impl NBayesError {
    /// Create a new parse error.
    pub fn parse<S: Into<String>>(line: usize, message: S) -> Self {
        NBayesError::Parse { line, message: message.into() }
    }


    /// Returns `true` if the error aborts a training run
    /// because of the data, not because of the environment.
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            NBayesError::Consistency { .. }
                | NBayesError::TrainingFile { .. }
                | NBayesError::Parse { .. }
        )
    }
}
