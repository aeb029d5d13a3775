use std::path::Path;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::collections::BTreeSet;

use polars::prelude::{DataFrame, DataType, Series};

use crate::common::checker;
use crate::common::constants::{
    COMMENT_PREFIX,
    DEFAULT_MAX_BINS,
    FIELD_SEPARATOR,
    MISSING_VALUE,
};
use crate::error::{NBayesError, Result};
use super::attribute::{Attribute, Record};
use super::arff::{self, ArffFrame};


/// Struct `Sample` holds a batch of categorical examples.
/// Each example has one value index per non-class attribute
/// and a hierarchical class label.
#[derive(Debug, Clone)]
pub struct Sample {
    pub(super) relation: String,
    pub(super) attributes: Vec<Attribute>,
    pub(super) class_attribute: Attribute,
    pub(super) records: Vec<Record>,
}


impl Sample {
    /// Construct a new `Sample`.
    /// Every record must hold exactly one value per attribute.
    pub fn new(
        attributes: Vec<Attribute>,
        class_attribute: Attribute,
        records: Vec<Record>,
    ) -> Result<Self>
    {
        let n_attributes = attributes.len();
        records.iter()
            .try_for_each(|r| checker::record_length(n_attributes, r.values()))?;

        let sample = Self {
            relation: String::new(),
            attributes,
            class_attribute,
            records,
        };
        Ok(sample)
    }


    /// Set the relation name.
    pub fn with_relation<S: ToString>(mut self, relation: S) -> Self {
        self.relation = relation.to_string();
        self
    }


    /// Read an ARFF file to `Sample` type.
    /// The last attribute is the class attribute.
    /// Numeric attributes are discretized into
    /// at most [`DEFAULT_MAX_BINS`] equal-frequency bins
    /// fitted on this file.
    pub fn from_arff<P: AsRef<Path>>(file: P) -> Result<Self> {
        Self::from_arff_binned(file, DEFAULT_MAX_BINS)
    }


    /// Same as [`Sample::from_arff`]
    /// with at most `max_bins` bins per numeric attribute.
    pub fn from_arff_binned<P: AsRef<Path>>(file: P, max_bins: usize)
        -> Result<Self>
    {
        let file = File::open(file)?;
        arff::parse(BufReader::new(file), max_bins)
    }


    /// Parse an ARFF document held in memory.
    pub fn from_arff_str(text: &str) -> Result<Self> {
        arff::parse(text.as_bytes(), DEFAULT_MAX_BINS)
    }


    /// Read an ARFF file into columns without encoding it.
    /// Use this with a [`Discretizer`](super::Discretizer)
    /// fitted on the training file
    /// to bin a test file with the same cut points.
    pub fn read_arff_frame<P: AsRef<Path>>(file: P) -> Result<ArffFrame> {
        let file = File::open(file)?;
        arff::read(BufReader::new(file))?
            .into_frame()
    }


    /// Read a CSV format file to `Sample` type.
    /// Every column is categorical.
    /// The column named `target` holds the class labels;
    /// if `target` is `None`, the last column does.
    /// Without a header, the columns are named `Attr. [1]`, `Attr. [2]`, ...
    pub fn from_csv<P>(file: P, has_header: bool, target: Option<&str>)
        -> Result<Self>
        where P: AsRef<Path>,
    {
        // Open the given `file`.
        let file = File::open(file)?;
        let lines = BufReader::new(file).lines();

        let mut names: Vec<String> = Vec::new();
        let mut columns: Vec<Vec<String>> = Vec::new();
        let mut header_pending = has_header;

        // For each line of the file
        for (i, line) in lines.enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with(COMMENT_PREFIX) {
                continue;
            }
            let tokens = line.split(FIELD_SEPARATOR)
                .map(|x| x.trim().to_string())
                .collect::<Vec<_>>();

            if header_pending {
                names = tokens;
                columns = vec![Vec::new(); names.len()];
                header_pending = false;
                continue;
            }

            // if the header does not exist,
            // construct a dummy header.
            if names.is_empty() {
                names = (1..=tokens.len())
                    .map(|k| format!("Attr. [{k}]"))
                    .collect();
                columns = vec![Vec::new(); names.len()];
            }

            if tokens.len() != names.len() {
                return Err(NBayesError::Consistency {
                    line: i + 1,
                    declared: names.len(),
                    found: tokens.len(),
                });
            }
            for (column, token) in columns.iter_mut().zip(tokens) {
                column.push(token);
            }
        }

        let target = target_position(&names, target)?;
        Self::from_columns(names, columns, target)
    }


    /// Convert `polars::DataFrame` and `polars::Series` into `Sample`.
    /// Every column is read as categorical strings;
    /// `target` holds the hierarchical class labels.
    /// Null values are missing values (`?`).
    pub fn from_dataframe(data: DataFrame, target: Series) -> Result<Self> {
        let mut names = Vec::with_capacity(data.width() + 1);
        let mut columns = Vec::with_capacity(data.width() + 1);

        for series in data.get_columns().iter().chain([&target]) {
            names.push(series.name().to_string());
            columns.push(series_to_strings(series)?);
        }

        let target = names.len() - 1;
        Self::from_columns(names, columns, target)
    }


    /// Build a sample from string columns.
    /// The declared values of each attribute are
    /// its distinct tokens in lexical order, `?` excepted.
    fn from_columns(
        mut names: Vec<String>,
        mut columns: Vec<Vec<String>>,
        target: usize,
    ) -> Result<Self>
    {
        let class_name = names.remove(target);
        let labels = columns.remove(target);

        let attributes = names.into_iter()
            .zip(&columns)
            .map(|(name, column)| {
                let values = column.iter()
                    .filter(|token| token.as_str() != MISSING_VALUE)
                    .collect::<BTreeSet<_>>();
                Attribute::new(name, values)
            })
            .collect::<Vec<_>>();

        let class_values = labels.iter()
            .filter(|label| label.as_str() != MISSING_VALUE)
            .collect::<BTreeSet<_>>();
        let class_attribute = Attribute::new(class_name, class_values);

        let records = labels.iter()
            .enumerate()
            .map(|(row, label)| {
                let values = attributes.iter()
                    .zip(&columns)
                    .map(|(attribute, column)| attribute.encode(&column[row]))
                    .collect::<Vec<_>>();
                Record::new(values, label)
            })
            .collect::<Vec<_>>();

        Self::new(attributes, class_attribute, records)
    }


    /// Re-encode `self` against the declarations of `reference`.
    /// A test sample read from CSV or a `DataFrame` declares
    /// its own values, so its indices must be mapped onto
    /// the training sample's before classification.
    /// Tokens `reference` does not declare map to
    /// the attribute cardinality, which scores as an unseen value.
    pub fn align_to(self, reference: &Sample) -> Result<Self> {
        let declared = reference.attributes.len();
        let found = self.attributes.len();
        if declared != found {
            return Err(NBayesError::Consistency { line: 0, declared, found });
        }

        let records = self.records.into_iter()
            .map(|record| {
                let values = record.values.iter()
                    .zip(self.attributes.iter().zip(&reference.attributes))
                    .map(|(&v, (own, theirs))| {
                        own.value_at(v)
                            .and_then(|token| theirs.index_of(token))
                            .unwrap_or(theirs.cardinality())
                    })
                    .collect::<Vec<_>>();
                Record::new(values, record.label)
            })
            .collect::<Vec<_>>();

        let sample = Self {
            relation: self.relation,
            attributes: reference.attributes.clone(),
            class_attribute: reference.class_attribute.clone(),
            records,
        };
        Ok(sample)
    }


    /// Returns the pair of the number of examples and
    /// the number of non-class attributes.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.records.len(), self.attributes.len())
    }


    /// Returns the relation name (empty if none was declared).
    #[inline]
    pub fn relation(&self) -> &str {
        &self.relation
    }


    /// Returns the non-class attributes.
    #[inline]
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes[..]
    }


    /// Returns the class attribute.
    #[inline]
    pub fn class_attribute(&self) -> &Attribute {
        &self.class_attribute
    }


    /// Returns the class values declared by the class attribute.
    #[inline]
    pub fn class_values(&self) -> &[String] {
        self.class_attribute.values()
    }


    /// Returns the declared number of values of each non-class attribute.
    pub fn cardinalities(&self) -> Vec<usize> {
        self.attributes.iter()
            .map(|attr| attr.cardinality())
            .collect()
    }


    /// Returns the records.
    #[inline]
    pub fn records(&self) -> &[Record] {
        &self.records[..]
    }


    /// Returns the `row`-th record.
    #[inline]
    pub fn at(&self, row: usize) -> &Record {
        &self.records[row]
    }


    /// Returns an iterator over the class labels.
    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.records.iter().map(|r| r.label())
    }


    /// Returns the deepest class label of the sample.
    pub fn max_label_depth(&self) -> usize {
        self.labels()
            .map(crate::common::label_path::depth)
            .max()
            .unwrap_or(0)
    }
}


/// Returns the position of the target column.
fn target_position(names: &[String], target: Option<&str>) -> Result<usize> {
    if names.is_empty() {
        return Err(NBayesError::parse(0, "the file has no column"));
    }
    match target {
        None => Ok(names.len() - 1),
        Some(target) => names.iter()
            .position(|name| name == target)
            .ok_or_else(|| NBayesError::parse(
                0, format!("the target column `{target}` does not exist")
            )),
    }
}


/// Cast `series` to strings. Null values become `?`.
fn series_to_strings(series: &Series) -> Result<Vec<String>> {
    let casted = series.cast(&DataType::Utf8)?;
    let tokens = casted.utf8()?
        .into_iter()
        .map(|value| value.unwrap_or(MISSING_VALUE).to_string())
        .collect();
    Ok(tokens)
}
