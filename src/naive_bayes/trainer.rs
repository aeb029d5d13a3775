use serde::{
    Serialize,
    Deserialize,
};

use std::collections::HashSet;

use crate::common::{checker, label_path};
use crate::error::{NBayesError, Result};
use super::attribute_catalog::AttributeCatalog;
use super::frequency::FrequencyModel;
use super::model::TaxonomyPolicy;
use super::taxonomy::ClassTaxonomy;


/// The state learned from a training corpus.
/// Built by [`TrainingCorpusBuilder`] and read by
/// [`BayesScorer`](super::scorer::BayesScorer).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainedModel {
    frequency: FrequencyModel,
    taxonomy: ClassTaxonomy,
    n_examples: usize,
    max_depth: usize,
}


impl TrainedModel {
    /// Returns the attribute catalog.
    #[inline]
    pub fn catalog(&self) -> &AttributeCatalog {
        self.frequency.catalog()
    }


    /// Returns the per-class frequency tables.
    #[inline]
    pub fn frequency(&self) -> &FrequencyModel {
        &self.frequency
    }


    /// Returns the candidate classes.
    #[inline]
    pub fn taxonomy(&self) -> &ClassTaxonomy {
        &self.taxonomy
    }


    /// Returns the number of training examples.
    #[inline]
    pub fn n_examples(&self) -> usize {
        self.n_examples
    }


    /// Returns the depth of the deepest training label.
    #[inline]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }


    /// Returns the number of non-class attributes.
    #[inline]
    pub fn n_attributes(&self) -> usize {
        self.catalog().n_attributes()
    }
}


/// One pass over the training records.
///
/// ```
/// use hnbayes::{TrainingCorpusBuilder, TaxonomyPolicy};
///
/// let mut builder = TrainingCorpusBuilder::new(
///     &[2, 3], TaxonomyPolicy::FullHierarchy
/// );
/// builder.ingest(&[0, 2], "1.2").unwrap();
/// builder.ingest(&[1, 0], "1.3").unwrap();
/// let model = builder.finish(["1.2", "1.3"]).unwrap();
///
/// assert_eq!(model.n_examples(), 2);
/// assert_eq!(model.frequency().class_frequency("1"), 2);
/// assert_eq!(model.taxonomy().len(), 3);
/// ```
pub struct TrainingCorpusBuilder {
    frequency: FrequencyModel,
    taxonomy: ClassTaxonomy,
    n_examples: usize,
    max_depth: usize,
    observed: Vec<String>,
    seen: HashSet<String>,
}


impl TrainingCorpusBuilder {
    /// Construct a builder for attributes of the given cardinalities.
    pub fn new(cardinalities: &[usize], policy: TaxonomyPolicy) -> Self {
        let catalog = AttributeCatalog::new(cardinalities);
        Self {
            frequency: FrequencyModel::new(catalog),
            taxonomy: ClassTaxonomy::new(policy),
            n_examples: 0,
            max_depth: 0,
            observed: Vec::new(),
            seen: HashSet::new(),
        }
    }


    /// Add one training example.
    ///
    /// The whole record is validated before any count changes,
    /// so a failing record leaves the builder untouched.
    /// The example is counted for its label and
    /// for every ancestor of the label.
    pub fn ingest(&mut self, values: &[usize], label: &str) -> Result<()> {
        let catalog = self.frequency.catalog();
        checker::record_length(catalog.n_attributes(), values)?;
        for (attribute_id, &value) in values.iter().enumerate() {
            let cardinality = catalog.cardinality(attribute_id)?;
            checker::training_value(attribute_id, value, cardinality)?;
        }

        self.frequency.begin_example();
        for (attribute_id, &value) in values.iter().enumerate() {
            self.frequency.observe_attribute_value(attribute_id, value)?;
        }
        for prefix in label_path::prefixes(label) {
            self.frequency.commit_to_class(prefix);
        }

        self.n_examples += 1;
        self.max_depth = self.max_depth.max(label_path::depth(label));
        if self.seen.insert(label.to_string()) {
            self.observed.push(label.to_string());
        }
        Ok(())
    }


    /// Register the declared class values and
    /// compute the usefulness of every class.
    ///
    /// If `declared` is empty, the labels seen during training
    /// are registered in order of first appearance.
    pub fn finish<I, S>(mut self, declared: I) -> Result<TrainedModel>
        where I: IntoIterator<Item = S>,
              S: AsRef<str>,
    {
        if self.n_examples == 0 {
            return Err(NBayesError::EmptyTrainingSet);
        }

        let mut any = false;
        for class in declared {
            self.taxonomy.register(class.as_ref());
            any = true;
        }
        if !any {
            for class in &self.observed {
                self.taxonomy.register(class);
            }
        }
        self.taxonomy.compute_usefulness();

        let model = TrainedModel {
            frequency: self.frequency,
            taxonomy: self.taxonomy,
            n_examples: self.n_examples,
            max_depth: self.max_depth,
        };
        Ok(model)
    }
}


/// Train a model on `records`, pairs of value indices and labels.
/// The classes are the labels of the records.
pub fn train<I, V, S>(
    cardinalities: &[usize],
    records: I,
    mandatory_leaf: bool,
) -> Result<TrainedModel>
    where I: IntoIterator<Item = (V, S)>,
          V: AsRef<[usize]>,
          S: AsRef<str>,
{
    let policy = TaxonomyPolicy::from_mandatory_leaf(mandatory_leaf);
    let mut builder = TrainingCorpusBuilder::new(cardinalities, policy);
    for (values, label) in records {
        builder.ingest(values.as_ref(), label.as_ref())?;
    }
    builder.finish(std::iter::empty::<&str>())
}
