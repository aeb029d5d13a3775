use serde::{
    Serialize,
    Deserialize,
};
use fixedbitset::FixedBitSet;

use std::collections::HashMap;

use crate::error::Result;
use super::attribute_catalog::AttributeCatalog;


/// Per-class counts of attribute-value occurrences.
///
/// Every trained class owns a vector of `V + 1` counters.
/// Slot `s < V` counts the training examples of the class
/// whose attribute value maps to `s`;
/// slot `V` counts the examples of the class.
///
/// An example is accumulated in a scratch bit set
/// ([`FrequencyModel::begin_example`],
/// [`FrequencyModel::observe_attribute_value`])
/// and added to a class by [`FrequencyModel::commit_to_class`].
/// The bit set is reset by the next `begin_example`.
/// A new model starts with an empty example,
/// so the first `begin_example` may be omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrequencyModel {
    catalog: AttributeCatalog,
    records: HashMap<String, Vec<usize>>,
    #[serde(skip)]
    counter: FixedBitSet,
}


impl FrequencyModel {
    /// Construct an empty model over the given slots.
    pub fn new(catalog: AttributeCatalog) -> Self {
        let counter = empty_example(&catalog);
        Self {
            catalog,
            records: HashMap::new(),
            counter,
        }
    }


    /// Returns the attribute catalog.
    #[inline]
    pub fn catalog(&self) -> &AttributeCatalog {
        &self.catalog
    }


    /// Returns the number of classes with at least one example.
    #[inline]
    pub fn n_trained_classes(&self) -> usize {
        self.records.len()
    }


    /// Start a new example.
    /// Only the class-count slot is set.
    pub fn begin_example(&mut self) {
        self.counter = empty_example(&self.catalog);
    }


    /// Mark the slot of `(attribute_id, value)` in the current example.
    pub fn observe_attribute_value(&mut self, attribute_id: usize, value: usize)
        -> Result<()>
    {
        let slot = self.catalog.slot_for(attribute_id, value)?;
        self.ensure_example();
        self.counter.insert(slot);
        Ok(())
    }


    /// Add the current example to the counts of `class`.
    pub fn commit_to_class(&mut self, class: &str) {
        self.ensure_example();
        let v = self.catalog.number_of_attribute_value_slots();
        let record = self.records.entry(class.to_string())
            .or_insert_with(|| vec![0; v + 1]);
        for slot in self.counter.ones() {
            record[slot] += 1;
        }
    }


    /// Returns the number of training examples of `class`
    /// with `value` on `attribute_id`.
    /// Returns `0` for an untrained class or an undeclared value.
    pub fn attribute_value_frequency(
        &self,
        attribute_id: usize,
        value: usize,
        class: &str,
    ) -> usize
    {
        let Ok(slot) = self.catalog.slot_for(attribute_id, value) else {
            return 0;
        };
        self.records.get(class)
            .map_or(0, |record| record[slot])
    }


    /// Returns the number of training examples of `class`.
    pub fn class_frequency(&self, class: &str) -> usize {
        let v = self.catalog.number_of_attribute_value_slots();
        self.records.get(class)
            .map_or(0, |record| record[v])
    }


    // The scratch set is not serialized.
    fn ensure_example(&mut self) {
        if self.counter.len() == 0 {
            self.begin_example();
        }
    }
}


/// A bit set over every slot with only the class-count slot set.
fn empty_example(catalog: &AttributeCatalog) -> FixedBitSet {
    let v = catalog.number_of_attribute_value_slots();
    let mut counter = FixedBitSet::with_capacity(v + 1);
    counter.insert(v);
    counter
}
