use serde::{
    Serialize,
    Deserialize,
};

use std::fmt;

use crate::error::{NBayesError, Result};


/// Maps each `(attribute, value)` pair to a single slot
/// of the frequency vectors.
///
/// The slots of attribute `i` are
/// `offset[i] .. offset[i] + cardinality[i]`, where
/// ```txt
/// offset[0] = 0,
/// offset[i] = offset[i - 1] + cardinality[i - 1].
/// ```
/// The last offset is the total number of slots `V`.
/// The table is computed once and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeCatalog {
    offsets: Vec<usize>,
}


impl AttributeCatalog {
    /// Build the offset table from the declared number of values
    /// of each non-class attribute.
    pub fn new(cardinalities: &[usize]) -> Self {
        let mut offsets = Vec::with_capacity(cardinalities.len() + 1);
        offsets.push(0);
        let mut acc = 0;
        for &k in cardinalities {
            acc += k;
            offsets.push(acc);
        }
        Self { offsets }
    }


    /// Returns the number of non-class attributes.
    #[inline]
    pub fn n_attributes(&self) -> usize {
        self.offsets.len() - 1
    }


    /// Returns the total number of attribute-value slots `V`.
    #[inline]
    pub fn number_of_attribute_value_slots(&self) -> usize {
        self.offsets[self.offsets.len() - 1]
    }


    /// Returns the first slot of attribute `attribute_id`.
    #[inline]
    pub fn offset(&self, attribute_id: usize) -> Result<usize> {
        if attribute_id >= self.n_attributes() {
            return Err(NBayesError::UnknownAttribute(attribute_id));
        }
        Ok(self.offsets[attribute_id])
    }


    /// Returns the declared number of values of `attribute_id`.
    #[inline]
    pub fn cardinality(&self, attribute_id: usize) -> Result<usize> {
        let offset = self.offset(attribute_id)?;
        Ok(self.offsets[attribute_id + 1] - offset)
    }


    /// Returns the slot of the pair `(attribute_id, value)`.
    pub fn slot_for(&self, attribute_id: usize, value: usize) -> Result<usize> {
        let offset = self.offset(attribute_id)?;
        let cardinality = self.offsets[attribute_id + 1] - offset;
        if value >= cardinality {
            return Err(NBayesError::ValueOutOfRange {
                attribute_id, value, cardinality,
            });
        }
        Ok(offset + value)
    }


    /// Returns the declared cardinalities.
    pub fn cardinalities(&self) -> Vec<usize> {
        self.offsets.windows(2)
            .map(|w| w[1] - w[0])
            .collect()
    }
}


impl fmt::Display for AttributeCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, offset) in self.offsets.iter().enumerate() {
            writeln!(f, "Attribute {i}\t -> \t index {offset}")?;
        }
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets() {
        let catalog = AttributeCatalog::new(&[3, 2, 4]);
        assert_eq!(catalog.n_attributes(), 3);
        assert_eq!(catalog.number_of_attribute_value_slots(), 9);
        assert_eq!(catalog.offset(0).unwrap(), 0);
        assert_eq!(catalog.offset(1).unwrap(), 3);
        assert_eq!(catalog.offset(2).unwrap(), 5);
        assert_eq!(catalog.cardinalities(), vec![3, 2, 4]);
    }

    #[test]
    fn test_slot_for() {
        let catalog = AttributeCatalog::new(&[3, 2, 4]);
        assert_eq!(catalog.slot_for(0, 2).unwrap(), 2);
        assert_eq!(catalog.slot_for(1, 0).unwrap(), 3);
        assert_eq!(catalog.slot_for(2, 3).unwrap(), 8);
    }

    #[test]
    fn test_slot_for_out_of_range() {
        let catalog = AttributeCatalog::new(&[3, 2]);
        assert!(matches!(
            catalog.slot_for(1, 2),
            Err(NBayesError::ValueOutOfRange {
                attribute_id: 1, value: 2, cardinality: 2,
            })
        ));
        assert!(matches!(
            catalog.slot_for(2, 0),
            Err(NBayesError::UnknownAttribute(2))
        ));
    }

    #[test]
    fn test_no_attribute() {
        let catalog = AttributeCatalog::new(&[]);
        assert_eq!(catalog.n_attributes(), 0);
        assert_eq!(catalog.number_of_attribute_value_slots(), 0);
    }
}
