//! This file defines some functions that checks some pre-conditions
//! E.g., Shape of data

use crate::error::{NBayesError, Result};
use crate::Sample;


/// Check whether the training sample is usable or not.
#[inline(always)]
pub(crate) fn training_sample(sample: &Sample) -> Result<()> {
    let (n_examples, _) = sample.shape();

    // The class prior divides by the number of examples.
    if n_examples == 0 {
        return Err(NBayesError::EmptyTrainingSet);
    }
    Ok(())
}


/// Check whether a record carries one value per non-class attribute.
#[inline(always)]
pub(crate) fn record_length(expected: usize, values: &[usize]) -> Result<()> {
    let found = values.len();
    if expected != found {
        return Err(NBayesError::RecordLength { expected, found });
    }
    Ok(())
}


/// Check whether a training value lies within the declared cardinality.
#[inline(always)]
pub(crate) fn training_value(
    attribute_id: usize,
    value: usize,
    cardinality: usize,
) -> Result<()>
{
    if value >= cardinality {
        return Err(NBayesError::TrainingFile {
            attribute_id, value, cardinality,
        });
    }
    Ok(())
}
