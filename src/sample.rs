//! Struct `Sample` represents a batch of categorical examples
//! labeled with hierarchical classes.

// Provides attribute and record structs.
pub(crate) mod attribute;
// Provides sample struct.
pub(crate) mod sample_struct;
// Provides the ARFF parser.
pub(crate) mod arff;
// Provides the discretizer and the class merging.
pub(crate) mod preprocess;

// Provides a struct that reads a file.
pub(crate) mod sample_reader;


pub use sample_reader::SampleReader;
pub use sample_struct::Sample;
pub use attribute::{Attribute, Record};
pub use arff::ArffFrame;
pub use preprocess::Discretizer;
