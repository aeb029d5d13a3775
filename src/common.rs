//! Defines some common items used in this library.

/// Defines default parameters and separators.
pub mod constants;

/// Defines `LabelPath`, the segment view of a hierarchical class label.
pub mod label_path;

/// Defines some checker functions.
pub(crate) mod checker;

pub use label_path::LabelPath;
