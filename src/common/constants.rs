/// Separator between the segments of a hierarchical class label.
pub const LABEL_SEPARATOR: char = '.';

/// Separator between the fields of a data row.
pub const FIELD_SEPARATOR: char = ',';

/// Lines of an ARFF/CSV file starting with this character are comments.
pub const COMMENT_PREFIX: char = '%';

/// Mandatory leaf-node prediction is disabled by default.
pub const DEFAULT_MANDATORY_LEAF: bool = false;

/// Usefulness weighting is disabled by default.
pub const DEFAULT_USEFULNESS: bool = false;

/// Token of a missing value. It is never a declared value.
pub const MISSING_VALUE: &str = "?";

/// Largest number of bins of a discretized numeric attribute.
pub const DEFAULT_MAX_BINS: usize = 20;

/// Classes with fewer training examples are merged into their parent.
pub const DEFAULT_MIN_CLASS_COUNT: usize = 10;
