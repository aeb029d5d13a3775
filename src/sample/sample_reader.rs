use std::path::Path;

use crate::common::constants::DEFAULT_MAX_BINS;
use crate::error::{NBayesError, Result};
use super::sample_struct::Sample;


/// A struct that returns [`Sample`].
/// Using this struct, one can read an ARFF/CSV format file to [`Sample`].
/// The format is chosen by the file extension;
/// files without the `.csv` extension are read as ARFF.
/// # Example
/// The following code is a simple example to read an ARFF file.
/// ```no_run
/// use hnbayes::SampleReader;
/// let filename = "/path/to/arff/file.arff";
/// let sample = SampleReader::<_, &str>::default()
///     .file(filename)
///     .read()
///     .unwrap();
/// ```
/// For CSV files, the class column is chosen by name:
/// ```no_run
/// use hnbayes::SampleReader;
/// let sample = SampleReader::default()
///     .file("/path/to/csv/file.csv")
///     .has_header(true)
///     .target_feature("class")
///     .read()
///     .unwrap();
/// ```
pub struct SampleReader<P, S> {
    file: Option<P>,
    has_header: bool,
    target: Option<S>,
    max_bins: usize,
}


impl<P, S> Default for SampleReader<P, S> {
    fn default() -> Self {
        Self {
            file: None,
            has_header: false,
            target: None,
            max_bins: DEFAULT_MAX_BINS,
        }
    }
}


impl<P, S> SampleReader<P, S> {
    /// Set the flag whether the CSV file has the header row or not.
    /// Default is `false.`
    /// ARFF files ignore this flag.
    pub fn has_header(mut self, flag: bool) -> Self {
        self.has_header = flag;
        self
    }


    /// Set the largest number of bins of a numeric ARFF attribute.
    /// Default is `20`. CSV files ignore this value.
    pub fn max_bins(mut self, max_bins: usize) -> Self {
        assert!(max_bins >= 2, "a discretizer needs at least two bins");
        self.max_bins = max_bins;
        self
    }
}


impl<P, S> SampleReader<P, S>
    where P: AsRef<Path>
{
    /// Set the file name.
    pub fn file(mut self, file: P) -> Self {
        self.file = Some(file);
        self
    }
}


impl<P, S> SampleReader<P, S>
    where S: AsRef<str>
{
    /// Set the CSV column that holds the hierarchical class labels.
    /// By default, the last column is used.
    /// ARFF files always use their last attribute.
    pub fn target_feature(mut self, column: S) -> Self {
        self.target = Some(column);
        self
    }
}


impl<P, S> SampleReader<P, S>
    where P: AsRef<Path>,
          S: AsRef<str>
{
    /// Reads the file based on the arguments,
    /// and returns `Result<Sample>`.
    /// This method consumes `self.`
    pub fn read(self) -> Result<Sample> {
        let file = self.file
            .ok_or_else(|| NBayesError::parse(
                0, "The file name for arff/csv is not set"
            ))?;
        let file = file.as_ref();

        let is_csv = file.extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

        if is_csv {
            let target = self.target.as_ref().map(|t| t.as_ref());
            Sample::from_csv(file, self.has_header, target)
        } else {
            Sample::from_arff_binned(file, self.max_bins)
        }
    }
}
