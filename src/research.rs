//! This directory provides some features for research.
//! - Running a learner with logging
//! - Writing the result report
//! - The end-to-end `nbayes` run

/// Defines a learner runner that logs each phase.
pub mod logger;

/// Writes the result report.
pub mod report;

use std::path::Path;

use crate::{HierarchicalNB, SampleReader};
use crate::error::Result;

pub use logger::{Logger, RunOutcome};
pub use report::{write_report, write_report_file};


/// Train on `training_file`, classify `test_file`,
/// and return the hierarchical F-measure (a percentage).
///
/// The files are read by [`SampleReader`],
/// so both ARFF and CSV (with the class in the last column) work.
/// If `result_file` is given, the result report is written there.
pub fn nbayes<P, Q, R>(
    mandatory_leaf: bool,
    usefulness: bool,
    training_file: P,
    test_file: Q,
    result_file: Option<R>,
) -> Result<f64>
    where P: AsRef<Path>,
          Q: AsRef<Path>,
          R: AsRef<Path>,
{
    let train = SampleReader::<_, &str>::default()
        .file(training_file)
        .read()?;
    let test = SampleReader::<_, &str>::default()
        .file(test_file)
        .read()?
        .align_to(&train)?;

    let learner = HierarchicalNB::init(&train)
        .mandatory_leaf(mandatory_leaf)
        .usefulness(usefulness);
    let mut logger = Logger::new(learner, &train, &test)
        .print_log(false);

    let outcome = match result_file {
        Some(file) => logger.run_with_report(file)?,
        None => logger.run()?,
    };
    Ok(outcome.scores.h_fmeasure)
}
