use clap::Parser;
use colored::Colorize;

use std::path::{Path, PathBuf};
use std::process;

use hnbayes::prelude::*;
use hnbayes::NBayesError;
use hnbayes::common::constants::{
    DEFAULT_MAX_BINS,
    DEFAULT_MIN_CLASS_COUNT,
};


/// Train a hierarchical Naive Bayes classifier and evaluate it
/// on a test file.
#[derive(Parser, Debug)]
#[command(name = "hnbayes", version, about)]
struct Args {
    /// Training file (ARFF, or CSV with the `.csv` extension).
    #[arg(long)]
    train: PathBuf,

    /// Test file (ARFF, or CSV with the `.csv` extension).
    #[arg(long)]
    test: PathBuf,

    /// Use mandatory leaf-node prediction.
    #[arg(long)]
    mlnp: bool,

    /// Weight the class probabilities by their usefulness.
    #[arg(long)]
    usf: bool,

    /// Write the per-example predictions and the metrics to this file.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Save the trained classifier as JSON.
    #[arg(long)]
    save_model: Option<PathBuf>,

    /// CSV files have a header row.
    #[arg(long)]
    has_header: bool,

    /// CSV column holding the class labels (default: the last one).
    #[arg(long)]
    target: Option<String>,

    /// Largest number of equal-frequency bins of a numeric ARFF attribute.
    #[arg(
        long,
        default_value_t = DEFAULT_MAX_BINS as u64,
        value_parser = clap::value_parser!(u64).range(2..),
    )]
    max_bins: u64,

    /// Merge rare classes into their parent
    /// and drop the examples without a class, in both files.
    #[arg(long)]
    merge_rare_classes: bool,

    /// Classes with fewer examples are rare.
    #[arg(long, default_value_t = DEFAULT_MIN_CLASS_COUNT)]
    min_class_count: usize,

    /// Print the training statistics and the elapsed time of each phase.
    #[arg(short, long)]
    verbose: bool,
}


fn main() {
    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("{} {e}", "[ERR]".bold().bright_red());
        let code = if e.is_data_error() { 2 } else { 1 };
        process::exit(code);
    }
}


fn run(args: Args) -> Result<(), NBayesError> {
    let train = read(&args.train, &args)?;
    let test = read(&args.test, &args)?
        .align_to(&train)?;

    let nbayes = HierarchicalNB::init(&train)
        .mandatory_leaf(args.mlnp)
        .usefulness(args.usf);

    let mut logger = Logger::new(nbayes, &train, &test)
        .print_log(args.verbose);
    let outcome = match &args.output {
        Some(path) => logger.run_with_report(path)?,
        None => logger.run()?,
    };

    if let Some(path) = &args.save_model {
        outcome.hypothesis.save_json(path)?;
    }

    println!("{}", outcome.scores);
    Ok(())
}


fn read(path: &Path, args: &Args) -> Result<Sample, NBayesError> {
    let reader = SampleReader::default()
        .file(path)
        .has_header(args.has_header)
        .max_bins(args.max_bins as usize);
    let sample = match &args.target {
        Some(target) => reader.target_feature(target).read()?,
        None => reader.read()?,
    };

    if !args.merge_rare_classes {
        return Ok(sample);
    }
    let sample = sample.merge_rare_classes(args.min_class_count)
        .drop_unlabeled();
    Ok(sample)
}
