use colored::Colorize;

use std::path::Path;
use std::time::Instant;

use crate::{
    Sample,
    Learner,
    Classifier,
};
use crate::error::Result;
use crate::evaluation::{evaluate, HierarchicalScores};
use super::report;

const WIDTH: usize = 8;
const PREC_WIDTH: usize = 5;
const FULL_WIDTH: usize = 60;
const STAT_WIDTH: usize = (FULL_WIDTH - 4) / 2;


/// The outcome of [`Logger::run`].
#[derive(Debug, Clone)]
pub struct RunOutcome<H> {
    /// The trained hypothesis.
    pub hypothesis: H,
    /// The predicted class path of every test example.
    pub predictions: Vec<String>,
    /// The hierarchical scores over the test sample.
    pub scores: HierarchicalScores,
}


/// Struct `Logger` trains a learner on `train`,
/// classifies `test`, and evaluates the predictions,
/// measuring the running time of each phase.
pub struct Logger<'a, L> {
    learner: L,
    train: &'a Sample,
    test: &'a Sample,
    print_log: bool,
}


impl<'a, L> Logger<'a, L> {
    /// Create a new instance of `Logger`.
    pub fn new(learner: L, train: &'a Sample, test: &'a Sample) -> Self {
        Self { learner, train, test, print_log: true }
    }


    /// Set the flag whether to print the log or not.
    /// Default is `true`.
    #[inline(always)]
    pub fn print_log(mut self, flag: bool) -> Self {
        self.print_log = flag;
        self
    }
}


impl<H, L> Logger<'_, L>
    where L: Learner<Hypothesis = H>,
          H: Classifier,
{
    /// print current settings.
    #[inline(always)]
    fn print_stats(&self) {
        let header = format!(
            "{:=>FULL_WIDTH$}\n{:^FULL_WIDTH$}\n{:->FULL_WIDTH$}",
            "", "STATS".bold(), "",
        );
        println!(
            "\n{header}\n\
            + {:<STAT_WIDTH$}\t{:>STAT_WIDTH$}",
            "Learner".bold(),
            self.learner.name().bold().green(),
        );

        if let Some(info) = self.learner.info() {
            let line = info.into_iter()
                .map(|(key, val)| {
                    format!(
                        "    + {:<STAT_WIDTH$}\t{:>width$}",
                        key,
                        val.bold().yellow(),
                        width = STAT_WIDTH - 8
                    )
                })
                .collect::<Vec<_>>()
                .join("\n");
            println!("{line}");
        }

        let (n_train, n_attributes) = self.train.shape();
        let (n_test, _) = self.test.shape();
        println!(
            "\
            + {:<STAT_WIDTH$}\t{:>STAT_WIDTH$}\n\
            + {:<STAT_WIDTH$}\t{:>STAT_WIDTH$}\n\
            + {:<STAT_WIDTH$}\t{:>STAT_WIDTH$}\n\
            {:=^FULL_WIDTH$}\n\
            ",
            "# of training examples".bold(),
            n_train.to_string().bold().green(),
            "# of test examples".bold(),
            n_test.to_string().bold().green(),
            "# of attributes".bold(),
            n_attributes.to_string().bold().green(),
            "".bold(),
        );
    }


    #[inline(always)]
    fn print_phase(&self, phase: &str, time: u128) {
        if !self.print_log { return; }
        println!(
            "{} {}\t{}",
            "[LOG]".bold().magenta(),
            format!("{phase:>WIDTH$}").red(),
            time_format(time).bold().cyan(),
        );
    }


    /// Train, classify and evaluate.
    pub fn run(&mut self) -> Result<RunOutcome<H>> {
        if self.print_log { self.print_stats(); }

        let mut time_acc = 0;

        let now = Instant::now();
        let hypothesis = self.learner.produce(self.train)?;
        let time = now.elapsed().as_millis();
        time_acc += time;
        self.print_phase("TRAIN", time);

        let now = Instant::now();
        let predictions = hypothesis.predict_all(self.test)?;
        let time = now.elapsed().as_millis();
        time_acc += time;
        self.print_phase("PREDICT", time);

        let now = Instant::now();
        let scores = evaluate(self.test.labels().zip(&predictions))?;
        let time = now.elapsed().as_millis();
        time_acc += time;
        self.print_phase("EVAL", time);

        if self.print_log {
            println!(
                "{} {}\t{}\t{}\t{}\n",
                "[FIN]".bold().bright_green(),
                format!("hP {:>WIDTH$.PREC_WIDTH$}", scores.h_precision).bold().blue(),
                format!("hR {:>WIDTH$.PREC_WIDTH$}", scores.h_recall).bold().green(),
                format!("hF {:>WIDTH$.PREC_WIDTH$}", scores.h_fmeasure).bold().yellow(),
                time_format(time_acc).bold().cyan(),
            );
        }

        Ok(RunOutcome { hypothesis, predictions, scores })
    }


    /// Run as [`Logger::run`] and write the result report to `filename`.
    pub fn run_with_report<P: AsRef<Path>>(&mut self, filename: P)
        -> Result<RunOutcome<H>>
    {
        let outcome = self.run()?;
        report::write_report_file(
            filename, self.test, &outcome.predictions, &outcome.scores
        )?;
        Ok(outcome)
    }
}


pub(crate) fn time_format(millisec: u128) -> String {
    if millisec < 1_000 {
        return format!("  0.{:0>3}s", millisec);
    }
    let sec = millisec / 1_000;
    let millisec = millisec % 1_000;
    if sec < 60 {
        return format!(" {:0>2}.{:0>3}s", sec, millisec);
    }
    let min = sec / 60;
    let sec = sec % 60;
    if min < 60 {
        return format!(" {:0>2}m {:0>2}s", min, sec);
    }
    let hours = min / 60;
    let min = min % 60;
    format!(" {:0>2}h {:0>2}m", hours, min)
}
