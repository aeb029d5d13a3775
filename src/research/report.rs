use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::Sample;
use crate::evaluation::HierarchicalScores;


/// Write the classification result of `test`.
///
/// One line `Example {i} ({true}) -> {predicted}` per test example,
/// followed by the alternative metrics (`hP` over the minimum depths)
/// and the standard metrics:
/// ```txt
/// Example 0 (1.2) -> 1.2
/// Example 1 (1.3) -> 1.2
/// hP = 75
/// hR = 75
/// hF = 75
/// hP = 75
/// hR = 75
/// hF = 75
/// ```
pub fn write_report<W: Write>(
    mut writer: W,
    test: &Sample,
    predictions: &[String],
    scores: &HierarchicalScores,
) -> io::Result<()>
{
    for (i, (label, predicted)) in test.labels().zip(predictions).enumerate() {
        writeln!(writer, "Example {i} ({label}) -> {predicted}")?;
    }
    writeln!(writer, "hP = {}", scores.h_precision_alt * 100.0)?;
    writeln!(writer, "hR = {}", scores.h_recall * 100.0)?;
    writeln!(writer, "hF = {}", scores.h_fmeasure_alt)?;
    writeln!(writer, "{scores}")?;
    writer.flush()
}


/// Write the report to `path`.
pub fn write_report_file<P: AsRef<Path>>(
    path: P,
    test: &Sample,
    predictions: &[String],
    scores: &HierarchicalScores,
) -> io::Result<()>
{
    let file = BufWriter::new(File::create(path)?);
    write_report(file, test, predictions, scores)
}
