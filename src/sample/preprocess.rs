//! Preprocessing of a dataset before training.
//!
//! - [`Discretizer`] bins numeric columns by equal frequency.
//! - [`Sample::merge_rare_classes`] merges classes with few examples
//!   into their parent.
//! - [`Sample::drop_unlabeled`] removes examples without a class.
use polars::prelude::{DataFrame, DataType, NamedFrom, Series};
use serde::{
    Serialize,
    Deserialize,
};

use std::collections::{BTreeMap, BTreeSet};

use crate::common::constants::{
    DEFAULT_MAX_BINS,
    LABEL_SEPARATOR,
    MISSING_VALUE,
};
use crate::common::label_path;
use crate::error::Result;
use super::attribute::Attribute;
use super::sample_struct::Sample;


/// Two quantiles closer than this are the same cut point.
const CUT_TOLERANCE: f64 = 1e-8;


/// Equal-frequency discretizer of numeric columns.
///
/// For a column with `u` distinct values,
/// `b = min(max_bins, u)` bins are fitted:
/// the cut points are the `k / b` quantiles (`k = 1, ..., b - 1`)
/// with the averaged inverted CDF,
/// and cut points that coincide are merged.
/// A value `x` falls in bin `#{cut : cut <= x}`.
///
/// Non-numeric columns pass through unchanged,
/// nulls stay null.
///
/// # Example
/// ```
/// use polars::prelude::*;
/// use hnbayes::Discretizer;
///
/// let size = Series::new("size", &[1.0_f64, 2.0, 3.0, 4.0]);
/// let df = DataFrame::new(vec![size]).unwrap();
///
/// let mut discretizer = Discretizer::new().max_bins(2);
/// let binned = discretizer.fit_transform(&df).unwrap();
/// assert_eq!(discretizer.cut_points("size"), Some(&[2.5][..]));
/// assert_eq!(binned.column("size").unwrap().dtype(), &DataType::UInt32);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Discretizer {
    max_bins: usize,
    cuts: BTreeMap<String, Vec<f64>>,
}


impl Default for Discretizer {
    fn default() -> Self {
        Self {
            max_bins: DEFAULT_MAX_BINS,
            cuts: BTreeMap::new(),
        }
    }
}


impl Discretizer {
    /// Construct a new discretizer with
    /// at most [`DEFAULT_MAX_BINS`] bins per column.
    pub fn new() -> Self {
        Self::default()
    }


    /// Set the largest number of bins.
    /// `max_bins` must be at least `2`.
    pub fn max_bins(mut self, max_bins: usize) -> Self {
        assert!(max_bins >= 2, "a discretizer needs at least two bins");
        self.max_bins = max_bins;
        self
    }


    /// Fit the cut points of every numeric column of `data`.
    /// Previously fitted columns are forgotten.
    pub fn fit(&mut self, data: &DataFrame) -> Result<()> {
        self.cuts.clear();
        for series in data.get_columns() {
            if !series.dtype().is_numeric() {
                continue;
            }
            let mut values = numbers(series)?
                .into_iter()
                .flatten()
                .filter(|x| !x.is_nan())
                .collect::<Vec<_>>();
            values.sort_by(f64::total_cmp);
            let cuts = cut_points(&values, self.max_bins);
            self.cuts.insert(series.name().to_string(), cuts);
        }
        Ok(())
    }


    /// Replace each fitted column of `data` by its bin indices.
    /// Columns that were not fitted are kept as they are.
    pub fn transform(&self, data: &DataFrame) -> Result<DataFrame> {
        let columns = data.get_columns()
            .iter()
            .map(|series| {
                let Some(cuts) = self.cuts.get(series.name()) else {
                    return Ok(series.clone());
                };
                let bins = numbers(series)?
                    .into_iter()
                    .map(|x| x.map(|x| bin_of(cuts, x)))
                    .collect::<Vec<_>>();
                Ok(Series::new(series.name(), bins))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(DataFrame::new(columns)?)
    }


    /// Fit on `data` and transform it.
    pub fn fit_transform(&mut self, data: &DataFrame) -> Result<DataFrame> {
        self.fit(data)?;
        self.transform(data)
    }


    /// Returns the cut points of a fitted column.
    pub fn cut_points(&self, column: &str) -> Option<&[f64]> {
        self.cuts.get(column).map(|cuts| &cuts[..])
    }


    /// Returns the number of bins of a fitted column.
    pub fn n_bins(&self, column: &str) -> Option<usize> {
        self.cuts.get(column).map(|cuts| cuts.len() + 1)
    }
}


/// Read a numeric column as `f64`.
fn numbers(series: &Series) -> Result<Vec<Option<f64>>> {
    let casted = series.cast(&DataType::Float64)?;
    let values = casted.f64()?
        .into_iter()
        .collect();
    Ok(values)
}


/// The `k / b` quantile of sorted `values` with the averaged inverted CDF.
/// `values` must not be empty.
fn quantile(values: &[f64], k: usize, b: usize) -> f64 {
    let n = values.len();
    let j = n * k / b;
    let at = |i: usize| values[i.min(n - 1)];
    if (n * k) % b != 0 {
        at(j)
    } else {
        (at(j.saturating_sub(1)) + at(j)) / 2.0
    }
}


/// The inner cut points of at most `max_bins` equal-frequency bins.
fn cut_points(sorted: &[f64], max_bins: usize) -> Vec<f64> {
    let mut distinct = sorted.to_vec();
    distinct.dedup();
    let n_bins = max_bins.min(distinct.len());
    if n_bins < 2 {
        return Vec::new();
    }

    let edges = (0..=n_bins)
        .map(|k| quantile(sorted, k, n_bins))
        .collect::<Vec<_>>();

    // Drop every edge too close to its predecessor,
    // then the outer two.
    let kept = edges.iter()
        .enumerate()
        .filter(|&(k, &e)| k == 0 || e - edges[k - 1] > CUT_TOLERANCE)
        .map(|(_, &e)| e)
        .collect::<Vec<_>>();
    if kept.len() <= 2 {
        return Vec::new();
    }
    kept[1..kept.len() - 1].to_vec()
}


fn bin_of(cuts: &[f64], x: f64) -> u32 {
    cuts.partition_point(|&c| c <= x) as u32
}


impl Sample {
    /// Merge every class with fewer than `min_count` examples
    /// into its parent, until no such class of depth `2` or more
    /// remains. Rare top-level classes are kept.
    ///
    /// A leading `R` root segment (`R.1.2` or `R1.2`) is stripped
    /// from every label first.
    /// The class values become the distinct labels afterwards.
    pub fn merge_rare_classes(mut self, min_count: usize) -> Self {
        for record in self.records.iter_mut() {
            if let Some(label) = strip_root(&record.label) {
                record.label = label.to_string();
            }
        }

        loop {
            let mut counts = BTreeMap::<&str, usize>::new();
            for label in self.labels() {
                *counts.entry(label).or_insert(0) += 1;
            }
            let rare = counts.into_iter()
                .filter(|&(label, count)| {
                    count < min_count && label_path::depth(label) >= 2
                })
                .map(|(label, _)| label.to_string())
                .collect::<BTreeSet<_>>();

            if rare.is_empty() {
                break;
            }

            for record in self.records.iter_mut() {
                if rare.contains(&record.label) {
                    record.label = parent_of(&record.label).to_string();
                }
            }
        }

        self.redeclare_classes();
        self
    }


    /// Remove the examples whose class is missing (`?` or empty).
    pub fn drop_unlabeled(mut self) -> Self {
        self.records
            .retain(|r| !r.label.is_empty() && r.label != MISSING_VALUE);
        self.redeclare_classes();
        self
    }


    fn redeclare_classes(&mut self) {
        let labels = self.labels()
            .filter(|&label| label != MISSING_VALUE)
            .collect::<BTreeSet<_>>();
        let class_attribute = Attribute::new(self.class_attribute.name(), labels);
        self.class_attribute = class_attribute;
    }
}


fn strip_root(label: &str) -> Option<&str> {
    let rest = label.strip_prefix('R')?;
    let rest = rest.strip_prefix(LABEL_SEPARATOR).unwrap_or(rest);
    (!rest.is_empty()).then_some(rest)
}


fn parent_of(label: &str) -> &str {
    label.rsplit_once(LABEL_SEPARATOR)
        .map_or(label, |(parent, _)| parent)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::Record;

    fn column(values: &[f64]) -> DataFrame {
        let series = Series::new("x", values);
        DataFrame::new(vec![series]).unwrap()
    }

    fn bins(df: &DataFrame) -> Vec<Option<u32>> {
        df.column("x").unwrap()
            .u32().unwrap()
            .into_iter()
            .collect()
    }

    fn sample(labels: &[(&str, usize)]) -> Sample {
        let records = labels.iter()
            .flat_map(|&(label, n)| {
                std::iter::repeat(Record::new(vec![0], label)).take(n)
            })
            .collect();
        let attributes = vec![Attribute::new("a", ["0"])];
        let class = Attribute::new("class", labels.iter().map(|(l, _)| *l));
        Sample::new(attributes, class, records).unwrap()
    }

    #[test]
    fn test_quantile() {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&values, 0, 2), 1.0);
        assert_eq!(quantile(&values, 1, 2), 2.5);
        assert_eq!(quantile(&values, 1, 3), 2.0);
        assert_eq!(quantile(&values, 2, 2), 4.0);
    }

    #[test]
    fn test_equal_frequency_bins() {
        let df = column(&[5.0, 1.0, 3.0, 2.0, 6.0, 4.0]);
        let mut d = Discretizer::new().max_bins(3);
        let binned = d.fit_transform(&df).unwrap();
        assert_eq!(d.cut_points("x"), Some(&[2.5, 4.5][..]));
        assert_eq!(d.n_bins("x"), Some(3));
        let expected = [2_u32, 0, 1, 0, 2, 1].map(Some);
        assert_eq!(bins(&binned), expected);
    }

    #[test]
    fn test_bins_are_capped_by_distinct_values() {
        let df = column(&[1.0, 1.0, 2.0, 2.0]);
        let mut d = Discretizer::new();
        let binned = d.fit_transform(&df).unwrap();
        assert_eq!(d.n_bins("x"), Some(2));
        assert_eq!(bins(&binned), [0_u32, 0, 1, 1].map(Some));
    }

    #[test]
    fn test_coinciding_cuts_are_merged() {
        // Most quantiles fall on `1`.
        let df = column(&[1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 2.0, 3.0]);
        let mut d = Discretizer::new();
        d.fit(&df).unwrap();
        let cuts = d.cut_points("x").unwrap();
        assert!(cuts.windows(2).all(|w| w[0] < w[1]));
        assert!(d.n_bins("x").unwrap() < 3);
    }

    #[test]
    fn test_constant_column_is_one_bin() {
        let df = column(&[7.0, 7.0]);
        let mut d = Discretizer::new();
        let binned = d.fit_transform(&df).unwrap();
        assert_eq!(d.n_bins("x"), Some(1));
        assert_eq!(bins(&binned), [Some(0), Some(0)]);
    }

    #[test]
    fn test_transform_with_fitted_cuts() {
        let mut d = Discretizer::new().max_bins(2);
        d.fit(&column(&[1.0, 2.0, 3.0, 4.0])).unwrap();
        let binned = d.transform(&column(&[-10.0, 2.5, 100.0])).unwrap();
        assert_eq!(bins(&binned), [0_u32, 1, 1].map(Some));
    }

    #[test]
    fn test_nulls_and_strings_pass_through() {
        let x = Series::new("x", &[Some(1.0_f64), None, Some(3.0)]);
        let s = Series::new("s", &["a", "b", "c"]);
        let df = DataFrame::new(vec![x, s]).unwrap();
        let mut d = Discretizer::new();
        let binned = d.fit_transform(&df).unwrap();
        assert_eq!(bins(&binned), [Some(0), None, Some(1)]);
        assert_eq!(binned.column("s").unwrap().dtype(), &DataType::Utf8);
        assert_eq!(d.cut_points("s"), None);
    }

    #[test]
    fn test_merge_rare_classes_climbs_until_frequent() {
        let merged = sample(&[("1.1.1", 2), ("1.1.2", 3), ("1.2", 10), ("2.1", 12)])
            .merge_rare_classes(10);
        // 1.1.1 and 1.1.2 fall to 1.1 (5 examples), then to 1.
        let labels = merged.labels().collect::<BTreeSet<_>>();
        assert_eq!(labels, ["1", "1.2", "2.1"].into_iter().collect());
        assert_eq!(merged.class_values(), &["1", "1.2", "2.1"]);
        assert_eq!(merged.shape().0, 27);
    }

    #[test]
    fn test_rare_top_level_class_is_kept() {
        let merged = sample(&[("3", 1), ("4.1", 1)])
            .merge_rare_classes(10);
        assert_eq!(merged.class_values(), &["3", "4"]);
    }

    #[test]
    fn test_root_prefix_is_stripped() {
        let merged = sample(&[("R.1.2", 10), ("R3", 10)])
            .merge_rare_classes(10);
        assert_eq!(merged.class_values(), &["1.2", "3"]);
    }

    #[test]
    fn test_drop_unlabeled() {
        let kept = sample(&[("1", 2), ("?", 3), ("2", 1)])
            .drop_unlabeled();
        assert_eq!(kept.shape().0, 3);
        assert_eq!(kept.class_values(), &["1", "2"]);
        assert!(kept.labels().all(|l| l != "?"));
    }
}
