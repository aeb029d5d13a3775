use crate::error::{NBayesError, Result};
use super::trainer::TrainedModel;


/// Naive Bayes scoring over the classes of a [`TrainedModel`].
///
/// For a class `c` and attribute values `x`,
/// ```txt
/// score(c) = Σ_a log10 P(x_a | c) + log10 P(c),
/// P(x_a | c) = freq(a, x_a, c) / freq(c),
/// P(c)       = freq(c) / n,
/// ```
/// where `n` is the number of training examples.
/// A likelihood that is exactly `0` is replaced by `1 / n`.
/// The probability of `c` is `10^score(c)`,
/// multiplied by the usefulness of `c` if enabled.
///
/// Classes are compared in `log10` space,
/// so long records do not underflow to `0`.
pub struct BayesScorer<'a> {
    model: &'a TrainedModel,
    usefulness: bool,
}


impl<'a> BayesScorer<'a> {
    /// Construct a scorer that reads `model`.
    pub fn new(model: &'a TrainedModel, usefulness: bool) -> Self {
        Self { model, usefulness }
    }


    /// Returns `score(c)` (without usefulness).
    /// Returns `None` if `class` has no training example.
    pub fn log_score(&self, values: &[usize], class: &str) -> Option<f64> {
        let frequency = self.model.frequency();
        let class_freq = frequency.class_frequency(class);
        if class_freq == 0 {
            return None;
        }

        let n = self.model.n_examples() as f64;
        let floor = 1.0 / n;
        let class_freq = class_freq as f64;

        let likelihood = values.iter()
            .enumerate()
            .map(|(a, &v)| {
                let freq = frequency.attribute_value_frequency(a, v, class);
                let p = freq as f64 / class_freq;
                if p == 0.0 { floor.log10() } else { p.log10() }
            })
            .sum::<f64>();

        Some(likelihood + (class_freq / n).log10())
    }


    /// Returns the probability of `class` as defined above.
    /// Returns `None` if `class` is not a scorable class.
    pub fn score(&self, values: &[usize], class: &str) -> Option<f64> {
        let log = self.log_score(values, class)?;
        let weight = if self.usefulness {
            self.model.taxonomy().usefulness_of(class)?
        } else {
            1.0
        };
        Some(weight * 10_f64.powf(log))
    }


    /// Returns every scorable class with its weighted `log10` score,
    /// in the iteration order of the taxonomy.
    pub fn ranking(&self, values: &[usize]) -> Result<Vec<(&'a str, f64)>> {
        self.check_length(values)?;
        let ranking = self.model.taxonomy()
            .classes()
            .filter_map(|(class, usefulness)| {
                let log = self.log_score(values, class)?;
                Some((class, self.weight(log, usefulness)))
            })
            .collect();
        Ok(ranking)
    }


    /// Returns the class with the largest score.
    /// Ties go to the class visited first.
    pub fn classify(&self, values: &[usize]) -> Result<&'a str> {
        self.check_length(values)?;

        let mut best: Option<(&'a str, f64)> = None;
        for (class, usefulness) in self.model.taxonomy().classes() {
            let Some(log) = self.log_score(values, class) else {
                continue;
            };
            let score = self.weight(log, usefulness);
            if best.map_or(true, |(_, b)| b < score) {
                best = Some((class, score));
            }
        }

        best.map(|(class, _)| class)
            .ok_or(NBayesError::NoScorableClass)
    }


    #[inline]
    fn weight(&self, log: f64, usefulness: f64) -> f64 {
        if self.usefulness { log + usefulness.log10() } else { log }
    }


    fn check_length(&self, values: &[usize]) -> Result<()> {
        let expected = self.model.n_attributes();
        if values.len() != expected {
            return Err(NBayesError::RecordLength {
                expected,
                found: values.len(),
            });
        }
        Ok(())
    }
}


/// Classify `values` with `model`.
pub fn classify<'a>(
    model: &'a TrainedModel,
    values: &[usize],
    usefulness: bool,
) -> Result<&'a str>
{
    BayesScorer::new(model, usefulness).classify(values)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::naive_bayes::model::TaxonomyPolicy;
    use crate::naive_bayes::trainer::{train, TrainingCorpusBuilder};

    fn declared_model(
        examples: &[(usize, &str)],
        declared: &[&str],
    ) -> TrainedModel
    {
        let mut builder = TrainingCorpusBuilder::new(
            &[2], TaxonomyPolicy::FullHierarchy
        );
        for &(value, label) in examples {
            builder.ingest(&[value], label).unwrap();
        }
        builder.finish(declared).unwrap()
    }

    #[test]
    fn test_perfect_match() {
        let model = train(&[2, 2], [(vec![0, 1], "A")], false).unwrap();
        assert_eq!(classify(&model, &[0, 1], false).unwrap(), "A");

        let scorer = BayesScorer::new(&model, false);
        assert_eq!(scorer.log_score(&[0, 1], "A"), Some(0.0));
        assert_eq!(scorer.score(&[0, 1], "A"), Some(1.0));
    }

    #[test]
    fn test_zero_frequency_floor() {
        let records = [
            (vec![0], "A"),
            (vec![0], "A"),
            (vec![1], "B"),
            (vec![1], "B"),
        ];
        let model = train(&[3], records, false).unwrap();
        let scorer = BayesScorer::new(&model, false);

        // P(2 | A) = 0 -> 1/4, P(A) = 2/4.
        let log = scorer.log_score(&[2], "A").unwrap();
        assert!((log - (0.25_f64.log10() + 0.5_f64.log10())).abs() < 1e-12);

        assert_eq!(scorer.classify(&[0]).unwrap(), "A");
        assert_eq!(scorer.classify(&[1]).unwrap(), "B");
    }

    #[test]
    fn test_ties_go_to_the_first_class() {
        let records = [(vec![0], "2"), (vec![0], "1")];
        let model = train(&[2], records, false).unwrap();
        assert_eq!(classify(&model, &[0], false).unwrap(), "1");
    }

    #[test]
    fn test_usefulness_prefers_specific_classes() {
        let records = [(vec![0], "1.1"), (vec![1], "1.2")];
        let model = train(&[2], records, false).unwrap();

        // Without usefulness `1` ties with `1.1` and is visited first.
        assert_eq!(classify(&model, &[0], false).unwrap(), "1");
        // Its usefulness is 1 - log2(3)/log2(4) < 1/2.
        assert_eq!(classify(&model, &[0], true).unwrap(), "1.1");

        let ranking = BayesScorer::new(&model, true).ranking(&[0]).unwrap();
        let classes = ranking.iter().map(|(c, _)| *c).collect::<Vec<_>>();
        assert_eq!(classes, vec!["1", "1.1", "1.2"]);
    }

    #[test]
    fn test_record_length_is_checked() {
        let model = train(&[2, 2], [(vec![0, 1], "A")], false).unwrap();
        assert!(matches!(
            classify(&model, &[0], false),
            Err(NBayesError::RecordLength { expected: 2, found: 1 })
        ));
    }

    #[test]
    fn test_untrained_class_is_never_returned() {
        let model = declared_model(&[(0, "2"), (1, "2")], &["1", "2"]);
        assert!(model.taxonomy().contains("1"));

        for usefulness in [false, true] {
            let scorer = BayesScorer::new(&model, usefulness);
            for v in [0, 1] {
                assert_eq!(scorer.classify(&[v]).unwrap(), "2");
                let ranking = scorer.ranking(&[v]).unwrap();
                let classes = ranking.iter().map(|(c, _)| *c).collect::<Vec<_>>();
                assert_eq!(classes, vec!["2"]);
            }
            assert_eq!(scorer.score(&[0], "1"), None);
        }
    }

    #[test]
    fn test_no_scorable_class() {
        let model = declared_model(&[(0, "1")], &["9"]);
        assert!(!model.taxonomy().contains("1"));

        let scorer = BayesScorer::new(&model, false);
        assert!(scorer.ranking(&[0]).unwrap().is_empty());
        assert!(matches!(
            scorer.classify(&[0]),
            Err(NBayesError::NoScorableClass)
        ));
        assert!(matches!(
            classify(&model, &[1], true),
            Err(NBayesError::NoScorableClass)
        ));
    }
}
