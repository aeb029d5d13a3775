use hnbayes::prelude::*;
use hnbayes::{HierarchicalNBClassifier, nbayes};

use std::fs;
use std::io::Write;
use tempfile::{Builder, NamedTempFile};


// Toy example: attribute `a0` decides the first level,
// attribute `a1` the second one.
//
//  a0  a1  class
//  0   0   1.1
//  0   1   1.2
//  0   1   1.2
//  1   0   2.1
//  1   1   2.2
//  1   0   2.1
const TRAIN: &str = "\
@relation toy
@attribute a0 {0,1}
@attribute a1 {0,1}
@attribute class {1,1.1,1.2,2,2.1,2.2}
@data
0,0,1.1
0,1,1.2
0,1,1.2
1,0,2.1
1,1,2.2
1,0,2.1
";

const TEST: &str = "\
@relation toy
@attribute a0 {0,1}
@attribute a1 {0,1}
@attribute class {1,1.1,1.2,2,2.1,2.2}
@data
0,0,1.1
1,1,2.2
1,0,2.2
";


fn scratch(content: &str) -> NamedTempFile {
    let mut file = Builder::new()
        .suffix(".arff")
        .tempfile()
        .unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}


#[test]
fn mandatory_leaf_predicts_leaves() {
    let train = Sample::from_arff_str(TRAIN).unwrap();
    let test = Sample::from_arff_str(TEST).unwrap();

    let f = HierarchicalNB::init(&train)
        .mandatory_leaf(true)
        .usefulness(false)
        .produce(&train)
        .unwrap();

    let classes = f.model()
        .taxonomy()
        .classes()
        .map(|(class, _)| class)
        .collect::<Vec<_>>();
    assert_eq!(classes, vec!["1.1", "1.2", "2.1", "2.2"]);

    let predictions = f.predict_all(&test).unwrap();
    assert_eq!(predictions, vec!["1.1", "2.2", "2.1"]);

    let scores = evaluate(test.labels().zip(&predictions)).unwrap();
    // numerator = 2 + 2 + 1, every depth is 2.
    assert!((scores.h_fmeasure - 500.0 / 6.0).abs() < 1e-9);
}


#[test]
fn full_hierarchy_scores_every_node() {
    let train = Sample::from_arff_str(TRAIN).unwrap();
    let f = HierarchicalNB::init(&train)
        .produce(&train)
        .unwrap();

    assert_eq!(f.model().taxonomy().len(), 6);
    assert_eq!(f.model().n_examples(), 6);
    assert_eq!(f.model().max_depth(), 2);
    assert_eq!(f.model().frequency().class_frequency("2"), 3);

    let ranking = f.scorer().ranking(&[0, 0]).unwrap();
    let classes = ranking.iter().map(|(c, _)| *c).collect::<Vec<_>>();
    assert_eq!(classes, vec!["1", "1.1", "1.2", "2", "2.1", "2.2"]);

    // The first class with the largest score wins.
    let best = ranking.iter()
        .fold(None, |acc: Option<(&str, f64)>, &(c, s)| match acc {
            Some((_, b)) if b >= s => acc,
            _ => Some((c, s)),
        })
        .unwrap();
    assert_eq!(f.classify(&[0, 0]).unwrap(), best.0);
}


#[test]
fn usefulness_moves_predictions_down() {
    let train = Sample::from_arff_str(TRAIN).unwrap();
    let f = HierarchicalNB::init(&train)
        .usefulness(true)
        .produce(&train)
        .unwrap();
    assert_eq!(f.classify(&[0, 0]).unwrap(), "1.1");
    assert_eq!(f.classify(&[1, 1]).unwrap(), "2.2");
}


#[test]
fn training_value_out_of_range_aborts() {
    let doc = "\
@attribute a0 {0,1}
@attribute class {1,2}
@data
0,1
7,2
";
    let train = Sample::from_arff_str(doc).unwrap();
    let err = HierarchicalNB::init(&train)
        .produce(&train)
        .unwrap_err();
    // `7` is undeclared, so it is read as the unseen index `2`.
    assert!(matches!(
        err,
        hnbayes::NBayesError::TrainingFile { attribute_id: 0, value: 2, .. }
    ));
}


#[test]
fn undeclared_training_token_does_not_alias_a_declared_one() {
    let doc = "@attribute a {1,2}\n@attribute class {A,B}\n@data\n1,A\n0,B\n";
    let train = Sample::from_arff_str(doc).unwrap();
    assert_eq!(train.at(0).values(), &[0]);
    assert_eq!(train.at(1).values(), &[2]);

    let err = HierarchicalNB::init(&train)
        .produce(&train)
        .unwrap_err();
    assert!(matches!(
        err,
        hnbayes::NBayesError::TrainingFile {
            attribute_id: 0, value: 2, cardinality: 2, ..
        }
    ));
}


#[test]
fn save_and_load_json() {
    let train = Sample::from_arff_str(TRAIN).unwrap();
    let test = Sample::from_arff_str(TEST).unwrap();
    let f = HierarchicalNB::init(&train)
        .mandatory_leaf(true)
        .usefulness(true)
        .produce(&train)
        .unwrap();

    let file = Builder::new().suffix(".json").tempfile().unwrap();
    f.save_json(file.path()).unwrap();
    let g = HierarchicalNBClassifier::load_json(file.path()).unwrap();

    assert!(g.is_usefulness_enabled());
    assert_eq!(f.predict_all(&test).unwrap(), g.predict_all(&test).unwrap());
    let classes = |h: &HierarchicalNBClassifier| {
        h.model()
            .taxonomy()
            .classes()
            .map(|(class, _)| class.to_string())
            .collect::<Vec<_>>()
    };
    assert_eq!(classes(&f), classes(&g));
    assert_eq!(f.model().n_examples(), g.model().n_examples());
}


#[test]
fn logger_runs_every_phase() {
    let train = Sample::from_arff_str(TRAIN).unwrap();
    let test = Sample::from_arff_str(TEST).unwrap();
    let nbayes = HierarchicalNB::init(&train).mandatory_leaf(true);

    let outcome = Logger::new(nbayes, &train, &test)
        .print_log(false)
        .run()
        .unwrap();
    assert_eq!(outcome.predictions.len(), 3);
    assert!(outcome.scores.h_precision <= 1.0);
}


#[test]
fn nbayes_writes_the_report() {
    let train = scratch(TRAIN);
    let test = scratch(TEST);
    let report = Builder::new().suffix(".txt").tempfile().unwrap();

    let hf = nbayes(
        true, false, train.path(), test.path(), Some(report.path())
    ).unwrap();
    assert!((hf - 500.0 / 6.0).abs() < 1e-9);

    let text = fs::read_to_string(report.path()).unwrap();
    let lines = text.lines().collect::<Vec<_>>();
    assert_eq!(lines.len(), 3 + 6);
    assert_eq!(lines[0], "Example 0 (1.1) -> 1.1");
    assert_eq!(lines[2], "Example 2 (2.2) -> 2.1");
    assert!(lines[3].starts_with("hP = "));
    assert!(lines[8].starts_with("hF = "));
}


#[test]
fn nbayes_without_report() {
    let train = scratch(TRAIN);
    let test = scratch(TEST);
    let hf = nbayes(true, false, train.path(), test.path(), None::<&str>)
        .unwrap();
    assert!(hf > 0.0 && hf <= 100.0);
}
