use hnbayes::{Discretizer, NBayesError, Sample, SampleReader};

use polars::prelude::*;

use std::io::Write;
use tempfile::Builder;


const ARFF: &str = "\
% funcat toy set
@relation toy
@attribute a0 {low,mid,high}
@attribute a1 {0,1}
@attribute class {1,1.1,1.2,2}
@data
low,0,1.1
high,1,1.2
mid,1,2
";


fn scratch(suffix: &str, content: &str) -> tempfile::NamedTempFile {
    let mut file = Builder::new()
        .suffix(suffix)
        .tempfile()
        .unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}


#[test]
fn read_arff_file() {
    let file = scratch(".arff", ARFF);
    let sample = SampleReader::<_, &str>::default()
        .file(file.path())
        .read()
        .unwrap();

    assert_eq!(sample.shape(), (3, 2));
    assert_eq!(sample.relation(), "toy");
    assert_eq!(sample.cardinalities(), vec![3, 2]);
    assert_eq!(sample.class_values(), &["1", "1.1", "1.2", "2"]);
    assert_eq!(sample.at(1).values(), &[2, 1]);
    assert_eq!(sample.labels().collect::<Vec<_>>(), vec!["1.1", "1.2", "2"]);
    assert_eq!(sample.max_label_depth(), 2);
}


#[test]
fn arff_row_with_extra_field() {
    let doc = "@attribute a {0,1}\n@attribute class {A}\n@data\n0,A\n1,1,A\n";
    let file = scratch(".arff", doc);
    let err = SampleReader::<_, &str>::default()
        .file(file.path())
        .read()
        .unwrap_err();
    assert!(matches!(
        err,
        NBayesError::Consistency { line: 5, declared: 2, found: 3 }
    ));
    assert!(err.is_data_error());
}


#[test]
fn read_csv_with_header() {
    let csv = "\
color,size,class
red,S,1.1
blue,L,1.2
red,L,2
";
    let file = scratch(".csv", csv);
    let sample = SampleReader::default()
        .file(file.path())
        .has_header(true)
        .target_feature("class")
        .read()
        .unwrap();

    assert_eq!(sample.shape(), (3, 2));
    assert_eq!(sample.attributes()[0].name(), "color");
    // Distinct tokens in lexical order.
    assert_eq!(sample.attributes()[0].values(), &["blue", "red"]);
    assert_eq!(sample.at(0).values(), &[1, 1]);
    assert_eq!(sample.at(0).label(), "1.1");
}


#[test]
fn read_csv_with_target_in_the_middle() {
    let csv = "x,1.2,a\ny,1.3,b\n";
    let file = scratch(".csv", csv);
    let sample = SampleReader::default()
        .file(file.path())
        .target_feature("Attr. [2]")
        .read()
        .unwrap();

    assert_eq!(sample.shape(), (2, 2));
    assert_eq!(sample.attributes()[1].name(), "Attr. [3]");
    assert_eq!(sample.labels().collect::<Vec<_>>(), vec!["1.2", "1.3"]);
}


#[test]
fn read_dataframe() {
    let s1 = Series::new("outlook", &["sunny", "rain", "sunny"]);
    let s2 = Series::new("windy", &[1_i64, 0, 0]);
    let target = Series::new("class", &["1.1", "2", "1.2"]);
    let df = DataFrame::new(vec![s1, s2]).unwrap();

    let sample = Sample::from_dataframe(df, target).unwrap();
    assert_eq!(sample.shape(), (3, 2));
    assert_eq!(sample.attributes()[0].values(), &["rain", "sunny"]);
    assert_eq!(sample.attributes()[1].values(), &["0", "1"]);
    assert_eq!(sample.at(0).values(), &[1, 1]);
    assert_eq!(sample.at(2).label(), "1.2");
}


#[test]
fn align_test_sample_to_training_sample() {
    let train = Sample::from_arff_str(ARFF).unwrap();

    let csv = "a0,a1,class\nhigh,0,1.1\nextreme,1,2\n";
    let file = scratch(".csv", csv);
    let test = SampleReader::<_, &str>::default()
        .file(file.path())
        .has_header(true)
        .read()
        .unwrap()
        .align_to(&train)
        .unwrap();

    assert_eq!(test.at(0).values(), &[2, 0]);
    // `extreme` is not declared by the training sample.
    assert_eq!(test.at(1).values(), &[3, 1]);
    assert_eq!(test.at(1).label(), "2");
}


#[test]
fn align_does_not_alias_undeclared_digits() {
    let train = Sample::from_arff_str(
        "@attribute a {1,2}\n@attribute class {A,B}\n@data\n1,A\n2,B\n"
    ).unwrap();
    // `0` is undeclared in both files. It must not become `1`.
    let test = Sample::from_arff_str(
        "@attribute a {1,2}\n@attribute class {A,B}\n@data\n0,A\n2,B\n"
    ).unwrap()
    .align_to(&train)
    .unwrap();

    assert_eq!(test.at(0).values(), &[2]);
    assert_eq!(test.at(1).values(), &[1]);
}


#[test]
fn read_numeric_arff_file() {
    let doc = "\
@relation weather
@attribute outlook {sunny,rain}
@attribute temperature numeric
@attribute class {1.1,1.2,2}
@data
sunny,30.5,1.1
rain,12.0,2
sunny,?,1.2
rain,21.0,2
";
    let file = scratch(".arff", doc);
    let sample = SampleReader::<_, &str>::default()
        .file(file.path())
        .max_bins(2)
        .read()
        .unwrap();

    assert_eq!(sample.relation(), "weather");
    assert_eq!(sample.shape(), (4, 2));
    assert_eq!(sample.attributes()[1].values(), &["0", "1"]);
    // The cut point lies at 21.0; the missing value is unseen.
    let temperature = sample.records()
        .iter()
        .map(|r| r.values()[1])
        .collect::<Vec<_>>();
    assert_eq!(temperature, vec![1, 0, 2, 1]);
}


#[test]
fn bin_test_file_with_training_cut_points() {
    let train = "\
@attribute x numeric
@attribute class {A,B}
@data
1,A
2,A
3,B
4,B
";
    let test = "\
@attribute x numeric
@attribute class {A,B}
@data
100,B
";
    let train_file = scratch(".arff", train);
    let test_file = scratch(".arff", test);

    let train = Sample::read_arff_frame(train_file.path()).unwrap();
    let test = Sample::read_arff_frame(test_file.path()).unwrap();

    let mut discretizer = Discretizer::new().max_bins(2);
    let train_data = discretizer.fit_transform(&train.data).unwrap();
    let test_data = discretizer.transform(&test.data).unwrap();

    let train = Sample::from_dataframe(train_data, train.target).unwrap();
    let test = Sample::from_dataframe(test_data, test.target)
        .unwrap()
        .align_to(&train)
        .unwrap();
    assert_eq!(train.at(3).values(), &[1]);
    assert_eq!(test.at(0).values(), &[1]);
}


#[test]
fn dataframe_nulls_are_missing_values() {
    let s1 = Series::new("outlook", &[Some("sunny"), None, Some("rain")]);
    let target = Series::new("class", &["1", "2", "1"]);
    let df = DataFrame::new(vec![s1]).unwrap();

    let sample = Sample::from_dataframe(df, target).unwrap();
    assert_eq!(sample.attributes()[0].values(), &["rain", "sunny"]);
    assert_eq!(sample.at(1).values(), &[2]);
}
