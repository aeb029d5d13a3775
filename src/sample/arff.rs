//! A reader for the ARFF format.
//!
//! ```txt
//! % comment
//! @relation funcat
//! @attribute a0 {0,1,2}
//! @attribute a1 numeric
//! @attribute class {1,1.2,1.2.3}
//! @data
//! 2,0.25,1.2.3
//! ```
//! Keywords are case-insensitive.
//! The last declared attribute is the class attribute
//! and must be nominal.
//! A document with `numeric` (`real`, `integer`) attributes
//! is read into a [`DataFrame`] and discretized before use.
use polars::prelude::{DataFrame, NamedFrom, Series};

use std::io::BufRead;

use crate::common::constants::{
    COMMENT_PREFIX,
    FIELD_SEPARATOR,
    MISSING_VALUE,
};
use crate::error::{NBayesError, Result};
use super::attribute::{Attribute, Record};
use super::preprocess::Discretizer;
use super::sample_struct::Sample;


const RELATION: &str = "@relation";
const ATTRIBUTE: &str = "@attribute";
const DATA: &str = "@data";
const NUMERIC_TYPES: [&str; 3] = ["numeric", "real", "integer"];


/// The declared type of an attribute.
#[derive(Debug, Clone, PartialEq)]
enum Kind {
    Nominal(Vec<String>),
    Numeric,
}


/// An ARFF document whose rows are not encoded yet.
#[derive(Debug)]
pub(crate) struct ArffDocument {
    relation: String,
    header: Vec<(String, Kind)>,
    rows: Vec<(usize, Vec<String>)>,
}


/// The columns of an ARFF document.
/// Numeric attributes are `Float64` columns,
/// nominal ones `Utf8` columns. Missing values are nulls.
#[derive(Debug, Clone)]
pub struct ArffFrame {
    /// The relation name.
    pub relation: String,
    /// The non-class attributes.
    pub data: DataFrame,
    /// The class labels.
    pub target: Series,
}


/// Parse an ARFF document into a [`Sample`].
/// Numeric attributes are discretized into at most `max_bins` bins
/// fitted on this document.
pub(crate) fn parse<R: BufRead>(reader: R, max_bins: usize) -> Result<Sample> {
    let document = read(reader)?;
    if document.is_nominal() {
        return document.into_sample();
    }

    let ArffFrame { relation, data, target } = document.into_frame()?;
    let data = Discretizer::new()
        .max_bins(max_bins)
        .fit_transform(&data)?;
    let sample = Sample::from_dataframe(data, target)?
        .with_relation(relation);
    Ok(sample)
}


/// Read the header and the raw rows of an ARFF document.
pub(crate) fn read<R: BufRead>(reader: R) -> Result<ArffDocument> {
    let mut relation = String::new();
    let mut header = Vec::new();
    let mut in_data = false;
    let mut rows = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let lineno = i + 1;
        let line = line.trim();

        if line.is_empty() || line.starts_with(COMMENT_PREFIX) {
            continue;
        }

        if in_data {
            rows.push((lineno, split_row(line, lineno, header.len())?));
            continue;
        }

        let lower = line.to_lowercase();
        if lower.starts_with(DATA) {
            match header.last() {
                None => {
                    return Err(NBayesError::parse(
                        lineno, "no attribute is declared before `@data`"
                    ));
                },
                Some((name, Kind::Numeric)) => {
                    return Err(NBayesError::parse(
                        lineno,
                        format!("the class attribute `{name}` must be nominal"),
                    ));
                },
                Some(_) => {},
            }
            in_data = true;
        } else if lower.starts_with(ATTRIBUTE) {
            header.push(parse_attribute(&line[ATTRIBUTE.len()..], lineno)?);
        } else if lower.starts_with(RELATION) {
            relation = unquote(line[RELATION.len()..].trim()).to_string();
        }
    }

    if !in_data {
        return Err(NBayesError::parse(0, "missing `@data` section"));
    }

    Ok(ArffDocument { relation, header, rows })
}


impl ArffDocument {
    /// Returns `true` if every attribute is nominal.
    pub(crate) fn is_nominal(&self) -> bool {
        self.header.iter()
            .all(|(_, kind)| matches!(kind, Kind::Nominal(_)))
    }


    /// Encode the rows against the nominal declarations.
    /// Undeclared tokens, `?` included, become the unseen index.
    pub(crate) fn into_sample(self) -> Result<Sample> {
        let Self { relation, header, rows } = self;

        let mut attributes = header.into_iter()
            .map(|(name, kind)| match kind {
                Kind::Nominal(values) => Ok(Attribute::new(name, values)),
                Kind::Numeric => Err(NBayesError::parse(
                    0, format!("attribute `{name}` is numeric; discretize it first")
                )),
            })
            .collect::<Result<Vec<_>>>()?;

        // `read` guarantees at least one attribute.
        let class_attribute = attributes.pop()
            .ok_or_else(|| NBayesError::parse(0, "no class attribute"))?;

        let records = rows.into_iter()
            .map(|(_, mut fields)| {
                let label = fields.pop().unwrap_or_default();
                let values = fields.iter()
                    .zip(&attributes)
                    .map(|(token, attribute)| attribute.encode(token))
                    .collect::<Vec<_>>();
                Record::new(values, label)
            })
            .collect::<Vec<_>>();

        let sample = Sample::new(attributes, class_attribute, records)?
            .with_relation(relation);
        Ok(sample)
    }


    /// Convert the document into columns.
    pub(crate) fn into_frame(self) -> Result<ArffFrame> {
        let Self { relation, header, rows } = self;

        let mut columns = Vec::with_capacity(header.len());
        for (j, (name, kind)) in header.iter().enumerate() {
            let series = match kind {
                Kind::Numeric => {
                    let values = rows.iter()
                        .map(|(lineno, fields)| number(&fields[j], *lineno))
                        .collect::<Result<Vec<_>>>()?;
                    Series::new(name, values)
                },
                Kind::Nominal(_) => {
                    let values = rows.iter()
                        .map(|(_, fields)| {
                            let token = fields[j].as_str();
                            (token != MISSING_VALUE).then_some(token)
                        })
                        .collect::<Vec<_>>();
                    Series::new(name, values)
                },
            };
            columns.push(series);
        }

        let target = columns.pop()
            .ok_or_else(|| NBayesError::parse(0, "no class attribute"))?;
        let data = DataFrame::new(columns)?;
        Ok(ArffFrame { relation, data, target })
    }
}


/// Parse the part of an `@attribute` line after the keyword.
fn parse_attribute(rest: &str, lineno: usize) -> Result<(String, Kind)> {
    let rest = rest.trim();
    let (name, kind) = split_name(rest)
        .ok_or_else(|| NBayesError::parse(lineno, "attribute without a name"))?;

    let kind = kind.trim();
    if NUMERIC_TYPES.iter().any(|t| kind.eq_ignore_ascii_case(t)) {
        return Ok((name.to_string(), Kind::Numeric));
    }

    if !(kind.starts_with('{') && kind.ends_with('}')) {
        return Err(NBayesError::parse(
            lineno,
            format!(
                "attribute `{name}` has the unsupported type `{kind}`; \
                 declare it as `numeric` or as `{{v1,v2,...}}`"
            ),
        ));
    }

    let values = kind[1..kind.len() - 1]
        .split(FIELD_SEPARATOR)
        .map(|v| unquote(v.trim()))
        .filter(|v| !v.is_empty() && *v != MISSING_VALUE)
        .map(|v| v.to_string())
        .collect::<Vec<_>>();
    if values.is_empty() {
        return Err(NBayesError::parse(
            lineno, format!("attribute `{name}` declares no value")
        ));
    }

    Ok((name.to_string(), Kind::Nominal(values)))
}


/// Split `name rest` where `name` may be quoted.
fn split_name(s: &str) -> Option<(&str, &str)> {
    let first = s.chars().next()?;
    if first == '\'' || first == '"' {
        let end = s[1..].find(first)? + 1;
        Some((&s[1..end], &s[end + 1..]))
    } else {
        let end = s.find(|c: char| c.is_whitespace() || c == '{')?;
        Some((&s[..end], &s[end..]))
    }
}


/// Remove one pair of surrounding quotes.
fn unquote(s: &str) -> &str {
    let bytes = s.as_bytes();
    let n = bytes.len();
    if n >= 2
        && (bytes[0] == b'\'' || bytes[0] == b'"')
        && bytes[n - 1] == bytes[0]
    {
        &s[1..n - 1]
    } else {
        s
    }
}


/// Split a data row into its unquoted fields.
/// The row must hold one field per declared attribute,
/// the class attribute included.
fn split_row(line: &str, lineno: usize, declared: usize)
    -> Result<Vec<String>>
{
    let fields = line.split(FIELD_SEPARATOR)
        .map(|f| unquote(f.trim()).to_string())
        .collect::<Vec<_>>();

    let found = fields.len();
    if declared != found {
        return Err(NBayesError::Consistency {
            line: lineno, declared, found,
        });
    }
    Ok(fields)
}


/// Read a numeric field. `?` is a missing value.
fn number(token: &str, lineno: usize) -> Result<Option<f64>> {
    if token == MISSING_VALUE {
        return Ok(None);
    }
    token.parse::<f64>()
        .map(Some)
        .map_err(|_| NBayesError::parse(
            lineno, format!("`{token}` is not a number")
        ))
}
