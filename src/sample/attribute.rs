use serde::{
    Serialize,
    Deserialize,
};


/// A nominal attribute: a name and the declared categorical values.
/// A value is represented by its position in [`Attribute::values`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub(crate) name: String,
    pub(crate) values: Vec<String>,
}


impl Attribute {
    /// Construct a new attribute.
    pub fn new<S, T>(name: S, values: T) -> Self
        where S: ToString,
              T: IntoIterator,
              T::Item: ToString,
    {
        let name = name.to_string();
        let values = values.into_iter()
            .map(|v| v.to_string())
            .collect();
        Self { name, values }
    }


    /// Returns the attribute name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }


    /// Returns the declared values.
    #[inline]
    pub fn values(&self) -> &[String] {
        &self.values[..]
    }


    /// Returns the number of declared values.
    #[inline]
    pub fn cardinality(&self) -> usize {
        self.values.len()
    }


    /// Returns the position of `token` in the declared values.
    #[inline]
    pub fn index_of(&self, token: &str) -> Option<usize> {
        self.values.iter().position(|v| v == token)
    }


    /// Returns the value at `index`, if declared.
    #[inline]
    pub fn value_at(&self, index: usize) -> Option<&str> {
        self.values.get(index).map(|v| v.as_str())
    }


    /// Returns the index that stands for an undeclared value.
    /// It equals the cardinality, so it is never a valid slot:
    /// training rejects it and classification scores it as unseen.
    #[inline]
    pub fn unseen_index(&self) -> usize {
        self.values.len()
    }


    /// Encode `token` as a value index.
    /// A declared token maps to its position,
    /// any other token to [`Attribute::unseen_index`].
    pub(crate) fn encode(&self, token: &str) -> usize {
        self.index_of(token)
            .unwrap_or(self.unseen_index())
    }
}


/// A single example: one value index per non-class attribute
/// and the hierarchical class label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub(crate) values: Vec<usize>,
    pub(crate) label: String,
}


impl Record {
    /// Construct a new record.
    pub fn new<S: ToString>(values: Vec<usize>, label: S) -> Self {
        Self { values, label: label.to_string() }
    }


    /// Returns the value indices.
    #[inline]
    pub fn values(&self) -> &[usize] {
        &self.values[..]
    }


    /// Returns the class label.
    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }
}
