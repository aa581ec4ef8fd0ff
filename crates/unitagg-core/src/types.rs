//! Lightweight row/value model.
//!
//! Rows are ordered `(column, value)` pairs. A batch is just a `Vec<Row>`, so
//! rows in the same batch may carry different columns.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Scalar {
    Null,
    Bool(bool),
    I64(i64),
    F64(f64),
    Str(String),
}

impl Scalar {
    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }

    /// Textual rendering of the value, or `None` for `Null`.
    ///
    /// String cells are borrowed; everything else is rendered.
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Scalar::Null => None,
            Scalar::Str(s) => Some(Cow::Borrowed(s.as_str())),
            Scalar::Bool(b) => Some(Cow::Owned(b.to_string())),
            Scalar::I64(i) => Some(Cow::Owned(i.to_string())),
            Scalar::F64(f) => Some(Cow::Owned(f.to_string())),
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Str(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::Str(s)
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Scalar::I64(v)
    }
}

impl<T: Into<Scalar>> From<Option<T>> for Scalar {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Scalar::Null)
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_text() {
            Some(text) => f.write_str(&text),
            None => f.write_str("null"),
        }
    }
}

/// Ordered mapping from column name to value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Row {
    fields: Vec<(String, Scalar)>,
}

/// One unit of input handed to a directive invocation.
pub type Batch = Vec<Row>;

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column. Duplicate names are kept; lookups see the first one.
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<Scalar>) -> &mut Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Builder-style `add`.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.add(name, value);
        self
    }

    pub fn find(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|(n, _)| n == name)
    }

    pub fn get(&self, name: &str) -> Option<&Scalar> {
        self.find(name).map(|idx| &self.fields[idx].1)
    }

    /// Rename the first column called `from`. Returns false when absent.
    pub fn rename(&mut self, from: &str, to: &str) -> bool {
        match self.find(from) {
            Some(idx) => {
                self.fields[idx].0 = to.to_string();
                true
            }
            None => false,
        }
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
