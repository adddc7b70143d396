use std::cmp::Ordering;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Element type of an attribute array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dtype {
    Numeric,
    Text,
}

impl std::fmt::Display for Dtype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dtype::Numeric => write!(f, "numeric"),
            Dtype::Text => write!(f, "text"),
        }
    }
}

/// One row or column attribute array as read from a store.
///
/// Deserializes from a JSON array of all-numbers or all-strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValues {
    Numeric(Vec<f64>),
    Text(Vec<String>),
}

impl AttributeValues {
    pub fn len(&self) -> usize {
        match self {
            AttributeValues::Numeric(v) => v.len(),
            AttributeValues::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn dtype(&self) -> Dtype {
        match self {
            AttributeValues::Numeric(_) => Dtype::Numeric,
            AttributeValues::Text(_) => Dtype::Text,
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.dtype() == Dtype::Numeric
    }

    pub fn as_numeric(&self) -> Option<&[f64]> {
        match self {
            AttributeValues::Numeric(v) => Some(v),
            AttributeValues::Text(_) => None,
        }
    }

    /// Iterate entries as labels, in sample order.
    pub fn labels(&self) -> Box<dyn Iterator<Item = Label> + '_> {
        match self {
            AttributeValues::Numeric(v) => Box::new(v.iter().map(|&x| Label::from(x))),
            AttributeValues::Text(v) => Box::new(v.iter().cloned().map(Label::Text)),
        }
    }

    /// Distinct values in ascending natural order.
    pub fn unique(&self) -> Vec<Label> {
        self.labels().collect::<BTreeSet<_>>().into_iter().collect()
    }

    /// Index of the first entry whose rendered form equals `value`.
    pub fn position_of(&self, value: &str) -> Option<usize> {
        match self {
            AttributeValues::Text(v) => v.iter().position(|s| s == value),
            AttributeValues::Numeric(v) => v.iter().position(|&x| format_number(x) == value),
        }
    }
}

impl From<Vec<f64>> for AttributeValues {
    fn from(values: Vec<f64>) -> Self {
        AttributeValues::Numeric(values)
    }
}

impl From<Vec<String>> for AttributeValues {
    fn from(values: Vec<String>) -> Self {
        AttributeValues::Text(values)
    }
}

impl From<Vec<&str>> for AttributeValues {
    fn from(values: Vec<&str>) -> Self {
        AttributeValues::Text(values.into_iter().map(String::from).collect())
    }
}

/// A single attribute entry, used as a grouping key.
///
/// Ordering is total: numbers compare by `f64::total_cmp` with `-0.0`
/// folded into `0.0`, and sort before text. Text compares byte-wise.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Label {
    Number(f64),
    Text(String),
}

impl PartialEq for Label {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Label {}

impl PartialOrd for Label {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Label {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Label::Number(a), Label::Number(b)) => (a + 0.0).total_cmp(&(b + 0.0)),
            (Label::Text(a), Label::Text(b)) => a.cmp(b),
            (Label::Number(_), Label::Text(_)) => Ordering::Less,
            (Label::Text(_), Label::Number(_)) => Ordering::Greater,
        }
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Label::Number(x) => write!(f, "{}", format_number(*x)),
            Label::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for Label {
    fn from(s: &str) -> Self {
        Label::Text(s.to_string())
    }
}

impl From<f64> for Label {
    fn from(x: f64) -> Self {
        // -0.0 + 0.0 is +0.0
        Label::Number(x + 0.0)
    }
}

/// Render a number the way it reads in a label: integral values lose the
/// trailing `.0`.
pub fn format_number(x: f64) -> String {
    if x.is_finite() && x.fract() == 0.0 && x.abs() < 1e15 {
        format!("{}", x as i64)
    } else {
        format!("{}", x)
    }
}
