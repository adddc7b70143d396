use serde::Serialize;

use crate::error::{LoomError, Result};
use crate::values::AttributeValues;

/// Column attributes projected into a row-aligned table.
///
/// Every column has the same length; row `i` of each column belongs to
/// sample `i` of the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Table {
    columns: Vec<(String, AttributeValues)>,
    n_rows: usize,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column. The first column fixes the row count.
    pub fn push_column(&mut self, name: impl Into<String>, values: AttributeValues) -> Result<()> {
        let name = name.into();
        if !self.columns.is_empty() && values.len() != self.n_rows {
            return Err(LoomError::LengthMismatch {
                what: format!("column '{}'", name),
                expected: self.n_rows,
                found: values.len(),
            });
        }
        self.n_rows = values.len();
        self.columns.push((name, values));
        Ok(())
    }

    pub fn column(&self, name: &str) -> Option<&AttributeValues> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn column_at(&self, index: usize) -> Option<(&str, &AttributeValues)> {
        self.columns.get(index).map(|(n, v)| (n.as_str(), v))
    }

    pub fn names(&self) -> Vec<&str> {
        self.columns.iter().map(|(n, _)| n.as_str()).collect()
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }
}
