//! JSON document backend.
//!
//! A document mirrors the Loom layout in a single JSON object:
//!
//! ```json
//! {
//!   "matrix": [[0.0, 1.5], [2.0, 0.0]],
//!   "row_attrs": {"Symbol": ["Actb", "Gapdh"]},
//!   "col_attrs": {"Batch": ["A", "B"], "X": [0.1, 0.2], "Y": [1.0, 2.0]},
//!   "attrs": {"Classes": "Batch"}
//! }
//! ```

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use loomview_core::{AttributeValues, LoomError, Result};
use serde::{Deserialize, Serialize};

use crate::MatrixStore;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentStore {
    /// Rows are features, columns are samples.
    #[serde(default)]
    pub matrix: Vec<Vec<f64>>,
    #[serde(default)]
    pub row_attrs: BTreeMap<String, AttributeValues>,
    #[serde(default)]
    pub col_attrs: BTreeMap<String, AttributeValues>,
    #[serde(default)]
    pub attrs: BTreeMap<String, String>,
}

impl DocumentStore {
    pub fn new(matrix: Vec<Vec<f64>>) -> Self {
        Self {
            matrix,
            ..Self::default()
        }
    }

    pub fn with_row_attr(mut self, key: impl Into<String>, values: impl Into<AttributeValues>) -> Self {
        self.row_attrs.insert(key.into(), values.into());
        self
    }

    pub fn with_col_attr(mut self, key: impl Into<String>, values: impl Into<AttributeValues>) -> Self {
        self.col_attrs.insert(key.into(), values.into());
        self
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// Read and validate a document from any reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let doc: DocumentStore = serde_json::from_reader(reader)?;
        doc.validate()?;
        Ok(doc)
    }

    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .map_err(|e| LoomError::NotFound(format!("{}: {}", path.display(), e)))?;
        Self::from_reader(BufReader::new(file))
    }

    /// Write the document as compact JSON.
    pub fn write(&self, path: &Path) -> Result<()> {
        self.validate()?;
        let mut out = BufWriter::new(File::create(path)?);
        serde_json::to_writer(&mut out, self)?;
        out.flush()?;
        Ok(())
    }

    fn n_cols(&self) -> usize {
        match self.matrix.first() {
            Some(row) => row.len(),
            None => self.col_attrs.values().next().map_or(0, |v| v.len()),
        }
    }

    /// Check that the matrix is rectangular and every attribute array
    /// matches its axis.
    pub fn validate(&self) -> Result<()> {
        let (rows, cols) = (self.matrix.len(), self.n_cols());
        if let Some((i, row)) = self
            .matrix
            .iter()
            .enumerate()
            .find(|(_, r)| r.len() != cols)
        {
            return Err(LoomError::Format(format!(
                "matrix row {} has {} columns, expected {}",
                i,
                row.len(),
                cols
            )));
        }
        for (key, values) in &self.row_attrs {
            if values.len() != rows {
                return Err(LoomError::Format(format!(
                    "row attribute '{}' has length {}, expected {}",
                    key,
                    values.len(),
                    rows
                )));
            }
        }
        for (key, values) in &self.col_attrs {
            if values.len() != cols {
                return Err(LoomError::Format(format!(
                    "column attribute '{}' has length {}, expected {}",
                    key,
                    values.len(),
                    cols
                )));
            }
        }
        Ok(())
    }
}

impl MatrixStore for DocumentStore {
    fn row_attribute_keys(&self) -> Vec<String> {
        self.row_attrs.keys().cloned().collect()
    }

    fn column_attribute_keys(&self) -> Vec<String> {
        self.col_attrs.keys().cloned().collect()
    }

    fn row_attribute(&self, key: &str) -> Result<AttributeValues> {
        self.row_attrs
            .get(key)
            .cloned()
            .ok_or_else(|| LoomError::InvalidAttribute(vec![key.to_string()]))
    }

    fn column_attribute(&self, key: &str) -> Result<AttributeValues> {
        self.col_attrs
            .get(key)
            .cloned()
            .ok_or_else(|| LoomError::InvalidAttribute(vec![key.to_string()]))
    }

    fn matrix_row(&self, index: usize) -> Result<Vec<f64>> {
        self.matrix
            .get(index)
            .cloned()
            .ok_or(LoomError::IndexOutOfRange {
                index,
                len: self.matrix.len(),
            })
    }

    fn shape(&self) -> (usize, usize) {
        (self.matrix.len(), self.n_cols())
    }

    fn file_attribute(&self, name: &str) -> Result<Option<String>> {
        Ok(self.attrs.get(name).cloned())
    }

    fn has_row_attribute(&self, key: &str) -> bool {
        self.row_attrs.contains_key(key)
    }

    fn has_column_attribute(&self, key: &str) -> bool {
        self.col_attrs.contains_key(key)
    }

    fn release(&mut self) {
        self.matrix = Vec::new();
        self.row_attrs.clear();
        self.col_attrs.clear();
        self.attrs.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> DocumentStore {
        DocumentStore::new(vec![vec![0.0, 1.0, 2.0], vec![3.0, 4.0, 5.0]])
            .with_row_attr("Symbol", vec!["Actb", "Gapdh"])
            .with_col_attr("Batch", vec!["A", "B", "A"])
            .with_col_attr("X", vec![0.5, 1.5, 2.5])
            .with_attr("Classes", "Batch")
    }

    #[test]
    fn test_reads() {
        let store = sample();
        assert_eq!(store.shape(), (2, 3));
        assert_eq!(store.column_attribute_keys(), vec!["Batch", "X"]);
        assert_eq!(store.row_attribute_keys(), vec!["Symbol"]);
        assert_eq!(store.matrix_row(1).unwrap(), vec![3.0, 4.0, 5.0]);
        assert_eq!(store.row_index_where("Symbol", "Gapdh").unwrap(), Some(1));
        assert_eq!(store.row_index_where("Symbol", "Cd4").unwrap(), None);
        assert_eq!(
            store.file_attribute("Classes").unwrap().as_deref(),
            Some("Batch")
        );
        assert_eq!(store.file_attribute("Missing").unwrap(), None);
    }

    #[test]
    fn test_missing_key_and_row() {
        let store = sample();
        assert!(matches!(
            store.column_attribute("Nope"),
            Err(LoomError::InvalidAttribute(keys)) if keys == vec!["Nope".to_string()]
        ));
        assert!(matches!(
            store.row_index_where("Entrez_ID", "1"),
            Err(LoomError::InvalidAttribute(_))
        ));
        assert!(matches!(
            store.matrix_row(2),
            Err(LoomError::IndexOutOfRange { index: 2, len: 2 })
        ));
    }

    #[test]
    fn test_parse_document() {
        let json = r#"{
            "matrix": [[1, 2], [3, 4], [5, 6]],
            "row_attrs": {"Symbol": ["a", "b", "c"]},
            "col_attrs": {"Depth": [10, 20]}
        }"#;
        let store = DocumentStore::from_reader(json.as_bytes()).unwrap();
        assert_eq!(store.shape(), (3, 2));
        assert!(store.column_attribute("Depth").unwrap().is_numeric());
        assert!(store.attrs.is_empty());
    }

    #[test]
    fn test_rejects_misaligned_attribute() {
        let json = r#"{"matrix": [[1, 2]], "col_attrs": {"Batch": ["A"]}}"#;
        let err = DocumentStore::from_reader(json.as_bytes()).unwrap_err();
        assert!(matches!(err, LoomError::Format(_)));

        let ragged = r#"{"matrix": [[1, 2], [3]]}"#;
        assert!(matches!(
            DocumentStore::from_reader(ragged.as_bytes()),
            Err(LoomError::Format(_))
        ));
    }

    #[test]
    fn test_write_then_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        let store = sample();
        store.write(&path).unwrap();
        assert_eq!(DocumentStore::open(&path).unwrap(), store);
    }
}
