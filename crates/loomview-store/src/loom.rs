//! HDF5-backed reader for `.loom` files.
//!
//! Layout: `/matrix` (genes × cells), `/row_attrs/<key>` and
//! `/col_attrs/<key>` (one 1-D dataset per attribute), and file-level
//! attributes either on the root group (Loom 2) or as scalar datasets under
//! `/attrs` (Loom 3).
//!
//! Requires the `loom` feature flag and a system HDF5 library installation.

use std::path::Path;

use hdf5::types::{FixedAscii, FixedUnicode, TypeDescriptor, VarLenAscii, VarLenUnicode};
use hdf5::{Container, File};
use log::{debug, warn};
use loomview_core::{format_number, AttributeValues, LoomError, Result};

use crate::entities::decode_entities;
use crate::MatrixStore;

/// Longest fixed-length string read without truncation.
const FIXED_STRING_CAPACITY: usize = 1024;

const MATRIX: &str = "matrix";
const ROW_ATTRS: &str = "row_attrs";
const COL_ATTRS: &str = "col_attrs";
const GLOBAL_ATTRS: &str = "attrs";

fn h5err(e: hdf5::Error) -> LoomError {
    LoomError::Format(format!("HDF5 error: {e}"))
}

pub struct LoomStore {
    file: Option<File>,
    shape: (usize, usize),
    row_keys: Vec<String>,
    col_keys: Vec<String>,
}

impl LoomStore {
    /// Open a loom file read-only and check the attribute lengths against
    /// the matrix shape.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .map_err(|e| LoomError::NotFound(format!("{}: {e}", path.display())))?;

        let matrix = file.dataset(MATRIX).map_err(h5err)?;
        let shape = match matrix.shape().as_slice() {
            &[rows, cols] => (rows, cols),
            other => {
                return Err(LoomError::Format(format!(
                    "/{MATRIX} must be 2-dimensional, found shape {other:?}"
                )))
            }
        };

        let row_keys = attribute_keys(&file, ROW_ATTRS, shape.0)?;
        let col_keys = attribute_keys(&file, COL_ATTRS, shape.1)?;

        Ok(Self {
            file: Some(file),
            shape,
            row_keys,
            col_keys,
        })
    }

    fn file(&self) -> Result<&File> {
        self.file
            .as_ref()
            .ok_or_else(|| LoomError::Format("store already closed".to_string()))
    }

    fn read_attribute(&self, group: &str, keys: &[String], key: &str) -> Result<AttributeValues> {
        if !keys.iter().any(|k| k == key) {
            return Err(LoomError::InvalidAttribute(vec![key.to_string()]));
        }
        let ds = self
            .file()?
            .group(group)
            .and_then(|g| g.dataset(key))
            .map_err(h5err)?;
        read_values(&ds).map_err(h5err)
    }
}

/// Sorted names of the 1-D datasets in `group`, each checked to have
/// `expected` entries. A missing group has no keys.
fn attribute_keys(file: &File, group: &str, expected: usize) -> Result<Vec<String>> {
    if !file.link_exists(group) {
        return Ok(Vec::new());
    }
    let group_handle = file.group(group).map_err(h5err)?;
    let mut keys = Vec::new();
    for name in group_handle.member_names().map_err(h5err)? {
        let Ok(ds) = group_handle.dataset(&name) else {
            continue;
        };
        let shape = ds.shape();
        if shape.len() != 1 {
            debug!("skipping /{group}/{name}: {}-dimensional", shape.len());
            continue;
        }
        if shape[0] != expected {
            return Err(LoomError::Format(format!(
                "/{group}/{name} has length {}, expected {expected}",
                shape[0]
            )));
        }
        keys.push(name);
    }
    keys.sort();
    Ok(keys)
}

/// Read a 1-D dataset as numbers or text, whatever its storage type.
fn read_values(c: &Container) -> hdf5::Result<AttributeValues> {
    let values = match c.dtype()?.to_descriptor()? {
        TypeDescriptor::VarLenUnicode => AttributeValues::Text(
            c.read_1d::<VarLenUnicode>()?
                .iter()
                .map(|s| s.as_str().to_string())
                .collect(),
        ),
        TypeDescriptor::VarLenAscii => AttributeValues::Text(
            c.read_1d::<VarLenAscii>()?
                .iter()
                .map(|s| decode_entities(s.as_str()).into_owned())
                .collect(),
        ),
        TypeDescriptor::FixedAscii(_) => AttributeValues::Text(
            c.read_1d::<FixedAscii<FIXED_STRING_CAPACITY>>()?
                .iter()
                .map(|s| decode_entities(s.as_str()).into_owned())
                .collect(),
        ),
        TypeDescriptor::FixedUnicode(_) => AttributeValues::Text(
            c.read_1d::<FixedUnicode<FIXED_STRING_CAPACITY>>()?
                .iter()
                .map(|s| s.as_str().to_string())
                .collect(),
        ),
        TypeDescriptor::Integer(_) | TypeDescriptor::Unsigned(_) | TypeDescriptor::Float(_) => {
            AttributeValues::Numeric(c.read_1d::<f64>()?.to_vec())
        }
        TypeDescriptor::Boolean => AttributeValues::Numeric(
            c.read_1d::<bool>()?
                .iter()
                .map(|&b| if b { 1.0 } else { 0.0 })
                .collect(),
        ),
        other => {
            return Err(hdf5::Error::Internal(format!(
                "unsupported attribute type {other:?}"
            )))
        }
    };
    Ok(values)
}

/// Read a scalar attribute or dataset as text.
fn read_text_scalar(c: &Container) -> hdf5::Result<String> {
    let text = match c.dtype()?.to_descriptor()? {
        TypeDescriptor::VarLenUnicode => c.read_scalar::<VarLenUnicode>()?.as_str().to_string(),
        TypeDescriptor::VarLenAscii => {
            decode_entities(c.read_scalar::<VarLenAscii>()?.as_str()).into_owned()
        }
        TypeDescriptor::FixedAscii(_) => {
            decode_entities(c.read_scalar::<FixedAscii<FIXED_STRING_CAPACITY>>()?.as_str())
                .into_owned()
        }
        TypeDescriptor::FixedUnicode(_) => c
            .read_scalar::<FixedUnicode<FIXED_STRING_CAPACITY>>()?
            .as_str()
            .to_string(),
        TypeDescriptor::Integer(_) | TypeDescriptor::Unsigned(_) | TypeDescriptor::Float(_) => {
            format_number(c.read_scalar::<f64>()?)
        }
        other => {
            return Err(hdf5::Error::Internal(format!(
                "unsupported scalar type {other:?}"
            )))
        }
    };
    Ok(text)
}

impl MatrixStore for LoomStore {
    fn row_attribute_keys(&self) -> Vec<String> {
        self.row_keys.clone()
    }

    fn column_attribute_keys(&self) -> Vec<String> {
        self.col_keys.clone()
    }

    fn row_attribute(&self, key: &str) -> Result<AttributeValues> {
        self.read_attribute(ROW_ATTRS, &self.row_keys, key)
    }

    fn column_attribute(&self, key: &str) -> Result<AttributeValues> {
        self.read_attribute(COL_ATTRS, &self.col_keys, key)
    }

    fn matrix_row(&self, index: usize) -> Result<Vec<f64>> {
        if index >= self.shape.0 {
            return Err(LoomError::IndexOutOfRange {
                index,
                len: self.shape.0,
            });
        }
        let row = self
            .file()?
            .dataset(MATRIX)
            .and_then(|ds| ds.read_slice_1d::<f64, _>(ndarray::s![index, ..]))
            .map_err(h5err)?;
        Ok(row.to_vec())
    }

    fn shape(&self) -> (usize, usize) {
        self.shape
    }

    fn file_attribute(&self, name: &str) -> Result<Option<String>> {
        let file = self.file()?;
        if file.attr_names().map_err(h5err)?.iter().any(|n| n == name) {
            let attr = file.attr(name).map_err(h5err)?;
            return read_text_scalar(&attr).map(Some).map_err(h5err);
        }
        if file.link_exists(GLOBAL_ATTRS) {
            let group = file.group(GLOBAL_ATTRS).map_err(h5err)?;
            if group.link_exists(name) {
                let ds = group.dataset(name).map_err(h5err)?;
                return read_text_scalar(&ds).map(Some).map_err(h5err);
            }
        }
        Ok(None)
    }

    fn has_row_attribute(&self, key: &str) -> bool {
        self.row_keys.iter().any(|k| k == key)
    }

    fn has_column_attribute(&self, key: &str) -> bool {
        self.col_keys.iter().any(|k| k == key)
    }

    fn release(&mut self) {
        if let Some(file) = self.file.take() {
            if let Err(e) = file.close() {
                warn!("failed to close loom file: {e}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn unicode(values: &[&str]) -> ndarray::Array1<VarLenUnicode> {
        values
            .iter()
            .map(|s| VarLenUnicode::from_str(s).unwrap())
            .collect()
    }

    fn write_fixture(path: &Path, loom3_attrs: bool) {
        let file = File::create(path).unwrap();
        let matrix = ndarray::arr2(&[[0.0f32, 1.0, 2.0, 3.0], [4.0, 5.0, 6.0, 7.0]]);
        file.new_dataset_builder()
            .with_data(&matrix)
            .create(MATRIX)
            .unwrap();

        let rows = file.create_group(ROW_ATTRS).unwrap();
        rows.new_dataset_builder()
            .with_data(&unicode(&["Actb", "Gapdh"]))
            .create("Symbol")
            .unwrap();
        rows.new_dataset_builder()
            .with_data(&ndarray::arr1(&[11461i64, 14433]))
            .create("Entrez_ID")
            .unwrap();

        let cols = file.create_group(COL_ATTRS).unwrap();
        let fixed: ndarray::Array1<FixedAscii<16>> = ["caf&#233;", "B", "caf&#233;", "B"]
            .iter()
            .map(|s| FixedAscii::<16>::from_ascii(s).unwrap())
            .collect();
        cols.new_dataset_builder()
            .with_data(&fixed)
            .create("Batch")
            .unwrap();
        cols.new_dataset_builder()
            .with_data(&ndarray::arr1(&[0.5f64, 1.5, 2.5, 3.5]))
            .create("X")
            .unwrap();

        let classes = VarLenUnicode::from_str("Batch,Cluster").unwrap();
        if loom3_attrs {
            let attrs = file.create_group(GLOBAL_ATTRS).unwrap();
            attrs
                .new_dataset_builder()
                .with_data(&ndarray::arr0(classes))
                .create("Classes")
                .unwrap();
        } else {
            file.new_attr::<VarLenUnicode>()
                .create("Classes")
                .and_then(|attr| attr.write_scalar(&classes))
                .unwrap();
        }
    }

    #[test]
    fn test_read_loom_fixture() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fixture.loom");
        write_fixture(&path, false);

        let store = LoomStore::open(&path).unwrap();
        assert_eq!(store.shape(), (2, 4));
        assert_eq!(store.row_attribute_keys(), vec!["Entrez_ID", "Symbol"]);
        assert_eq!(store.column_attribute_keys(), vec!["Batch", "X"]);
        assert_eq!(
            store.column_attribute("Batch").unwrap(),
            AttributeValues::from(vec!["café", "B", "café", "B"])
        );
        assert!(store.row_attribute("Entrez_ID").unwrap().is_numeric());
        assert_eq!(store.row_index_where("Entrez_ID", "14433").unwrap(), Some(1));
        assert_eq!(store.matrix_row(1).unwrap(), vec![4.0, 5.0, 6.0, 7.0]);
        assert_eq!(
            store.file_attribute("Classes").unwrap().as_deref(),
            Some("Batch,Cluster")
        );
    }

    #[test]
    fn test_global_attrs_group() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fixture.loom");
        write_fixture(&path, true);

        let store = LoomStore::open(&path).unwrap();
        assert_eq!(
            store.file_attribute("Classes").unwrap().as_deref(),
            Some("Batch,Cluster")
        );
        assert_eq!(store.file_attribute("Missing").unwrap(), None);
    }

    #[test]
    fn test_missing_attribute_and_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fixture.loom");
        write_fixture(&path, false);

        let store = LoomStore::open(&path).unwrap();
        assert!(matches!(
            store.column_attribute("Cluster"),
            Err(LoomError::InvalidAttribute(_))
        ));
        assert!(matches!(
            store.matrix_row(5),
            Err(LoomError::IndexOutOfRange { index: 5, len: 2 })
        ));
    }
}
