use std::collections::BTreeMap;
use std::path::Path;

use loomview_charts::ChartConfig;
use loomview_core::{AttributeValues, Label, LoomError, Result};
use loomview_store::{with_store, MatrixStore};
use serde::Serialize;

/// Gene identifier row attributes carried by [`extract_attrs`].
pub const GENE_ID_KEYS: [&str; 3] = ["Entrez_ID", "Ensembl_ID", "Symbol"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttrKeys {
    pub col_attr_keys: Vec<String>,
    pub row_attr_keys: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreAttributes {
    pub col_attrs: BTreeMap<String, AttributeValues>,
    pub row_attrs: BTreeMap<String, Option<AttributeValues>>,
}

/// `(rows, cols)` of the expression matrix.
pub fn get_shape(path: impl AsRef<Path>) -> Result<(usize, usize)> {
    with_store(path, |store| Ok(store.shape()))
}

pub fn get_ra(path: impl AsRef<Path>, key: &str) -> Result<AttributeValues> {
    with_store(path, |store| store.row_attribute(key))
}

pub fn get_ca(path: impl AsRef<Path>, key: &str) -> Result<AttributeValues> {
    with_store(path, |store| store.column_attribute(key))
}

/// Ascending unique values of a row attribute.
pub fn get_ra_unique(path: impl AsRef<Path>, key: &str) -> Result<Vec<Label>> {
    get_ra(path, key).map(|values| values.unique())
}

/// Ascending unique values of a column attribute.
pub fn get_ca_unique(path: impl AsRef<Path>, key: &str) -> Result<Vec<Label>> {
    get_ca(path, key).map(|values| values.unique())
}

/// Class labels declared by the store, in declaration order.
pub fn get_classes(path: impl AsRef<Path>) -> Result<Vec<String>> {
    get_classes_with_config(path, &ChartConfig::default())
}

pub fn get_classes_with_config(path: impl AsRef<Path>, config: &ChartConfig) -> Result<Vec<String>> {
    with_store(path, |store| read_classes(store, &config.classes_attribute))
}

fn read_classes(store: &dyn MatrixStore, name: &str) -> Result<Vec<String>> {
    let raw = store
        .file_attribute(name)?
        .ok_or_else(|| LoomError::InvalidAttribute(vec![name.to_string()]))?;
    Ok(split_classes(&raw))
}

fn split_classes(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|class| !class.is_empty())
        .map(String::from)
        .collect()
}

pub fn extract_attr_keys(path: impl AsRef<Path>) -> Result<AttrKeys> {
    with_store(path, |store| {
        Ok(AttrKeys {
            col_attr_keys: store.column_attribute_keys(),
            row_attr_keys: store.row_attribute_keys(),
        })
    })
}

/// Every column attribute plus the gene identifier row attributes.
pub fn extract_attrs(path: impl AsRef<Path>) -> Result<StoreAttributes> {
    with_store(path, read_attrs)
}

fn read_attrs(store: &dyn MatrixStore) -> Result<StoreAttributes> {
    let col_attrs = store
        .column_attribute_keys()
        .into_iter()
        .map(|key| {
            let values = store.column_attribute(&key)?;
            Ok((key, values))
        })
        .collect::<Result<BTreeMap<_, _>>>()?;

    let mut row_attrs = BTreeMap::new();
    for key in GENE_ID_KEYS {
        let values = if store.has_row_attribute(key) {
            Some(store.row_attribute(key)?)
        } else {
            None
        };
        row_attrs.insert(key.to_string(), values);
    }

    Ok(StoreAttributes {
        col_attrs,
        row_attrs,
    })
}
