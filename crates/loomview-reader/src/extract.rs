use loomview_charts::counts::ensure_attribute_count;
use loomview_charts::ChartConfig;
use loomview_core::{LoomError, Result, Table};
use loomview_store::MatrixStore;

use crate::resolve::ensure_attribute_list;

/// Row-aligned table of one or two column attributes, for categorical
/// charts. Keys are checked before any attribute is read.
pub fn build_table<S: AsRef<str>>(store: &dyn MatrixStore, attrs: &[S]) -> Result<Table> {
    ensure_attribute_count(attrs.len())?;
    project(store, attrs)
}

/// Table holding the numeric embedding coordinates.
pub fn build_coordinates(store: &dyn MatrixStore, config: &ChartConfig) -> Result<Table> {
    let keys = [config.x_key.as_str(), config.y_key.as_str()];
    let table = project(store, &keys)?;
    let non_numeric: Vec<String> = keys
        .iter()
        .filter(|key| table.column(key).is_some_and(|c| !c.is_numeric()))
        .map(|key| key.to_string())
        .collect();
    if !non_numeric.is_empty() {
        return Err(LoomError::InvalidAttribute(non_numeric));
    }
    Ok(table)
}

fn project<S: AsRef<str>>(store: &dyn MatrixStore, attrs: &[S]) -> Result<Table> {
    ensure_attribute_list(store, attrs)?;
    let mut table = Table::new();
    for attr in attrs {
        let key = attr.as_ref();
        table.push_column(key, store.column_attribute(key)?)?;
    }
    Ok(table)
}
