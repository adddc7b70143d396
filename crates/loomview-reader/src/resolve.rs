use loomview_charts::ChartConfig;
use loomview_core::{AttributeValues, LoomError, Result};
use loomview_store::MatrixStore;

/// Outcome of resolving a scatter color request.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedColor {
    /// No color requested.
    None,
    /// Expression of a gene across all samples.
    Expression {
        symbol: String,
        values: AttributeValues,
    },
    /// A column attribute, numeric or categorical.
    Attribute {
        key: String,
        values: AttributeValues,
    },
}

impl ResolvedColor {
    pub fn values(&self) -> Option<&AttributeValues> {
        match self {
            ResolvedColor::None => None,
            ResolvedColor::Expression { values, .. } | ResolvedColor::Attribute { values, .. } => {
                Some(values)
            }
        }
    }
}

/// True iff every entry of `attrs` is a column attribute key.
pub fn validate_attribute_list<S: AsRef<str>>(store: &dyn MatrixStore, attrs: &[S]) -> bool {
    attrs
        .iter()
        .all(|attr| store.has_column_attribute(attr.as_ref()))
}

/// Fail with every key of `attrs` that is not a column attribute.
pub fn ensure_attribute_list<S: AsRef<str>>(store: &dyn MatrixStore, attrs: &[S]) -> Result<()> {
    let invalid: Vec<String> = attrs
        .iter()
        .map(|attr| attr.as_ref())
        .filter(|attr| !store.has_column_attribute(attr))
        .map(String::from)
        .collect();
    if invalid.is_empty() {
        Ok(())
    } else {
        Err(LoomError::InvalidAttribute(invalid))
    }
}

/// Expression row of `symbol`, or `None` if no gene carries that symbol.
/// A store without a symbol attribute has no genes to match.
pub fn lookup_symbol(
    store: &dyn MatrixStore,
    symbol: &str,
    config: &ChartConfig,
) -> Result<Option<Vec<f64>>> {
    if !store.has_row_attribute(&config.symbol_key) {
        return Ok(None);
    }
    match store.row_index_where(&config.symbol_key, symbol)? {
        Some(index) => store.matrix_row(index).map(Some),
        None => Ok(None),
    }
}

pub fn resolve_symbol(
    store: &dyn MatrixStore,
    symbol: &str,
    config: &ChartConfig,
) -> Result<Vec<f64>> {
    lookup_symbol(store, symbol, config)?.ok_or_else(|| LoomError::InvalidSymbol(symbol.to_string()))
}

/// Resolve a color request: gene symbols take precedence over column
/// attribute keys.
pub fn resolve_color(
    store: &dyn MatrixStore,
    color: Option<&str>,
    config: &ChartConfig,
) -> Result<ResolvedColor> {
    let Some(color) = color else {
        return Ok(ResolvedColor::None);
    };
    if let Some(row) = lookup_symbol(store, color, config)? {
        return Ok(ResolvedColor::Expression {
            symbol: color.to_string(),
            values: AttributeValues::Numeric(row),
        });
    }
    if store.has_column_attribute(color) {
        return Ok(ResolvedColor::Attribute {
            key: color.to_string(),
            values: store.column_attribute(color)?,
        });
    }
    Err(LoomError::InvalidColor {
        color: color.to_string(),
        valid: store.column_attribute_keys(),
    })
}
