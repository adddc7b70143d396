use std::path::Path;

use log::{debug, warn};
use loomview_charts::{to_json, ChartConfig, Figure};
use loomview_core::Result;
use loomview_store::with_store;
use serde_json::Value;

use crate::extract::build_coordinates;
use crate::resolve::resolve_color;

/// Embedding scatter plot, optionally colored by a gene symbol or a
/// column attribute.
pub fn scatter_figure(path: impl AsRef<Path>, color: Option<&str>) -> Result<Figure> {
    scatter_figure_with_config(path, color, &ChartConfig::default())
}

pub fn scatter_figure_with_config(
    path: impl AsRef<Path>,
    color: Option<&str>,
    config: &ChartConfig,
) -> Result<Figure> {
    let path = path.as_ref();
    with_store(path, |store| {
        let table = build_coordinates(store, config)?;
        let resolved = resolve_color(store, color, config)?;
        debug!("scatter of {} samples colored by {:?}", table.n_rows(), color);
        loomview_charts::scatter_figure(&table, resolved.values(), config)
    })
    .inspect_err(|e| warn!("scatter chart for {} rejected: {}", path.display(), e))
}

/// Serialized scatter chart. Unlike [`json_component`](crate::json_component)
/// the chart is returned bare; callers attach the `scatter` style themselves.
pub fn json_scatter(path: impl AsRef<Path>, color: Option<&str>) -> Result<Value> {
    json_scatter_with_config(path, color, &ChartConfig::default())
}

pub fn json_scatter_with_config(
    path: impl AsRef<Path>,
    color: Option<&str>,
    config: &ChartConfig,
) -> Result<Value> {
    to_json(&scatter_figure_with_config(path, color, config)?)
}
