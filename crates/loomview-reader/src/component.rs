use std::path::Path;

use log::{debug, warn};
use loomview_charts::counts::ensure_attribute_count;
use loomview_charts::{bar_figure, pie_figure, to_json, ChartConfig, Figure, Style};
use loomview_core::{LoomError, Result};
use loomview_store::with_store;
use serde_json::{json, Value};

use crate::extract::build_table;

fn categorical_style(style: &str) -> Result<Style> {
    match style.parse::<Style>() {
        Ok(parsed) if parsed.is_categorical() => Ok(parsed),
        _ => Err(LoomError::UnsupportedStyle(style.to_string())),
    }
}

/// Pie or bar chart of one or two column attributes.
pub fn component_figure<S: AsRef<str>>(
    path: impl AsRef<Path>,
    style: &str,
    attrs: &[S],
) -> Result<Figure> {
    component_figure_with_config(path, style, attrs, &ChartConfig::default())
}

pub fn component_figure_with_config<S: AsRef<str>>(
    path: impl AsRef<Path>,
    style: &str,
    attrs: &[S],
    config: &ChartConfig,
) -> Result<Figure> {
    let path = path.as_ref();
    let result = categorical_style(style).and_then(|parsed| {
        ensure_attribute_count(attrs.len())?;
        with_store(path, |store| {
            let table = build_table(store, attrs)?;
            debug!(
                "{} chart of {:?} over {} samples",
                parsed,
                table.names(),
                table.n_rows()
            );
            match parsed {
                Style::Pie => pie_figure(&table, config),
                Style::Bar => bar_figure(&table, config),
                Style::Scatter => Err(LoomError::UnsupportedStyle(style.to_string())),
            }
        })
    });
    result.inspect_err(|e| warn!("{} chart for {} rejected: {}", style, path.display(), e))
}

/// `{"chart": <figure>, "style": <style>}` for a pie or bar chart.
pub fn json_component<S: AsRef<str>>(
    path: impl AsRef<Path>,
    style: &str,
    attrs: &[S],
) -> Result<Value> {
    json_component_with_config(path, style, attrs, &ChartConfig::default())
}

pub fn json_component_with_config<S: AsRef<str>>(
    path: impl AsRef<Path>,
    style: &str,
    attrs: &[S],
    config: &ChartConfig,
) -> Result<Value> {
    let figure = component_figure_with_config(path, style, attrs, config)?;
    Ok(json!({
        "chart": to_json(&figure)?,
        "style": style,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorical_style() {
        assert_eq!(categorical_style("pie").unwrap(), Style::Pie);
        assert_eq!(categorical_style("bar").unwrap(), Style::Bar);
        assert!(matches!(
            categorical_style("scatter"),
            Err(LoomError::UnsupportedStyle(s)) if s == "scatter"
        ));
        assert!(matches!(
            categorical_style("Pie"),
            Err(LoomError::UnsupportedStyle(_))
        ));
    }

    #[test]
    fn test_style_checked_before_store_is_opened() {
        let err = component_figure("/no/such/store.json", "line", &["Batch"]).unwrap_err();
        assert!(matches!(err, LoomError::UnsupportedStyle(_)));

        let err = component_figure::<&str>("/no/such/store.json", "pie", &[]).unwrap_err();
        assert!(matches!(err, LoomError::EmptyAttributes));

        let err = component_figure("/no/such/store.json", "pie", &["Batch"]).unwrap_err();
        assert!(matches!(err, LoomError::NotFound(_)));
    }
}
