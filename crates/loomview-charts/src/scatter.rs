use log::debug;
use loomview_core::{AttributeValues, Label, LoomError, Result, Table};

use crate::config::ChartConfig;
use crate::figure::{Figure, MarkerLine, ScatterMarker, Scattergl};

/// How scatter markers are colored, decided from the color vector's dtype.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Uncolored,
    Continuous,
    Discrete,
}

impl ColorMode {
    pub fn of(color: Option<&AttributeValues>) -> Self {
        match color {
            None => ColorMode::Uncolored,
            Some(values) if values.is_numeric() => ColorMode::Continuous,
            Some(_) => ColorMode::Discrete,
        }
    }
}

/// Embedding scatter plot of the configured X/Y columns.
///
/// Numeric colors give one trace with a colorscale; text colors give one
/// trace per class, in ascending class order; no color gives one plain
/// trace.
pub fn scatter_figure(
    table: &Table,
    color: Option<&AttributeValues>,
    config: &ChartConfig,
) -> Result<Figure> {
    let x = coordinate(table, &config.x_key)?;
    let y = coordinate(table, &config.y_key)?;

    if let Some(values) = color {
        if values.len() != x.len() {
            return Err(LoomError::LengthMismatch {
                what: "scatter color".to_string(),
                expected: x.len(),
                found: values.len(),
            });
        }
    }

    let figure = match (ColorMode::of(color), color) {
        (ColorMode::Continuous, Some(AttributeValues::Numeric(values))) => {
            continuous_scatter(x, y, values, config)
        }
        (ColorMode::Discrete, Some(values)) => discrete_scatter(x, y, values),
        _ => Figure::new().with_trace(Scattergl::markers(x.to_vec(), y.to_vec())),
    };
    debug!(
        "scatter chart with {} points in {} traces",
        x.len(),
        figure.data.len()
    );
    Ok(figure)
}

fn coordinate<'a>(table: &'a Table, key: &str) -> Result<&'a [f64]> {
    table
        .column(key)
        .ok_or_else(|| LoomError::InvalidAttribute(vec![key.to_string()]))?
        .as_numeric()
        .ok_or_else(|| LoomError::InvalidAttribute(vec![key.to_string()]))
}

fn continuous_scatter(x: &[f64], y: &[f64], color: &[f64], config: &ChartConfig) -> Figure {
    let marker = ScatterMarker {
        color: color.to_vec(),
        colorscale: config.colorscale.clone(),
        showscale: true,
        line: MarkerLine {
            width: config.marker_line_width,
        },
    };
    Figure::new().with_trace(Scattergl::markers(x.to_vec(), y.to_vec()).with_marker(marker))
}

fn discrete_scatter(x: &[f64], y: &[f64], color: &AttributeValues) -> Figure {
    let labels: Vec<Label> = color.labels().collect();
    let mut figure = Figure::new();
    for class in color.unique() {
        let (sub_x, sub_y): (Vec<f64>, Vec<f64>) = labels
            .iter()
            .zip(x.iter().zip(y))
            .filter(|(label, _)| **label == class)
            .map(|(_, (&xi, &yi))| (xi, yi))
            .unzip();
        figure.add_trace(Scattergl::markers(sub_x, sub_y).named(class.to_string()));
    }
    figure
}
