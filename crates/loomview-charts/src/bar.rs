use log::debug;
use loomview_core::{AttributeValues, Label, LoomError, Result, Table};

use crate::config::ChartConfig;
use crate::counts::{ensure_attribute_count, label_counts, pair_counts};
use crate::figure::{Axis, Bar, Figure, Layout, Legend, Title};

/// Bar chart of one or two table columns.
///
/// One column: labels in ascending order on x, counts on y. Unlike the pie
/// chart the bars are not reordered by count.
///
/// Two columns: the first column on x, one stacked trace per value of the
/// second column.
pub fn bar_figure(table: &Table, config: &ChartConfig) -> Result<Figure> {
    ensure_attribute_count(table.n_columns())?;
    let (first_name, first) = table.column_at(0).ok_or(LoomError::EmptyAttributes)?;
    match table.column_at(1) {
        None => Ok(single_bar(first)),
        Some((second_name, second)) => stacked_bar(first_name, first, second_name, second, config),
    }
}

fn single_bar(values: &AttributeValues) -> Figure {
    let (labels, counts): (Vec<Label>, Vec<usize>) = label_counts(values).into_iter().unzip();
    debug!("bar chart with {} bars", labels.len());
    Figure::new().with_trace(Bar::new(labels, counts))
}

fn stacked_bar(
    x_name: &str,
    x_values: &AttributeValues,
    color_name: &str,
    color_values: &AttributeValues,
    config: &ChartConfig,
) -> Result<Figure> {
    let pairs = pair_counts(x_values, color_values)?;

    let mut figure = Figure::new().with_layout(Layout {
        barmode: Some("relative".to_string()),
        xaxis: Some(Axis::titled(x_name)),
        yaxis: Some(Axis::titled("count")),
        legend: Some(Legend {
            title: Title {
                text: color_name.to_string(),
            },
        }),
    });

    for (i, segment) in color_values.unique().into_iter().enumerate() {
        let (x, y): (Vec<Label>, Vec<usize>) = pairs
            .iter()
            .filter(|((_, inner), _)| *inner == segment)
            .map(|((outer, _), count)| (outer.clone(), *count))
            .unzip();
        figure.add_trace(
            Bar::new(x, y)
                .named(segment.to_string())
                .colored(config.category_color(i)),
        );
    }
    debug!("stacked bar chart with {} segments", figure.data.len());
    Ok(figure)
}
