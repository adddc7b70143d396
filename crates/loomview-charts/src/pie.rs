use std::collections::BTreeMap;

use log::debug;
use loomview_core::{AttributeValues, Label, LoomError, Result, Table};

use crate::config::ChartConfig;
use crate::counts::{ensure_attribute_count, label_counts, pair_counts, sort_by_count_desc};
use crate::figure::{Figure, Pie, Sunburst};

/// Pie-like chart of one or two table columns.
///
/// One column renders a hollow pie with slices sorted by count, largest
/// first. Two columns render a sunburst: the first column is the inner
/// ring, the second the outer ring, leaves colored by the second column.
pub fn pie_figure(table: &Table, config: &ChartConfig) -> Result<Figure> {
    ensure_attribute_count(table.n_columns())?;
    let (_, first) = table.column_at(0).ok_or(LoomError::EmptyAttributes)?;
    match table.column_at(1) {
        None => Ok(single_pie(first, config)),
        Some((_, second)) => sunburst(first, second, config),
    }
}

fn single_pie(values: &AttributeValues, config: &ChartConfig) -> Figure {
    let (labels, counts): (Vec<Label>, Vec<usize>) =
        sort_by_count_desc(label_counts(values)).into_iter().unzip();
    debug!("pie chart with {} slices", labels.len());
    Figure::new().with_trace(Pie::new(labels, counts, config.pie_hole))
}

fn sunburst(
    outer: &AttributeValues,
    inner: &AttributeValues,
    config: &ChartConfig,
) -> Result<Figure> {
    let pairs = pair_counts(outer, inner)?;

    let inner_index: BTreeMap<Label, usize> = inner
        .unique()
        .into_iter()
        .enumerate()
        .map(|(i, label)| (label, i))
        .collect();

    // pairs are ordered by outer label, so each parent's children are contiguous
    let mut groups: Vec<(Label, Vec<(Label, usize)>)> = Vec::new();
    for ((parent, child), count) in pairs {
        if let Some((last, children)) = groups.last_mut() {
            if *last == parent {
                children.push((child, count));
                continue;
            }
        }
        groups.push((parent, vec![(child, count)]));
    }

    // ids are positional: labels may be empty or contain the separator
    let mut trace = Sunburst::new();
    for (i, (parent, children)) in groups.iter().enumerate() {
        let parent_id = i.to_string();
        let total: usize = children.iter().map(|(_, c)| c).sum();
        let parent_color = match children.as_slice() {
            [(only, _)] => config.category_color(inner_index[only]),
            _ => config.mixed_color.as_str(),
        };
        trace.push_node(parent_id.clone(), parent.to_string(), "", total, parent_color);
        for (child, count) in children {
            let j = inner_index[child];
            trace.push_node(
                format!("{}/{}", parent_id, j),
                child.to_string(),
                parent_id.clone(),
                *count,
                config.category_color(j),
            );
        }
    }
    debug!(
        "sunburst chart with {} parents and {} leaves",
        groups.len(),
        trace.ids.len() - groups.len()
    );
    Ok(Figure::new().with_trace(trace))
}
