//! Chart builders for categorical and embedding views of a single-cell
//! store. Builders are pure: they take a [`Table`](loomview_core::Table)
//! and return a [`Figure`] in plotly's trace/layout schema.

pub mod bar;
pub mod config;
pub mod counts;
pub mod figure;
pub mod pie;
pub mod scatter;
pub mod serialize;

pub use bar::bar_figure;
pub use config::ChartConfig;
pub use figure::*;
pub use pie::pie_figure;
pub use scatter::{scatter_figure, ColorMode};
pub use serialize::{dict_to_json, to_json, to_json_string};
