//! Entry points over a store path: chart JSON for pie, bar and scatter
//! views, plus raw attribute and metadata probes.
//!
//! Every call opens the store, reads what it needs, and releases the
//! connection before returning.

pub mod component;
pub mod extract;
pub mod probe;
pub mod resolve;
pub mod scatter;

pub use component::{
    component_figure, component_figure_with_config, json_component, json_component_with_config,
};
pub use extract::{build_coordinates, build_table};
pub use probe::{
    extract_attr_keys, extract_attrs, get_ca, get_ca_unique, get_classes,
    get_classes_with_config, get_ra, get_ra_unique, get_shape, AttrKeys, StoreAttributes,
};
pub use resolve::{resolve_color, validate_attribute_list, ResolvedColor};
pub use scatter::{
    json_scatter, json_scatter_with_config, scatter_figure, scatter_figure_with_config,
};

pub use loomview_charts::ChartConfig;
pub use loomview_core::{AttributeValues, Label, LoomError, Result};
