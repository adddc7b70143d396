use loomview_core::Label;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Chart family requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    Pie,
    Bar,
    Scatter,
}

impl Style {
    pub fn as_str(&self) -> &'static str {
        match self {
            Style::Pie => "pie",
            Style::Bar => "bar",
            Style::Scatter => "scatter",
        }
    }

    /// Styles served by the categorical (pie/bar) entry point.
    pub fn is_categorical(&self) -> bool {
        matches!(self, Style::Pie | Style::Bar)
    }
}

impl std::fmt::Display for Style {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Style {
    type Err = loomview_core::LoomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pie" => Ok(Style::Pie),
            "bar" => Ok(Style::Bar),
            "scatter" => Ok(Style::Scatter),
            other => Err(loomview_core::LoomError::UnsupportedStyle(other.to_string())),
        }
    }
}

/// An in-memory chart: traces plus layout, in plotly's schema.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

impl Figure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_trace(mut self, trace: impl Into<Trace>) -> Self {
        self.data.push(trace.into());
        self
    }

    pub fn add_trace(&mut self, trace: impl Into<Trace>) {
        self.data.push(trace.into());
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Pie(Pie),
    Sunburst(Sunburst),
    Bar(Bar),
    Scattergl(Scattergl),
}

impl From<Pie> for Trace {
    fn from(t: Pie) -> Self {
        Trace::Pie(t)
    }
}

impl From<Sunburst> for Trace {
    fn from(t: Sunburst) -> Self {
        Trace::Sunburst(t)
    }
}

impl From<Bar> for Trace {
    fn from(t: Bar) -> Self {
        Trace::Bar(t)
    }
}

impl From<Scattergl> for Trace {
    fn from(t: Scattergl) -> Self {
        Trace::Scattergl(t)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Pie {
    pub labels: Vec<Label>,
    pub values: Vec<usize>,
    pub hole: f64,
    pub textposition: String,
    pub textinfo: String,
    pub uid: Uuid,
}

impl Pie {
    pub fn new(labels: Vec<Label>, values: Vec<usize>, hole: f64) -> Self {
        Self {
            labels,
            values,
            hole,
            textposition: "inside".to_string(),
            textinfo: "percent".to_string(),
            uid: Uuid::new_v4(),
        }
    }
}

/// Two-level sunburst. Parents have an empty `parents` entry.
#[derive(Debug, Clone, Serialize)]
pub struct Sunburst {
    pub ids: Vec<String>,
    pub labels: Vec<String>,
    pub parents: Vec<String>,
    pub values: Vec<usize>,
    pub branchvalues: String,
    pub textinfo: String,
    pub marker: SunburstMarker,
    pub uid: Uuid,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SunburstMarker {
    pub colors: Vec<String>,
}

impl Sunburst {
    pub fn new() -> Self {
        Self {
            ids: Vec::new(),
            labels: Vec::new(),
            parents: Vec::new(),
            values: Vec::new(),
            branchvalues: "total".to_string(),
            textinfo: "label+percent parent".to_string(),
            marker: SunburstMarker::default(),
            uid: Uuid::new_v4(),
        }
    }

    pub fn push_node(
        &mut self,
        id: impl Into<String>,
        label: impl Into<String>,
        parent: impl Into<String>,
        value: usize,
        color: impl Into<String>,
    ) {
        self.ids.push(id.into());
        self.labels.push(label.into());
        self.parents.push(parent.into());
        self.values.push(value);
        self.marker.colors.push(color.into());
    }

    /// Nodes that are not the parent of any other node.
    pub fn leaf_values(&self) -> Vec<usize> {
        self.ids
            .iter()
            .zip(&self.values)
            .filter(|(id, _)| !self.parents.iter().any(|p| p == *id))
            .map(|(_, &v)| v)
            .collect()
    }
}

impl Default for Sunburst {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Bar {
    pub x: Vec<Label>,
    pub y: Vec<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<BarMarker>,
    pub uid: Uuid,
}

#[derive(Debug, Clone, Serialize)]
pub struct BarMarker {
    pub color: String,
}

impl Bar {
    pub fn new(x: Vec<Label>, y: Vec<usize>) -> Self {
        Self {
            x,
            y,
            name: None,
            marker: None,
            uid: Uuid::new_v4(),
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn colored(mut self, color: impl Into<String>) -> Self {
        self.marker = Some(BarMarker {
            color: color.into(),
        });
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Scattergl {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub mode: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<ScatterMarker>,
    pub uid: Uuid,
}

/// Continuous marker coloring.
#[derive(Debug, Clone, Serialize)]
pub struct ScatterMarker {
    pub color: Vec<f64>,
    pub colorscale: String,
    pub showscale: bool,
    pub line: MarkerLine,
}

#[derive(Debug, Clone, Serialize)]
pub struct MarkerLine {
    pub width: f64,
}

impl Scattergl {
    pub fn markers(x: Vec<f64>, y: Vec<f64>) -> Self {
        Self {
            x,
            y,
            mode: "markers".to_string(),
            name: None,
            marker: None,
            uid: Uuid::new_v4(),
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_marker(mut self, marker: ScatterMarker) -> Self {
        self.marker = Some(marker);
        self
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Layout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barmode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<Legend>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Axis {
    pub title: Title,
}

impl Axis {
    pub fn titled(text: impl Into<String>) -> Self {
        Self {
            title: Title { text: text.into() },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Legend {
    pub title: Title,
}

#[derive(Debug, Clone, Serialize)]
pub struct Title {
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_parse() {
        assert_eq!("pie".parse::<Style>().unwrap(), Style::Pie);
        assert_eq!("scatter".parse::<Style>().unwrap(), Style::Scatter);
        assert!("line".parse::<Style>().is_err());
        assert!(!Style::Scatter.is_categorical());
    }

    #[test]
    fn test_traces_get_distinct_uids() {
        let a = Pie::new(vec![Label::from("A")], vec![1], 0.7);
        let b = Pie::new(vec![Label::from("A")], vec![1], 0.7);
        assert_ne!(a.uid, b.uid);
    }

    #[test]
    fn test_trace_type_tag() {
        let trace = Trace::from(Scattergl::markers(vec![1.0], vec![2.0]));
        let value = serde_json::to_value(&trace).unwrap();
        assert_eq!(value["type"], "scattergl");
        assert_eq!(value["mode"], "markers");
        assert!(value.get("name").is_none());
    }

    #[test]
    fn test_sunburst_leaves() {
        let mut sb = Sunburst::new();
        sb.push_node("A", "A", "", 3, "grey");
        sb.push_node("A/x", "x", "A", 1, "red");
        sb.push_node("A/y", "y", "A", 2, "blue");
        assert_eq!(sb.leaf_values(), vec![1, 2]);
    }
}
