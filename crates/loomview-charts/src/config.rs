/// Plotly's default qualitative sequence.
pub const PLOTLY_PALETTE: [&str; 10] = [
    "#636efa", "#EF553B", "#00cc96", "#ab63fa", "#FFA15A", "#19d3f3", "#FF6692", "#B6E880",
    "#FF97FF", "#FECB52",
];

/// Rendering and lookup settings shared by every chart entry point.
#[derive(Debug, Clone)]
pub struct ChartConfig {
    /// Fraction of the pie radius cut out of the center (0-1).
    pub pie_hole: f64,
    /// Named plotly colorscale for continuous scatter coloring.
    pub colorscale: String,
    /// Marker border width in px for continuous scatter.
    pub marker_line_width: f64,
    /// Column attribute holding the embedding x coordinate.
    pub x_key: String,
    /// Column attribute holding the embedding y coordinate.
    pub y_key: String,
    /// Row attribute holding gene symbols.
    pub symbol_key: String,
    /// File attribute listing the declared classes, comma separated.
    pub classes_attribute: String,
    /// Colors cycled over categories in sunburst and stacked bar charts.
    pub palette: Vec<String>,
    /// Sunburst parent color when its children span several categories.
    pub mixed_color: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            pie_hole: 0.7,
            colorscale: "magma".to_string(),
            marker_line_width: 1.0,
            x_key: "X".to_string(),
            y_key: "Y".to_string(),
            symbol_key: "Symbol".to_string(),
            classes_attribute: "Classes".to_string(),
            palette: PLOTLY_PALETTE.iter().map(|c| c.to_string()).collect(),
            mixed_color: "lightgrey".to_string(),
        }
    }
}

impl ChartConfig {
    /// Palette entry for the `index`-th category, cycling.
    pub fn category_color(&self, index: usize) -> &str {
        if self.palette.is_empty() {
            return &self.mixed_color;
        }
        &self.palette[index % self.palette.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_color_cycles() {
        let config = ChartConfig::default();
        assert_eq!(config.category_color(0), "#636efa");
        assert_eq!(config.category_color(10), "#636efa");
        assert_eq!(config.category_color(11), "#EF553B");
    }

    #[test]
    fn test_empty_palette_falls_back() {
        let config = ChartConfig {
            palette: Vec::new(),
            ..ChartConfig::default()
        };
        assert_eq!(config.category_color(3), "lightgrey");
    }
}
