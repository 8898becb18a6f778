use serde::{Deserialize, Serialize};

/// Colors are CSS-style hex strings so the theme can round-trip through JSON
/// and be handed to any drawing surface unchanged.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartTheme {
    pub background: String,
    pub grid_line: String,
    pub axis_line: String,
    pub axis_label: String,
    pub axis_label_size: f32,
    pub bull_color: String,
    pub bear_color: String,
    pub wick_color: String,
    pub baseline_color: String,
    pub annotation_label_size: f32,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            background: "#ffffff".into(),
            grid_line: "#eeeeee".into(),
            axis_line: "#666666".into(),
            axis_label: "#666666".into(),
            axis_label_size: 11.0,
            bull_color: "#008000".into(),
            bear_color: "#ff0000".into(),
            wick_color: "#000000".into(),
            baseline_color: "#999999".into(),
            annotation_label_size: 12.0,
        }
    }
}
