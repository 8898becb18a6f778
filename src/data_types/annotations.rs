use glam::DVec2;
use serde::{Deserialize, Serialize};

pub const DEFAULT_LINE_COLOR: &str = "#1a73e8";
pub const DEFAULT_LINE_WIDTH: f32 = 2.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DashStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

impl DashStyle {
    /// On/off lengths in pixels; empty for a continuous stroke.
    pub fn pattern(&self) -> &'static [f32] {
        match self {
            DashStyle::Solid => &[],
            DashStyle::Dashed => &[5.0, 5.0],
            DashStyle::Dotted => &[2.0, 2.0],
        }
    }
}

/// Visual attributes of a line annotation.
///
/// Treated as a value: updates build a new `LineStyle` rather than mutating one
/// that may be shared with the line being drawn.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub color: String,
    pub width: f32,
    #[serde(rename = "style", default)]
    pub dash: DashStyle,
    #[serde(default)]
    pub label: String,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: DEFAULT_LINE_COLOR.to_string(),
            width: DEFAULT_LINE_WIDTH,
            dash: DashStyle::Solid,
            label: String::new(),
        }
    }
}

impl LineStyle {
    pub fn with_overrides(&self, overrides: &StyleOverrides) -> Self {
        Self {
            color: overrides.color.clone().unwrap_or_else(|| self.color.clone()),
            width: overrides.width.unwrap_or(self.width),
            dash: overrides.dash.unwrap_or(self.dash),
            label: overrides.label.clone().unwrap_or_else(|| self.label.clone()),
        }
    }
}

/// Partial style update; `None` fields keep their current value.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleOverrides {
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub width: Option<f32>,
    #[serde(rename = "style", default)]
    pub dash: Option<DashStyle>,
    #[serde(default)]
    pub label: Option<String>,
}

impl StyleOverrides {
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn dash(mut self, dash: DashStyle) -> Self {
        self.dash = Some(dash);
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.color.is_none() && self.width.is_none() && self.dash.is_none() && self.label.is_none()
    }
}

/// A user-drawn segment in (series index, price) space.
///
/// Coordinates never change with zoom or pan; only their projection does.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineAnnotation {
    pub start_x: f64,
    pub start_y: f64,
    pub end_x: f64,
    pub end_y: f64,
    #[serde(flatten)]
    pub style: LineStyle,
}

impl LineAnnotation {
    /// Zero-length line anchored at `at`.
    pub fn starting_at(at: DVec2, style: LineStyle) -> Self {
        Self {
            start_x: at.x,
            start_y: at.y,
            end_x: at.x,
            end_y: at.y,
            style,
        }
    }

    pub fn start(&self) -> DVec2 {
        DVec2::new(self.start_x, self.start_y)
    }

    pub fn end(&self) -> DVec2 {
        DVec2::new(self.end_x, self.end_y)
    }

    pub fn set_end(&mut self, end: DVec2) {
        self.end_x = end.x;
        self.end_y = end.y;
    }
}
