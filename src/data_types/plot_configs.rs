use serde::{Deserialize, Serialize};
use std::path::Path;

use eyre::WrapErr;

use super::annotations::StyleOverrides;
use crate::error::ChartError;
use crate::plot_types::ChartVariant;
use crate::theme::ChartTheme;

/// Surface size and fixed spacing of the plot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
    pub candle_width: f64,
    pub candle_spacing: f64,
    /// Divisions of the background grid in each direction.
    pub grid_lines: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 400.0,
            padding: 20.0,
            candle_width: 10.0,
            candle_spacing: 5.0,
            grid_lines: 5,
        }
    }
}

impl LayoutConfig {
    pub fn plot_width(&self) -> f64 {
        (self.width - 2.0 * self.padding).max(0.0)
    }

    pub fn plot_height(&self) -> f64 {
        (self.height - 2.0 * self.padding).max(0.0)
    }

    /// Horizontal distance between consecutive candles at unit scale.
    pub fn pitch(&self) -> f64 {
        self.candle_width + self.candle_spacing
    }
}

/// Which axis a wheel step rescales.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoomAxis {
    #[default]
    Price,
    Time,
    Both,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    pub factor: f64,
    pub min_scale: f64,
    pub max_scale: f64,
    pub axis: ZoomAxis,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            factor: 1.1,
            min_scale: 0.5,
            max_scale: 2.0,
            axis: ZoomAxis::Price,
        }
    }
}

pub const DEFAULT_STORAGE_KEY: &str = "chartLines";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub layout: LayoutConfig,
    pub zoom: ZoomConfig,
    pub theme: ChartTheme,
    pub variant: ChartVariant,
    /// Pixel radius used when picking annotations.
    pub hit_threshold: f64,
    pub storage_key: String,
    /// Applied on top of the built-in line style at construction.
    pub default_style: StyleOverrides,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            zoom: ZoomConfig::default(),
            theme: ChartTheme::default(),
            variant: ChartVariant::default(),
            hit_threshold: 5.0,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            default_style: StyleOverrides::default(),
        }
    }
}

impl ChartConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ChartError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> eyre::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("reading chart config {}", path.display()))?;
        Self::from_json_str(&raw).wrap_err_with(|| format!("parsing chart config {}", path.display()))
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.layout.width = width;
        self.layout.height = height;
        self
    }

    /// Checks the values that would make the projection degenerate.
    pub fn validate(&self) -> Result<(), ChartError> {
        let l = &self.layout;
        if !(l.width.is_finite() && l.height.is_finite()) || l.width <= 0.0 || l.height <= 0.0 {
            return Err(ChartError::Initialization(format!(
                "drawing surface unavailable ({}x{})",
                l.width, l.height
            )));
        }
        if l.plot_height() <= 0.0 || l.plot_width() <= 0.0 {
            return Err(ChartError::Initialization(format!(
                "padding {} leaves no plot area on a {}x{} surface",
                l.padding, l.width, l.height
            )));
        }
        if l.pitch() <= 0.0 {
            return Err(ChartError::Initialization("candle pitch must be positive".into()));
        }
        let z = &self.zoom;
        if !(z.factor > 1.0 && z.min_scale > 0.0 && z.min_scale <= z.max_scale) {
            return Err(ChartError::Initialization(format!(
                "zoom factor {} / bounds [{}, {}] are invalid",
                z.factor, z.min_scale, z.max_scale
            )));
        }
        if let ChartVariant::Renko { brick_size } = self.variant {
            if !(brick_size > 0.0 && brick_size.is_finite()) {
                return Err(ChartError::Initialization(format!(
                    "renko brick size must be positive, got {brick_size}"
                )));
            }
        }
        Ok(())
    }
}
