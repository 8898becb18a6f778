// Plot types module

pub mod annotation;
pub mod baseline;
pub mod candlestick;
pub mod heikin_ashi;
pub mod renko;

pub use baseline::BaselineMapper;
pub use candlestick::CandlestickMapper;
pub use heikin_ashi::HeikinAshiMapper;
pub use renko::RenkoMapper;

use crate::data_types::PriceSeries;
use crate::error::ChartError;
use crate::surface::Rect;
use crate::theme::ChartTheme;
use crate::transform::Projection;
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Screen-space primitive produced by a [`ShapeMapper`].
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    /// Wick from `wick.0` to `wick.1` at `center_x`, body filled in `body`.
    Candle {
        center_x: f64,
        wick: (f64, f64),
        body: Rect,
        bearish: bool,
    },
    Brick {
        rect: Rect,
        bearish: bool,
    },
    Polyline {
        points: Vec<DVec2>,
        color: String,
        width: f32,
        dash: Vec<f32>,
    },
}

/// Turns a series into drawable shapes under a projection.
///
/// This is the only thing that differs between chart variants; transform,
/// interaction and annotations are shared.
pub trait ShapeMapper: Send + Sync {
    fn shapes(&self, series: &PriceSeries, projection: &Projection, theme: &ChartTheme) -> Vec<Shape>;
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartVariant {
    #[default]
    Candlestick,
    HeikinAshi,
    /// Close line split into above/below `base` (first close when absent).
    Baseline {
        #[serde(default)]
        base: Option<f64>,
    },
    Renko {
        brick_size: f64,
    },
}

impl ChartVariant {
    /// Checks variant parameters that depend on the series being drawn.
    pub fn check(&self, series: &PriceSeries) -> Result<(), ChartError> {
        match self {
            ChartVariant::Renko { brick_size } => renko::check_brick_size(series, *brick_size),
            _ => Ok(()),
        }
    }

    pub fn mapper(&self) -> Box<dyn ShapeMapper> {
        match self {
            ChartVariant::Candlestick => Box::new(CandlestickMapper),
            ChartVariant::HeikinAshi => Box::new(HeikinAshiMapper),
            ChartVariant::Baseline { base } => Box::new(BaselineMapper { base: *base }),
            ChartVariant::Renko { brick_size } => Box::new(RenkoMapper {
                brick_size: *brick_size,
            }),
        }
    }
}

/// Candle geometry for one OHLC tuple at data index `index`.
pub(crate) fn candle_shape(projection: &Projection, index: f64, o: f64, h: f64, l: f64, c: f64) -> Shape {
    let x = projection.x_data_to_screen(index);
    let width = projection.item_width;
    let y_o = projection.y_data_to_screen(o);
    let y_c = projection.y_data_to_screen(c);
    let mut body = Rect::from_corners(DVec2::new(x, y_o), DVec2::new(x + width, y_c));
    // keep flat candles visible
    if body.height < 1.0 {
        body.y -= (1.0 - body.height) / 2.0;
        body.height = 1.0;
    }
    Shape::Candle {
        center_x: x + width / 2.0,
        wick: (projection.y_data_to_screen(h), projection.y_data_to_screen(l)),
        body,
        bearish: o > c,
    }
}
