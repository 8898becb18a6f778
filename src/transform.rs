//! Per-draw projection between data space and screen space.

use crate::data_types::LayoutConfig;
use crate::scales::ChartScale;
use crate::view_transform::ViewTransform;
use glam::DVec2;

/// Snapshot of the data ↔ screen mapping for one frame.
///
/// Built from the live [`ViewTransform`], the layout, and the price range of
/// the series. Data space is `(series index, price)`; screen space is pixels
/// from the surface's top-left corner.
#[derive(Clone, Debug, PartialEq)]
pub struct Projection {
    pub x_scale: ChartScale,
    pub y_scale: ChartScale,
    /// Rendered width of one candle at the current horizontal scale.
    pub item_width: f64,
    /// Plot rectangle as `(left, top, right, bottom)`.
    pub plot: (f64, f64, f64, f64),
}

impl Projection {
    pub fn new(layout: &LayoutConfig, view: &ViewTransform, price_range: (f64, f64)) -> Self {
        let pad = layout.padding;
        let left = pad + view.offset_x();
        let pitch = layout.pitch() * view.scale_x();
        let x_scale = ChartScale::new_linear((0.0, 1.0), (left, left + pitch));

        // (plotHeight / priceRange) * scaleY pixels per price unit, hanging from the top padding
        let bottom = pad + layout.plot_height() * view.scale_y();
        let y_scale = ChartScale::new_linear(price_range, (bottom, pad));

        Self {
            x_scale,
            y_scale,
            item_width: layout.candle_width * view.scale_x(),
            plot: (pad, pad, layout.width - pad, layout.height - pad),
        }
    }

    pub fn data_to_screen(&self, point: DVec2) -> DVec2 {
        DVec2::new(self.x_scale.map(point.x), self.y_scale.map(point.y))
    }

    pub fn screen_to_data(&self, point: DVec2) -> DVec2 {
        DVec2::new(self.x_scale.invert(point.x), self.y_scale.invert(point.y))
    }

    pub fn x_data_to_screen(&self, index: f64) -> f64 {
        self.x_scale.map(index)
    }

    pub fn y_data_to_screen(&self, price: f64) -> f64 {
        self.y_scale.map(price)
    }

    /// Horizontal distance between consecutive indices on screen.
    pub fn pitch(&self) -> f64 {
        self.x_scale.slope()
    }

    /// Pixels per price unit (positive).
    pub fn price_scale(&self) -> f64 {
        -self.y_scale.slope()
    }

    /// Indices whose candles intersect the plot horizontally.
    pub fn visible_indices(&self, total: usize) -> std::ops::Range<usize> {
        crate::geometry::visible_index_range(
            total,
            self.x_data_to_screen(0.0),
            self.pitch(),
            self.item_width,
            self.plot.0,
            self.plot.2,
        )
    }
}

/// The per-chart inputs of a [`Projection`] that do not change with zoom/pan.
#[derive(Clone, Copy, Debug)]
pub struct PlotFrame<'a> {
    pub layout: &'a LayoutConfig,
    pub price_range: (f64, f64),
}

impl PlotFrame<'_> {
    pub fn project(&self, view: &ViewTransform) -> Projection {
        Projection::new(self.layout, view, self.price_range)
    }
}
