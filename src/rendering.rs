// Rendering functions for the chart

use crate::annotation_store::AnnotationStore;
use crate::data_types::{LayoutConfig, PriceSeries};
use crate::plot_types::{Shape, ShapeMapper};
use crate::surface::{DrawingSurface, Rect, TextAnchor};
use crate::theme::ChartTheme;
use crate::transform::Projection;
use glam::DVec2;

/// Produces the draw calls for one frame: background, axes, grid, series
/// shapes, then annotations on top. Holds no interaction state.
pub struct ChartRenderer {
    mapper: Box<dyn ShapeMapper>,
}

impl ChartRenderer {
    pub fn new(mapper: Box<dyn ShapeMapper>) -> Self {
        Self { mapper }
    }

    pub fn set_mapper(&mut self, mapper: Box<dyn ShapeMapper>) {
        self.mapper = mapper;
    }

    pub fn render(
        &self,
        surface: &mut dyn DrawingSurface,
        series: &PriceSeries,
        projection: &Projection,
        layout: &LayoutConfig,
        theme: &ChartTheme,
        annotations: &AnnotationStore,
    ) {
        surface.clear(Rect::new(0.0, 0.0, layout.width, layout.height));
        paint_axes(surface, layout, theme);
        paint_grid(surface, layout, theme);
        paint_price_labels(surface, layout, projection, theme);
        paint_date_labels(surface, layout, projection, series, theme);

        for shape in self.mapper.shapes(series, projection, theme) {
            paint_shape(surface, &shape, theme);
        }

        annotations.draw(surface, projection, theme.annotation_label_size);
    }
}

/// Left and bottom axis lines at the padding.
pub fn paint_axes(surface: &mut dyn DrawingSurface, layout: &LayoutConfig, theme: &ChartTheme) {
    let pad = layout.padding;
    let (w, h) = (layout.width, layout.height);
    surface.stroke_path(
        &[DVec2::new(pad, pad), DVec2::new(pad, h - pad)],
        &theme.axis_line,
        1.0,
        &[],
    );
    surface.stroke_path(
        &[DVec2::new(pad, h - pad), DVec2::new(w - pad, h - pad)],
        &theme.axis_line,
        1.0,
        &[],
    );
}

/// Evenly spaced interior grid lines, `grid_lines` divisions per direction.
pub fn paint_grid(surface: &mut dyn DrawingSurface, layout: &LayoutConfig, theme: &ChartTheme) {
    let pad = layout.padding;
    let (w, h) = (layout.width, layout.height);
    for y in grid_positions(pad, layout.plot_height(), layout.grid_lines) {
        surface.stroke_path(&[DVec2::new(pad, y), DVec2::new(w - pad, y)], &theme.grid_line, 1.0, &[]);
    }
    for x in grid_positions(pad, layout.plot_width(), layout.grid_lines) {
        surface.stroke_path(&[DVec2::new(x, pad), DVec2::new(x, h - pad)], &theme.grid_line, 1.0, &[]);
    }
}

fn grid_positions(start: f64, extent: f64, divisions: usize) -> impl Iterator<Item = f64> {
    (1..divisions).map(move |i| start + extent * i as f64 / divisions as f64)
}

/// Gap between a price label's right edge and the y axis.
const PRICE_LABEL_GAP: f64 = 2.0;

/// Price under each horizontal grid line, right-aligned against the y axis.
fn paint_price_labels(
    surface: &mut dyn DrawingSurface,
    layout: &LayoutConfig,
    projection: &Projection,
    theme: &ChartTheme,
) {
    for y in grid_positions(layout.padding, layout.plot_height(), layout.grid_lines) {
        let price = projection.y_scale.invert(y);
        surface.fill_text(
            &projection.y_scale.format_tick(price),
            DVec2::new(layout.padding - PRICE_LABEL_GAP, y - 2.0),
            &theme.axis_label,
            theme.axis_label_size,
            TextAnchor::End,
        );
    }
}

/// Date of the candle under each vertical grid line, when the data has dates.
fn paint_date_labels(
    surface: &mut dyn DrawingSurface,
    layout: &LayoutConfig,
    projection: &Projection,
    series: &PriceSeries,
    theme: &ChartTheme,
) {
    let baseline = layout.height - layout.padding + theme.axis_label_size as f64 + 2.0;
    for x in grid_positions(layout.padding, layout.plot_width(), layout.grid_lines) {
        let index = projection.x_scale.invert(x).floor();
        if index < 0.0 {
            continue;
        }
        let Some(date) = series.get(index as usize).and_then(|p| p.date) else {
            continue;
        };
        surface.fill_text(
            &date.format("%Y-%m-%d").to_string(),
            DVec2::new(x, baseline),
            &theme.axis_label,
            theme.axis_label_size,
            TextAnchor::Start,
        );
    }
}

pub fn paint_shape(surface: &mut dyn DrawingSurface, shape: &Shape, theme: &ChartTheme) {
    match shape {
        Shape::Candle {
            center_x,
            wick,
            body,
            bearish,
        } => {
            surface.stroke_path(
                &[DVec2::new(*center_x, wick.0), DVec2::new(*center_x, wick.1)],
                &theme.wick_color,
                1.0,
                &[],
            );
            let color = if *bearish { &theme.bear_color } else { &theme.bull_color };
            surface.fill_rect(*body, color);
        }
        Shape::Brick { rect, bearish } => {
            let color = if *bearish { &theme.bear_color } else { &theme.bull_color };
            surface.fill_rect(*rect, color);
        }
        Shape::Polyline {
            points,
            color,
            width,
            dash,
        } => surface.stroke_path(points, color, *width, dash),
    }
}
