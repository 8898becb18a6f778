use super::{Shape, ShapeMapper};
use crate::data_types::PriceSeries;
use crate::theme::ChartTheme;
use crate::transform::Projection;
use glam::DVec2;

const LINE_WIDTH: f32 = 2.0;

/// Close-price line colored by which side of a reference price it is on.
#[derive(Clone, Copy, Debug, Default)]
pub struct BaselineMapper {
    pub base: Option<f64>,
}

impl ShapeMapper for BaselineMapper {
    fn shapes(&self, series: &PriceSeries, projection: &Projection, theme: &ChartTheme) -> Vec<Shape> {
        let points = series.points();
        let Some(base) = self.base.or_else(|| points.first().map(|p| p.close)) else {
            return Vec::new();
        };

        let (left, _, right, _) = projection.plot;
        let base_y = projection.y_data_to_screen(base);
        let mut shapes = vec![Shape::Polyline {
            points: vec![DVec2::new(left, base_y), DVec2::new(right, base_y)],
            color: theme.baseline_color.clone(),
            width: 1.0,
            dash: vec![4.0, 4.0],
        }];

        // one extra point each side keeps the line continuous at the plot edges
        let visible = projection.visible_indices(points.len());
        let start = visible.start.saturating_sub(1);
        let end = (visible.end + 1).min(points.len());
        let half = projection.item_width / 2.0;
        let to_screen = |i: usize| {
            DVec2::new(
                projection.x_data_to_screen(i as f64) + half,
                projection.y_data_to_screen(points[i].close),
            )
        };

        let mut run: Vec<DVec2> = Vec::new();
        let mut run_above = true;
        for i in start..end {
            let above = points[i].close >= base;
            let here = to_screen(i);
            if run.is_empty() {
                run_above = above;
                run.push(here);
                continue;
            }
            if above != run_above {
                // split at the crossing so both runs meet on the baseline
                let prev = points[i - 1].close;
                let t = (base - prev) / (points[i].close - prev);
                let crossing = run[run.len() - 1].lerp(here, t);
                run.push(crossing);
                shapes.push(polyline(std::mem::take(&mut run), run_above, theme));
                run.push(crossing);
                run_above = above;
            }
            run.push(here);
        }
        if run.len() >= 2 {
            shapes.push(polyline(run, run_above, theme));
        }
        shapes
    }
}

fn polyline(points: Vec<DVec2>, above: bool, theme: &ChartTheme) -> Shape {
    Shape::Polyline {
        points,
        color: if above { theme.bull_color.clone() } else { theme.bear_color.clone() },
        width: LINE_WIDTH,
        dash: Vec::new(),
    }
}
