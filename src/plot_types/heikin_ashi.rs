use super::{candle_shape, Shape, ShapeMapper};
use crate::data_types::{DataPoint, PriceSeries};
use crate::theme::ChartTheme;
use crate::transform::Projection;

/// Smoothed candles: each open averages the previous smoothed body.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeikinAshiMapper;

/// `(open, high, low, close)` per input point.
pub fn heikin_ashi(points: &[DataPoint]) -> Vec<(f64, f64, f64, f64)> {
    let mut out: Vec<(f64, f64, f64, f64)> = Vec::with_capacity(points.len());
    for p in points {
        let close = (p.open + p.high + p.low + p.close) / 4.0;
        let open = match out.last() {
            Some(&(prev_open, _, _, prev_close)) => (prev_open + prev_close) / 2.0,
            None => (p.open + p.close) / 2.0,
        };
        let high = p.high.max(open).max(close);
        let low = p.low.min(open).min(close);
        out.push((open, high, low, close));
    }
    out
}

impl ShapeMapper for HeikinAshiMapper {
    fn shapes(&self, series: &PriceSeries, projection: &Projection, _theme: &ChartTheme) -> Vec<Shape> {
        let smoothed = heikin_ashi(series.points());
        let visible = projection.visible_indices(smoothed.len());
        smoothed[visible.clone()]
            .iter()
            .zip(visible)
            .map(|(&(o, h, l, c), i)| candle_shape(projection, i as f64, o, h, l, c))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(index: usize, open: f64, high: f64, low: f64, close: f64) -> DataPoint {
        DataPoint { index, date: None, open, high, low, close }
    }

    #[test]
    fn first_candle_seeds_from_raw_body() {
        let ha = heikin_ashi(&[point(0, 10.0, 14.0, 8.0, 12.0), point(1, 12.0, 13.0, 11.0, 11.0)]);
        assert_eq!(ha[0], (11.0, 14.0, 8.0, 11.0));
        // open = (11 + 11) / 2, close = 47 / 4
        assert_eq!(ha[1].0, 11.0);
        assert_eq!(ha[1].3, 11.75);
        assert_eq!(ha[1].1, 13.0);
        assert_eq!(ha[1].2, 11.0);
    }
}
