use super::{candle_shape, Shape, ShapeMapper};
use crate::data_types::PriceSeries;
use crate::theme::ChartTheme;
use crate::transform::Projection;

/// Plain OHLC candles.
#[derive(Clone, Copy, Debug, Default)]
pub struct CandlestickMapper;

impl ShapeMapper for CandlestickMapper {
    fn shapes(&self, series: &PriceSeries, projection: &Projection, _theme: &ChartTheme) -> Vec<Shape> {
        let points = series.points();
        points[projection.visible_indices(points.len())]
            .iter()
            .map(|p| candle_shape(projection, p.index as f64, p.open, p.high, p.low, p.close))
            .collect()
    }
}
