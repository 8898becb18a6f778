use super::{Shape, ShapeMapper};
use crate::data_types::PriceSeries;
use crate::error::ChartError;
use crate::surface::Rect;
use crate::theme::ChartTheme;
use crate::transform::Projection;
use glam::DVec2;

/// Fixed-size bricks laid out one per slot, ignoring time.
#[derive(Clone, Copy, Debug)]
pub struct RenkoMapper {
    pub brick_size: f64,
}

/// Upper bound on bricks built for one series.
pub const MAX_BRICKS: usize = 100_000;

/// `(low, high, bearish)` per brick, built from closes. Stops at [`MAX_BRICKS`].
pub fn renko_bricks(closes: impl IntoIterator<Item = f64>, brick_size: f64) -> Vec<(f64, f64, bool)> {
    let mut bricks = Vec::new();
    if !(brick_size > 0.0 && brick_size.is_finite()) {
        return bricks;
    }
    let mut closes = closes.into_iter();
    let Some(mut anchor) = closes.next() else {
        return bricks;
    };
    for close in closes {
        while close >= anchor + brick_size {
            if bricks.len() == MAX_BRICKS {
                return bricks;
            }
            bricks.push((anchor, anchor + brick_size, false));
            anchor += brick_size;
        }
        while close <= anchor - brick_size {
            if bricks.len() == MAX_BRICKS {
                return bricks;
            }
            bricks.push((anchor - brick_size, anchor, true));
            anchor -= brick_size;
        }
    }
    bricks
}

/// Rejects a brick size that is not positive or that would need more than
/// [`MAX_BRICKS`] bricks to follow the close-to-close path of `series`.
pub fn check_brick_size(series: &PriceSeries, brick_size: f64) -> Result<(), ChartError> {
    if !(brick_size > 0.0 && brick_size.is_finite()) {
        return Err(ChartError::Initialization(format!(
            "renko brick size must be positive, got {brick_size}"
        )));
    }
    let path: f64 = series
        .points()
        .windows(2)
        .map(|w| (w[1].close - w[0].close).abs())
        .sum();
    if path / brick_size > MAX_BRICKS as f64 {
        return Err(ChartError::Initialization(format!(
            "renko brick size {brick_size} is too small for a price path of {path:.2}"
        )));
    }
    Ok(())
}

impl ShapeMapper for RenkoMapper {
    fn shapes(&self, series: &PriceSeries, projection: &Projection, _theme: &ChartTheme) -> Vec<Shape> {
        let bricks = renko_bricks(series.points().iter().map(|p| p.close), self.brick_size);
        let visible = projection.visible_indices(bricks.len());
        bricks[visible.clone()]
            .iter()
            .zip(visible)
            .map(|(&(low, high, bearish), slot)| {
                let x = projection.x_data_to_screen(slot as f64);
                let top_left = DVec2::new(x, projection.y_data_to_screen(high));
                let bottom_right = DVec2::new(x + projection.item_width, projection.y_data_to_screen(low));
                Shape::Brick {
                    rect: Rect::from_corners(top_left, bottom_right),
                    bearish,
                }
            })
            .collect()
    }
}
