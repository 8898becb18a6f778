//! Zoom and pan state shared by the chart and its annotations.

use crate::data_types::{ZoomAxis, ZoomConfig};
use tracing::trace;

/// Scale and horizontal offset applied on top of the base layout.
///
/// `scale_y` (and `scale_x`, when the zoom axis includes time) always stays
/// within `[min_scale, max_scale]`. `offset_x` is unbounded.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewTransform {
    scale_x: f64,
    scale_y: f64,
    offset_x: f64,
    /// Screen X of index 0 before any pan, i.e. the left plot edge.
    origin_x: f64,
    zoom: ZoomConfig,
}

impl ViewTransform {
    pub fn new(zoom: ZoomConfig, origin_x: f64) -> Self {
        Self {
            scale_x: 1.0,
            scale_y: bound(&zoom, 1.0),
            offset_x: 0.0,
            origin_x,
            zoom,
        }
    }

    pub fn scale_x(&self) -> f64 {
        self.scale_x
    }

    pub fn scale_y(&self) -> f64 {
        self.scale_y
    }

    pub fn offset_x(&self) -> f64 {
        self.offset_x
    }

    pub fn zoom_config(&self) -> &ZoomConfig {
        &self.zoom
    }

    /// One wheel step. A negative delta zooms in, a positive one zooms out and
    /// zero (or NaN) does nothing. Returns whether the transform changed.
    ///
    /// When the time axis is scaled, `offset_x` is recomputed so the index under
    /// `pointer_x` stays under it.
    pub fn zoom(&mut self, delta: f64, pointer_x: f64) -> bool {
        let factor = if delta < 0.0 {
            self.zoom.factor
        } else if delta > 0.0 {
            1.0 / self.zoom.factor
        } else {
            return false;
        };

        let before = (self.scale_x, self.scale_y, self.offset_x);

        if matches!(self.zoom.axis, ZoomAxis::Price | ZoomAxis::Both) {
            self.scale_y = bound(&self.zoom, self.scale_y * factor);
        }
        if matches!(self.zoom.axis, ZoomAxis::Time | ZoomAxis::Both) && pointer_x.is_finite() {
            let new_scale_x = bound(&self.zoom, self.scale_x * factor);
            let anchor = pointer_x - self.origin_x;
            // unscaled distance from index 0 to the pointer
            let under_pointer = (anchor - self.offset_x) / self.scale_x;
            self.offset_x = anchor - under_pointer * new_scale_x;
            self.scale_x = new_scale_x;
        }

        let changed = before != (self.scale_x, self.scale_y, self.offset_x);
        if changed {
            trace!(
                scale_x = self.scale_x,
                scale_y = self.scale_y,
                offset_x = self.offset_x,
                "zoom"
            );
        }
        changed
    }

    /// Shifts the chart horizontally by a screen delta.
    pub fn pan(&mut self, delta_x: f64) -> bool {
        if !delta_x.is_finite() || delta_x == 0.0 {
            return false;
        }
        self.offset_x += delta_x;
        true
    }

    pub fn reset(&mut self) {
        self.scale_x = 1.0;
        self.scale_y = bound(&self.zoom, 1.0);
        self.offset_x = 0.0;
    }
}

// f64::clamp panics on an inverted interval; a bad config degrades instead
fn bound(zoom: &ZoomConfig, scale: f64) -> f64 {
    scale.max(zoom.min_scale).min(zoom.max_scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transform(axis: ZoomAxis) -> ViewTransform {
        ViewTransform::new(ZoomConfig { axis, ..ZoomConfig::default() }, 20.0)
    }

    #[test]
    fn wheel_up_zooms_in_and_clamps() {
        let mut t = transform(ZoomAxis::Price);
        assert!(t.zoom(-1.0, 100.0));
        assert!((t.scale_y() - 1.1).abs() < 1e-12);
        for _ in 0..20 {
            t.zoom(-1.0, 100.0);
        }
        assert_eq!(t.scale_y(), 2.0);
        assert!(!t.zoom(-1.0, 100.0));
    }

    #[test]
    fn price_zoom_leaves_horizontal_mapping_alone() {
        let mut t = transform(ZoomAxis::Price);
        t.pan(35.0);
        t.zoom(1.0, 400.0);
        assert_eq!(t.offset_x(), 35.0);
        assert_eq!(t.scale_x(), 1.0);
    }

    #[test]
    fn time_zoom_reanchors_offset() {
        let mut t = transform(ZoomAxis::Time);
        t.zoom(-1.0, 220.0);
        // pointer sits 200px right of the origin, so offset moves by -200 * 0.1
        assert!((t.offset_x() + 20.0).abs() < 1e-9);
        assert_eq!(t.scale_y(), 1.0);
    }

    #[test]
    fn zero_delta_and_nan_pan_are_ignored() {
        let mut t = transform(ZoomAxis::Both);
        assert!(!t.zoom(0.0, 10.0));
        assert!(!t.pan(f64::NAN));
        assert_eq!(t, transform(ZoomAxis::Both));
    }
}
