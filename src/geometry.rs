//! Small geometric helpers shared by the projection, hit-testing and renderer.

use glam::DVec2;

/// Euclidean distance from `point` to the segment `start..end`.
///
/// The projection parameter is clamped to `[0, 1]` so points beyond either end
/// measure against the nearest endpoint. A zero-length segment degenerates to a
/// point distance.
pub fn point_to_segment_distance(point: DVec2, start: DVec2, end: DVec2) -> f64 {
    let seg = end - start;
    let len_sq = seg.length_squared();
    if len_sq == 0.0 {
        return point.distance(start);
    }
    let t = ((point - start).dot(seg) / len_sq).clamp(0.0, 1.0);
    point.distance(start + seg * t)
}

/// Half-open range of indices whose columns intersect `[left, right]` on screen.
///
/// `first_x` is the screen X of index 0 and `pitch` the horizontal distance
/// between consecutive indices. The result is clipped to `0..total`.
pub fn visible_index_range(
    total: usize,
    first_x: f64,
    pitch: f64,
    item_width: f64,
    left: f64,
    right: f64,
) -> std::ops::Range<usize> {
    if total == 0 || pitch <= 0.0 || !pitch.is_finite() || !first_x.is_finite() {
        return 0..0;
    }
    let start = ((left - item_width - first_x) / pitch).floor().max(0.0);
    let end = ((right - first_x) / pitch).floor() + 1.0;
    let start = (start as usize).min(total);
    let end = if end <= 0.0 { 0 } else { (end as usize).min(total) };
    start..end.max(start)
}

/// Min/max over a sequence of `(low, high)` pairs; `None` when empty or non-finite.
pub fn price_bounds(iter: impl IntoIterator<Item = (f64, f64)>) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for (low, high) in iter {
        min = min.min(low);
        max = max.max(high);
    }
    (min.is_finite() && max.is_finite()).then_some((min, max))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_projects_onto_segment_interior() {
        let d = point_to_segment_distance(DVec2::new(50.0, 3.0), DVec2::ZERO, DVec2::new(100.0, 0.0));
        assert!((d - 3.0).abs() < 1e-12);
    }

    #[test]
    fn distance_clamps_to_endpoints() {
        let d = point_to_segment_distance(DVec2::new(-3.0, 4.0), DVec2::ZERO, DVec2::new(100.0, 0.0));
        assert!((d - 5.0).abs() < 1e-12);
        let d = point_to_segment_distance(DVec2::new(103.0, -4.0), DVec2::ZERO, DVec2::new(100.0, 0.0));
        assert!((d - 5.0).abs() < 1e-12);
    }

    #[test]
    fn zero_length_segment_is_point_distance() {
        let p = DVec2::new(1.0, 1.0);
        let d = point_to_segment_distance(DVec2::new(4.0, 5.0), p, p);
        assert!((d - 5.0).abs() < 1e-12);
    }

    #[test]
    fn visible_range_clips_to_window() {
        // index i sits at 20 + 15 i, 10 wide
        let r = visible_index_range(1000, 20.0, 15.0, 10.0, 20.0, 780.0);
        assert_eq!(r.start, 0);
        assert_eq!(r.end, 51);

        let r = visible_index_range(1000, -1480.0, 15.0, 10.0, 20.0, 780.0);
        assert_eq!(r.start, 99);
        assert!(r.end <= 1000 && r.end > r.start);

        let r = visible_index_range(10, 2000.0, 15.0, 10.0, 20.0, 780.0);
        assert!(r.is_empty());
    }

    #[test]
    fn bounds_ignore_empty() {
        assert_eq!(price_bounds(Vec::new()), None);
        assert_eq!(price_bounds(vec![(1.0, 2.0), (0.5, 1.5)]), Some((0.5, 2.0)));
    }
}
