use candle_canvas::data_types::{LayoutConfig, ZoomAxis, ZoomConfig};
use candle_canvas::scales::ChartScale;
use candle_canvas::{Projection, ViewTransform};
use glam::DVec2;

fn layout() -> LayoutConfig {
    LayoutConfig::default()
}

#[test]
fn test_chart_scale_linear() {
    let scale = ChartScale::new_linear((0.0, 100.0), (0.0, 500.0));
    assert_eq!(scale.map(0.0), 0.0);
    assert_eq!(scale.map(50.0), 250.0);
    assert_eq!(scale.map(100.0), 500.0);
    assert_eq!(scale.invert(500.0), 100.0);
}

#[test]
fn test_projection_matches_candle_layout() {
    let view = ViewTransform::new(ZoomConfig::default(), 20.0);
    let p = Projection::new(&layout(), &view, (50.0, 150.0));

    // index i sits at padding + i * (candle_width + spacing)
    assert_eq!(p.x_data_to_screen(0.0), 20.0);
    assert_eq!(p.x_data_to_screen(10.0), 170.0);
    // max price on the top padding, min price on the bottom of the plot
    assert_eq!(p.y_data_to_screen(150.0), 20.0);
    assert_eq!(p.y_data_to_screen(50.0), 380.0);
    assert!((p.price_scale() - 3.6).abs() < 1e-12);
}

#[test]
fn test_projection_round_trip() {
    let mut view = ViewTransform::new(ZoomConfig { axis: ZoomAxis::Both, ..ZoomConfig::default() }, 20.0);
    view.pan(-123.0);
    view.zoom(-1.0, 300.0);
    let p = Projection::new(&layout(), &view, (50.0, 150.0));

    let data = DVec2::new(42.5, 101.25);
    let back = p.screen_to_data(p.data_to_screen(data));
    assert!((back - data).length() < 1e-9);
}

#[test]
fn test_price_zoom_scales_from_top_padding() {
    let mut view = ViewTransform::new(ZoomConfig::default(), 20.0);
    view.zoom(-1.0, 400.0);
    let p = Projection::new(&layout(), &view, (50.0, 150.0));
    assert!((p.y_data_to_screen(150.0) - 20.0).abs() < 1e-9);
    assert!((p.y_data_to_screen(50.0) - (20.0 + 360.0 * 1.1)).abs() < 1e-9);
    // horizontal mapping is untouched
    assert_eq!(p.x_data_to_screen(10.0), 170.0);
}

#[test]
fn test_visible_indices_follow_pan() {
    let mut view = ViewTransform::new(ZoomConfig::default(), 20.0);
    let p = Projection::new(&layout(), &view, (50.0, 150.0));
    assert_eq!(p.visible_indices(1000), 0..51);

    view.pan(-150.0);
    let p = Projection::new(&layout(), &view, (50.0, 150.0));
    let visible = p.visible_indices(1000);
    assert!(visible.start <= 10 && visible.start >= 9);
    assert_eq!(visible.end, 61);
}
