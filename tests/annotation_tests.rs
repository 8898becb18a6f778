mod common;

use candle_canvas::{
    ChartConfig, DashStyle, FileStore, KeyValueStore, LineAnnotation, MemoryStore, PointerEvent,
    StorageError, StyleOverrides,
};
use common::{chart_with, default_chart, synthetic_series};
use glam::DVec2;

fn draw_line(chart: &mut candle_canvas::Chart, from: (f64, f64), to: (f64, f64)) {
    chart.pointer_down(PointerEvent::new(from.0, from.1));
    chart.pointer_move(PointerEvent::new(to.0, to.1));
    chart.pointer_up(PointerEvent::new(to.0, to.1));
}

#[test]
fn test_commit_undo_redo_round_trip() {
    let mut chart = default_chart();
    chart.set_draw_mode(true, &StyleOverrides::default());
    for i in 0..4 {
        let y = 60.0 + 40.0 * i as f64;
        draw_line(&mut chart, (100.0, y), (300.0, y + 10.0));
    }
    let committed: Vec<LineAnnotation> = chart.lines().to_vec();
    assert_eq!(committed.len(), 4);

    for _ in 0..4 {
        assert!(chart.undo());
    }
    assert!(chart.lines().is_empty());
    assert!(!chart.undo());
    // most recently undone last
    let undone: Vec<LineAnnotation> = chart.annotations().undo_stack().to_vec();
    let mut expected = committed.clone();
    expected.reverse();
    assert_eq!(undone, expected);

    for _ in 0..4 {
        assert!(chart.redo());
    }
    assert!(!chart.redo());
    assert_eq!(chart.lines(), committed.as_slice());
}

#[test]
fn test_hit_test_threshold_in_pixels() {
    let mut chart = default_chart();
    chart.set_draw_mode(true, &StyleOverrides::default());
    // a horizontal line 100px long, queried at several distances
    draw_line(&mut chart, (200.0, 200.0), (300.0, 200.0));
    chart.set_draw_mode(false, &StyleOverrides::default());

    let p = chart.projection();
    let store = chart.annotations();
    assert_eq!(store.hit_test(DVec2::new(250.0, 203.0), &p, 5.0), Some(0));
    assert_eq!(store.hit_test(DVec2::new(250.0, 210.0), &p, 5.0), None);
    // past the end, measured against the endpoint
    assert_eq!(store.hit_test(DVec2::new(303.0, 202.0), &p, 5.0), Some(0));
    assert_eq!(store.hit_test(DVec2::new(306.0, 200.0), &p, 5.0), None);
}

#[test]
fn test_annotations_survive_a_new_chart() {
    let store = MemoryStore::new();
    let mut first = chart_with(ChartConfig::default(), store.clone());
    first.set_draw_mode(true, &StyleOverrides::default().label("support").dash(DashStyle::Dashed));
    draw_line(&mut first, (120.0, 90.0), (400.0, 200.0));
    first.set_line_style(&StyleOverrides::default().color("#ff9800").width(1.0));
    draw_line(&mut first, (50.0, 300.0), (700.0, 60.0));

    let second = chart_with(ChartConfig::default(), store);
    assert_eq!(second.lines(), first.lines());
    assert_eq!(second.lines()[0].style.label, "support");
    assert_eq!(second.lines()[1].style.color, "#ff9800");
}

#[test]
fn test_undo_is_persisted() {
    let store = MemoryStore::new();
    let mut first = chart_with(ChartConfig::default(), store.clone());
    first.set_draw_mode(true, &StyleOverrides::default());
    draw_line(&mut first, (120.0, 90.0), (400.0, 200.0));
    draw_line(&mut first, (130.0, 90.0), (410.0, 200.0));
    first.undo();

    let second = chart_with(ChartConfig::default(), store);
    assert_eq!(second.lines().len(), 1);
    // the undo stack itself is session-only
    assert!(second.annotations().undo_stack().is_empty());
}

#[test]
fn test_stored_format_is_camel_case_array() {
    let store = MemoryStore::new();
    let mut chart = chart_with(ChartConfig::default(), store.clone());
    chart.set_draw_mode(true, &StyleOverrides::default());
    draw_line(&mut chart, (100.0, 100.0), (200.0, 150.0));

    let raw = store.get("chartLines").unwrap().expect("saved under default key");
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let first = &value.as_array().expect("array")[0];
    for key in ["startX", "startY", "endX", "endY", "color", "width", "style", "label"] {
        assert!(first.get(key).is_some(), "missing {key}");
    }
    assert_eq!(first["style"], "solid");
}

#[test]
fn test_loads_lines_saved_by_a_previous_session() {
    let mut store = MemoryStore::new();
    store
        .set(
            "chartLines",
            r##"[{"startX":3,"startY":101.5,"endX":40,"endY":95,"color":"#1a73e8","width":2,"style":"dotted","label":"range"}]"##,
        )
        .unwrap();
    let chart = chart_with(ChartConfig::default(), store);
    assert_eq!(chart.lines().len(), 1);
    assert_eq!(chart.lines()[0].style.dash, DashStyle::Dotted);
    assert_eq!(chart.lines()[0].start(), DVec2::new(3.0, 101.5));
}

#[test]
fn test_corrupt_storage_starts_empty() {
    let mut store = MemoryStore::new();
    store.set("chartLines", "[{\"startX\":").unwrap();
    let mut chart = chart_with(ChartConfig::default(), store);
    assert!(chart.lines().is_empty());
    assert!(matches!(chart.take_storage_error(), Some(StorageError::Corrupt { .. })));
}

#[test]
fn test_custom_storage_key() {
    let store = MemoryStore::new();
    let config = ChartConfig {
        storage_key: "btc-usd".into(),
        ..ChartConfig::default()
    };
    let mut chart = chart_with(config, store.clone());
    chart.set_draw_mode(true, &StyleOverrides::default());
    draw_line(&mut chart, (100.0, 100.0), (200.0, 150.0));
    assert!(store.get("btc-usd").unwrap().is_some());
    assert!(store.get("chartLines").unwrap().is_none());
}

#[test]
fn test_file_store_round_trip() {
    let dir = std::env::temp_dir().join(format!("candle_canvas_annotations_{}", std::process::id()));
    let series = synthetic_series(200, 5);
    {
        let store = FileStore::open(&dir).unwrap();
        let mut chart = candle_canvas::Chart::new(ChartConfig::default(), series.clone(), Box::new(store)).unwrap();
        chart.set_draw_mode(true, &StyleOverrides::default());
        draw_line(&mut chart, (100.0, 100.0), (200.0, 150.0));
    }
    let store = FileStore::open(&dir).unwrap();
    let chart = candle_canvas::Chart::new(ChartConfig::default(), series, Box::new(store)).unwrap();
    assert_eq!(chart.lines().len(), 1);
    let _ = std::fs::remove_dir_all(&dir);
}
