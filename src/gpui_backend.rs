//! GPUI adapter: paints a recorded [`DrawList`] into a window and converts
//! GPUI input events into chart events.
//!
//! Typical use inside a `canvas` paint callback:
//! record with `chart.draw(&mut list)`, then `paint_draw_list(&list, bounds.origin, ..)`.

use crate::chart::SharedChart;
use crate::input::{PointerEvent, WheelEvent};
use crate::surface::{DrawCommand, DrawList, Rect, TextAnchor};
use glam::DVec2;
use gpui::*;
use tracing::warn;

const FALLBACK_FONT: &str = ".SystemUIFont";

pub fn paint_draw_list(
    list: &DrawList,
    origin: Point<Pixels>,
    background: &str,
    window: &mut Window,
    cx: &mut App,
) {
    let background = parse_color(background);
    for command in list.commands() {
        match command {
            DrawCommand::Clear(rect) => {
                window.paint_quad(fill(to_bounds(origin, *rect), background));
            }
            DrawCommand::Stroke {
                points,
                color,
                width,
                dash,
            } => paint_stroke(window, origin, points, color, *width, dash),
            DrawCommand::FillRect { rect, color } => {
                window.paint_quad(fill(to_bounds(origin, *rect), parse_color(color)));
            }
            DrawCommand::Text {
                text,
                position,
                color,
                font_size,
                anchor,
            } => paint_text(window, cx, origin, text, *position, color, *font_size, *anchor),
        }
    }
}

fn paint_stroke(
    window: &mut Window,
    origin: Point<Pixels>,
    points: &[DVec2],
    color: &str,
    width: f32,
    dash: &[f32],
) {
    let Some((first, rest)) = points.split_first() else {
        return;
    };
    let mut builder = PathBuilder::stroke(px(width.max(0.5)));
    if !dash.is_empty() {
        let pattern: Vec<Pixels> = dash.iter().map(|d| px(*d)).collect();
        builder = builder.dash_array(&pattern);
    }
    builder.move_to(to_point(origin, *first));
    for p in rest {
        builder.line_to(to_point(origin, *p));
    }
    if let Ok(path) = builder.build() {
        window.paint_path(path, parse_color(color));
    }
}

#[allow(clippy::too_many_arguments)]
fn paint_text(
    window: &mut Window,
    cx: &mut App,
    origin: Point<Pixels>,
    text: &str,
    position: DVec2,
    color: &str,
    font_size: f32,
    anchor: TextAnchor,
) {
    let font_size = px(font_size);
    let run = TextRun {
        len: text.len(),
        font: font(FALLBACK_FONT),
        color: Hsla::from(parse_color(color)),
        background_color: None,
        underline: None,
        strikethrough: None,
    };
    let shaped = window
        .text_system()
        .shape_line(text.to_string().into(), font_size, &[run], None);
    let line_height = shaped.ascent + shaped.descent;
    // surface text positions are baselines; gpui paints from the top of the line
    let mut top = to_point(origin, position) - point(px(0.0), shaped.ascent);
    if anchor == TextAnchor::End {
        top.x -= shaped.width;
    }
    let _ = shaped.paint(top, line_height, window, cx);
}

fn parse_color(color: &str) -> Rgba {
    Rgba::try_from(color).unwrap_or_else(|err| {
        warn!(color, %err, "unparseable color, using black");
        rgb(0x000000)
    })
}

fn to_point(origin: Point<Pixels>, p: DVec2) -> Point<Pixels> {
    point(origin.x + px(p.x as f32), origin.y + px(p.y as f32))
}

fn to_bounds(origin: Point<Pixels>, rect: Rect) -> Bounds<Pixels> {
    Bounds::new(
        to_point(origin, DVec2::new(rect.x, rect.y)),
        size(px(rect.width as f32), px(rect.height as f32)),
    )
}

fn local(position: Point<Pixels>, origin: Point<Pixels>) -> DVec2 {
    DVec2::new(
        f64::from(position.x - origin.x),
        f64::from(position.y - origin.y),
    )
}

pub fn pointer_event(position: Point<Pixels>, origin: Point<Pixels>) -> PointerEvent {
    PointerEvent {
        position: local(position, origin),
    }
}

/// Scrolling up (negative delta in GPUI) zooms in.
pub fn wheel_event(event: &ScrollWheelEvent, origin: Point<Pixels>) -> WheelEvent {
    let delta = event.delta.pixel_delta(px(16.0));
    WheelEvent {
        position: local(event.position, origin),
        delta: f64::from(delta.y),
    }
}

// Each handler holds the chart lock for the duration of the event, including
// the redraw hook. Hooks should only call `cx.notify()` or similar.
pub fn handle_mouse_down(chart: &SharedChart, event: &MouseDownEvent, origin: Point<Pixels>) {
    if event.button == MouseButton::Left {
        chart.lock().pointer_down(pointer_event(event.position, origin));
    }
}

pub fn handle_mouse_move(chart: &SharedChart, event: &MouseMoveEvent, origin: Point<Pixels>) {
    chart.lock().pointer_move(pointer_event(event.position, origin));
}

pub fn handle_mouse_up(chart: &SharedChart, event: &MouseUpEvent, origin: Point<Pixels>) {
    if event.button == MouseButton::Left {
        chart.lock().pointer_up(pointer_event(event.position, origin));
    }
}

pub fn handle_scroll(chart: &SharedChart, event: &ScrollWheelEvent, origin: Point<Pixels>) {
    chart.lock().wheel(wheel_event(event, origin));
}
