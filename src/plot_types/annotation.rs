use crate::data_types::LineAnnotation;
use crate::surface::{DrawingSurface, TextAnchor};
use crate::transform::Projection;
use glam::DVec2;

/// Horizontal gap between a line's end point and its label.
const LABEL_OFFSET: f64 = 5.0;

/// Projects one annotation through `projection` and strokes it, with its label
/// (if any) just right of the end point.
pub fn draw_line(
    surface: &mut dyn DrawingSurface,
    projection: &Projection,
    line: &LineAnnotation,
    label_size: f32,
) {
    let start = projection.data_to_screen(line.start());
    let end = projection.data_to_screen(line.end());
    let style = &line.style;

    surface.stroke_path(&[start, end], &style.color, style.width, style.dash.pattern());

    if !style.label.is_empty() {
        surface.fill_text(
            &style.label,
            end + DVec2::new(LABEL_OFFSET, 0.0),
            &style.color,
            label_size,
            TextAnchor::Start,
        );
    }
}
