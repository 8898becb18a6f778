//! Drawing-surface contract and a recording implementation.

use glam::DVec2;

/// Axis-aligned rectangle in screen pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Rectangle spanning two corners in any order.
    pub fn from_corners(a: DVec2, b: DVec2) -> Self {
        let min = a.min(b);
        let max = a.max(b);
        Self::new(min.x, min.y, max.x - min.x, max.y - min.y)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Which end of the text sits at the given position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAnchor {
    #[default]
    Start,
    /// Right-aligned; the surface measures the text.
    End,
}

/// The 2D primitives the chart needs from its host.
pub trait DrawingSurface {
    fn clear(&mut self, rect: Rect);
    /// Strokes a polyline. An empty `dash` means a continuous line.
    fn stroke_path(&mut self, points: &[DVec2], color: &str, width: f32, dash: &[f32]);
    fn fill_rect(&mut self, rect: Rect, color: &str);
    /// `position` is the baseline point named by `anchor`.
    fn fill_text(&mut self, text: &str, position: DVec2, color: &str, font_size: f32, anchor: TextAnchor);
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear(Rect),
    Stroke {
        points: Vec<DVec2>,
        color: String,
        width: f32,
        dash: Vec<f32>,
    },
    FillRect {
        rect: Rect,
        color: String,
    },
    Text {
        text: String,
        position: DVec2,
        color: String,
        font_size: f32,
        anchor: TextAnchor,
    },
}

/// Records draw calls in order; used by hosts that paint later and by tests.
#[derive(Clone, Debug, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn strokes_with_color<'a>(&'a self, color: &'a str) -> impl Iterator<Item = &'a [DVec2]> + 'a {
        self.commands.iter().filter_map(move |c| match c {
            DrawCommand::Stroke { points, color: c, .. } if c == color => Some(points.as_slice()),
            _ => None,
        })
    }
}

impl DrawingSurface for DrawList {
    fn clear(&mut self, rect: Rect) {
        self.commands.push(DrawCommand::Clear(rect));
    }

    fn stroke_path(&mut self, points: &[DVec2], color: &str, width: f32, dash: &[f32]) {
        if points.len() < 2 {
            return;
        }
        self.commands.push(DrawCommand::Stroke {
            points: points.to_vec(),
            color: color.to_string(),
            width,
            dash: dash.to_vec(),
        });
    }

    fn fill_rect(&mut self, rect: Rect, color: &str) {
        self.commands.push(DrawCommand::FillRect {
            rect,
            color: color.to_string(),
        });
    }

    fn fill_text(&mut self, text: &str, position: DVec2, color: &str, font_size: f32, anchor: TextAnchor) {
        if text.is_empty() {
            return;
        }
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            position,
            color: color.to_string(),
            font_size,
            anchor,
        });
    }
}
