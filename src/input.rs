//! Routes pointer and wheel events to the view transform or the annotations.

use glam::DVec2;
use tracing::trace;

use crate::annotation_store::{AnnotationStore, BeginLine};
use crate::transform::PlotFrame;
use crate::view_transform::ViewTransform;

/// Pointer position relative to the surface's top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub position: DVec2,
}

impl PointerEvent {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            position: DVec2::new(x, y),
        }
    }
}

/// Wheel step; negative `delta` zooms in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WheelEvent {
    pub position: DVec2,
    pub delta: f64,
}

impl WheelEvent {
    pub fn new(x: f64, y: f64, delta: f64) -> Self {
        Self {
            position: DVec2::new(x, y),
            delta,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum InteractionState {
    #[default]
    Idle,
    /// Dragging the chart; `last_x` is the previous pointer X.
    Panning { last_x: f64 },
    Drawing,
    /// Pointer went down on an existing line.
    Selecting { line: usize },
}

/// Owns the [`ViewTransform`] and the gesture state machine.
///
/// Every handler is total: unexpected events in a given state are ignored.
/// Each returns whether the transform changed and the chart needs a redraw;
/// annotation changes notify through the store's own hook.
#[derive(Clone, Debug)]
pub struct InteractionController {
    view: ViewTransform,
    state: InteractionState,
    hit_threshold: f64,
}

impl InteractionController {
    pub fn new(view: ViewTransform, hit_threshold: f64) -> Self {
        Self {
            view,
            state: InteractionState::Idle,
            hit_threshold,
        }
    }

    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut ViewTransform {
        &mut self.view
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    fn transition(&mut self, next: InteractionState) {
        if self.state != next {
            trace!(from = ?self.state, to = ?next, "interaction");
        }
        self.state = next;
    }

    pub fn pointer_down(&mut self, event: PointerEvent, store: &mut AnnotationStore, frame: &PlotFrame) -> bool {
        let projection = frame.project(&self.view);
        if store.is_draw_mode() {
            if store.begin_line(event.position, &projection) == BeginLine::Drawing {
                self.transition(InteractionState::Drawing);
            }
            return false;
        }
        let next = match store.hit_test(event.position, &projection, self.hit_threshold) {
            Some(line) => InteractionState::Selecting { line },
            None => InteractionState::Panning {
                last_x: event.position.x,
            },
        };
        self.transition(next);
        false
    }

    pub fn pointer_move(&mut self, event: PointerEvent, store: &mut AnnotationStore, frame: &PlotFrame) -> bool {
        match self.state {
            InteractionState::Drawing => {
                let projection = frame.project(&self.view);
                store.update_line(event.position, &projection);
                false
            }
            InteractionState::Panning { last_x } => {
                let moved = self.view.pan(event.position.x - last_x);
                self.state = InteractionState::Panning {
                    last_x: event.position.x,
                };
                moved
            }
            InteractionState::Idle | InteractionState::Selecting { .. } => false,
        }
    }

    pub fn pointer_up(&mut self, _event: PointerEvent, store: &mut AnnotationStore) -> bool {
        if self.state == InteractionState::Drawing {
            store.commit_line();
        }
        self.transition(InteractionState::Idle);
        false
    }

    /// Zooms regardless of the current gesture.
    pub fn wheel(&mut self, event: WheelEvent) -> bool {
        self.view.zoom(event.delta, event.position.x)
    }
}
