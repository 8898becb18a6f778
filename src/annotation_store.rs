//! Line annotations: drawing lifecycle, picking, undo/redo and persistence.

use std::sync::Arc;

use glam::DVec2;
use tracing::{debug, warn};

use crate::data_types::{LineAnnotation, LineStyle, StyleOverrides};
use crate::error::StorageError;
use crate::geometry::point_to_segment_distance;
use crate::plot_types::annotation::draw_line;
use crate::storage::KeyValueStore;
use crate::surface::DrawingSurface;
use crate::transform::Projection;

/// Called synchronously after every visible change.
pub type RedrawHook = Arc<dyn Fn() + Send + Sync>;

/// What a pointer-down did to the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BeginLine {
    /// A line is now in progress; the caller must not start a pan.
    Drawing,
    /// Draw mode is off.
    Ignored,
}

pub struct AnnotationStore {
    lines: Vec<LineAnnotation>,
    current: Option<LineAnnotation>,
    /// Lines removed by `undo`, most recent last. `redo` pops from here.
    undo_stack: Vec<LineAnnotation>,
    default_style: LineStyle,
    draw_mode: bool,
    storage: Box<dyn KeyValueStore>,
    storage_key: String,
    on_update: Option<RedrawHook>,
    last_storage_error: Option<StorageError>,
}

impl AnnotationStore {
    /// Loads any lines saved under `storage_key`. A missing or unreadable value
    /// yields an empty store; the error is kept for [`Self::take_storage_error`].
    pub fn new(
        storage: Box<dyn KeyValueStore>,
        storage_key: impl Into<String>,
        default_style: LineStyle,
    ) -> Self {
        let mut store = Self {
            lines: Vec::new(),
            current: None,
            undo_stack: Vec::new(),
            default_style,
            draw_mode: false,
            storage,
            storage_key: storage_key.into(),
            on_update: None,
            last_storage_error: None,
        };
        match store.load() {
            Ok(lines) => {
                debug!(count = lines.len(), key = %store.storage_key, "loaded annotations");
                store.lines = lines;
            }
            Err(err) => {
                warn!(%err, "discarding stored annotations");
                store.last_storage_error = Some(err);
            }
        }
        store
    }

    fn load(&self) -> Result<Vec<LineAnnotation>, StorageError> {
        let Some(raw) = self.storage.get(&self.storage_key)? else {
            return Ok(Vec::new());
        };
        serde_json::from_str(&raw).map_err(|source| StorageError::Corrupt {
            key: self.storage_key.clone(),
            source,
        })
    }

    /// Overwrites the stored collection. Failures are logged and kept; the
    /// in-memory state is never rolled back.
    fn persist(&mut self) {
        let result = serde_json::to_string(&self.lines)
            .map_err(|e| StorageError::Write {
                key: self.storage_key.clone(),
                message: e.to_string(),
            })
            .and_then(|json| self.storage.set(&self.storage_key, &json));
        if let Err(err) = result {
            warn!(%err, "failed to save annotations");
            self.last_storage_error = Some(err);
        }
    }

    fn notify(&self) {
        if let Some(hook) = &self.on_update {
            hook();
        }
    }

    pub fn set_on_update(&mut self, hook: RedrawHook) {
        self.on_update = Some(hook);
    }

    pub fn lines(&self) -> &[LineAnnotation] {
        &self.lines
    }

    pub fn current_line(&self) -> Option<&LineAnnotation> {
        self.current.as_ref()
    }

    pub fn undo_stack(&self) -> &[LineAnnotation] {
        &self.undo_stack
    }

    pub fn default_style(&self) -> &LineStyle {
        &self.default_style
    }

    pub fn is_draw_mode(&self) -> bool {
        self.draw_mode
    }

    pub fn is_drawing(&self) -> bool {
        self.current.is_some()
    }

    pub fn take_storage_error(&mut self) -> Option<StorageError> {
        self.last_storage_error.take()
    }

    /// Enables or disables draw mode. Disabling drops the line in progress.
    pub fn set_draw_mode(&mut self, enabled: bool, overrides: &StyleOverrides) {
        self.draw_mode = enabled;
        if !enabled {
            self.current = None;
        }
        self.set_style(overrides);
    }

    /// Replaces the default style for new lines, and restyles the line being
    /// drawn if there is one.
    pub fn set_style(&mut self, overrides: &StyleOverrides) {
        self.default_style = self.default_style.with_overrides(overrides);
        if let Some(current) = self.current.as_mut() {
            current.style = self.default_style.clone();
        }
        self.notify();
    }

    pub fn begin_line(&mut self, screen: DVec2, projection: &Projection) -> BeginLine {
        if !self.draw_mode {
            return BeginLine::Ignored;
        }
        let at = projection.screen_to_data(screen);
        self.current = Some(LineAnnotation::starting_at(at, self.default_style.clone()));
        BeginLine::Drawing
    }

    /// Moves the end of the line in progress. Returns false when nothing is
    /// being drawn.
    pub fn update_line(&mut self, screen: DVec2, projection: &Projection) -> bool {
        let Some(current) = self.current.as_mut() else {
            return false;
        };
        current.set_end(projection.screen_to_data(screen));
        self.notify();
        true
    }

    /// Appends the line in progress to the collection and saves it. No-op when
    /// nothing is being drawn.
    pub fn commit_line(&mut self) -> bool {
        let Some(line) = self.current.take() else {
            return false;
        };
        self.lines.push(line);
        // a fresh commit starts a new history branch
        self.undo_stack.clear();
        self.persist();
        debug!(count = self.lines.len(), "committed annotation");
        self.notify();
        true
    }

    /// Index of the first line (insertion order) within `threshold` pixels of
    /// `screen` under the given projection.
    pub fn hit_test(&self, screen: DVec2, projection: &Projection, threshold: f64) -> Option<usize> {
        // round-trip through data space so the query uses the same mapping as the lines
        let query = projection.data_to_screen(projection.screen_to_data(screen));
        self.lines.iter().position(|line| {
            let start = projection.data_to_screen(line.start());
            let end = projection.data_to_screen(line.end());
            point_to_segment_distance(query, start, end) < threshold
        })
    }

    pub fn undo(&mut self) -> bool {
        let Some(line) = self.lines.pop() else {
            return false;
        };
        self.undo_stack.push(line);
        self.persist();
        debug!(remaining = self.lines.len(), "undo");
        self.notify();
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(line) = self.undo_stack.pop() else {
            return false;
        };
        self.lines.push(line);
        self.persist();
        debug!(count = self.lines.len(), "redo");
        self.notify();
        true
    }

    /// Draws committed lines in insertion order, then the line in progress.
    pub fn draw(&self, surface: &mut dyn DrawingSurface, projection: &Projection, label_size: f32) {
        for line in self.lines.iter().chain(self.current.as_ref()) {
            draw_line(surface, projection, line, label_size);
        }
    }
}

impl std::fmt::Debug for AnnotationStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnnotationStore")
            .field("lines", &self.lines.len())
            .field("drawing", &self.current.is_some())
            .field("undo_stack", &self.undo_stack.len())
            .field("draw_mode", &self.draw_mode)
            .field("storage_key", &self.storage_key)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_types::{DashStyle, LayoutConfig, ZoomConfig};
    use crate::storage::MemoryStore;
    use crate::view_transform::ViewTransform;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// 1 data unit == 1 pixel, price axis flipped.
    fn unit_projection() -> Projection {
        let layout = LayoutConfig {
            width: 100.0,
            height: 100.0,
            padding: 0.0,
            candle_width: 1.0,
            candle_spacing: 0.0,
            grid_lines: 5,
        };
        let view = ViewTransform::new(ZoomConfig::default(), 0.0);
        Projection::new(&layout, &view, (0.0, 100.0))
    }

    fn store() -> AnnotationStore {
        AnnotationStore::new(Box::new(MemoryStore::new()), "lines", LineStyle::default())
    }

    fn draw(store: &mut AnnotationStore, from: (f64, f64), to: (f64, f64)) {
        let p = unit_projection();
        store.begin_line(DVec2::new(from.0, from.1), &p);
        store.update_line(DVec2::new(to.0, to.1), &p);
        store.commit_line();
    }

    #[test]
    fn begin_is_ignored_outside_draw_mode() {
        let mut s = store();
        assert_eq!(s.begin_line(DVec2::ZERO, &unit_projection()), BeginLine::Ignored);
        assert!(!s.commit_line());
        assert!(s.lines().is_empty());
    }

    #[test]
    fn commit_stores_data_space_coordinates() {
        let mut s = store();
        s.set_draw_mode(true, &StyleOverrides::default());
        draw(&mut s, (10.0, 90.0), (30.0, 70.0));
        let line = &s.lines()[0];
        assert_eq!(line.start(), DVec2::new(10.0, 10.0));
        assert_eq!(line.end(), DVec2::new(30.0, 30.0));
        assert!(s.current_line().is_none());
    }

    #[test]
    fn hit_test_uses_pixel_threshold() {
        let mut s = store();
        s.set_draw_mode(true, &StyleOverrides::default());
        // data (0,0) -> (100,0) sits on the bottom edge
        draw(&mut s, (0.0, 100.0), (100.0, 100.0));
        let p = unit_projection();
        assert_eq!(s.hit_test(p.data_to_screen(DVec2::new(50.0, 3.0)), &p, 5.0), Some(0));
        assert_eq!(s.hit_test(p.data_to_screen(DVec2::new(50.0, 10.0)), &p, 5.0), None);
    }

    #[test]
    fn hit_test_returns_first_in_insertion_order() {
        let mut s = store();
        s.set_draw_mode(true, &StyleOverrides::default());
        draw(&mut s, (0.0, 50.0), (100.0, 50.0));
        draw(&mut s, (0.0, 51.0), (100.0, 51.0));
        assert_eq!(s.hit_test(DVec2::new(40.0, 51.0), &unit_projection(), 5.0), Some(0));
    }

    #[test]
    fn commit_after_undo_drops_redo_history() {
        let mut s = store();
        s.set_draw_mode(true, &StyleOverrides::default());
        draw(&mut s, (0.0, 0.0), (1.0, 1.0));
        assert!(s.undo());
        draw(&mut s, (5.0, 5.0), (6.0, 6.0));
        assert!(s.undo_stack().is_empty());
        assert!(!s.redo());
        assert_eq!(s.lines().len(), 1);
    }

    #[test]
    fn style_change_restyles_line_in_progress_only() {
        let mut s = store();
        s.set_draw_mode(true, &StyleOverrides::default());
        draw(&mut s, (0.0, 0.0), (1.0, 1.0));
        s.begin_line(DVec2::new(2.0, 2.0), &unit_projection());
        s.set_style(&StyleOverrides::default().dash(DashStyle::Dotted).color("#ff0000"));
        assert_eq!(s.current_line().unwrap().style.dash, DashStyle::Dotted);
        assert_eq!(s.lines()[0].style.dash, DashStyle::Solid);
        assert_eq!(s.default_style().color, "#ff0000");
    }

    #[test]
    fn disabling_draw_mode_drops_current_line() {
        let mut s = store();
        s.set_draw_mode(true, &StyleOverrides::default());
        s.begin_line(DVec2::new(2.0, 2.0), &unit_projection());
        s.set_draw_mode(false, &StyleOverrides::default());
        assert!(!s.is_drawing());
        assert!(!s.commit_line());
    }

    #[test]
    fn redraw_hook_runs_on_mutations() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut s = store();
        let c = calls.clone();
        s.set_on_update(Arc::new(move || {
            c.fetch_add(1, Ordering::SeqCst);
        }));
        s.set_draw_mode(true, &StyleOverrides::default()); // 1
        draw(&mut s, (0.0, 0.0), (3.0, 3.0)); // update + commit = 3
        s.undo(); // 4
        s.redo(); // 5
        assert_eq!(calls.load(Ordering::SeqCst), 5);
    }

    #[test]
    fn corrupt_storage_falls_back_to_empty() {
        let mut backend = MemoryStore::new();
        backend.set("lines", "{not json").unwrap();
        let mut s = AnnotationStore::new(Box::new(backend), "lines", LineStyle::default());
        assert!(s.lines().is_empty());
        assert!(matches!(s.take_storage_error(), Some(StorageError::Corrupt { .. })));
        assert!(s.take_storage_error().is_none());
    }

    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn set(&mut self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Write {
                key: key.to_string(),
                message: "disk full".into(),
            })
        }
    }

    #[test]
    fn save_failure_keeps_mutation() {
        let mut s = AnnotationStore::new(Box::new(FailingStore), "lines", LineStyle::default());
        s.set_draw_mode(true, &StyleOverrides::default());
        draw(&mut s, (0.0, 0.0), (3.0, 3.0));
        assert_eq!(s.lines().len(), 1);
        assert!(matches!(s.take_storage_error(), Some(StorageError::Write { .. })));
    }
}
