//! Chart Model
//!
//! `Chart` is the single owner of everything a chart instance mutates: the
//! view transform (through its interaction controller), the annotation store
//! and the renderer configuration. Hosts construct it explicitly, feed it
//! pointer/wheel events and call [`Chart::draw`] with their drawing surface.
//!
//! All handlers run synchronously. Hosts that touch a chart from more than one
//! thread wrap it in a [`SharedChart`] so reads during a redraw see a
//! consistent transform and annotation set.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::annotation_store::{AnnotationStore, RedrawHook};
use crate::data_types::{ChartConfig, LineAnnotation, LineStyle, PriceSeries, StyleOverrides};
use crate::error::{ChartError, StorageError};
use crate::input::{InteractionController, InteractionState, PointerEvent, WheelEvent};
use crate::plot_types::ChartVariant;
use crate::rendering::ChartRenderer;
use crate::storage::KeyValueStore;
use crate::surface::DrawingSurface;
use crate::transform::{PlotFrame, Projection};
use crate::view_transform::ViewTransform;

pub type SharedChart = Arc<Mutex<Chart>>;

pub struct Chart {
    config: ChartConfig,
    series: PriceSeries,
    controller: InteractionController,
    annotations: AnnotationStore,
    renderer: ChartRenderer,
    redraw: Option<RedrawHook>,
}

fn frame<'a>(config: &'a ChartConfig, series: &PriceSeries) -> PlotFrame<'a> {
    PlotFrame {
        layout: &config.layout,
        price_range: series.price_range().unwrap_or((0.0, 1.0)),
    }
}

impl Chart {
    /// Builds a chart over `series`, loading saved annotations from `storage`.
    ///
    /// Fails with [`ChartError::Initialization`] when the surface size is
    /// unusable, the series is empty or the variant cannot draw it.
    pub fn new(config: ChartConfig, series: PriceSeries, storage: Box<dyn KeyValueStore>) -> Result<Self, ChartError> {
        config.validate()?;
        if series.is_empty() {
            return Err(ChartError::Initialization("price series is empty".into()));
        }
        config.variant.check(&series)?;

        let view = ViewTransform::new(config.zoom.clone(), config.layout.padding);
        let controller = InteractionController::new(view, config.hit_threshold);
        let default_style = LineStyle::default().with_overrides(&config.default_style);
        let annotations = AnnotationStore::new(storage, config.storage_key.clone(), default_style);
        let renderer = ChartRenderer::new(config.variant.mapper());

        debug!(
            points = series.len(),
            annotations = annotations.lines().len(),
            variant = ?config.variant,
            "chart created"
        );

        Ok(Self {
            config,
            series,
            controller,
            annotations,
            renderer,
            redraw: None,
        })
    }

    pub fn into_shared(self) -> SharedChart {
        Arc::new(Mutex::new(self))
    }

    /// Installs the callback run whenever the chart needs repainting.
    ///
    /// The hook runs synchronously inside the mutating call, so for a
    /// [`SharedChart`] it runs with the lock held. It must not lock the chart
    /// again (that deadlocks); set a flag or schedule a repaint instead and
    /// call [`Chart::draw`] after the lock is released.
    pub fn set_redraw_hook(&mut self, hook: RedrawHook) {
        self.annotations.set_on_update(hook.clone());
        self.redraw = Some(hook);
    }

    fn request_redraw(&self) {
        if let Some(hook) = &self.redraw {
            hook();
        }
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn series(&self) -> &PriceSeries {
        &self.series
    }

    pub fn view(&self) -> &ViewTransform {
        self.controller.view()
    }

    pub fn annotations(&self) -> &AnnotationStore {
        &self.annotations
    }

    pub fn lines(&self) -> &[LineAnnotation] {
        self.annotations.lines()
    }

    pub fn interaction_state(&self) -> InteractionState {
        self.controller.state()
    }

    /// The line under the pointer while a select gesture is in progress.
    pub fn selected_line(&self) -> Option<&LineAnnotation> {
        match self.controller.state() {
            InteractionState::Selecting { line } => self.annotations.lines().get(line),
            _ => None,
        }
    }

    pub fn take_storage_error(&mut self) -> Option<StorageError> {
        self.annotations.take_storage_error()
    }

    /// Current data ↔ screen mapping.
    pub fn projection(&self) -> Projection {
        frame(&self.config, &self.series).project(self.controller.view())
    }

    pub fn set_draw_mode(&mut self, enabled: bool, overrides: &StyleOverrides) {
        debug!(enabled, "draw mode");
        self.annotations.set_draw_mode(enabled, overrides);
    }

    pub fn set_line_style(&mut self, overrides: &StyleOverrides) {
        self.annotations.set_style(overrides);
    }

    pub fn undo(&mut self) -> bool {
        self.annotations.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.annotations.redo()
    }

    /// Switches the chart variant. The current one is kept on error.
    pub fn set_variant(&mut self, variant: ChartVariant) -> Result<(), ChartError> {
        variant.check(&self.series)?;
        self.renderer.set_mapper(variant.mapper());
        self.config.variant = variant;
        self.request_redraw();
        Ok(())
    }

    /// Adopts a new surface size. The previous size is kept on error.
    pub fn resize(&mut self, width: f64, height: f64) -> Result<(), ChartError> {
        let next = self.config.clone().with_size(width, height);
        next.validate()?;
        self.config = next;
        self.request_redraw();
        Ok(())
    }

    pub fn reset_view(&mut self) {
        self.controller.view_mut().reset();
        self.request_redraw();
    }

    pub fn pointer_down(&mut self, event: PointerEvent) {
        let frame = frame(&self.config, &self.series);
        if self.controller.pointer_down(event, &mut self.annotations, &frame) {
            self.request_redraw();
        }
    }

    pub fn pointer_move(&mut self, event: PointerEvent) {
        let frame = frame(&self.config, &self.series);
        if self.controller.pointer_move(event, &mut self.annotations, &frame) {
            self.request_redraw();
        }
    }

    pub fn pointer_up(&mut self, event: PointerEvent) {
        if self.controller.pointer_up(event, &mut self.annotations) {
            self.request_redraw();
        }
    }

    pub fn wheel(&mut self, event: WheelEvent) {
        if self.controller.wheel(event) {
            self.request_redraw();
        }
    }

    /// Repaints the whole chart, annotations included, from the current state.
    pub fn draw(&self, surface: &mut dyn DrawingSurface) {
        let projection = self.projection();
        self.renderer.render(
            surface,
            &self.series,
            &projection,
            &self.config.layout,
            &self.config.theme,
            &self.annotations,
        );
    }
}

impl std::fmt::Debug for Chart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chart")
            .field("points", &self.series.len())
            .field("view", self.controller.view())
            .field("state", &self.controller.state())
            .field("annotations", &self.annotations)
            .finish()
    }
}
