//! candle_canvas: price charts with zoom/pan and persistent line annotations.

pub mod annotation_store;
pub mod chart;
pub mod data_types;
pub mod error;
pub mod geometry;
#[cfg(feature = "gpui")]
pub mod gpui_backend;
pub mod input;
pub mod plot_types;
pub mod rendering;
pub mod scales;
pub mod storage;
pub mod surface;
pub mod theme;
pub mod transform;
pub mod view_transform;

pub use annotation_store::{AnnotationStore, BeginLine, RedrawHook};
pub use chart::{Chart, SharedChart};
pub use data_types::{
    ChartConfig, DashStyle, DataPoint, LineAnnotation, LineStyle, OhlcRecord, PriceSeries, StyleOverrides,
    ZoomAxis,
};
pub use error::{ChartError, StorageError};
pub use input::{InteractionState, PointerEvent, WheelEvent};
pub use plot_types::{ChartVariant, ShapeMapper};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use surface::{DrawCommand, DrawList, DrawingSurface, Rect, TextAnchor};
pub use transform::Projection;
pub use view_transform::ViewTransform;
