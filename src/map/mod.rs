//! Map widget command surface and synchronization
//!
//! - [`widget::MapWidget`]: trait over the embedded map view (camera,
//!   markers, polylines); the widget owns tiles, rendering, and gestures
//! - [`sync::MapSync`]: translates location and gesture events into
//!   widget commands; sole owner of the camera state

pub mod console;
pub mod recording;
pub mod sync;
pub mod widget;

pub use console::ConsoleWidget;
pub use recording::RecordingWidget;
pub use sync::{MapSync, MapSyncConfig};
pub use widget::{MapWidget, MarkerAnchor, MarkerSpec, OverlayId, PolylineStyle};
