//! Map widget command surface
//!
//! The embedded map view is abstracted as a command sink: camera moves,
//! marker and polyline overlays, follow mode, redraw. Tile fetching,
//! rendering and gesture recognition belong to the widget implementation.

use crate::core::types::GeoPoint;

/// Opaque handle to an overlay added to the widget
pub type OverlayId = u64;

/// Where a marker icon is anchored relative to its position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerAnchor {
    Center,
    /// Pin-style marker: icon tip sits on the position
    BottomCenter,
}

/// Marker overlay description
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSpec {
    pub position: GeoPoint,
    pub title: Option<String>,
    pub anchor: MarkerAnchor,
}

impl MarkerSpec {
    /// Center-anchored marker without a title
    pub fn at(position: GeoPoint) -> Self {
        Self {
            position,
            title: None,
            anchor: MarkerAnchor::Center,
        }
    }

    pub fn titled(position: GeoPoint, title: &str) -> Self {
        Self {
            position,
            title: Some(title.to_string()),
            anchor: MarkerAnchor::Center,
        }
    }

    pub fn anchored(mut self, anchor: MarkerAnchor) -> Self {
        self.anchor = anchor;
        self
    }
}

/// Polyline stroke style
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolylineStyle {
    /// Stroke width in pixels
    pub width: f32,
    /// ARGB color
    pub color: u32,
}

/// Command surface of the embedded map view
pub trait MapWidget: Send {
    /// Center the camera on a point
    fn set_center(&mut self, center: GeoPoint);

    /// Set the camera zoom level
    fn set_zoom(&mut self, zoom: f64);

    /// Add a marker overlay, returning its handle
    fn add_marker(&mut self, marker: MarkerSpec) -> OverlayId;

    /// Reposition an existing marker
    fn move_marker(&mut self, id: OverlayId, position: GeoPoint);

    /// Remove a marker or polyline overlay
    fn remove_overlay(&mut self, id: OverlayId);

    /// Add a polyline overlay, returning its handle
    fn add_polyline(&mut self, points: Vec<GeoPoint>, style: PolylineStyle) -> OverlayId;

    /// Enable or disable auto-centering on the device location
    fn set_follow(&mut self, enabled: bool);

    /// Number of overlays currently on the map
    fn overlay_count(&self) -> usize;

    /// Force a redraw
    fn invalidate(&mut self) {}
}
