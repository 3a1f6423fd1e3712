//! Command-recording map widget for unit testing

use super::widget::{MapWidget, MarkerSpec, OverlayId, PolylineStyle};
use crate::core::types::GeoPoint;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Widget double that records every command it receives
///
/// Clones share state, so a test can keep a handle while the widget
/// itself is boxed into [`super::MapSync`].
#[derive(Clone)]
pub struct RecordingWidget {
    inner: Arc<Mutex<RecordingInner>>,
}

#[derive(Default)]
struct RecordingInner {
    next_id: OverlayId,
    center: Option<GeoPoint>,
    zoom: Option<f64>,
    follow: bool,
    markers: HashMap<OverlayId, MarkerSpec>,
    polylines: HashMap<OverlayId, (Vec<GeoPoint>, PolylineStyle)>,
    set_center_count: u32,
    set_zoom_count: u32,
    move_marker_count: u32,
    invalidate_count: u32,
}

impl RecordingWidget {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(RecordingInner::default())),
        }
    }

    pub fn center(&self) -> Option<GeoPoint> {
        self.inner.lock().center
    }

    pub fn zoom(&self) -> Option<f64> {
        self.inner.lock().zoom
    }

    pub fn follow_enabled(&self) -> bool {
        self.inner.lock().follow
    }

    pub fn marker(&self, id: OverlayId) -> Option<MarkerSpec> {
        self.inner.lock().markers.get(&id).cloned()
    }

    /// Markers currently on the map, unordered
    pub fn markers(&self) -> Vec<MarkerSpec> {
        self.inner.lock().markers.values().cloned().collect()
    }

    /// Polylines currently on the map, unordered
    pub fn polylines(&self) -> Vec<(Vec<GeoPoint>, PolylineStyle)> {
        self.inner.lock().polylines.values().cloned().collect()
    }

    pub fn set_center_count(&self) -> u32 {
        self.inner.lock().set_center_count
    }

    pub fn set_zoom_count(&self) -> u32 {
        self.inner.lock().set_zoom_count
    }

    pub fn move_marker_count(&self) -> u32 {
        self.inner.lock().move_marker_count
    }

    pub fn invalidate_count(&self) -> u32 {
        self.inner.lock().invalidate_count
    }
}

impl Default for RecordingWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl MapWidget for RecordingWidget {
    fn set_center(&mut self, center: GeoPoint) {
        let mut inner = self.inner.lock();
        inner.center = Some(center);
        inner.set_center_count += 1;
    }

    fn set_zoom(&mut self, zoom: f64) {
        let mut inner = self.inner.lock();
        inner.zoom = Some(zoom);
        inner.set_zoom_count += 1;
    }

    fn add_marker(&mut self, marker: MarkerSpec) -> OverlayId {
        let mut inner = self.inner.lock();
        inner.next_id += 1;
        let id = inner.next_id;
        inner.markers.insert(id, marker);
        id
    }

    fn move_marker(&mut self, id: OverlayId, position: GeoPoint) {
        let mut inner = self.inner.lock();
        if let Some(marker) = inner.markers.get_mut(&id) {
            marker.position = position;
        }
        inner.move_marker_count += 1;
    }

    fn remove_overlay(&mut self, id: OverlayId) {
        let mut inner = self.inner.lock();
        inner.markers.remove(&id);
        inner.polylines.remove(&id);
    }

    fn add_polyline(&mut self, points: Vec<GeoPoint>, style: PolylineStyle) -> OverlayId {
        let mut inner = self.inner.lock();
        inner.next_id += 1;
        let id = inner.next_id;
        inner.polylines.insert(id, (points, style));
        id
    }

    fn set_follow(&mut self, enabled: bool) {
        self.inner.lock().follow = enabled;
    }

    fn overlay_count(&self) -> usize {
        let inner = self.inner.lock();
        inner.markers.len() + inner.polylines.len()
    }

    fn invalidate(&mut self) {
        self.inner.lock().invalidate_count += 1;
    }
}
