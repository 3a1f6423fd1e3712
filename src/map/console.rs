//! Log-backed map widget for headless runs
//!
//! Stands in for the embedded map view in the demo daemon: every command
//! is logged, camera zoom is clamped to the configured bounds, and overlay
//! bookkeeping is kept so counts stay meaningful.

use super::widget::{MapWidget, MarkerSpec, OverlayId, PolylineStyle};
use crate::core::types::GeoPoint;
use std::collections::HashSet;

/// Map widget that renders to the log
pub struct ConsoleWidget {
    min_zoom: f64,
    max_zoom: f64,
    next_id: OverlayId,
    overlays: HashSet<OverlayId>,
}

impl ConsoleWidget {
    pub fn new(min_zoom: f64, max_zoom: f64) -> Self {
        Self {
            min_zoom,
            max_zoom,
            next_id: 0,
            overlays: HashSet::new(),
        }
    }

    fn allocate(&mut self) -> OverlayId {
        self.next_id += 1;
        self.overlays.insert(self.next_id);
        self.next_id
    }
}

impl MapWidget for ConsoleWidget {
    fn set_center(&mut self, center: GeoPoint) {
        log::info!("map: center -> {center}");
    }

    fn set_zoom(&mut self, zoom: f64) {
        let clamped = zoom.clamp(self.min_zoom, self.max_zoom);
        if clamped != zoom {
            log::debug!("map: zoom {zoom} clamped to {clamped}");
        }
        log::info!("map: zoom -> {clamped}");
    }

    fn add_marker(&mut self, marker: MarkerSpec) -> OverlayId {
        let id = self.allocate();
        match &marker.title {
            Some(title) => log::info!("map: marker #{id} \"{title}\" at {}", marker.position),
            None => log::info!("map: marker #{id} at {}", marker.position),
        }
        id
    }

    fn move_marker(&mut self, id: OverlayId, position: GeoPoint) {
        log::debug!("map: marker #{id} -> {position}");
    }

    fn remove_overlay(&mut self, id: OverlayId) {
        if self.overlays.remove(&id) {
            log::debug!("map: overlay #{id} removed");
        }
    }

    fn add_polyline(&mut self, points: Vec<GeoPoint>, style: PolylineStyle) -> OverlayId {
        let id = self.allocate();
        log::info!(
            "map: polyline #{id} with {} points (width {}, color {:#010x})",
            points.len(),
            style.width,
            style.color
        );
        id
    }

    fn set_follow(&mut self, enabled: bool) {
        log::info!("map: follow {}", if enabled { "on" } else { "off" });
    }

    fn overlay_count(&self) -> usize {
        self.overlays.len()
    }
}
