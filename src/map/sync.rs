//! Location-to-map synchronization
//!
//! [`MapSync`] owns the camera state and every overlay the application
//! puts on the map: the initial reference marker, the current-location
//! marker, the tap marker, and the route polyline. It is single-writer by
//! construction: all calls arrive on the event-loop thread.

use super::widget::{MapWidget, MarkerAnchor, MarkerSpec, OverlayId, PolylineStyle};
use crate::config::{parse_color, AppConfig};
use crate::core::types::{CameraState, GeoPoint, LocationUpdate, SourceKind};
use crate::error::Result;
use crate::route::RoutePlanner;

/// Camera targets and route styling for [`MapSync`]
#[derive(Debug, Clone)]
pub struct MapSyncConfig {
    pub initial_center: GeoPoint,
    pub initial_zoom: f64,
    pub tap_zoom: f64,
    /// Per-variant fix zoom; the values differ on purpose and stay
    /// configurable rather than unified
    pub manager_zoom: f64,
    pub fused_zoom: f64,
    pub overlay_zoom: f64,
    pub route_style: PolylineStyle,
}

impl MapSyncConfig {
    /// Build from application configuration (parses the route color)
    pub fn from_app_config(config: &AppConfig) -> Result<Self> {
        Ok(Self {
            initial_center: GeoPoint::new(config.map.initial_latitude, config.map.initial_longitude),
            initial_zoom: config.map.initial_zoom,
            tap_zoom: config.map.tap_zoom,
            manager_zoom: config.source.manager_zoom,
            fused_zoom: config.source.fused_zoom,
            overlay_zoom: config.source.overlay_zoom,
            route_style: PolylineStyle {
                width: config.map.route_width,
                color: parse_color(&config.map.route_color)?,
            },
        })
    }

    fn zoom_for(&self, kind: SourceKind) -> f64 {
        match kind {
            SourceKind::Manager => self.manager_zoom,
            SourceKind::Fused => self.fused_zoom,
            SourceKind::Overlay => self.overlay_zoom,
        }
    }
}

/// Translates location and gesture events into map widget commands
pub struct MapSync {
    widget: Box<dyn MapWidget>,
    planner: Box<dyn RoutePlanner>,
    config: MapSyncConfig,
    camera: CameraState,
    location_marker: Option<OverlayId>,
    tap_marker: Option<OverlayId>,
    route_overlay: Option<OverlayId>,
    last_fix: Option<GeoPoint>,
    last_source: Option<SourceKind>,
    tap_point: Option<GeoPoint>,
    follow_enabled: bool,
    readout: String,
}

impl MapSync {
    /// Set up the map: initial camera position plus the reference marker
    pub fn new(
        mut widget: Box<dyn MapWidget>,
        planner: Box<dyn RoutePlanner>,
        config: MapSyncConfig,
    ) -> Self {
        let camera = CameraState::new(config.initial_center, config.initial_zoom);
        widget.set_center(camera.center);
        widget.set_zoom(camera.zoom);
        widget.add_marker(MarkerSpec::titled(config.initial_center, "Initial Location"));

        Self {
            widget,
            planner,
            config,
            camera,
            location_marker: None,
            tap_marker: None,
            route_overlay: None,
            last_fix: None,
            last_source: None,
            tap_point: None,
            follow_enabled: false,
            readout: String::new(),
        }
    }

    /// Apply one location update: marker, camera, readout
    ///
    /// The marker is repositioned on every call; the camera is only
    /// touched when the center or the variant's target zoom actually
    /// changed.
    pub fn on_location(&mut self, update: &LocationUpdate) {
        let point = update.point;

        match self.location_marker {
            Some(id) => self.widget.move_marker(id, point),
            None => {
                let id = self
                    .widget
                    .add_marker(MarkerSpec::titled(point, "Current Location"));
                self.location_marker = Some(id);
            }
        }

        if update.source == SourceKind::Overlay && !self.follow_enabled {
            self.widget.set_follow(true);
            self.follow_enabled = true;
        }

        if self.camera.center != point {
            self.camera.center = point;
            self.widget.set_center(point);
        }

        let target_zoom = self.config.zoom_for(update.source);
        if self.camera.zoom != target_zoom {
            self.camera.zoom = target_zoom;
            self.widget.set_zoom(target_zoom);
        }

        self.last_fix = Some(point);
        self.last_source = Some(update.source);
        self.readout = format!(
            "Latitude: {}, Longitude: {}",
            point.latitude, point.longitude
        );
        log::debug!("location ({}): {point}", update.source);
        self.widget.invalidate();
    }

    /// Record a tap as the route reference point and mark it
    pub fn on_map_tap(&mut self, point: GeoPoint) {
        self.tap_point = Some(point);

        if let Some(id) = self.tap_marker.take() {
            self.widget.remove_overlay(id);
        }
        let id = self
            .widget
            .add_marker(MarkerSpec::at(point).anchored(MarkerAnchor::BottomCenter));
        self.tap_marker = Some(id);

        if self.camera.center != point {
            self.camera.center = point;
            self.widget.set_center(point);
        }
        if self.camera.zoom != self.config.tap_zoom {
            self.camera.zoom = self.config.tap_zoom;
            self.widget.set_zoom(self.config.tap_zoom);
        }

        log::debug!("map tap: {point}");
        self.widget.invalidate();
    }

    /// Draw the route between the endpoints, replacing any previous one
    ///
    /// Missing either endpoint is a silent no-op: the overlay list stays
    /// untouched.
    pub fn on_route_request(&mut self, origin: Option<GeoPoint>, destination: Option<GeoPoint>) {
        let (Some(origin), Some(destination)) = (origin, destination) else {
            log::debug!("route request ignored: missing endpoint");
            return;
        };

        let path = self.planner.compute(origin, destination);
        if let Some(id) = self.route_overlay.take() {
            self.widget.remove_overlay(id);
        }
        let id = self
            .widget
            .add_polyline(path.points().to_vec(), self.config.route_style);
        self.route_overlay = Some(id);

        log::info!("route drawn: {} -> {}", path.origin(), path.destination());
        self.widget.invalidate();
    }

    /// Route from the last fix to the tap point, falling back to the
    /// initial reference point
    pub fn request_route_to_reference(&mut self) {
        let destination = self.tap_point.or(Some(self.config.initial_center));
        self.on_route_request(self.last_fix, destination);
    }

    /// Re-center on the last fix (the "current location" button)
    ///
    /// Silent no-op before the first fix.
    pub fn recenter(&mut self) {
        let Some(point) = self.last_fix else {
            log::debug!("recenter ignored: no fix yet");
            return;
        };

        if self.camera.center != point {
            self.camera.center = point;
            self.widget.set_center(point);
        }
        let zoom = self
            .last_source
            .map(|kind| self.config.zoom_for(kind))
            .unwrap_or(self.config.tap_zoom);
        if self.camera.zoom != zoom {
            self.camera.zoom = zoom;
            self.widget.set_zoom(zoom);
        }
        self.widget.invalidate();
    }

    pub fn camera(&self) -> CameraState {
        self.camera
    }

    pub fn last_fix(&self) -> Option<GeoPoint> {
        self.last_fix
    }

    pub fn tap_point(&self) -> Option<GeoPoint> {
        self.tap_point
    }

    pub fn has_route(&self) -> bool {
        self.route_overlay.is_some()
    }

    /// Current "Latitude: …, Longitude: …" readout text
    pub fn readout(&self) -> &str {
        &self.readout
    }

    pub fn overlay_count(&self) -> usize {
        self.widget.overlay_count()
    }
}
