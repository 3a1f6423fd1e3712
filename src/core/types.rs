//! Core data types for locations, routes, camera state, and permissions.
//!
//! Key types for source implementers:
//! - [`GeoPoint`]: immutable (latitude, longitude) value
//! - [`LocationUpdate`]: a single fix delivered to the update callback
//! - [`SourceKind`]: which acquisition strategy produced a fix

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Immutable geographic point in WGS84 degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    /// Create a new point from latitude/longitude degrees
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

/// Acquisition strategy that produced a fix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// One-shot last-known fix from the platform location manager
    Manager,
    /// Continuous high-accuracy stream from the fused provider
    Fused,
    /// First-fix trigger plus passive follow from the map overlay helper
    Overlay,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::Manager => write!(f, "manager"),
            SourceKind::Fused => write!(f, "fused"),
            SourceKind::Overlay => write!(f, "overlay"),
        }
    }
}

/// One location fix produced by a source, consumed once by map sync
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationUpdate {
    pub point: GeoPoint,
    pub source: SourceKind,
    /// Microseconds since UNIX epoch at delivery time
    pub timestamp_us: u64,
}

impl LocationUpdate {
    /// Create an update stamped with the current time
    pub fn now(point: GeoPoint, source: SourceKind) -> Self {
        Self {
            point,
            source,
            timestamp_us: now_micros(),
        }
    }
}

/// Current wall-clock time in microseconds since UNIX epoch
pub fn now_micros() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_micros() as u64)
        .unwrap_or(0)
}

/// Ordered path between two endpoints; always holds at least two points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePath {
    points: Vec<GeoPoint>,
}

impl RoutePath {
    /// Build a path from an ordered point sequence
    ///
    /// Fails unless the sequence has at least two points (origin and
    /// destination may coincide for a degenerate zero-length path).
    pub fn new(points: Vec<GeoPoint>) -> Result<Self> {
        if points.len() < 2 {
            return Err(Error::InvalidParameter(format!(
                "route path needs at least 2 points, got {}",
                points.len()
            )));
        }
        Ok(Self { points })
    }

    /// Direct path holding exactly the two endpoints
    pub fn from_endpoints(origin: GeoPoint, destination: GeoPoint) -> Self {
        Self {
            points: vec![origin, destination],
        }
    }

    pub fn origin(&self) -> GeoPoint {
        self.points[0]
    }

    pub fn destination(&self) -> GeoPoint {
        self.points[self.points.len() - 1]
    }

    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        false // invariant: never fewer than two points
    }
}

/// Map camera position; mutated only by the event-loop owner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    pub center: GeoPoint,
    pub zoom: f64,
}

impl CameraState {
    pub fn new(center: GeoPoint, zoom: f64) -> Self {
        Self { center, zoom }
    }
}

/// Runtime permissions the host can grant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    FineLocation,
    CoarseLocation,
}

/// Outcome of a permission request; moves from Unknown at most once per run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionState {
    Unknown,
    Granted,
    Denied,
}
