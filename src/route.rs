//! Route planning seam
//!
//! [`StraightLinePlanner`] is a placeholder: it draws the route as a
//! direct line. Real deployments swap in a routing-service client behind
//! the same trait; the two-points-in, ordered-path-out contract is stable
//! so map synchronization never changes.

use crate::core::types::{GeoPoint, RoutePath};

/// Computes a path between two endpoints
pub trait RoutePlanner: Send {
    /// Ordered path from `origin` to `destination`
    fn compute(&self, origin: GeoPoint, destination: GeoPoint) -> RoutePath;
}

/// Placeholder planner returning exactly `[origin, destination]`
pub struct StraightLinePlanner;

impl RoutePlanner for StraightLinePlanner {
    fn compute(&self, origin: GeoPoint, destination: GeoPoint) -> RoutePath {
        RoutePath::from_endpoints(origin, destination)
    }
}
