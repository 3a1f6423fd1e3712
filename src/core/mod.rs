//! Core value types shared by sources, map synchronization, and routing.
//!
//! - [`types::GeoPoint`]: immutable latitude/longitude pair
//! - [`types::LocationUpdate`]: one fix produced by a location source
//! - [`types::RoutePath`]: ordered point sequence between two endpoints

pub mod types;
