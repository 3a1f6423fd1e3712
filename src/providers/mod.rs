//! Positioning subsystem seam
//!
//! A [`FixProvider`] is the raw acquisition surface a location source
//! adapts: a cached last-known fix plus a blocking pull on the stream of
//! new fixes. Sources own the start/stop and callback semantics; providers
//! only produce points.

use crate::core::types::GeoPoint;
use crate::error::Result;
use std::time::Duration;

mod scripted;
mod sim;

pub use scripted::ScriptedProvider;
pub use sim::SimulatedProvider;

/// Raw positioning subsystem behind a location source
pub trait FixProvider: Send {
    /// Most recent fix the subsystem has cached, if any
    fn last_known(&mut self) -> Result<Option<GeoPoint>>;

    /// Block up to `timeout` for the next fix; `Ok(None)` on timeout
    fn recv_fix(&mut self, timeout: Duration) -> Result<Option<GeoPoint>>;
}
