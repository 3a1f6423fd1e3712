//! Event-loop channel
//!
//! All map mutation happens on one consumer thread. Source reader threads,
//! gesture handlers, and the shutdown signal only post events here; the
//! application loop drains them in order. This is the redispatch boundary
//! for callbacks that originate off the event loop, such as the overlay
//! variant's first fix.

use crate::core::types::{GeoPoint, LocationUpdate};
use crossbeam_channel::{unbounded, Receiver, Sender};

/// Events consumed by the application loop
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// A fix arrived from the active location source
    Location(LocationUpdate),
    /// The user tapped the map
    Tap(GeoPoint),
    /// The user asked for the route to be drawn
    RouteRequest,
    /// The user asked to re-center on the current location
    Recenter,
    /// Stop the application loop
    Shutdown,
}

/// Posting half of the event channel; clone freely across threads
#[derive(Clone)]
pub struct UiDispatcher {
    tx: Sender<UiEvent>,
}

impl UiDispatcher {
    /// Queue an event for the application loop
    pub fn post(&self, event: UiEvent) {
        if self.tx.send(event).is_err() {
            log::debug!("event dropped: loop already gone");
        }
    }
}

/// Create the event channel
pub fn ui_channel() -> (UiDispatcher, Receiver<UiEvent>) {
    let (tx, rx) = unbounded();
    (UiDispatcher { tx }, rx)
}
