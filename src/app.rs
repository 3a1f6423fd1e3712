//! Application orchestration for the waymark daemon
//!
//! Wires the permission gate, the configured location source, and map
//! synchronization together, then runs the event loop until shutdown.

use crate::config::AppConfig;
use crate::core::types::{Permission, PermissionState};
use crate::error::{Error, Result};
use crate::map::{MapSync, MapSyncConfig, MapWidget};
use crate::permission::{PermissionGate, PermissionHost};
use crate::providers::FixProvider;
use crate::route::StraightLinePlanner;
use crate::sources::{create_source, LocationSource, UpdateCallback};
use crate::ui::{ui_channel, UiDispatcher, UiEvent};
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError};
use std::sync::Arc;
use std::time::Duration;

/// How long the loop waits for an event before re-checking shutdown
const EVENT_TIMEOUT: Duration = Duration::from_millis(100);

/// Main application: permission flow, location source, and map sync
pub struct App {
    gate: Arc<PermissionGate>,
    source: Box<dyn LocationSource>,
    sync: MapSync,
    dispatcher: UiDispatcher,
    events: Receiver<UiEvent>,
    /// Draw the demo route once after the first fix
    route_drawn: bool,
}

impl App {
    /// Build the application from configuration and its three seams
    pub fn new(
        config: &AppConfig,
        host: Arc<dyn PermissionHost>,
        provider: Box<dyn FixProvider>,
        widget: Box<dyn MapWidget>,
    ) -> Result<Self> {
        let gate = Arc::new(PermissionGate::new(host));
        let source = create_source(&config.source, provider, Arc::clone(&gate))?;
        log::info!("Location source: {}", source.kind());

        let sync = MapSync::new(
            widget,
            Box::new(StraightLinePlanner),
            MapSyncConfig::from_app_config(config)?,
        );

        let (dispatcher, events) = ui_channel();

        Ok(Self {
            gate,
            source,
            sync,
            dispatcher,
            events,
            route_drawn: false,
        })
    }

    /// Posting handle for gestures and the shutdown signal
    pub fn dispatcher(&self) -> UiDispatcher {
        self.dispatcher.clone()
    }

    /// Request permission, start the source, and run the event loop
    ///
    /// A denied permission is not an error: the map stays at its initial
    /// view and the loop still serves gesture events until shutdown.
    pub fn run(&mut self) -> Result<()> {
        if self.request_permission()? == PermissionState::Granted {
            let dispatcher = self.dispatcher.clone();
            let callback: UpdateCallback =
                Arc::new(move |update| dispatcher.post(UiEvent::Location(update)));
            self.source.start(callback)?;
            log::info!("Location source started");
        } else {
            log::warn!("Location permission denied; map stays at its initial view");
        }

        loop {
            match self.events.recv_timeout(EVENT_TIMEOUT) {
                Ok(UiEvent::Shutdown) => break,
                Ok(event) => self.handle_event(event),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }

        self.source.stop();
        log::info!("Location source stopped");
        Ok(())
    }

    fn request_permission(&self) -> Result<PermissionState> {
        let (tx, rx) = bounded(1);
        self.gate
            .request_if_needed(Permission::FineLocation, move |outcome| {
                let _ = tx.send(outcome);
            });
        rx.recv()
            .map_err(|_| Error::Other("permission request never resolved".to_string()))
    }

    fn handle_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::Location(update) => {
                // A stale update can still arrive right after stop();
                // drop it so torn-down state is never touched
                if !self.source.is_active() {
                    log::debug!("dropping update from stopped source");
                    return;
                }
                self.sync.on_location(&update);
                log::info!("{}", self.sync.readout());

                if !self.route_drawn {
                    self.sync.request_route_to_reference();
                    self.route_drawn = true;
                }
            }
            UiEvent::Tap(point) => self.sync.on_map_tap(point),
            UiEvent::RouteRequest => self.sync.request_route_to_reference(),
            UiEvent::Recenter => self.sync.recenter(),
            UiEvent::Shutdown => {}
        }
    }

    /// Map state, for inspection after the loop exits
    pub fn sync(&self) -> &MapSync {
        &self.sync
    }
}
