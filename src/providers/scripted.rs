//! Scripted fix provider for unit testing and replay

use super::FixProvider;
use crate::core::types::GeoPoint;
use crate::error::Result;
use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

/// Channel-fed provider; fixes are injected by the test harness
#[derive(Clone)]
pub struct ScriptedProvider {
    tx: Sender<GeoPoint>,
    rx: Receiver<GeoPoint>,
    last_known: Arc<Mutex<Option<GeoPoint>>>,
}

impl ScriptedProvider {
    /// Create a provider with no cached fix and an empty stream
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self {
            tx,
            rx,
            last_known: Arc::new(Mutex::new(None)),
        }
    }

    /// Queue a fix on the stream
    pub fn inject_fix(&self, point: GeoPoint) {
        let _ = self.tx.send(point);
    }

    /// Seed the cached last-known fix without touching the stream
    pub fn set_last_known(&self, point: GeoPoint) {
        *self.last_known.lock() = Some(point);
    }
}

impl Default for ScriptedProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl FixProvider for ScriptedProvider {
    fn last_known(&mut self) -> Result<Option<GeoPoint>> {
        Ok(*self.last_known.lock())
    }

    fn recv_fix(&mut self, timeout: Duration) -> Result<Option<GeoPoint>> {
        match self.rx.recv_timeout(timeout) {
            Ok(point) => {
                *self.last_known.lock() = Some(point);
                Ok(Some(point))
            }
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Ok(None),
        }
    }
}
