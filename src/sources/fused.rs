//! Push-based location source over the fused provider
//!
//! `start()` spawns a reader thread that pulls the provider's fix stream
//! and invokes the callback for every new fix until `stop()`.

use super::{LocationSource, UpdateCallback, POLL_TIMEOUT};
use crate::core::types::{LocationUpdate, Permission, SourceKind};
use crate::error::Result;
use crate::permission::PermissionGate;
use crate::providers::FixProvider;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

/// Continuous high-accuracy stream source
pub struct FusedSource {
    provider: Arc<Mutex<Box<dyn FixProvider>>>,
    gate: Arc<PermissionGate>,
    active: Arc<AtomicBool>,
}

impl FusedSource {
    pub fn new(provider: Box<dyn FixProvider>, gate: Arc<PermissionGate>) -> Self {
        Self {
            provider: Arc::new(Mutex::new(provider)),
            gate,
            active: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl LocationSource for FusedSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Fused
    }

    fn start(&mut self, on_update: UpdateCallback) -> Result<()> {
        self.gate.ensure_granted(Permission::FineLocation)?;
        if self.is_active() {
            return Ok(());
        }
        self.active.store(true, Ordering::Relaxed);

        let provider = Arc::clone(&self.provider);
        let active = Arc::clone(&self.active);

        thread::Builder::new()
            .name("fused-location".to_string())
            .spawn(move || {
                log::debug!("fused source: reader thread started");
                while active.load(Ordering::Relaxed) {
                    let fix = provider.lock().recv_fix(POLL_TIMEOUT);
                    match fix {
                        Ok(Some(point)) => {
                            // Re-check right before dispatch so a stop()
                            // during the pull drops the update
                            if !active.load(Ordering::Relaxed) {
                                break;
                            }
                            on_update(LocationUpdate::now(point, SourceKind::Fused));
                        }
                        Ok(None) => {} // timeout, loop re-checks the flag
                        Err(e) => {
                            log::warn!("fused source: provider error: {e}");
                            thread::sleep(POLL_TIMEOUT);
                        }
                    }
                }
                log::debug!("fused source: reader thread stopped");
            })?;

        Ok(())
    }

    fn stop(&mut self) {
        self.active.store(false, Ordering::Relaxed);
    }

    fn is_active(&self) -> bool {
        self.active.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::GeoPoint;
    use crate::error::Error;
    use crate::permission::StaticPermissionHost;
    use crate::providers::ScriptedProvider;
    use crossbeam_channel::unbounded;
    use std::time::Duration;

    fn granted_gate() -> Arc<PermissionGate> {
        let gate = PermissionGate::new(Arc::new(StaticPermissionHost::granted()));
        gate.request_if_needed(Permission::FineLocation, |_| {});
        Arc::new(gate)
    }

    fn collecting_callback() -> (UpdateCallback, crossbeam_channel::Receiver<LocationUpdate>) {
        let (tx, rx) = unbounded();
        let callback: UpdateCallback = Arc::new(move |update| {
            let _ = tx.send(update);
        });
        (callback, rx)
    }

    #[test]
    fn test_start_without_grant_fails_with_no_updates() {
        let gate = Arc::new(PermissionGate::new(Arc::new(StaticPermissionHost::denying())));
        let provider = ScriptedProvider::new();
        provider.inject_fix(GeoPoint::new(1.0, 1.0));

        let mut source = FusedSource::new(Box::new(provider), gate);
        let (callback, rx) = collecting_callback();

        assert!(matches!(source.start(callback), Err(Error::PermissionMissing)));
        assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());
    }

    #[test]
    fn test_stream_delivers_every_fix() {
        let provider = ScriptedProvider::new();
        let handle = provider.clone();
        let mut source = FusedSource::new(Box::new(provider), granted_gate());
        let (callback, rx) = collecting_callback();

        source.start(callback).unwrap();
        let a = GeoPoint::new(19.122104, 96.009651);
        let b = GeoPoint::new(19.122500, 96.010000);
        handle.inject_fix(a);
        handle.inject_fix(b);

        let first = rx.recv_timeout(Duration::from_secs(1)).unwrap();
        let second = rx.recv_timeout(Duration::from_secs(1)).unwrap();
        assert_eq!(first.point, a);
        assert_eq!(second.point, b);
        assert_eq!(first.source, SourceKind::Fused);

        source.stop();
    }

    #[test]
    fn test_late_fix_after_stop_is_dropped() {
        let provider = ScriptedProvider::new();
        let handle = provider.clone();
        let mut source = FusedSource::new(Box::new(provider), granted_gate());
        let (callback, rx) = collecting_callback();

        source.start(callback).unwrap();
        handle.inject_fix(GeoPoint::new(1.0, 1.0));
        rx.recv_timeout(Duration::from_secs(1)).unwrap();

        source.stop();
        // Give the reader thread time to observe the flag
        std::thread::sleep(Duration::from_millis(50));

        handle.inject_fix(GeoPoint::new(2.0, 2.0));
        assert!(rx.recv_timeout(Duration::from_millis(300)).is_err());
        assert!(!source.is_active());
    }

    #[test]
    fn test_stop_is_idempotent() {
        let provider = ScriptedProvider::new();
        let mut source = FusedSource::new(Box::new(provider), granted_gate());
        let (callback, _rx) = collecting_callback();

        source.start(callback).unwrap();
        source.stop();
        source.stop();
        assert!(!source.is_active());
    }
}
