//! Push-based location source over the map's my-location overlay helper
//!
//! Emits the first available fix eagerly (cached last-known if present,
//! otherwise the first streamed fix), then keeps passively following the
//! stream. The first-fix callback runs on the reader thread, not the event
//! loop: consumers must redispatch before touching UI state.

use super::{LocationSource, UpdateCallback, POLL_TIMEOUT};
use crate::core::types::{LocationUpdate, Permission, SourceKind};
use crate::error::Result;
use crate::permission::PermissionGate;
use crate::providers::FixProvider;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

/// First-fix trigger plus passive follow source
pub struct OverlaySource {
    provider: Arc<Mutex<Box<dyn FixProvider>>>,
    gate: Arc<PermissionGate>,
    active: Arc<AtomicBool>,
}

impl OverlaySource {
    pub fn new(provider: Box<dyn FixProvider>, gate: Arc<PermissionGate>) -> Self {
        Self {
            provider: Arc::new(Mutex::new(provider)),
            gate,
            active: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl LocationSource for OverlaySource {
    fn kind(&self) -> SourceKind {
        SourceKind::Overlay
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
            .name("overlay-location".to_string())
            .spawn(move || {
                log::debug!("overlay source: waiting for first fix");

                // Eager path: a cached fix counts as the first fix
                let mut first_fix = match provider.lock().last_known() {
                    Ok(fix) => fix,
                    Err(e) => {
                        log::warn!("overlay source: provider error: {e}");
                        None
                    }
                };

                while first_fix.is_none() && active.load(Ordering::Relaxed) {
                    match provider.lock().recv_fix(POLL_TIMEOUT) {
                        Ok(Some(point)) => first_fix = Some(point),
                        Ok(None) => {}
                        Err(e) => {
                            log::warn!("overlay source: provider error: {e}");
                            thread::sleep(POLL_TIMEOUT);
                        }
                    }
                }

                let Some(point) = first_fix else {
                    // Stopped before any fix arrived
                    return;
                };
                if !active.load(Ordering::Relaxed) {
                    return;
                }
                log::info!("overlay source: first fix at {point}");
                on_update(LocationUpdate::now(point, SourceKind::Overlay));

                // Passive follow: keep the overlay centered on new fixes
                while active.load(Ordering::Relaxed) {
                    let fix = provider.lock().recv_fix(POLL_TIMEOUT);
                    match fix {
                        Ok(Some(point)) => {
                            if !active.load(Ordering::Relaxed) {
                                break;
                            }
                            on_update(LocationUpdate::now(point, SourceKind::Overlay));
                        }
                        Ok(None) => {}
                        Err(e) => {
                            log::warn!("overlay source: provider error: {e}");
                            thread::sleep(POLL_TIMEOUT);
                        }
                    }
                }
                log::debug!("overlay source: follow thread stopped");
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
        provider.set_last_known(GeoPoint::new(1.0, 1.0));

        let mut source = OverlaySource::new(Box::new(provider), gate);
        let (callback, rx) = collecting_callback();

        assert!(matches!(source.start(callback), Err(Error::PermissionMissing)));
        assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());
    }

    #[test]
    fn test_first_fix_emitted_eagerly_from_cache() {
        let provider = ScriptedProvider::new();
        let fix = GeoPoint::new(17.312240, 96.516172);
        provider.set_last_known(fix);

        let mut source = OverlaySource::new(Box::new(provider), granted_gate());
        let (callback, rx) = collecting_callback();
        source.start(callback).unwrap();

        let update = rx.recv_timeout(Duration::from_secs(1)).unwrap();
        assert_eq!(update.point, fix);
        assert_eq!(update.source, SourceKind::Overlay);
        source.stop();
    }

    #[test]
    fn test_first_fix_waits_for_stream_when_no_cache() {
        let provider = ScriptedProvider::new();
        let handle = provider.clone();
        let mut source = OverlaySource::new(Box::new(provider), granted_gate());
        let (callback, rx) = collecting_callback();

        source.start(callback).unwrap();
        assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());

        let fix = GeoPoint::new(19.122104, 96.009651);
        handle.inject_fix(fix);
        let update = rx.recv_timeout(Duration::from_secs(1)).unwrap();
        assert_eq!(update.point, fix);
        source.stop();
    }

    #[test]
    fn test_follow_continues_after_first_fix() {
        let provider = ScriptedProvider::new();
        let handle = provider.clone();
        provider.set_last_known(GeoPoint::new(1.0, 1.0));

        let mut source = OverlaySource::new(Box::new(provider), granted_gate());
        let (callback, rx) = collecting_callback();
        source.start(callback).unwrap();

        // First fix from cache
        rx.recv_timeout(Duration::from_secs(1)).unwrap();

        let next = GeoPoint::new(1.001, 1.001);
        handle.inject_fix(next);
        let update = rx.recv_timeout(Duration::from_secs(1)).unwrap();
        assert_eq!(update.point, next);
        source.stop();
    }

    #[test]
    fn test_stop_before_first_fix_emits_nothing() {
        let provider = ScriptedProvider::new();
        let handle = provider.clone();
        let mut source = OverlaySource::new(Box::new(provider), granted_gate());
        let (callback, rx) = collecting_callback();

        source.start(callback).unwrap();
        source.stop();
        std::thread::sleep(Duration::from_millis(50));

        handle.inject_fix(GeoPoint::new(1.0, 1.0));
        assert!(rx.recv_timeout(Duration::from_millis(300)).is_err());
    }
}
