//! Pull-based location source over the platform location manager
//!
//! Reads the provider's last-known fix once per `start()`; there is no
//! continuous stream. Callers re-invoke `start()` to refresh.

use super::{LocationSource, UpdateCallback};
use crate::core::types::{LocationUpdate, Permission, SourceKind};
use crate::error::Result;
use crate::permission::PermissionGate;
use crate::providers::FixProvider;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// One-shot last-known-fix source
pub struct ManagerSource {
    provider: Arc<Mutex<Box<dyn FixProvider>>>,
    gate: Arc<PermissionGate>,
    active: Arc<AtomicBool>,
}

impl ManagerSource {
    pub fn new(provider: Box<dyn FixProvider>, gate: Arc<PermissionGate>) -> Self {
        Self {
            provider: Arc::new(Mutex::new(provider)),
            gate,
            active: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl LocationSource for ManagerSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Manager
    }

    fn start(&mut self, on_update: UpdateCallback) -> Result<()> {
        self.gate.ensure_granted(Permission::FineLocation)?;
        self.active.store(true, Ordering::Relaxed);

        match self.provider.lock().last_known()? {
            Some(point) => {
                log::debug!("manager source: last-known fix at {point}");
                on_update(LocationUpdate::now(point, SourceKind::Manager));
            }
            None => {
                // No fix yet: stay silent, the caller may start() again later
                log::debug!("manager source: no last-known fix");
            }
        }
        Ok(())
    }

    fn stop(&mut self) {
        self.active.store(false, Ordering::Relaxed);
    }

    fn is_active(&self) -> bool {
        self.active.load(Ordering::Relaxed)
    }
}
