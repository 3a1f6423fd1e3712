//! Permission gating for location access
//!
//! [`PermissionGate`] wraps the host runtime's permission primitives as a
//! single-shot async capability check: already-granted permissions resolve
//! immediately, everything else gets exactly one system prompt per request,
//! with at most one retry prompt after a denial.

use crate::core::types::{Permission, PermissionState};
use crate::error::{Error, Result};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Prompts allowed per permission per run (initial ask plus one retry)
const MAX_PROMPTS: u32 = 2;

/// Host runtime permission primitives
///
/// Thin adapter surface over the OS: a synchronous grant check and a
/// single-completion prompt. The prompt callback is invoked exactly once
/// with the user's answer.
pub trait PermissionHost: Send + Sync {
    /// Current OS-level grant for the permission
    fn is_granted(&self, permission: Permission) -> bool;

    /// Show the system prompt and resolve once with the user's response
    fn prompt(&self, permission: Permission, on_result: Box<dyn FnOnce(bool) + Send>);
}

#[derive(Debug, Clone, Copy)]
struct GateEntry {
    state: PermissionState,
    prompts: u32,
}

impl Default for GateEntry {
    fn default() -> Self {
        Self {
            state: PermissionState::Unknown,
            prompts: 0,
        }
    }
}

/// Single-shot async permission check over a [`PermissionHost`]
pub struct PermissionGate {
    host: Arc<dyn PermissionHost>,
    entries: Arc<Mutex<HashMap<Permission, GateEntry>>>,
}

impl PermissionGate {
    /// Create a gate over the given host runtime adapter
    pub fn new(host: Arc<dyn PermissionHost>) -> Self {
        Self {
            host,
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Last observed outcome for the permission
    pub fn state(&self, permission: Permission) -> PermissionState {
        self.entries
            .lock()
            .get(&permission)
            .map(|e| e.state)
            .unwrap_or(PermissionState::Unknown)
    }

    /// Resolve the permission, prompting the user at most once
    ///
    /// Resolution order:
    /// 1. Host already grants: resolves `Granted` immediately, no prompt.
    /// 2. Prompt allowance exhausted (one ask plus one retry): resolves
    ///    `Denied` immediately.
    /// 3. Otherwise one host prompt; the outcome is recorded and passed to
    ///    `on_outcome` on the user's single response.
    pub fn request_if_needed<F>(&self, permission: Permission, on_outcome: F)
    where
        F: FnOnce(PermissionState) + Send + 'static,
    {
        if self.host.is_granted(permission) {
            self.entries.lock().entry(permission).or_default().state = PermissionState::Granted;
            on_outcome(PermissionState::Granted);
            return;
        }

        let may_prompt = {
            let mut entries = self.entries.lock();
            let entry = entries.entry(permission).or_default();
            if entry.prompts < MAX_PROMPTS {
                entry.prompts += 1;
                true
            } else {
                false
            }
        };
        if !may_prompt {
            log::debug!("{permission:?}: prompt allowance exhausted, resolving denied");
            on_outcome(PermissionState::Denied);
            return;
        }

        // Lock dropped before prompting: the host may resolve inline.
        let entries = Arc::clone(&self.entries);
        self.host.prompt(
            permission,
            Box::new(move |granted| {
                let state = if granted {
                    PermissionState::Granted
                } else {
                    log::warn!("{permission:?} denied by user");
                    PermissionState::Denied
                };
                entries.lock().entry(permission).or_default().state = state;
                on_outcome(state);
            }),
        );
    }

    /// Verify the permission is still granted right now
    ///
    /// Re-checks the live host grant so a revocation between the request
    /// and a source `start()` fails instead of silently emitting updates.
    pub fn ensure_granted(&self, permission: Permission) -> Result<()> {
        if self.state(permission) == PermissionState::Granted && self.host.is_granted(permission) {
            Ok(())
        } else {
            Err(Error::PermissionMissing)
        }
    }
}

/// Scriptable permission host for tests and hardware-free runs
///
/// Holds a current grant flag and a fixed prompt answer; prompts resolve
/// inline and are counted.
#[derive(Clone)]
pub struct StaticPermissionHost {
    inner: Arc<Mutex<StaticHostInner>>,
}

struct StaticHostInner {
    granted: bool,
    prompt_answer: bool,
    prompt_count: u32,
}

impl StaticPermissionHost {
    /// Host that already grants every permission
    pub fn granted() -> Self {
        Self::new(true, true)
    }

    /// Host that grants on the first prompt
    pub fn granting_on_prompt() -> Self {
        Self::new(false, true)
    }

    /// Host whose user denies every prompt
    pub fn denying() -> Self {
        Self::new(false, false)
    }

    fn new(granted: bool, prompt_answer: bool) -> Self {
        Self {
            inner: Arc::new(Mutex::new(StaticHostInner {
                granted,
                prompt_answer,
                prompt_count: 0,
            })),
        }
    }

    /// Flip the OS-level grant (simulates grant or revocation in settings)
    pub fn set_granted(&self, granted: bool) {
        self.inner.lock().granted = granted;
    }

    /// Number of prompts shown so far
    pub fn prompt_count(&self) -> u32 {
        self.inner.lock().prompt_count
    }
}

impl PermissionHost for StaticPermissionHost {
    fn is_granted(&self, _permission: Permission) -> bool {
        self.inner.lock().granted
    }

    fn prompt(&self, _permission: Permission, on_result: Box<dyn FnOnce(bool) + Send>) {
        let answer = {
            let mut inner = self.inner.lock();
            inner.prompt_count += 1;
            if inner.prompt_answer {
                inner.granted = true;
            }
            inner.prompt_answer
        };
        on_result(answer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;

    fn request(gate: &PermissionGate, permission: Permission) -> PermissionState {
        let (tx, rx) = bounded(1);
        gate.request_if_needed(permission, move |outcome| {
            let _ = tx.send(outcome);
        });
        rx.try_recv().expect("outcome must resolve inline")
    }

    #[test]
    fn test_already_granted_resolves_without_prompt() {
        let host = StaticPermissionHost::granted();
        let gate = PermissionGate::new(Arc::new(host.clone()));

        let outcome = request(&gate, Permission::FineLocation);
        assert_eq!(outcome, PermissionState::Granted);
        assert_eq!(host.prompt_count(), 0);
        assert_eq!(gate.state(Permission::FineLocation), PermissionState::Granted);
    }

    #[test]
    fn test_prompt_grants() {
        let host = StaticPermissionHost::granting_on_prompt();
        let gate = PermissionGate::new(Arc::new(host.clone()));

        let outcome = request(&gate, Permission::FineLocation);
        assert_eq!(outcome, PermissionState::Granted);
        assert_eq!(host.prompt_count(), 1);
        assert!(gate.ensure_granted(Permission::FineLocation).is_ok());
    }

    #[test]
    fn test_denial_allows_one_retry_then_stops_prompting() {
        let host = StaticPermissionHost::denying();
        let gate = PermissionGate::new(Arc::new(host.clone()));

        assert_eq!(request(&gate, Permission::FineLocation), PermissionState::Denied);
        assert_eq!(host.prompt_count(), 1);

        // One retry prompt is allowed
        assert_eq!(request(&gate, Permission::FineLocation), PermissionState::Denied);
        assert_eq!(host.prompt_count(), 2);

        // Budget exhausted: resolves denied without prompting again
        assert_eq!(request(&gate, Permission::FineLocation), PermissionState::Denied);
        assert_eq!(host.prompt_count(), 2);
    }

    #[test]
    fn test_permissions_tracked_independently() {
        let host = StaticPermissionHost::denying();
        let gate = PermissionGate::new(Arc::new(host.clone()));

        assert_eq!(request(&gate, Permission::FineLocation), PermissionState::Denied);
        assert_eq!(gate.state(Permission::CoarseLocation), PermissionState::Unknown);
    }

    #[test]
    fn test_revocation_fails_ensure_granted() {
        let host = StaticPermissionHost::granted();
        let gate = PermissionGate::new(Arc::new(host.clone()));

        request(&gate, Permission::FineLocation);
        assert!(gate.ensure_granted(Permission::FineLocation).is_ok());

        host.set_granted(false);
        assert!(matches!(
            gate.ensure_granted(Permission::FineLocation),
            Err(Error::PermissionMissing)
        ));
    }

    #[test]
    fn test_ensure_granted_before_any_request() {
        let host = StaticPermissionHost::granted();
        let gate = PermissionGate::new(Arc::new(host));

        // Host grants, but no request has resolved yet
        assert!(matches!(
            gate.ensure_granted(Permission::FineLocation),
            Err(Error::PermissionMissing)
        ));
    }
}
