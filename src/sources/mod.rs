//! Location sources
//!
//! One contract over the three acquisition strategies:
//!
//! - [`ManagerSource`]: pull, one last-known fix per `start()`
//! - [`FusedSource`]: push, continuous stream until `stop()`
//! - [`OverlaySource`]: push, eager first fix then passive follow
//!
//! A source never emits an update without a live permission grant, and
//! `stop()` keeps any further update from reaching the callback (at most
//! one in-flight update may still slip through the dispatch race).

use crate::config::SourceConfig;
use crate::core::types::{LocationUpdate, SourceKind};
use crate::error::{Error, Result};
use crate::permission::PermissionGate;
use crate::providers::FixProvider;
use std::sync::Arc;
use std::time::Duration;

mod fused;
mod manager;
mod overlay;

pub use fused::FusedSource;
pub use manager::ManagerSource;
pub use overlay::OverlaySource;

/// How long reader threads block on the provider before re-checking stop
pub(crate) const POLL_TIMEOUT: Duration = Duration::from_millis(200);

/// Update delivery callback; invoked once per fix
pub type UpdateCallback = Arc<dyn Fn(LocationUpdate) + Send + Sync>;

/// Common contract over the acquisition variants
pub trait LocationSource: Send {
    /// Which acquisition strategy this source implements
    fn kind(&self) -> SourceKind;

    /// Begin delivering updates to the callback
    ///
    /// Fails with [`Error::PermissionMissing`] unless location permission
    /// is granted right now; in that case zero updates are delivered.
    fn start(&mut self, on_update: UpdateCallback) -> Result<()>;

    /// Stop delivering updates; idempotent
    fn stop(&mut self);

    /// Whether the source is currently delivering
    fn is_active(&self) -> bool;
}

/// Create a location source based on configuration
pub fn create_source(
    config: &SourceConfig,
    provider: Box<dyn FixProvider>,
    gate: Arc<PermissionGate>,
) -> Result<Box<dyn LocationSource>> {
    match config.kind.as_str() {
        "manager" => Ok(Box::new(ManagerSource::new(provider, gate))),
        "fused" => Ok(Box::new(FusedSource::new(provider, gate))),
        "overlay" => Ok(Box::new(OverlaySource::new(provider, gate))),
        _ => Err(Error::UnknownSource(config.kind.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::permission::StaticPermissionHost;
    use crate::providers::ScriptedProvider;

    #[test]
    fn test_factory_builds_each_kind() {
        let host = StaticPermissionHost::granted();
        let gate = Arc::new(PermissionGate::new(Arc::new(host)));
        let mut config = AppConfig::demo_defaults().source;

        for (kind, expected) in [
            ("manager", SourceKind::Manager),
            ("fused", SourceKind::Fused),
            ("overlay", SourceKind::Overlay),
        ] {
            config.kind = kind.to_string();
            let source = create_source(
                &config,
                Box::new(ScriptedProvider::new()),
                Arc::clone(&gate),
            )
            .unwrap();
            assert_eq!(source.kind(), expected);
        }
    }

    #[test]
    fn test_factory_rejects_unknown_kind() {
        let host = StaticPermissionHost::granted();
        let gate = Arc::new(PermissionGate::new(Arc::new(host)));
        let mut config = AppConfig::demo_defaults().source;
        config.kind = "satellite".to_string();

        let result = create_source(&config, Box::new(ScriptedProvider::new()), gate);
        assert!(matches!(result, Err(Error::UnknownSource(_))));
    }
}
