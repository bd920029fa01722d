use crate::config::PortalConfig;
use crate::gateway::PortalStore;
use prometheus::Registry;
use std::sync::Arc;
use std::time::Instant;

/// Application state shared across handlers
///
/// Read-only after startup; handlers share nothing else.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PortalStore>,
    pub config: Arc<PortalConfig>,
    pub started_at: Instant,
    pub registry: Registry,
}

impl AppState {
    pub fn new(store: Arc<dyn PortalStore>, config: PortalConfig, registry: Registry) -> Self {
        Self {
            store,
            config: Arc::new(config),
            started_at: Instant::now(),
            registry,
        }
    }
}
