//! Shared application state for the HTTP layer.

use std::sync::Arc;

use stockroom_service::ItemService;

use crate::health::{HealthCheck, ReadinessCheck};

/// State shared by every handler.
///
/// Cloned per request by axum; every member is cheap to clone.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The item service.
    pub service: ItemService,
    /// Liveness check.
    pub health: HealthCheck,
    /// Readiness check (includes the database ping).
    pub readiness: Arc<ReadinessCheck>,
}

impl AppState {
    /// Builds the state for a service, wiring the standard readiness probes.
    #[must_use]
    pub fn new(service: ItemService, service_name: &str) -> Self {
        let store = service.store().clone();
        let readiness = ReadinessCheck::new().add_check("database", move || store.ping());

        Self {
            service,
            health: HealthCheck::new(service_name, env!("CARGO_PKG_VERSION")),
            readiness: Arc::new(readiness),
        }
    }
}
