//! Health and readiness checks.
//!
//! - `/health` answers the liveness question: is the process running?
//! - `/ready` answers the readiness question: can it serve traffic? The
//!   readiness check runs named probes (here: a database ping).

use std::collections::BTreeMap;
use std::time::Instant;

use serde::Serialize;

/// Health status response, returned by `/health`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct HealthStatus {
    /// Service status ("healthy").
    pub status: String,
    /// Service name.
    pub service: String,
    /// Service version.
    pub version: String,
    /// Server uptime in seconds.
    pub uptime_seconds: u64,
}

/// Liveness check with service identity and uptime.
#[derive(Debug, Clone)]
pub struct HealthCheck {
    service: String,
    version: String,
    started: Instant,
}

impl HealthCheck {
    /// Creates a health check for the named service.
    #[must_use]
    pub fn new(service: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            version: version.into(),
            started: Instant::now(),
        }
    }

    /// Returns the current health status.
    #[must_use]
    pub fn status(&self) -> HealthStatus {
        HealthStatus {
            status: "healthy".to_string(),
            service: self.service.clone(),
            version: self.version.clone(),
            uptime_seconds: self.started.elapsed().as_secs(),
        }
    }
}

/// Readiness status response, returned by `/ready`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ReadinessStatus {
    /// Whether every check passed.
    pub ready: bool,
    /// Result of each named check.
    pub checks: BTreeMap<String, bool>,
}

/// Readiness check with pluggable named probes.
///
/// # Example
///
/// ```
/// use stockroom_server::ReadinessCheck;
///
/// let readiness = ReadinessCheck::new().add_check("database", || true);
/// assert!(readiness.is_ready());
/// ```
#[derive(Default)]
pub struct ReadinessCheck {
    checks: Vec<(String, Box<dyn Fn() -> bool + Send + Sync>)>,
}

impl ReadinessCheck {
    /// Creates a readiness check with no probes (always ready).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a named probe.
    #[must_use]
    pub fn add_check(
        mut self,
        name: impl Into<String>,
        check: impl Fn() -> bool + Send + Sync + 'static,
    ) -> Self {
        self.checks.push((name.into(), Box::new(check)));
        self
    }

    /// Returns `true` if every probe passes.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.checks.iter().all(|(_, check)| check())
    }

    /// Runs every probe and returns the detailed status.
    #[must_use]
    pub fn status(&self) -> ReadinessStatus {
        let checks: BTreeMap<String, bool> = self
            .checks
            .iter()
            .map(|(name, check)| (name.clone(), check()))
            .collect();
        let ready = checks.values().all(|passed| *passed);

        ReadinessStatus { ready, checks }
    }
}

impl std::fmt::Debug for ReadinessCheck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReadinessCheck")
            .field(
                "checks",
                &self.checks.iter().map(|(name, _)| name).collect::<Vec<_>>(),
            )
            .finish()
    }
}
