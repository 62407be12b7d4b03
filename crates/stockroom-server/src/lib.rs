//! HTTP surface for the stockroom service.
//!
//! The layering mirrors the request path: [`routes::app`] builds the axum
//! router, handlers in [`handlers`] validate inputs and delegate to the
//! service layer, and [`error::ApiFailure`] turns service errors into
//! failure envelopes with the right HTTP status. Operational concerns live
//! in [`health`] and [`shutdown`].

pub mod error;
pub mod handlers;
pub mod health;
pub mod routes;
pub mod shutdown;
pub mod state;

pub use error::ApiFailure;
pub use health::{HealthCheck, HealthStatus, ReadinessCheck, ReadinessStatus};
pub use routes::app;
pub use shutdown::{ShutdownReceiver, ShutdownSignal};
pub use state::AppState;
