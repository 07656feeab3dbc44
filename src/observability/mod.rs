//! # Observability Infrastructure
//!
//! Structured logging for the provisioning tooling. Scoped to logging:
//! every remote platform operation emits tracing events with key names and
//! scopes, never secret values.

pub mod logging;

pub use logging::init_logging;
