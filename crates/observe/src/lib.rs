//! Observability support for the gateway binaries: initialization logic for
//! logging and the global metrics registry.

pub mod metrics;
pub mod tracing;
