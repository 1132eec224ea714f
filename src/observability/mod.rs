//! Observability subsystem: the request access log.
//!
//! Application-level diagnostics go through `tracing`; this module owns
//! the one artifact with a stable external format, the per-request CSV
//! access log.

pub mod logging;

pub use logging::{AccessRecord, RequestLogger};
