//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP/TLS connection
//!     → server.rs (Axum setup, static files, access-log middleware)
//!     → envelope.rs (JSON dispatch: outcome code → status, cache-control)
//!     → mint.rs (bounded body read, decode, run the pipeline)
//! ```

pub mod envelope;
pub mod mint;
pub mod server;

pub use envelope::{Outcome, JSON_REQUEST_SIZE_LIMIT};
pub use server::{AppState, HttpServer};
