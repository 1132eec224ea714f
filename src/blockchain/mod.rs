//! L1 chain access subsystem.
//!
//! # Data Flow
//! ```text
//! mint pipeline
//!     → ChainRpc trait (the exact JSON-RPC surface the pipeline needs)
//!     → client.rs (alloy provider wrapper, fixed per-call timeout)
//!     → L1 node
//!
//! fees.rs derives the dual-market fee parameters from the latest head.
//! ```
//!
//! # Design Decisions
//! - One bounded attempt per call: no retries, no failover. A timeout fails
//!   the calling stage with its own error kind and the connection is reused.
//! - The client handle is process-wide, cheap to clone, and safe for
//!   concurrent callers; the underlying transport multiplexes requests.
//! - The chain ID is fetched once at startup and cached by the pipeline.

pub mod client;
pub mod fees;
pub mod types;

pub use client::{ChainClient, ChainRpc};
pub use fees::{fee_parameters, FeeParameters};
pub use types::{ChainError, ChainResult, HeadInfo};
