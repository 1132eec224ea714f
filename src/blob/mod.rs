//! Blob construction subsystem.
//!
//! # Data Flow
//! ```text
//! raw payload bytes
//!     → chunker.rs (pack into zero-led 32-byte field elements)
//!     → one Blob
//!     → commitment.rs (KZG commitment, blob proof, versioned hash)
//!     → sidecar + versioned hash for the transaction
//! ```

pub mod chunker;
pub mod commitment;

pub use chunker::{chunk, MAX_PAYLOAD_BYTES};
pub use commitment::{BlobCommitment, CommitmentEngine, CommitmentError};
