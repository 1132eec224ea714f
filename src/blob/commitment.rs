//! KZG commitment and proof generation.
//!
//! # Responsibilities
//! - Commit to a blob and produce the accompanying blob proof
//! - Derive the versioned hash the transaction references the blob by
//!
//! Deterministic: identical blob content always yields byte-identical
//! commitment, proof, and versioned hash.

use alloy::consensus::EnvKzgSettings;
use alloy::eips::eip4844::{kzg_to_versioned_hash, Blob, Bytes48};
use alloy::primitives::B256;
use thiserror::Error;

/// Errors from the underlying KZG computation.
#[derive(Debug, Error)]
pub enum CommitmentError {
    /// Commitment computation rejected the blob.
    #[error("failed to compute blob commitment: {0}")]
    Commitment(c_kzg::Error),

    /// Proof generation failed after a successful commitment.
    #[error("failed to compute blob proof: {0}")]
    Proof(c_kzg::Error),
}

/// Commitment, proof, and the versioned hash derived from the commitment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobCommitment {
    pub commitment: Bytes48,
    pub proof: Bytes48,
    pub versioned_hash: B256,
}

/// KZG commitment engine holding the trusted setup.
#[derive(Debug, Clone, Default)]
pub struct CommitmentEngine {
    settings: EnvKzgSettings,
}

impl CommitmentEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commit to a blob.
    ///
    /// Rejection by the commitment scheme should not occur for blobs built
    /// by the chunker, whose elements always lead with a zero byte.
    pub fn commit(&self, blob: &Blob) -> Result<BlobCommitment, CommitmentError> {
        let kzg_blob =
            c_kzg::Blob::from_bytes(blob.as_slice()).map_err(CommitmentError::Commitment)?;

        let commitment = self
            .settings
            .get()
            .blob_to_kzg_commitment(&kzg_blob)
            .map_err(CommitmentError::Commitment)?;
        let proof = self
            .settings
            .get()
            .compute_blob_kzg_proof(&kzg_blob, &commitment.to_bytes())
            .map_err(CommitmentError::Proof)?;

        let commitment = Bytes48::from_slice(commitment.to_bytes().as_slice());
        let versioned_hash = kzg_to_versioned_hash(commitment.as_slice());

        Ok(BlobCommitment {
            commitment,
            proof: Bytes48::from_slice(proof.to_bytes().as_slice()),
            versioned_hash,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blob::chunker::chunk;

    #[test]
    fn test_commitment_is_deterministic() {
        let engine = CommitmentEngine::new();
        let blob = chunk(b"deterministic content");

        let first = engine.commit(&blob).unwrap();
        let second = engine.commit(&blob).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_distinct_blobs_distinct_commitments() {
        let engine = CommitmentEngine::new();
        let a = engine.commit(&chunk(b"content a")).unwrap();
        let b = engine.commit(&chunk(b"content b")).unwrap();
        assert_ne!(a.commitment, b.commitment);
        assert_ne!(a.versioned_hash, b.versioned_hash);
    }

    #[test]
    fn test_versioned_hash_has_version_byte() {
        let engine = CommitmentEngine::new();
        let committed = engine.commit(&chunk(b"version check")).unwrap();
        // EIP-4844 versioned hashes start with the KZG version byte
        assert_eq!(committed.versioned_hash[0], 0x01);
    }
}
