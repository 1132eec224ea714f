//! Mint failure taxonomy.
//!
//! One numeric wire code per failure condition. The codes are part of the
//! wire contract and must remain stable. Error text is logged locally and
//! never crosses the HTTP boundary; callers see only the code.
//!
//! | code | condition |
//! |------|-----------|
//! | 1    | success |
//! | 2    | malformed destination address |
//! | 3    | missing signing key |
//! | 4    | unparsable signing key |
//! | 5    | balance query failure |
//! | 6    | zero balance |
//! | 7    | header fetch failure |
//! | 8    | commitment computation failure |
//! | 9    | proof computation failure |
//! | 10   | gas estimation failure (also the generic decode failure; the deployed wire contract assigns 10 to both) |
//! | 11   | nonce fetch failure |
//! | 12   | signing failure |
//! | 13   | signature attachment failure |
//! | 14   | submission failure |

use thiserror::Error;

use crate::blob::CommitmentError;
use crate::blockchain::ChainError;

/// A terminal failure of one pipeline stage. No stage is retried.
#[derive(Debug, Error)]
pub enum MintError {
    #[error("request address was not a hex address")]
    MalformedAddress,

    #[error("no pkey set")]
    MissingKey,

    #[error("failed to create private key: {0}")]
    InvalidKey(String),

    #[error("failed to query balance: {0}")]
    BalanceQuery(ChainError),

    #[error("signer address has 0 balance")]
    ZeroBalance,

    #[error("failed to get latest header: {0}")]
    HeaderFetch(ChainError),

    #[error("failed to compute blob commitment: {0}")]
    Commitment(c_kzg::Error),

    #[error("failed to compute blob proof: {0}")]
    Proof(c_kzg::Error),

    #[error("failed to estimate gas: {0}")]
    GasEstimation(ChainError),

    #[error("failed to get nonce: {0}")]
    NonceFetch(ChainError),

    #[error("failed to sign transaction: {0}")]
    Signing(String),

    #[error("failed to attach signature: {0}")]
    SignatureAttach(String),

    #[error("failed to send transaction: {0}")]
    Submission(ChainError),
}

impl MintError {
    /// The stable numeric wire code for this failure.
    pub fn code(&self) -> i32 {
        match self {
            MintError::MalformedAddress => 2,
            MintError::MissingKey => 3,
            MintError::InvalidKey(_) => 4,
            MintError::BalanceQuery(_) => 5,
            MintError::ZeroBalance => 6,
            MintError::HeaderFetch(_) => 7,
            MintError::Commitment(_) => 8,
            MintError::Proof(_) => 9,
            MintError::GasEstimation(_) => 10,
            MintError::NonceFetch(_) => 11,
            MintError::Signing(_) => 12,
            MintError::SignatureAttach(_) => 13,
            MintError::Submission(_) => 14,
        }
    }
}

impl From<CommitmentError> for MintError {
    fn from(err: CommitmentError) -> Self {
        match err {
            CommitmentError::Commitment(e) => MintError::Commitment(e),
            CommitmentError::Proof(e) => MintError::Proof(e),
        }
    }
}
