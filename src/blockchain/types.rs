//! Chain-specific types and error definitions.

use thiserror::Error;

/// Errors that can occur during chain operations.
///
/// The mint pipeline wraps these per stage, so no stage information is
/// carried here. Provider error text stays in the logs and never crosses
/// the HTTP boundary.
#[derive(Debug, Error)]
pub enum ChainError {
    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// RPC request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),
}

/// Result type for chain operations.
pub type ChainResult<T> = Result<T, ChainError>;

/// The slice of the latest block header the fee estimator needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadInfo {
    /// Base fee of the latest block, in wei.
    pub base_fee_per_gas: u128,
    /// Excess blob gas of the latest block.
    pub excess_blob_gas: u64,
}
