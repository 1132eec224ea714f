//! Dual fee market estimation.
//!
//! # Responsibilities
//! - Derive execution-market fees (priority fee, fee cap) from the latest
//!   base fee
//! - Derive the blob-market fee cap from the latest excess blob gas
//!
//! Both caps carry a deliberate 2x headroom against fee volatility between
//! estimation and inclusion. That multiplier is not a protocol requirement;
//! it is a documented compatibility choice and must not change.

use alloy::eips::eip4844::calc_blob_gasprice;

use crate::blockchain::types::HeadInfo;

/// Fixed priority fee: one gwei, in wei.
pub const PRIORITY_FEE_WEI: u128 = 1_000_000_000;

/// Fee parameters for one transaction, derived from a single observed head.
///
/// Invariant: `max_fee_per_gas >= base fee` of the observed head, which is
/// required for inclusion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeParameters {
    /// Caller tip per unit of gas, in wei.
    pub max_priority_fee_per_gas: u128,
    /// Execution fee cap per unit of gas, in wei.
    pub max_fee_per_gas: u128,
    /// Blob fee cap per unit of blob gas, in wei.
    pub max_fee_per_blob_gas: u128,
}

/// Derive fee parameters from a block header.
///
/// `fee cap = 2 x base fee + priority fee`;
/// `blob fee cap = 2 x blob gas price implied by excess blob gas`.
pub fn fee_parameters(head: &HeadInfo) -> FeeParameters {
    FeeParameters {
        max_priority_fee_per_gas: PRIORITY_FEE_WEI,
        max_fee_per_gas: 2 * head.base_fee_per_gas + PRIORITY_FEE_WEI,
        max_fee_per_blob_gas: 2 * calc_blob_gasprice(head.excess_blob_gas),
    }
}
