//! Blob transaction assembly, signing, and encoding.
//!
//! # Responsibilities
//! - Assemble the mint call data (fixed selector + ABI-encoded address)
//! - Estimate gas with a safety margin and fetch the sender nonce
//! - Build the EIP-4844 envelope with the blob sidecar
//! - Sign, verify the signature attaches cleanly, and produce the network
//!   encoding for raw submission

use alloy::consensus::{
    BlobTransactionSidecar, SignableTransaction, TxEip4844, TxEip4844WithSidecar,
};
use alloy::eips::eip2718::Encodable2718;
use alloy::network::{TransactionBuilder, TransactionBuilder4844};
use alloy::primitives::{Address, Bytes, B256, U256};
use alloy::rpc::types::TransactionRequest;
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::SignerSync;

use crate::blockchain::{ChainRpc, FeeParameters};
use crate::mint::error::MintError;

/// 4-byte function selector of `mintTo()`.
pub const MINT_TO_SELECTOR: [u8; 4] = [0x75, 0x5e, 0xdd, 0x17];

/// Gas estimates are scaled by this margin. Actual usage can vary with the
/// blob gas price, and a thin estimate risks a random out-of-gas.
const GAS_LIMIT_MARGIN: f64 = 1.2;

/// Assemble the mint call data: selector, then the destination address as a
/// left-padded 32-byte ABI `address` argument.
pub fn mint_call_data(destination: Address) -> Bytes {
    let mut data = Vec::with_capacity(36);
    data.extend_from_slice(&MINT_TO_SELECTOR);
    data.extend_from_slice(&[0u8; 12]);
    data.extend_from_slice(destination.as_slice());
    Bytes::from(data)
}

/// Build the unsigned blob transaction envelope.
///
/// Estimates gas against the node using the final call data and fee fields,
/// scales the estimate by the safety margin, and fetches the sender's next
/// nonce. Each network call is a single bounded attempt.
pub async fn build_blob_tx(
    rpc: &dyn ChainRpc,
    from: Address,
    to: Address,
    chain_id: u64,
    fees: &FeeParameters,
    versioned_hash: B256,
    calldata: Bytes,
) -> Result<TxEip4844, MintError> {
    let blob_versioned_hashes = vec![versioned_hash];

    let mut estimate_req = TransactionRequest::default()
        .with_from(from)
        .with_to(to)
        .with_input(calldata.clone())
        .with_max_priority_fee_per_gas(fees.max_priority_fee_per_gas)
        .with_max_fee_per_gas(fees.max_fee_per_gas)
        .with_max_fee_per_blob_gas(fees.max_fee_per_blob_gas);
    estimate_req.blob_versioned_hashes = Some(blob_versioned_hashes.clone());

    let gas = rpc
        .estimate_gas(estimate_req)
        .await
        .map_err(MintError::GasEstimation)?;
    let gas_limit = (gas as f64 * GAS_LIMIT_MARGIN) as u64;
    tracing::info!(estimated = gas, gas_limit, "estimated gas");

    let nonce = rpc
        .get_transaction_count(from)
        .await
        .map_err(MintError::NonceFetch)?;

    Ok(TxEip4844 {
        chain_id,
        nonce,
        gas_limit,
        max_fee_per_gas: fees.max_fee_per_gas,
        max_priority_fee_per_gas: fees.max_priority_fee_per_gas,
        to,
        value: U256::ZERO,
        access_list: Default::default(),
        blob_versioned_hashes,
        max_fee_per_blob_gas: fees.max_fee_per_blob_gas,
        input: calldata,
    })
}

/// Sign the canonical signing hash, attach the signature, and produce the
/// EIP-2718 network encoding (with the sidecar) for raw submission.
///
/// Returns the canonical transaction hash alongside the encoded bytes.
pub fn sign_and_encode(
    tx: TxEip4844,
    sidecar: BlobTransactionSidecar,
    signer: &PrivateKeySigner,
) -> Result<(B256, Vec<u8>), MintError> {
    let tx = TxEip4844WithSidecar::from_tx_and_sidecar(tx, sidecar);
    let signature_hash = tx.signature_hash();

    let signature = signer
        .sign_hash_sync(&signature_hash)
        .map_err(|e| MintError::Signing(e.to_string()))?;

    // A signature that cannot recover the signer cannot be attached.
    let recovered = signature
        .recover_address_from_prehash(&signature_hash)
        .map_err(|e| MintError::SignatureAttach(e.to_string()))?;
    if recovered != signer.address() {
        return Err(MintError::SignatureAttach(format!(
            "recovered signer {recovered} does not match {}",
            signer.address()
        )));
    }

    let signed = tx.into_signed(signature);
    Ok((*signed.hash(), signed.encoded_2718()))
}
