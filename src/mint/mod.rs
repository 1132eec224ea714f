//! The mint pipeline.
//!
//! # Data Flow
//! ```text
//! MintRequest
//!     → validate (address, key)           codes 2-4
//!     → balance gate                      codes 5-6
//!     → fee estimation (latest head)      code  7
//!     → blob chunk + KZG commit           codes 8-9
//!     → gas estimate x1.2, nonce fetch    codes 10-11
//!     → sign, attach, submit              codes 12-14
//!     → MintResponse { code: 1, txid }
//! ```
//!
//! Every stage failure is terminal: no partial results, no retries. Nonce
//! acquisition is uncoordinated across concurrent requests, so two
//! simultaneous requests signing with the same key can race and one
//! submission can fail with a stale nonce. Known limitation, kept as-is.

pub mod error;
pub mod tx;
pub mod types;

pub use error::MintError;
pub use types::{MintRequest, MintResponse};

use alloy::consensus::BlobTransactionSidecar;
use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;
use std::sync::Arc;

use crate::blob::{chunk, CommitmentEngine};
use crate::blockchain::{fee_parameters, ChainRpc};

/// Blob text used when a request carries no payload.
const DEFAULT_BLOB_TEXT: &str =
    "I just minted $BLOBZ with proof-of-blob! Learn more at https://blobz.wtf";

/// Handles mint requests end to end.
///
/// Request-scoped state lives on the stack of [`Minter::mint`]; the only
/// shared pieces are the chain client (safe for concurrent callers), the
/// destination contract, and the chain ID fetched once at startup.
pub struct Minter {
    rpc: Arc<dyn ChainRpc>,
    mint_contract: Address,
    chain_id: u64,
    kzg: CommitmentEngine,
}

impl Minter {
    pub fn new(rpc: Arc<dyn ChainRpc>, mint_contract: Address, chain_id: u64) -> Self {
        Self {
            rpc,
            mint_contract,
            chain_id,
            kzg: CommitmentEngine::new(),
        }
    }

    /// Run one request through the pipeline.
    ///
    /// Returns the canonical transaction hash on success; the error carries
    /// the wire code of the failing stage.
    pub async fn mint(&self, request: &MintRequest) -> Result<MintResponse, MintError> {
        let destination: Address = request.address.parse().map_err(|_| {
            tracing::warn!("request address was not a hex address");
            MintError::MalformedAddress
        })?;

        if request.pkey.is_empty() {
            tracing::warn!("no pkey set");
            return Err(MintError::MissingKey);
        }
        let key_hex = request.pkey.strip_prefix("0x").unwrap_or(&request.pkey);
        let signer: PrivateKeySigner = key_hex.parse().map_err(|e| {
            tracing::warn!(error = %e, "failed to create private key");
            MintError::InvalidKey(format!("{e}"))
        })?;
        let signer_address = signer.address();
        tracing::info!(address = %signer_address, "Signer address");

        let balance = self
            .rpc
            .get_balance(signer_address)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "failed to query balance");
                MintError::BalanceQuery(e)
            })?;
        // non-zero gate only; not an affordability check
        if balance.is_zero() {
            tracing::warn!("signer address has 0 balance");
            return Err(MintError::ZeroBalance);
        }

        let head = self.rpc.latest_head().await.map_err(|e| {
            tracing::warn!(error = %e, "Failed to get latest header");
            MintError::HeaderFetch(e)
        })?;
        let fees = fee_parameters(&head);
        tracing::info!(
            priority_fee = fees.max_priority_fee_per_gas,
            max_fee = fees.max_fee_per_gas,
            base_fee = head.base_fee_per_gas,
            blob_fee_cap = fees.max_fee_per_blob_gas,
            "fees"
        );

        let payload = if request.blob.is_empty() {
            tracing::info!("No blob data provided, using default blob text.");
            DEFAULT_BLOB_TEXT.as_bytes()
        } else {
            &request.blob
        };

        let blob = chunk(payload);
        let committed = self.kzg.commit(&blob).map_err(|e| {
            tracing::error!(error = %e, "blob commitment failed");
            MintError::from(e)
        })?;
        let sidecar = BlobTransactionSidecar::new(
            vec![*blob],
            vec![committed.commitment],
            vec![committed.proof],
        );

        let calldata = tx::mint_call_data(destination);
        tracing::debug!(data = %calldata, "call data");

        let unsigned = tx::build_blob_tx(
            self.rpc.as_ref(),
            signer_address,
            self.mint_contract,
            self.chain_id,
            &fees,
            committed.versioned_hash,
            calldata,
        )
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "failed to build blob transaction");
            e
        })?;

        let (tx_hash, raw) = tx::sign_and_encode(unsigned, sidecar, &signer).map_err(|e| {
            tracing::error!(error = %e, "failed to sign transaction");
            e
        })?;

        let submitted = self.rpc.send_raw_transaction(&raw).await.map_err(|e| {
            tracing::error!(error = %e, "failed to send transaction");
            MintError::Submission(e)
        })?;
        if submitted != tx_hash {
            tracing::warn!(local = %tx_hash, remote = %submitted, "node reported a different tx hash");
        }

        Ok(MintResponse {
            code: 1,
            txid: format!("{tx_hash:#x}"),
        })
    }
}
