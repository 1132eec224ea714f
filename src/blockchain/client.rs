//! Chain RPC client with timeout and error handling.
//!
//! # Responsibilities
//! - Connect to the JSON-RPC endpoint
//! - Query chain state (balance, latest header, nonce, chain ID)
//! - Estimate gas and submit raw transactions
//! - Bound every call with the shared per-call timeout

use alloy::eips::BlockNumberOrTag;
use alloy::primitives::{Address, B256, U256};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

use crate::blockchain::types::{ChainError, ChainResult, HeadInfo};
use crate::config::ChainConfig;

/// The outbound JSON-RPC surface the mint pipeline depends on.
///
/// Implemented by [`ChainClient`] for real nodes and by mocks in tests.
/// Every method is a single bounded attempt; callers map failures to their
/// own stage-specific error kinds.
#[async_trait]
pub trait ChainRpc: Send + Sync {
    /// Balance of `address` at the latest block, in wei.
    async fn get_balance(&self, address: Address) -> ChainResult<U256>;

    /// Fee-relevant fields of the latest block header.
    async fn latest_head(&self) -> ChainResult<HeadInfo>;

    /// Gas estimate for the given call.
    async fn estimate_gas(&self, tx: TransactionRequest) -> ChainResult<u64>;

    /// Next nonce for `address` at the latest block.
    async fn get_transaction_count(&self, address: Address) -> ChainResult<u64>;

    /// Chain ID of the connected node.
    async fn get_chain_id(&self) -> ChainResult<u64>;

    /// Submit a raw (EIP-2718 encoded) transaction, returning its hash.
    async fn send_raw_transaction(&self, raw: &[u8]) -> ChainResult<B256>;
}

/// Chain RPC client wrapper around an alloy provider.
#[derive(Clone)]
pub struct ChainClient {
    provider: Arc<dyn Provider + Send + Sync>,
    rpc_url: String,
    /// Request timeout duration, shared by every call.
    timeout_duration: Duration,
}

impl ChainClient {
    /// Connect to the configured JSON-RPC endpoint.
    ///
    /// The connection is lazy; the first RPC call surfaces connectivity
    /// problems. Callers typically follow up with [`ChainRpc::get_chain_id`]
    /// at startup.
    pub fn connect(config: &ChainConfig) -> ChainResult<Self> {
        let url: url::Url = config
            .rpc_url
            .parse()
            .map_err(|e| ChainError::Rpc(format!("Invalid RPC URL '{}': {}", config.rpc_url, e)))?;

        let provider =
            Arc::new(ProviderBuilder::new().connect_http(url)) as Arc<dyn Provider + Send + Sync>;

        tracing::info!(
            rpc_url = %config.rpc_url,
            timeout_secs = config.rpc_timeout_secs,
            "Chain client initialized"
        );

        Ok(Self {
            provider,
            rpc_url: config.rpc_url.clone(),
            timeout_duration: Duration::from_secs(config.rpc_timeout_secs),
        })
    }

    fn timeout_secs(&self) -> u64 {
        self.timeout_duration.as_secs()
    }
}

#[async_trait]
impl ChainRpc for ChainClient {
    async fn get_balance(&self, address: Address) -> ChainResult<U256> {
        let fut = self.provider.get_balance(address);
        match timeout(self.timeout_duration, fut).await {
            Ok(Ok(balance)) => Ok(balance),
            Ok(Err(e)) => Err(ChainError::Rpc(e.to_string())),
            Err(_) => Err(ChainError::Timeout(self.timeout_secs())),
        }
    }

    async fn latest_head(&self) -> ChainResult<HeadInfo> {
        let fut = self.provider.get_block_by_number(BlockNumberOrTag::Latest);
        let block = match timeout(self.timeout_duration, fut).await {
            Ok(Ok(Some(block))) => block,
            Ok(Ok(None)) => return Err(ChainError::Rpc("latest block not found".to_string())),
            Ok(Err(e)) => return Err(ChainError::Rpc(e.to_string())),
            Err(_) => return Err(ChainError::Timeout(self.timeout_secs())),
        };
        Ok(HeadInfo {
            base_fee_per_gas: block.header.base_fee_per_gas.unwrap_or_default() as u128,
            excess_blob_gas: block.header.excess_blob_gas.unwrap_or_default(),
        })
    }

    async fn estimate_gas(&self, tx: TransactionRequest) -> ChainResult<u64> {
        let fut = self.provider.estimate_gas(tx);
        match timeout(self.timeout_duration, fut).await {
            Ok(Ok(gas)) => Ok(gas),
            Ok(Err(e)) => Err(ChainError::Rpc(e.to_string())),
            Err(_) => Err(ChainError::Timeout(self.timeout_secs())),
        }
    }

    async fn get_transaction_count(&self, address: Address) -> ChainResult<u64> {
        let fut = self.provider.get_transaction_count(address);
        match timeout(self.timeout_duration, fut).await {
            Ok(Ok(nonce)) => Ok(nonce),
            Ok(Err(e)) => Err(ChainError::Rpc(e.to_string())),
            Err(_) => Err(ChainError::Timeout(self.timeout_secs())),
        }
    }

    async fn get_chain_id(&self) -> ChainResult<u64> {
        let fut = self.provider.get_chain_id();
        match timeout(self.timeout_duration, fut).await {
            Ok(Ok(id)) => Ok(id),
            Ok(Err(e)) => Err(ChainError::Rpc(e.to_string())),
            Err(_) => Err(ChainError::Timeout(self.timeout_secs())),
        }
    }

    async fn send_raw_transaction(&self, raw: &[u8]) -> ChainResult<B256> {
        let fut = self.provider.send_raw_transaction(raw);
        match timeout(self.timeout_duration, fut).await {
            Ok(Ok(pending)) => Ok(*pending.tx_hash()),
            Ok(Err(e)) => Err(ChainError::Rpc(e.to_string())),
            Err(_) => Err(ChainError::Timeout(self.timeout_secs())),
        }
    }
}

impl std::fmt::Debug for ChainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainClient")
            .field("rpc_url", &self.rpc_url)
            .field("timeout", &self.timeout_duration)
            .finish()
    }
}
