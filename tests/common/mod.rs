//! Shared utilities for integration testing.

// Each test binary uses a different subset of these helpers.
#![allow(dead_code)]

use alloy::primitives::{Address, B256, U256};
use alloy::rpc::types::TransactionRequest;
use async_trait::async_trait;
use std::sync::Mutex;

use blobmint::blockchain::{ChainError, ChainResult, ChainRpc, HeadInfo};

/// Well-known Anvil dev key #0. Test-only; its address holds nothing on any
/// real network.
pub const TEST_PRIVATE_KEY: &str =
    "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// Address derived from [`TEST_PRIVATE_KEY`].
pub const TEST_SIGNER_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

/// Programmable in-memory chain backend.
///
/// Every method returns a preconfigured value or an injected failure, and
/// appends its name to a call journal so tests can assert which stages ran.
pub struct MockChain {
    pub balance: Mutex<ChainResult<U256>>,
    pub head: Mutex<ChainResult<HeadInfo>>,
    pub gas: Mutex<ChainResult<u64>>,
    pub nonce: Mutex<ChainResult<u64>>,
    pub chain_id: Mutex<ChainResult<u64>>,
    pub submission: Mutex<ChainResult<B256>>,
    pub calls: Mutex<Vec<&'static str>>,
    /// Raw bytes handed to the last `send_raw_transaction`.
    pub submitted_raw: Mutex<Option<Vec<u8>>>,
}

impl MockChain {
    /// A chain where every stage succeeds with plausible values. The
    /// submission echoes back whatever hash the caller compares against,
    /// so hash agreement is not asserted here.
    pub fn healthy() -> Self {
        Self {
            balance: Mutex::new(Ok(U256::from(1))),
            head: Mutex::new(Ok(HeadInfo {
                base_fee_per_gas: 10,
                excess_blob_gas: 0,
            })),
            gas: Mutex::new(Ok(21_000)),
            nonce: Mutex::new(Ok(0)),
            chain_id: Mutex::new(Ok(11_155_111)),
            submission: Mutex::new(Ok(B256::ZERO)),
            calls: Mutex::new(Vec::new()),
            submitted_raw: Mutex::new(None),
        }
    }

    pub fn with_balance(self, balance: U256) -> Self {
        *self.balance.lock().unwrap() = Ok(balance);
        self
    }

    pub fn failing_balance(self) -> Self {
        *self.balance.lock().unwrap() = Err(rpc_down());
        self
    }

    pub fn failing_head(self) -> Self {
        *self.head.lock().unwrap() = Err(rpc_down());
        self
    }

    pub fn failing_gas(self) -> Self {
        *self.gas.lock().unwrap() = Err(rpc_down());
        self
    }

    pub fn failing_nonce(self) -> Self {
        *self.nonce.lock().unwrap() = Err(rpc_down());
        self
    }

    pub fn failing_submission(self) -> Self {
        *self.submission.lock().unwrap() = Err(rpc_down());
        self
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn journal(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }
}

fn rpc_down() -> ChainError {
    ChainError::Rpc("connection refused".into())
}

fn clone_result<T: Clone>(result: &ChainResult<T>) -> ChainResult<T> {
    match result {
        Ok(value) => Ok(value.clone()),
        Err(ChainError::Rpc(msg)) => Err(ChainError::Rpc(msg.clone())),
        Err(ChainError::Timeout(secs)) => Err(ChainError::Timeout(*secs)),
    }
}

#[async_trait]
impl ChainRpc for MockChain {
    async fn get_balance(&self, _address: Address) -> ChainResult<U256> {
        self.journal("get_balance");
        clone_result(&self.balance.lock().unwrap())
    }

    async fn latest_head(&self) -> ChainResult<HeadInfo> {
        self.journal("latest_head");
        clone_result(&self.head.lock().unwrap())
    }

    async fn estimate_gas(&self, _tx: TransactionRequest) -> ChainResult<u64> {
        self.journal("estimate_gas");
        clone_result(&self.gas.lock().unwrap())
    }

    async fn get_transaction_count(&self, _address: Address) -> ChainResult<u64> {
        self.journal("get_transaction_count");
        clone_result(&self.nonce.lock().unwrap())
    }

    async fn get_chain_id(&self) -> ChainResult<u64> {
        self.journal("get_chain_id");
        clone_result(&self.chain_id.lock().unwrap())
    }

    async fn send_raw_transaction(&self, raw: &[u8]) -> ChainResult<B256> {
        self.journal("send_raw_transaction");
        *self.submitted_raw.lock().unwrap() = Some(raw.to_vec());
        clone_result(&self.submission.lock().unwrap())
    }
}
