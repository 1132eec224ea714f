//! Blob-carrying mint transaction service.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌────────────────────────────────────────────────────┐
//!                    │                      BLOBMINT                      │
//!                    │                                                    │
//!   JSON request     │  ┌─────────┐    ┌──────────┐    ┌───────────────┐ │
//!   ─────────────────┼─▶│  http   │───▶│   mint   │───▶│     blob      │ │
//!   {pkey,address,   │  │envelope │    │ pipeline │    │ chunk + KZG   │ │
//!    blob}           │  └─────────┘    └────┬─────┘    └───────────────┘ │
//!                    │                      │                             │
//!                    │                      ▼                             │
//!   JSON response    │                ┌──────────┐   balance / header /  │
//!   ◀────────────────┼────────────────│blockchain│◀──gas / nonce / ──────┼──── L1 node
//!   {code, txid}     │                │  client  │   submit (JSON-RPC)   │     (JSON-RPC)
//!                    │                └──────────┘                        │
//!                    │                                                    │
//!                    │  ┌──────────────────────────────────────────────┐  │
//!                    │  │ Cross-Cutting: config, observability (CSV    │  │
//!                    │  │ access log, tracing), static file serving    │  │
//!                    │  └──────────────────────────────────────────────┘  │
//!                    └────────────────────────────────────────────────────┘
//! ```
//!
//! A request walks one fixed pipeline: validate → balance gate → fee
//! estimation → blob chunking and KZG commitment → gas estimation → nonce
//! fetch → EIP-4844 assembly → sign → submit. Every stage failure is
//! terminal and maps to one stable numeric wire code.

pub mod blob;
pub mod blockchain;
pub mod config;
pub mod http;
pub mod mint;
pub mod observability;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use mint::Minter;
