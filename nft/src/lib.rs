//! Subnet NFT - a minimal non-fungible token contract for L1.
//!
//! Implements the NFT capability interface from `common::nft`: ownership,
//! operator approvals, transfers, and minter-gated minting. The bridge mints
//! through it for mint-mode withdrawals and escrows its tokens on deposit.

pub mod contract;
pub mod error;
pub mod msg;
pub mod state;

pub use crate::error::ContractError;
