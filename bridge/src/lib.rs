//! Subnet Bridge Contract - L1 settlement for an L1/L2 subnet bridge
//!
//! A subnet (L2) periodically commits its block digests to this contract on
//! L1. Users move native coins, fungible tokens and NFTs between the tiers.
//!
//! # Deposit Flow (L1 -> L2)
//! 1. User deposits an allowed asset; the bridge takes custody
//! 2. The subnet observes the `deposit-*` event and credits the user on L2
//!
//! # Withdrawal Flow (L2 -> L1)
//! 1. The subnet builds a Merkle tree over the withdrawals of a block
//! 2. A committer anchors the block digest and withdrawal root (`CommitBlock`)
//! 3. A committer (or anyone, under the open policy) submits the claim with
//!    its inclusion proof
//! 4. The bridge releases the asset from escrow or mints it, exactly once
//!
//! # Security
//! - Write-once block commitments per L2 height
//! - Domain-separated leaf and node hashes
//! - Replay protection keyed by (withdrawal root, leaf hash)
//! - Every collaborator transfer is verified against the beneficiary's
//!   holding in the reply

pub mod capability;
pub mod contract;
pub mod error;
mod execute;
pub mod gate;
pub mod hash;
pub mod merkle;
pub mod msg;
mod query;
pub mod state;
mod transfer;

pub use crate::error::ContractError;
pub use crate::hash::{keccak256, withdrawal_leaf_hash};
pub use crate::merkle::{verify_proof, MerklePathNode, MerkleTree};
