//! Error types for the subnet bridge contract

use cosmwasm_std::{StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    // ========================================================================
    // Authorization Errors
    // ========================================================================

    #[error("Unauthorized: only admin can perform this action")]
    Unauthorized,

    #[error("Unauthorized: caller is not a committer")]
    InvalidCommitter,

    #[error("Committer already registered: {committer}")]
    CommitterAlreadyRegistered { committer: String },

    #[error("Committer not registered: {committer}")]
    CommitterNotRegistered { committer: String },

    #[error("Cannot remove the last committer")]
    CannotRemoveLastCommitter,

    // ========================================================================
    // Block Commitment Errors
    // ========================================================================

    #[error("Block already committed at height {height}")]
    AlreadyCommitted { height: u64 },

    #[error("Invalid hash length: expected 32 bytes, got {got}")]
    InvalidHashLength { got: usize },

    // ========================================================================
    // Asset Registry Errors
    // ========================================================================

    #[error("Asset not allowed: {asset}")]
    DisallowedAsset { asset: String },

    #[error("Asset already allowed: {asset}")]
    AssetAlreadyAllowed { asset: String },

    // ========================================================================
    // Amount & Custody Errors
    // ========================================================================

    #[error("Amount cannot be zero")]
    ZeroAmount,

    #[error("Validation failed: {reason}")]
    ValidationFailed { reason: String },

    #[error("Insufficient balance of {asset}: available {available}, requested {requested}")]
    InsufficientBalance {
        asset: String,
        available: Uint128,
        requested: Uint128,
    },

    #[error("Asset {asset} id {id} is not owned by the bridge")]
    AssetNotOwnedByCustody { asset: String, id: Uint128 },

    #[error("Cannot mint {asset} id {id}: already owned")]
    MintFailed { asset: String, id: Uint128 },

    // ========================================================================
    // Collaborator Call Errors
    // ========================================================================

    #[error("Asset contract call failed: {reason}")]
    ContractCallFailed { reason: String },

    #[error("Transfer of {asset} reported success but moved nothing")]
    TransferFailed { asset: String },

    #[error("Unknown reply id: {id}")]
    UnknownReply { id: u64 },

    // ========================================================================
    // Withdrawal Verification Errors
    // ========================================================================

    #[error("Withdrawal leaf hash does not match the claim")]
    LeafHashMismatch,

    #[error("Withdrawal root does not match the root committed at height {height}")]
    InvalidMerkleRoot { height: u64 },

    #[error("Merkle proof does not reach the withdrawal root")]
    MerkleProofMismatch,

    #[error("Withdrawal already processed")]
    WithdrawalAlreadyProcessed,
}

impl ContractError {
    pub fn validation(reason: impl Into<String>) -> Self {
        ContractError::ValidationFailed {
            reason: reason.into(),
        }
    }
}
