//! Message types for the subnet bridge contract

use common::{AssetKind, CustodyMode};
use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Uint128};
use cw20::Cw20ReceiveMsg;

use crate::state::{AssetEntry, AssetRegistration, Stats, WithdrawalPolicy};

// ============================================================================
// Instantiate & Migrate
// ============================================================================

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
pub struct InstantiateMsg {
    /// Manages the committer set. `None` fixes the set at instantiation.
    pub admin: Option<String>,
    /// Initial committer set, must not be empty
    pub committers: Vec<String>,
    /// Bank denom bridged as the native coin
    pub native_denom: String,
    /// Baseline registrations installed by `SetupDefaultAssets`
    #[serde(default)]
    pub default_assets: Vec<AssetRegistration>,
    /// Defaults to `committers_only`
    pub withdrawal_policy: Option<WithdrawalPolicy>,
}

// ============================================================================
// Execute Messages
// ============================================================================

/// Sibling on a withdrawal Merkle path
#[cw_serde]
pub struct MerkleSibling {
    /// 32-byte sibling hash
    pub hash: Binary,
    /// Sibling is the left operand of the parent hash
    pub is_left_side: bool,
}

/// Inclusion proof of a withdrawal leaf under a committed root
#[cw_serde]
pub struct WithdrawalProof {
    pub withdrawal_root: Binary,
    pub withdrawal_leaf_hash: Binary,
    pub sibling_hashes: Vec<MerkleSibling>,
}

#[cw_serde]
pub enum ExecuteMsg {
    // ========================================================================
    // Block Commitments
    // ========================================================================
    /// Anchor an L2 block digest and its withdrawal root at `height`
    CommitBlock {
        height: u64,
        block: Binary,
        withdrawal_root: Binary,
    },

    // ========================================================================
    // Asset Registry
    // ========================================================================
    /// Install the default asset set configured at instantiation (once)
    SetupDefaultAssets {},

    RegisterAsset {
        asset: String,
        kind: AssetKind,
        custody: CustodyMode,
        l2_contract: String,
    },

    // ========================================================================
    // Deposits
    // ========================================================================
    /// Attach exactly `amount` of the native denom
    DepositCoin { amount: Uint128 },

    /// Pulls `amount` through the allowance granted to the bridge
    DepositFt {
        asset: String,
        amount: Uint128,
        memo: Option<Binary>,
    },

    /// Caller must own `id` and have approved the bridge as operator
    DepositNft { asset: String, id: Uint128 },

    /// cw20 `Send` hook
    Receive(Cw20ReceiveMsg),

    // ========================================================================
    // Withdrawals
    // ========================================================================
    WithdrawCoin {
        amount: Uint128,
        recipient: String,
        withdrawal_id: u64,
        height: u64,
        proof: WithdrawalProof,
    },

    WithdrawFt {
        asset: String,
        amount: Uint128,
        recipient: String,
        withdrawal_id: u64,
        height: u64,
        memo: Option<Binary>,
        proof: WithdrawalProof,
    },

    WithdrawNft {
        asset: String,
        id: Uint128,
        recipient: String,
        withdrawal_id: u64,
        height: u64,
        proof: WithdrawalProof,
    },

    // ========================================================================
    // Admin Operations
    // ========================================================================
    AddCommitter { committer: String },

    RemoveCommitter { committer: String },

    SetWithdrawalPolicy { policy: WithdrawalPolicy },

    /// Hand the admin role to `new_admin`, or renounce it with `None`
    TransferAdmin { new_admin: Option<String> },
}

/// Payload of the cw20 `Send` hook
#[cw_serde]
pub enum ReceiveMsg {
    DepositFt { memo: Option<Binary> },
}

// ============================================================================
// Query Messages
// ============================================================================

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},

    #[returns(StatsResponse)]
    Stats {},

    #[returns(CommittersResponse)]
    Committers {
        start_after: Option<String>,
        limit: Option<u32>,
    },

    #[returns(IsCommitterResponse)]
    IsCommitter { address: String },

    /// Commitment at an L2 height, `None` if absent
    #[returns(Option<BlockCommitResponse>)]
    BlockCommit { height: u64 },

    /// Highest committed L2 height
    #[returns(Option<BlockCommitResponse>)]
    LatestCommit {},

    #[returns(BlockCommitsResponse)]
    BlockCommits {
        start_after: Option<u64>,
        limit: Option<u32>,
    },

    #[returns(AllowedAssetResponse)]
    AllowedAsset { asset: String },

    /// Custody mode of an allowed token contract
    #[returns(IsAllowedResponse)]
    IsAllowed { asset: String },

    #[returns(AllowedAssetsResponse)]
    AllowedAssets {
        start_after: Option<String>,
        limit: Option<u32>,
    },

    #[returns(WithdrawalProcessedResponse)]
    WithdrawalProcessed {
        withdrawal_root: Binary,
        withdrawal_leaf_hash: Binary,
    },

    /// Pure proof evaluation, no state access
    #[returns(VerifyMerkleProofResponse)]
    VerifyMerkleProof {
        leaf_hash: Binary,
        sibling_hashes: Vec<MerkleSibling>,
        root: Binary,
    },

    /// Leaf hash an L2 proof producer must commit for a claim
    #[returns(WithdrawalLeafHashResponse)]
    ComputeWithdrawalLeafHash {
        kind: AssetKind,
        /// Native denom or L1 token contract address
        asset: String,
        recipient: String,
        amount: Uint128,
        withdrawal_id: u64,
        height: u64,
        /// FT memo, omitted for coins and NFTs
        memo: Option<Binary>,
    },
}

// ============================================================================
// Query Responses
// ============================================================================

#[cw_serde]
pub struct ConfigResponse {
    pub admin: Option<Addr>,
    pub native_denom: String,
    pub withdrawal_policy: WithdrawalPolicy,
    pub defaults_installed: bool,
}

pub type StatsResponse = Stats;

#[cw_serde]
pub struct CommittersResponse {
    pub committers: Vec<Addr>,
}

#[cw_serde]
pub struct IsCommitterResponse {
    pub is_committer: bool,
}

#[cw_serde]
pub struct BlockCommitResponse {
    pub height: u64,
    pub block: Binary,
    pub withdrawal_root: Binary,
    pub committed_at: u64,
}

#[cw_serde]
pub struct BlockCommitsResponse {
    pub commits: Vec<BlockCommitResponse>,
}

#[cw_serde]
pub struct AllowedAssetResponse {
    pub asset: String,
    /// `None` when the asset is not allowed
    pub entry: Option<AssetEntry>,
}

#[cw_serde]
pub struct IsAllowedResponse {
    pub custody: Option<CustodyMode>,
}

#[cw_serde]
pub struct AllowedAssetsResponse {
    pub assets: Vec<AllowedAssetResponse>,
}

#[cw_serde]
pub struct WithdrawalProcessedResponse {
    pub processed: bool,
    /// L1 height at which the withdrawal was processed
    pub processed_at: Option<u64>,
}

#[cw_serde]
pub struct VerifyMerkleProofResponse {
    pub valid: bool,
}

#[cw_serde]
pub struct WithdrawalLeafHashResponse {
    pub leaf_hash: Binary,
}
