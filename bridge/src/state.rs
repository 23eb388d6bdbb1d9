//! State definitions for the subnet bridge contract
//!
//! Block commitments, the asset allow-list and the processed-withdrawal
//! markers are write-once: nothing in the contract updates or removes them.

use common::{Asset, AssetKind, CustodyMode};
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};
use cw_storage_plus::{Item, Map};

// ============================================================================
// Core Configuration
// ============================================================================

/// Who may execute withdrawals once the proof checks pass
#[cw_serde]
#[derive(Copy, Eq, Default)]
pub enum WithdrawalPolicy {
    /// Only registered committers submit withdrawals
    #[default]
    CommittersOnly,
    /// Anyone holding a valid proof may submit
    Open,
}

impl WithdrawalPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            WithdrawalPolicy::CommittersOnly => "committers_only",
            WithdrawalPolicy::Open => "open",
        }
    }
}

/// Contract configuration
#[cw_serde]
pub struct Config {
    /// Manages the committer set. `None` once renounced.
    pub admin: Option<Addr>,
    /// Bank denom accepted by coin deposits and released by coin withdrawals
    pub native_denom: String,
    pub withdrawal_policy: WithdrawalPolicy,
}

/// Bridge statistics
#[cw_serde]
#[derive(Default)]
pub struct Stats {
    pub total_commits: u64,
    pub total_deposits: u64,
    pub total_withdrawals: u64,
}

// ============================================================================
// Block Commitments
// ============================================================================

/// L2 block digest and withdrawal root anchored at one L2 height
#[cw_serde]
pub struct BlockCommit {
    pub block: [u8; 32],
    pub withdrawal_root: [u8; 32],
    /// L1 block height at which the commitment was recorded
    pub committed_at: u64,
}

// ============================================================================
// Asset Registry
// ============================================================================

/// Allow-list entry for an L1 token contract
#[cw_serde]
pub struct AssetEntry {
    pub kind: AssetKind,
    pub custody: CustodyMode,
    /// Paired contract on the subnet
    pub l2_contract: String,
}

/// One registration request, as supplied to `RegisterAsset` or the
/// default asset set
#[cw_serde]
pub struct AssetRegistration {
    /// L1 token contract address
    pub asset: String,
    /// `ft` or `nft`
    pub kind: AssetKind,
    pub custody: CustodyMode,
    pub l2_contract: String,
}

// ============================================================================
// Collaborator Transfers
// ============================================================================

/// Transfer awaiting outcome verification in the reply handler
#[cw_serde]
pub struct PendingTransfer {
    /// Asset and quantity (token id for NFTs) moved by the sub-message
    pub asset: Asset,
    /// Account that must hold the units after the call
    pub beneficiary: Addr,
    /// Holding the beneficiary must reach: balance for coins and FTs,
    /// 1 for an owned NFT id
    pub expected_holding: Uint128,
}

// ============================================================================
// Constants
// ============================================================================

/// Contract name for cw2 migration info
pub const CONTRACT_NAME: &str = "crates.io:subnet-bridge";

/// Contract version for cw2 migration info
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Maximum memo length accepted on FT deposits and withdrawals
pub const MAX_MEMO_LEN: usize = 34;

/// Reply id for verified collaborator transfers
pub const TRANSFER_REPLY_ID: u64 = 1;

pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 50;

// ============================================================================
// Storage
// ============================================================================

pub const CONFIG: Item<Config> = Item::new("config");

pub const STATS: Item<Stats> = Item::new("stats");

/// Committer ("miner") set
pub const COMMITTERS: Map<&Addr, bool> = Map::new("committers");

pub const COMMITTER_COUNT: Item<u32> = Item::new("committer_count");

/// L2 height => commitment
pub const BLOCK_COMMITS: Map<u64, BlockCommit> = Map::new("block_commits");

/// L1 token contract => allow-list entry
pub const ALLOWED_ASSETS: Map<&Addr, AssetEntry> = Map::new("allowed_assets");

/// Baseline registrations supplied at instantiation
pub const DEFAULT_ASSETS: Item<Vec<AssetRegistration>> = Item::new("default_assets");

pub const DEFAULTS_INSTALLED: Item<bool> = Item::new("defaults_installed");

/// (withdrawal_root, leaf_hash) => L1 height at which it was processed
pub const PROCESSED_WITHDRAWALS: Map<(&[u8], &[u8]), u64> = Map::new("processed_withdrawals");

pub const PENDING_TRANSFER: Item<PendingTransfer> = Item::new("pending_transfer");
