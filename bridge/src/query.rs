//! Query handlers for the subnet bridge contract.

use common::AssetKind;
use cosmwasm_std::{Addr, Binary, Deps, Order, StdError, StdResult, Uint128};
use cw_storage_plus::Bound;

use crate::execute::is_allowed;
use crate::hash::{parse_hash, withdrawal_leaf_hash};
use crate::merkle::{verify_proof, MerklePathNode};
use crate::msg::{
    AllowedAssetResponse, AllowedAssetsResponse, BlockCommitResponse, BlockCommitsResponse,
    CommittersResponse, ConfigResponse, IsAllowedResponse, IsCommitterResponse, MerkleSibling,
    StatsResponse, VerifyMerkleProofResponse, WithdrawalLeafHashResponse,
    WithdrawalProcessedResponse,
};
use crate::state::{
    BlockCommit, ALLOWED_ASSETS, BLOCK_COMMITS, COMMITTERS, CONFIG, DEFAULTS_INSTALLED,
    DEFAULT_LIMIT, MAX_LIMIT, PROCESSED_WITHDRAWALS, STATS,
};

fn page_limit(limit: Option<u32>) -> usize {
    limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize
}

fn hash_arg(bytes: &Binary) -> StdResult<[u8; 32]> {
    parse_hash(bytes).map_err(|err| StdError::generic_err(err.to_string()))
}

fn commit_response(height: u64, commit: BlockCommit) -> BlockCommitResponse {
    BlockCommitResponse {
        height,
        block: Binary::from(commit.block.to_vec()),
        withdrawal_root: Binary::from(commit.withdrawal_root.to_vec()),
        committed_at: commit.committed_at,
    }
}

// ============================================================================
// Core Queries
// ============================================================================

pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        admin: config.admin,
        native_denom: config.native_denom,
        withdrawal_policy: config.withdrawal_policy,
        defaults_installed: DEFAULTS_INSTALLED.load(deps.storage)?,
    })
}

pub fn query_stats(deps: Deps) -> StdResult<StatsResponse> {
    STATS.load(deps.storage)
}

// ============================================================================
// Committer Queries
// ============================================================================

pub fn query_committers(
    deps: Deps,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<CommittersResponse> {
    let start_addr = start_after
        .map(|addr| deps.api.addr_validate(&addr))
        .transpose()?;
    let start = start_addr.as_ref().map(Bound::exclusive);

    let committers = COMMITTERS
        .keys(deps.storage, start, None, Order::Ascending)
        .take(page_limit(limit))
        .collect::<StdResult<Vec<Addr>>>()?;

    Ok(CommittersResponse { committers })
}

/// Never errors: an address that does not validate is not a committer.
pub fn query_is_committer(deps: Deps, address: String) -> StdResult<IsCommitterResponse> {
    let is_committer = deps
        .api
        .addr_validate(&address)
        .map(|addr| COMMITTERS.has(deps.storage, &addr))
        .unwrap_or(false);
    Ok(IsCommitterResponse { is_committer })
}

// ============================================================================
// Block Commitment Queries
// ============================================================================

pub fn query_block_commit(deps: Deps, height: u64) -> StdResult<Option<BlockCommitResponse>> {
    Ok(BLOCK_COMMITS
        .may_load(deps.storage, height)?
        .map(|commit| commit_response(height, commit)))
}

pub fn query_latest_commit(deps: Deps) -> StdResult<Option<BlockCommitResponse>> {
    BLOCK_COMMITS
        .range(deps.storage, None, None, Order::Descending)
        .next()
        .transpose()
        .map(|latest| latest.map(|(height, commit)| commit_response(height, commit)))
}

pub fn query_block_commits(
    deps: Deps,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<BlockCommitsResponse> {
    let start = start_after.map(Bound::exclusive);

    let commits = BLOCK_COMMITS
        .range(deps.storage, start, None, Order::Ascending)
        .take(page_limit(limit))
        .map(|item| item.map(|(height, commit)| commit_response(height, commit)))
        .collect::<StdResult<Vec<_>>>()?;

    Ok(BlockCommitsResponse { commits })
}

// ============================================================================
// Asset Registry Queries
// ============================================================================

pub fn query_allowed_asset(deps: Deps, asset: String) -> StdResult<AllowedAssetResponse> {
    let entry = match deps.api.addr_validate(&asset) {
        Ok(addr) => ALLOWED_ASSETS.may_load(deps.storage, &addr)?,
        Err(_) => None,
    };
    Ok(AllowedAssetResponse { asset, entry })
}

pub fn query_is_allowed(deps: Deps, asset: String) -> StdResult<IsAllowedResponse> {
    let custody = match deps.api.addr_validate(&asset) {
        Ok(addr) => is_allowed(deps.storage, &addr)?,
        Err(_) => None,
    };
    Ok(IsAllowedResponse { custody })
}

pub fn query_allowed_assets(
    deps: Deps,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<AllowedAssetsResponse> {
    let start_addr = start_after
        .map(|addr| deps.api.addr_validate(&addr))
        .transpose()?;
    let start = start_addr.as_ref().map(Bound::exclusive);

    let assets = ALLOWED_ASSETS
        .range(deps.storage, start, None, Order::Ascending)
        .take(page_limit(limit))
        .map(|item| {
            let (addr, entry) = item?;
            Ok(AllowedAssetResponse {
                asset: addr.to_string(),
                entry: Some(entry),
            })
        })
        .collect::<StdResult<Vec<_>>>()?;

    Ok(AllowedAssetsResponse { assets })
}

// ============================================================================
// Withdrawal Queries
// ============================================================================

pub fn query_withdrawal_processed(
    deps: Deps,
    withdrawal_root: Binary,
    withdrawal_leaf_hash: Binary,
) -> StdResult<WithdrawalProcessedResponse> {
    let root = hash_arg(&withdrawal_root)?;
    let leaf = hash_arg(&withdrawal_leaf_hash)?;
    let processed_at =
        PROCESSED_WITHDRAWALS.may_load(deps.storage, (root.as_slice(), leaf.as_slice()))?;
    Ok(WithdrawalProcessedResponse {
        processed: processed_at.is_some(),
        processed_at,
    })
}

pub fn query_verify_merkle_proof(
    leaf_hash: Binary,
    sibling_hashes: Vec<MerkleSibling>,
    root: Binary,
) -> StdResult<VerifyMerkleProofResponse> {
    let leaf = hash_arg(&leaf_hash)?;
    let root = hash_arg(&root)?;
    let path = sibling_hashes
        .iter()
        .map(|sibling| {
            Ok(MerklePathNode {
                hash: hash_arg(&sibling.hash)?,
                is_left_side: sibling.is_left_side,
            })
        })
        .collect::<StdResult<Vec<_>>>()?;

    Ok(VerifyMerkleProofResponse {
        valid: verify_proof(&leaf, &path, &root),
    })
}

pub fn query_withdrawal_leaf_hash(
    kind: AssetKind,
    asset: String,
    recipient: String,
    amount: Uint128,
    withdrawal_id: u64,
    height: u64,
    memo: Option<Binary>,
) -> StdResult<WithdrawalLeafHashResponse> {
    let leaf = withdrawal_leaf_hash(
        kind,
        &asset,
        &recipient,
        amount.u128(),
        withdrawal_id,
        height,
        memo.as_ref().map(Binary::as_slice).unwrap_or_default(),
    );
    Ok(WithdrawalLeafHashResponse {
        leaf_hash: Binary::from(leaf.to_vec()),
    })
}
