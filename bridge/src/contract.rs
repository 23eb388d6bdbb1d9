//! Subnet Bridge Contract - Entry Points
//!
//! The implementation is modularized into:
//! - `execute/` - Execute message handlers
//! - `query` - Query message handlers
//! - `transfer` - Reply handler verifying collaborator transfers

use common::AssetKind;
use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Reply, Response,
    StdResult,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::execute::{
    execute_add_committer, execute_commit_block, execute_deposit_coin, execute_deposit_ft,
    execute_deposit_nft, execute_receive, execute_register_asset, execute_remove_committer,
    execute_set_withdrawal_policy, execute_setup_default_assets, execute_transfer_admin,
    execute_withdraw_coin, execute_withdraw_ft, execute_withdraw_nft, WithdrawalClaim,
};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::{
    query_allowed_asset, query_allowed_assets, query_block_commit, query_block_commits,
    query_committers, query_config, query_is_allowed, query_is_committer, query_latest_commit,
    query_stats, query_verify_merkle_proof, query_withdrawal_leaf_hash,
    query_withdrawal_processed,
};
use crate::state::{
    AssetRegistration, Config, Stats, COMMITTERS, COMMITTER_COUNT, CONFIG, CONTRACT_NAME,
    CONTRACT_VERSION, DEFAULTS_INSTALLED, DEFAULT_ASSETS, STATS, TRANSFER_REPLY_ID,
};
use crate::transfer::handle_transfer_reply;

// ============================================================================
// Instantiate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let admin = msg
        .admin
        .map(|admin| deps.api.addr_validate(&admin))
        .transpose()?;

    if msg.native_denom.is_empty() {
        return Err(ContractError::validation("native_denom must not be empty"));
    }

    if msg.committers.is_empty() {
        return Err(ContractError::validation("at least one committer required"));
    }

    let mut committer_count = 0u32;
    for committer in &msg.committers {
        let committer = deps.api.addr_validate(committer)?;
        if !COMMITTERS.has(deps.storage, &committer) {
            COMMITTERS.save(deps.storage, &committer, &true)?;
            committer_count += 1;
        }
    }
    COMMITTER_COUNT.save(deps.storage, &committer_count)?;

    // Defaults are only recorded here; SetupDefaultAssets installs them
    let mut default_assets: Vec<AssetRegistration> = Vec::with_capacity(msg.default_assets.len());
    for registration in msg.default_assets {
        if registration.kind == AssetKind::Coin {
            return Err(ContractError::validation(
                "native coins cannot be default assets",
            ));
        }
        let asset = deps.api.addr_validate(&registration.asset)?;
        if default_assets.iter().any(|existing| existing.asset == asset.as_str()) {
            return Err(ContractError::AssetAlreadyAllowed {
                asset: asset.to_string(),
            });
        }
        default_assets.push(AssetRegistration {
            asset: asset.to_string(),
            ..registration
        });
    }
    DEFAULT_ASSETS.save(deps.storage, &default_assets)?;
    DEFAULTS_INSTALLED.save(deps.storage, &false)?;

    let config = Config {
        admin,
        native_denom: msg.native_denom,
        withdrawal_policy: msg.withdrawal_policy.unwrap_or_default(),
    };
    CONFIG.save(deps.storage, &config)?;
    STATS.save(deps.storage, &Stats::default())?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute(
            "admin",
            config
                .admin
                .map(|admin| admin.to_string())
                .unwrap_or_else(|| "none".to_string()),
        )
        .add_attribute("native_denom", config.native_denom)
        .add_attribute("committer_count", committer_count.to_string())
        .add_attribute("withdrawal_policy", config.withdrawal_policy.as_str()))
}

// ============================================================================
// Execute
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        // Block commitments
        ExecuteMsg::CommitBlock {
            height,
            block,
            withdrawal_root,
        } => execute_commit_block(deps, env, info, height, block, withdrawal_root),

        // Asset registry
        ExecuteMsg::SetupDefaultAssets {} => execute_setup_default_assets(deps, info),
        ExecuteMsg::RegisterAsset {
            asset,
            kind,
            custody,
            l2_contract,
        } => execute_register_asset(
            deps,
            info,
            AssetRegistration {
                asset,
                kind,
                custody,
                l2_contract,
            },
        ),

        // Deposits
        ExecuteMsg::DepositCoin { amount } => execute_deposit_coin(deps, info, amount),
        ExecuteMsg::DepositFt {
            asset,
            amount,
            memo,
        } => execute_deposit_ft(deps, env, info, asset, amount, memo),
        ExecuteMsg::DepositNft { asset, id } => execute_deposit_nft(deps, env, info, asset, id),
        ExecuteMsg::Receive(cw20_msg) => execute_receive(deps, info, cw20_msg),

        // Withdrawals
        ExecuteMsg::WithdrawCoin {
            amount,
            recipient,
            withdrawal_id,
            height,
            proof,
        } => execute_withdraw_coin(
            deps,
            env,
            info,
            WithdrawalClaim {
                amount,
                recipient,
                withdrawal_id,
                height,
                memo: None,
            },
            proof,
        ),
        ExecuteMsg::WithdrawFt {
            asset,
            amount,
            recipient,
            withdrawal_id,
            height,
            memo,
            proof,
        } => execute_withdraw_ft(
            deps,
            env,
            info,
            asset,
            WithdrawalClaim {
                amount,
                recipient,
                withdrawal_id,
                height,
                memo,
            },
            proof,
        ),
        ExecuteMsg::WithdrawNft {
            asset,
            id,
            recipient,
            withdrawal_id,
            height,
            proof,
        } => execute_withdraw_nft(
            deps,
            env,
            info,
            asset,
            WithdrawalClaim {
                amount: id,
                recipient,
                withdrawal_id,
                height,
                memo: None,
            },
            proof,
        ),

        // Admin
        ExecuteMsg::AddCommitter { committer } => execute_add_committer(deps, info, committer),
        ExecuteMsg::RemoveCommitter { committer } => {
            execute_remove_committer(deps, info, committer)
        }
        ExecuteMsg::SetWithdrawalPolicy { policy } => {
            execute_set_withdrawal_policy(deps, info, policy)
        }
        ExecuteMsg::TransferAdmin { new_admin } => execute_transfer_admin(deps, info, new_admin),
    }
}

// ============================================================================
// Reply
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    match msg.id {
        TRANSFER_REPLY_ID => handle_transfer_reply(deps, msg),
        id => Err(ContractError::UnknownReply { id }),
    }
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::Stats {} => to_json_binary(&query_stats(deps)?),
        QueryMsg::Committers { start_after, limit } => {
            to_json_binary(&query_committers(deps, start_after, limit)?)
        }
        QueryMsg::IsCommitter { address } => to_json_binary(&query_is_committer(deps, address)?),
        QueryMsg::BlockCommit { height } => to_json_binary(&query_block_commit(deps, height)?),
        QueryMsg::LatestCommit {} => to_json_binary(&query_latest_commit(deps)?),
        QueryMsg::BlockCommits { start_after, limit } => {
            to_json_binary(&query_block_commits(deps, start_after, limit)?)
        }
        QueryMsg::AllowedAsset { asset } => to_json_binary(&query_allowed_asset(deps, asset)?),
        QueryMsg::IsAllowed { asset } => to_json_binary(&query_is_allowed(deps, asset)?),
        QueryMsg::AllowedAssets { start_after, limit } => {
            to_json_binary(&query_allowed_assets(deps, start_after, limit)?)
        }
        QueryMsg::WithdrawalProcessed {
            withdrawal_root,
            withdrawal_leaf_hash,
        } => to_json_binary(&query_withdrawal_processed(
            deps,
            withdrawal_root,
            withdrawal_leaf_hash,
        )?),
        QueryMsg::VerifyMerkleProof {
            leaf_hash,
            sibling_hashes,
            root,
        } => to_json_binary(&query_verify_merkle_proof(leaf_hash, sibling_hashes, root)?),
        QueryMsg::ComputeWithdrawalLeafHash {
            kind,
            asset,
            recipient,
            amount,
            withdrawal_id,
            height,
            memo,
        } => to_json_binary(&query_withdrawal_leaf_hash(
            kind,
            asset,
            recipient,
            amount,
            withdrawal_id,
            height,
            memo,
        )?),
    }
}

// ============================================================================
// Migrate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("method", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}
