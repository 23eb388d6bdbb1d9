//! Admin operations handlers.
//!
//! This module handles:
//! - Committer set management
//! - Withdrawal policy
//! - Admin transfer and renouncement

use cosmwasm_std::{Deps, DepsMut, MessageInfo, Response, StdResult};

use crate::error::ContractError;
use crate::state::{Config, WithdrawalPolicy, COMMITTERS, COMMITTER_COUNT, CONFIG};

fn require_admin(deps: Deps, info: &MessageInfo) -> Result<Config, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    match &config.admin {
        Some(admin) if *admin == info.sender => Ok(config),
        _ => Err(ContractError::Unauthorized),
    }
}

// ============================================================================
// Committer Management
// ============================================================================

pub fn execute_add_committer(
    deps: DepsMut,
    info: MessageInfo,
    committer: String,
) -> Result<Response, ContractError> {
    require_admin(deps.as_ref(), &info)?;

    let committer_addr = deps.api.addr_validate(&committer)?;
    if COMMITTERS.has(deps.storage, &committer_addr) {
        return Err(ContractError::CommitterAlreadyRegistered { committer });
    }

    COMMITTERS.save(deps.storage, &committer_addr, &true)?;
    let count = COMMITTER_COUNT.update(deps.storage, |count| -> StdResult<_> { Ok(count + 1) })?;

    Ok(Response::new()
        .add_attribute("method", "add_committer")
        .add_attribute("committer", committer_addr)
        .add_attribute("committer_count", count.to_string()))
}

pub fn execute_remove_committer(
    deps: DepsMut,
    info: MessageInfo,
    committer: String,
) -> Result<Response, ContractError> {
    require_admin(deps.as_ref(), &info)?;

    let committer_addr = deps.api.addr_validate(&committer)?;
    if !COMMITTERS.has(deps.storage, &committer_addr) {
        return Err(ContractError::CommitterNotRegistered { committer });
    }

    let count = COMMITTER_COUNT.load(deps.storage)?;
    if count <= 1 {
        return Err(ContractError::CannotRemoveLastCommitter);
    }

    COMMITTERS.remove(deps.storage, &committer_addr);
    COMMITTER_COUNT.save(deps.storage, &(count - 1))?;

    Ok(Response::new()
        .add_attribute("method", "remove_committer")
        .add_attribute("committer", committer_addr)
        .add_attribute("committer_count", (count - 1).to_string()))
}

// ============================================================================
// Withdrawal Policy
// ============================================================================

pub fn execute_set_withdrawal_policy(
    deps: DepsMut,
    info: MessageInfo,
    policy: WithdrawalPolicy,
) -> Result<Response, ContractError> {
    let mut config = require_admin(deps.as_ref(), &info)?;

    config.withdrawal_policy = policy;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "set_withdrawal_policy")
        .add_attribute("policy", policy.as_str()))
}

// ============================================================================
// Admin Transfer
// ============================================================================

/// Hand the admin role over, or renounce it with `None`. Once renounced the
/// committer set and withdrawal policy are fixed.
pub fn execute_transfer_admin(
    deps: DepsMut,
    info: MessageInfo,
    new_admin: Option<String>,
) -> Result<Response, ContractError> {
    let mut config = require_admin(deps.as_ref(), &info)?;

    config.admin = new_admin
        .map(|admin| deps.api.addr_validate(&admin))
        .transpose()?;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "transfer_admin")
        .add_attribute(
            "new_admin",
            config
                .admin
                .map(|admin| admin.to_string())
                .unwrap_or_else(|| "none".to_string()),
        ))
}
