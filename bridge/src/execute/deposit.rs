//! Deposit handlers: move assets from a user into bridge custody.
//!
//! The sender is always the authenticated caller. FT and NFT pulls go through
//! the asset capability and are verified in the reply.

use common::{AssetInfo, AssetKind};
use cosmwasm_std::{from_json, Binary, DepsMut, Env, Event, MessageInfo, Response, Uint128};
use cw20::Cw20ReceiveMsg;

use crate::capability::resolve;
use crate::error::ContractError;
use crate::msg::ReceiveMsg;
use crate::state::{CONFIG, MAX_MEMO_LEN, STATS};
use crate::transfer::dispatch_verified;

use super::registry::load_allowed;

pub(crate) fn validate_memo(memo: &Option<Binary>) -> Result<String, ContractError> {
    match memo {
        Some(memo) if memo.len() > MAX_MEMO_LEN => Err(ContractError::validation(format!(
            "memo is {} bytes, max {}",
            memo.len(),
            MAX_MEMO_LEN
        ))),
        Some(memo) => Ok(hex::encode(memo.as_slice())),
        None => Ok(String::new()),
    }
}

fn count_deposit(deps: &mut DepsMut) -> Result<(), ContractError> {
    let mut stats = STATS.load(deps.storage)?;
    stats.total_deposits += 1;
    STATS.save(deps.storage, &stats)?;
    Ok(())
}

/// Deposit native coins attached to the call
pub fn execute_deposit_coin(
    mut deps: DepsMut,
    info: MessageInfo,
    amount: Uint128,
) -> Result<Response, ContractError> {
    if amount.is_zero() {
        return Err(ContractError::ZeroAmount);
    }

    let config = CONFIG.load(deps.storage)?;
    match info.funds.as_slice() {
        [coin] if coin.denom == config.native_denom && coin.amount == amount => {}
        _ => {
            return Err(ContractError::validation(format!(
                "attach exactly {}{}",
                amount, config.native_denom
            )))
        }
    }

    count_deposit(&mut deps)?;

    Ok(Response::new()
        .add_event(
            Event::new("deposit-coin")
                .add_attribute("sender", info.sender.clone())
                .add_attribute("denom", config.native_denom)
                .add_attribute("amount", amount.to_string()),
        )
        .add_attribute("method", "deposit_coin")
        .add_attribute("sender", info.sender)
        .add_attribute("amount", amount.to_string()))
}

/// Pull FTs through the allowance the sender granted to the bridge
pub fn execute_deposit_ft(
    mut deps: DepsMut,
    env: Env,
    info: MessageInfo,
    asset: String,
    amount: Uint128,
    memo: Option<Binary>,
) -> Result<Response, ContractError> {
    let (asset_addr, entry) = load_allowed(deps.storage, deps.api, &asset, AssetKind::Ft)?;
    if amount.is_zero() {
        return Err(ContractError::ZeroAmount);
    }
    let memo = validate_memo(&memo)?;

    let custody = env.contract.address;
    let capability = resolve(&AssetInfo::Cw20 {
        contract_addr: asset_addr.clone(),
    });
    let msg = capability.transfer_msg(amount, &info.sender, &custody, &custody)?;
    let sub_msg = dispatch_verified(deps.branch(), capability.as_ref(), msg, amount, &custody)?;

    count_deposit(&mut deps)?;

    Ok(Response::new()
        .add_submessage(sub_msg)
        .add_event(
            Event::new("deposit-ft")
                .add_attribute("sender", info.sender.clone())
                .add_attribute("l1_contract", asset_addr.clone())
                .add_attribute("l2_contract", entry.l2_contract)
                .add_attribute("amount", amount.to_string())
                .add_attribute("memo", memo),
        )
        .add_attribute("method", "deposit_ft")
        .add_attribute("sender", info.sender)
        .add_attribute("asset", asset_addr)
        .add_attribute("amount", amount.to_string()))
}

/// Move an NFT the sender owns into custody. The bridge must be an
/// approved operator of the sender.
pub fn execute_deposit_nft(
    mut deps: DepsMut,
    env: Env,
    info: MessageInfo,
    asset: String,
    id: Uint128,
) -> Result<Response, ContractError> {
    let (asset_addr, entry) = load_allowed(deps.storage, deps.api, &asset, AssetKind::Nft)?;
    if id.is_zero() {
        return Err(ContractError::ZeroAmount);
    }

    let capability = resolve(&AssetInfo::Nft {
        contract_addr: asset_addr.clone(),
    });
    let owner = capability.owner_of(&deps.querier, id)?;
    if owner != info.sender {
        return Err(ContractError::validation(format!(
            "sender does not own {} id {}",
            asset_addr, id
        )));
    }

    let custody = env.contract.address;
    let msg = capability.transfer_msg(id, &info.sender, &custody, &custody)?;
    let sub_msg = dispatch_verified(deps.branch(), capability.as_ref(), msg, id, &custody)?;

    count_deposit(&mut deps)?;

    Ok(Response::new()
        .add_submessage(sub_msg)
        .add_event(
            Event::new("deposit-nft")
                .add_attribute("sender", info.sender.clone())
                .add_attribute("l1_contract", asset_addr.clone())
                .add_attribute("l2_contract", entry.l2_contract)
                .add_attribute("id", id.to_string()),
        )
        .add_attribute("method", "deposit_nft")
        .add_attribute("sender", info.sender)
        .add_attribute("asset", asset_addr)
        .add_attribute("id", id.to_string()))
}

/// cw20 `Send` hook. The tokens are already in custody.
pub fn execute_receive(
    mut deps: DepsMut,
    info: MessageInfo,
    cw20_msg: Cw20ReceiveMsg,
) -> Result<Response, ContractError> {
    let (asset_addr, entry) =
        load_allowed(deps.storage, deps.api, info.sender.as_str(), AssetKind::Ft)?;
    if cw20_msg.amount.is_zero() {
        return Err(ContractError::ZeroAmount);
    }

    let ReceiveMsg::DepositFt { memo } = from_json(&cw20_msg.msg)?;
    let memo = validate_memo(&memo)?;
    let sender = deps.api.addr_validate(&cw20_msg.sender)?;

    count_deposit(&mut deps)?;

    Ok(Response::new()
        .add_event(
            Event::new("deposit-ft")
                .add_attribute("sender", sender.clone())
                .add_attribute("l1_contract", asset_addr.clone())
                .add_attribute("l2_contract", entry.l2_contract)
                .add_attribute("amount", cw20_msg.amount.to_string())
                .add_attribute("memo", memo),
        )
        .add_attribute("method", "deposit_ft_receive")
        .add_attribute("sender", sender)
        .add_attribute("asset", asset_addr)
        .add_attribute("amount", cw20_msg.amount.to_string()))
}
