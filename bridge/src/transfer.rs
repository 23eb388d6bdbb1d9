//! Verified collaborator transfers
//!
//! A token contract can report success without moving anything. Every
//! transfer or mint the bridge asks for is sent with reply-always semantics,
//! and the reply compares the beneficiary's holding against the value
//! snapshotted before dispatch.

use common::Asset;
use cosmwasm_std::{Addr, CosmosMsg, DepsMut, Reply, Response, SubMsg, SubMsgResult, Uint128};

use crate::capability::{resolve, AssetCapability};
use crate::error::ContractError;
use crate::state::{PendingTransfer, PENDING_TRANSFER, TRANSFER_REPLY_ID};

/// Wrap `msg` so its outcome is checked in [`handle_transfer_reply`].
pub fn dispatch_verified(
    deps: DepsMut,
    capability: &dyn AssetCapability,
    msg: CosmosMsg,
    quantity: Uint128,
    beneficiary: &Addr,
) -> Result<SubMsg, ContractError> {
    let before = capability.holding(&deps.querier, beneficiary, quantity)?;
    let expected_holding = capability.expected_holding(before, quantity)?;

    PENDING_TRANSFER.save(
        deps.storage,
        &PendingTransfer {
            asset: Asset {
                info: capability.info().clone(),
                amount: quantity,
            },
            beneficiary: beneficiary.clone(),
            expected_holding,
        },
    )?;

    Ok(SubMsg::reply_always(msg, TRANSFER_REPLY_ID))
}

pub fn handle_transfer_reply(deps: DepsMut, msg: Reply) -> Result<Response, ContractError> {
    let pending = PENDING_TRANSFER.load(deps.storage)?;
    PENDING_TRANSFER.remove(deps.storage);

    if let SubMsgResult::Err(reason) = msg.result {
        deps.api
            .debug(&format!("bridge: transfer of {} errored: {}", pending.asset.info, reason));
        return Err(ContractError::ContractCallFailed { reason });
    }

    let capability = resolve(&pending.asset.info);
    let holding = capability.holding(&deps.querier, &pending.beneficiary, pending.asset.amount)?;
    deps.api.debug(&format!(
        "bridge: {} holding of {} is {}, expected {}",
        pending.beneficiary, pending.asset.info, holding, pending.expected_holding
    ));

    if holding < pending.expected_holding {
        return Err(ContractError::TransferFailed {
            asset: pending.asset.info.to_string(),
        });
    }

    Ok(Response::new()
        .add_attribute("transfer_verified", "true")
        .add_attribute("beneficiary", pending.beneficiary))
}
