//! Asset allow-list handlers.

use common::{AssetKind, CustodyMode};
use cosmwasm_std::{Addr, Api, DepsMut, Event, MessageInfo, Response, StdResult, Storage};

use crate::error::ContractError;
use crate::gate::{require_committer, StoredCommitters};
use crate::state::{
    AssetEntry, AssetRegistration, ALLOWED_ASSETS, DEFAULTS_INSTALLED, DEFAULT_ASSETS,
};

/// Custody mode of an allowed token contract, `None` if not allowed.
pub fn is_allowed(storage: &dyn Storage, asset: &Addr) -> StdResult<Option<CustodyMode>> {
    Ok(ALLOWED_ASSETS
        .may_load(storage, asset)?
        .map(|entry| entry.custody))
}

/// Resolve an allowed token contract of the given kind.
pub fn load_allowed(
    storage: &dyn Storage,
    api: &dyn Api,
    asset: &str,
    kind: AssetKind,
) -> Result<(Addr, AssetEntry), ContractError> {
    let disallowed = || ContractError::DisallowedAsset {
        asset: asset.to_string(),
    };

    let addr = api.addr_validate(asset).map_err(|_| disallowed())?;
    match ALLOWED_ASSETS.may_load(storage, &addr)? {
        Some(entry) if entry.kind == kind => Ok((addr, entry)),
        _ => Err(disallowed()),
    }
}

/// Install the default asset set supplied at instantiation. Runs once.
pub fn execute_setup_default_assets(
    deps: DepsMut,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    require_committer(&StoredCommitters::new(deps.storage), &info.sender)?;

    let defaults = DEFAULT_ASSETS.load(deps.storage)?;
    if DEFAULTS_INSTALLED.load(deps.storage)? {
        return Err(ContractError::AssetAlreadyAllowed {
            asset: defaults
                .first()
                .map(|registration| registration.asset.clone())
                .unwrap_or_else(|| "default assets".to_string()),
        });
    }

    let mut events = Vec::with_capacity(defaults.len());
    for registration in &defaults {
        events.push(register(deps.storage, deps.api, registration)?);
    }
    DEFAULTS_INSTALLED.save(deps.storage, &true)?;

    Ok(Response::new()
        .add_events(events)
        .add_attribute("method", "setup_default_assets")
        .add_attribute("count", defaults.len().to_string()))
}

pub fn execute_register_asset(
    deps: DepsMut,
    info: MessageInfo,
    registration: AssetRegistration,
) -> Result<Response, ContractError> {
    require_committer(&StoredCommitters::new(deps.storage), &info.sender)?;

    let event = register(deps.storage, deps.api, &registration)?;

    Ok(Response::new()
        .add_event(event)
        .add_attribute("method", "register_asset")
        .add_attribute("asset", registration.asset)
        .add_attribute("kind", registration.kind.as_str())
        .add_attribute("custody", registration.custody.as_str()))
}

fn register(
    storage: &mut dyn Storage,
    api: &dyn Api,
    registration: &AssetRegistration,
) -> Result<Event, ContractError> {
    if registration.kind == AssetKind::Coin {
        return Err(ContractError::validation(
            "native coins are always allowed and cannot be registered",
        ));
    }

    let addr = api.addr_validate(&registration.asset)?;
    if ALLOWED_ASSETS.has(storage, &addr) {
        return Err(ContractError::AssetAlreadyAllowed {
            asset: addr.to_string(),
        });
    }

    ALLOWED_ASSETS.save(
        storage,
        &addr,
        &AssetEntry {
            kind: registration.kind,
            custody: registration.custody,
            l2_contract: registration.l2_contract.clone(),
        },
    )?;

    Ok(Event::new("register-asset")
        .add_attribute("l1_contract", addr)
        .add_attribute("l2_contract", registration.l2_contract.clone())
        .add_attribute("kind", registration.kind.as_str())
        .add_attribute("custody", registration.custody.as_str()))
}
