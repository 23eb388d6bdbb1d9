use cosmwasm_std::{
    entry_point, to_json_binary, Addr, Binary, Deps, DepsMut, Env, MessageInfo, Order, Response,
    StdResult,
};
use cw2::set_contract_version;
use cw_storage_plus::Bound;

use crate::error::ContractError;
use crate::msg::{
    ExecuteMsg, InstantiateMsg, MinterResponse, NftInfoResponse, NumTokensResponse,
    OwnerOfResponse, QueryMsg, TokensResponse,
};
use crate::state::{
    CONTRACT_NAME, CONTRACT_VERSION, DEFAULT_LIMIT, MAX_LIMIT, MINTER, OPERATORS, OWNERS,
    TOKEN_COUNT, TOKEN_URIS,
};

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let minter = deps.api.addr_validate(&msg.minter)?;
    MINTER.save(deps.storage, &minter)?;
    TOKEN_COUNT.save(deps.storage, &0u64)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("name", msg.name)
        .add_attribute("symbol", msg.symbol)
        .add_attribute("minter", minter))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::TransferNft {
            recipient,
            token_id,
        } => execute_transfer_nft(deps, info, recipient, token_id),
        ExecuteMsg::Mint {
            token_id,
            owner,
            token_uri,
        } => execute_mint(deps, info, token_id, owner, token_uri),
        ExecuteMsg::ApproveAll { operator } => execute_approve_all(deps, info, operator),
        ExecuteMsg::RevokeAll { operator } => execute_revoke_all(deps, info, operator),
    }
}

fn execute_transfer_nft(
    deps: DepsMut,
    info: MessageInfo,
    recipient: String,
    token_id: String,
) -> Result<Response, ContractError> {
    let owner = OWNERS
        .may_load(deps.storage, &token_id)?
        .ok_or(ContractError::TokenNotFound {
            token_id: token_id.clone(),
        })?;

    let approved = OPERATORS
        .may_load(deps.storage, (&owner, &info.sender))?
        .unwrap_or(false);
    if info.sender != owner && !approved {
        return Err(ContractError::NotOwnerOrOperator { token_id });
    }

    let recipient_addr = deps.api.addr_validate(&recipient)?;
    OWNERS.save(deps.storage, &token_id, &recipient_addr)?;

    Ok(Response::new()
        .add_attribute("action", "transfer_nft")
        .add_attribute("sender", info.sender)
        .add_attribute("recipient", recipient_addr)
        .add_attribute("token_id", token_id))
}

fn execute_mint(
    deps: DepsMut,
    info: MessageInfo,
    token_id: String,
    owner: String,
    token_uri: Option<String>,
) -> Result<Response, ContractError> {
    let minter = MINTER.load(deps.storage)?;
    if info.sender != minter {
        return Err(ContractError::NotMinter);
    }

    if OWNERS.has(deps.storage, &token_id) {
        return Err(ContractError::TokenClaimed { token_id });
    }

    let owner_addr = deps.api.addr_validate(&owner)?;
    OWNERS.save(deps.storage, &token_id, &owner_addr)?;
    if let Some(uri) = token_uri {
        TOKEN_URIS.save(deps.storage, &token_id, &uri)?;
    }
    TOKEN_COUNT.update(deps.storage, |count| -> StdResult<u64> { Ok(count + 1) })?;

    Ok(Response::new()
        .add_attribute("action", "mint")
        .add_attribute("minter", info.sender)
        .add_attribute("owner", owner_addr)
        .add_attribute("token_id", token_id))
}

fn execute_approve_all(
    deps: DepsMut,
    info: MessageInfo,
    operator: String,
) -> Result<Response, ContractError> {
    let operator_addr = deps.api.addr_validate(&operator)?;
    OPERATORS.save(deps.storage, (&info.sender, &operator_addr), &true)?;

    Ok(Response::new()
        .add_attribute("action", "approve_all")
        .add_attribute("owner", info.sender)
        .add_attribute("operator", operator_addr))
}

fn execute_revoke_all(
    deps: DepsMut,
    info: MessageInfo,
    operator: String,
) -> Result<Response, ContractError> {
    let operator_addr = deps.api.addr_validate(&operator)?;
    OPERATORS.remove(deps.storage, (&info.sender, &operator_addr));

    Ok(Response::new()
        .add_attribute("action", "revoke_all")
        .add_attribute("owner", info.sender)
        .add_attribute("operator", operator_addr))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::OwnerOf { token_id } => to_json_binary(&query_owner_of(deps, token_id)?),
        QueryMsg::NftInfo { token_id } => to_json_binary(&query_nft_info(deps, token_id)?),
        QueryMsg::Minter {} => to_json_binary(&query_minter(deps)?),
        QueryMsg::NumTokens {} => to_json_binary(&NumTokensResponse {
            count: TOKEN_COUNT.load(deps.storage)?,
        }),
        QueryMsg::Tokens {
            owner,
            start_after,
            limit,
        } => to_json_binary(&query_tokens(deps, owner, start_after, limit)?),
    }
}

fn query_owner_of(deps: Deps, token_id: String) -> StdResult<OwnerOfResponse> {
    let owner = OWNERS.load(deps.storage, &token_id)?;
    Ok(OwnerOfResponse {
        owner: owner.to_string(),
    })
}

fn query_nft_info(deps: Deps, token_id: String) -> StdResult<NftInfoResponse> {
    // Load the owner so unknown ids error like OwnerOf
    OWNERS.load(deps.storage, &token_id)?;
    Ok(NftInfoResponse {
        token_uri: TOKEN_URIS.may_load(deps.storage, &token_id)?,
    })
}

fn query_minter(deps: Deps) -> StdResult<MinterResponse> {
    let minter = MINTER.load(deps.storage)?;
    Ok(MinterResponse {
        minter: minter.to_string(),
    })
}

fn query_tokens(
    deps: Deps,
    owner: String,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<TokensResponse> {
    let owner_addr: Addr = deps.api.addr_validate(&owner)?;
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after.as_deref().map(Bound::exclusive);

    let tokens = OWNERS
        .range(deps.storage, start, None, Order::Ascending)
        .filter(|item| matches!(item, Ok((_, holder)) if *holder == owner_addr))
        .take(limit)
        .map(|item| item.map(|(token_id, _)| token_id))
        .collect::<StdResult<Vec<_>>>()?;

    Ok(TokensResponse { tokens })
}
