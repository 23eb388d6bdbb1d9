//! Block commitment handler.

use cosmwasm_std::{Binary, DepsMut, Env, Event, MessageInfo, Response};

use crate::error::ContractError;
use crate::gate::{require_committer, StoredCommitters};
use crate::hash::{bytes32_to_hex, parse_hash};
use crate::state::{BlockCommit, BLOCK_COMMITS, STATS};

/// Anchor an L2 block digest and its withdrawal root at `height`.
///
/// An occupied height is reported before the caller is checked, so anyone
/// can learn that a height is taken. The recorded digest is returned as the
/// response data.
pub fn execute_commit_block(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    height: u64,
    block: Binary,
    withdrawal_root: Binary,
) -> Result<Response, ContractError> {
    let block = parse_hash(&block)?;
    let withdrawal_root = parse_hash(&withdrawal_root)?;

    if BLOCK_COMMITS.has(deps.storage, height) {
        return Err(ContractError::AlreadyCommitted { height });
    }

    require_committer(&StoredCommitters::new(deps.storage), &info.sender)?;

    BLOCK_COMMITS.save(
        deps.storage,
        height,
        &BlockCommit {
            block,
            withdrawal_root,
            committed_at: env.block.height,
        },
    )?;

    let mut stats = STATS.load(deps.storage)?;
    stats.total_commits += 1;
    STATS.save(deps.storage, &stats)?;

    let block_hex = bytes32_to_hex(&block);
    let root_hex = bytes32_to_hex(&withdrawal_root);

    Ok(Response::new()
        .set_data(Binary::from(block.to_vec()))
        .add_event(
            Event::new("block-commit")
                .add_attribute("block_commit", block_hex.clone())
                .add_attribute("block_height", height.to_string())
                .add_attribute("withdrawal_root", root_hex),
        )
        .add_attribute("method", "commit_block")
        .add_attribute("committer", info.sender)
        .add_attribute("height", height.to_string())
        .add_attribute("block", block_hex))
}
