//! Withdrawal handlers.
//!
//! All three asset kinds share one verification pipeline:
//!
//! 1. Zero amount / zero token id is rejected before any proof work
//! 2. The asset must be allowed with the matching kind (coins always are)
//! 3. Memo, recipient and proof field validation
//! 4. The supplied leaf must equal the leaf rebuilt from the claim, memo
//!    included
//! 5. The supplied root must be the root committed at `height`
//! 6. The sibling path must lead from the leaf to that root
//! 7. `(root, leaf)` must not be processed yet
//! 8. The caller must satisfy the withdrawal policy
//!
//! Only then does the custody mode decide between releasing from escrow and
//! minting.

use common::{AssetInfo, AssetKind, CustodyMode};
use cosmwasm_std::{
    Addr, Binary, CosmosMsg, Deps, DepsMut, Env, Event, MessageInfo, Response, Uint128,
};

use crate::capability::{resolve, AssetCapability};
use crate::error::ContractError;
use crate::gate::{require_committer, StoredCommitters};
use crate::hash::{bytes32_to_hex, parse_hash, withdrawal_leaf_hash};
use crate::merkle::{verify_proof, MerklePathNode};
use crate::msg::WithdrawalProof;
use crate::state::{WithdrawalPolicy, BLOCK_COMMITS, CONFIG, PROCESSED_WITHDRAWALS, STATS};
use crate::transfer::dispatch_verified;

use super::deposit::validate_memo;
use super::registry::load_allowed;

/// A withdrawal claim as it appears in the L2 withdrawal tree.
/// `amount` is the token id for NFTs.
pub struct WithdrawalClaim {
    pub amount: Uint128,
    pub recipient: String,
    pub withdrawal_id: u64,
    pub height: u64,
    pub memo: Option<Binary>,
}

/// Outcome of the proof pipeline
struct VerifiedWithdrawal {
    recipient: Addr,
    root: [u8; 32],
    leaf: [u8; 32],
    memo: String,
}

pub fn execute_withdraw_coin(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    claim: WithdrawalClaim,
    proof: WithdrawalProof,
) -> Result<Response, ContractError> {
    if claim.amount.is_zero() {
        return Err(ContractError::ZeroAmount);
    }

    let config = CONFIG.load(deps.storage)?;
    let asset = AssetInfo::native(config.native_denom);
    let verified = verify_withdrawal(deps.as_ref(), &info, AssetKind::Coin, &asset, &claim, &proof)?;

    let custody = env.contract.address.clone();
    let capability = resolve(&asset);
    require_escrow_balance(deps.as_ref(), capability.as_ref(), &custody, claim.amount)?;

    let msg = capability.transfer_msg(claim.amount, &custody, &verified.recipient, &custody)?;
    complete(deps, env, capability.as_ref(), msg, &claim, verified, CustodyMode::Escrow)
}

pub fn execute_withdraw_ft(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    asset: String,
    claim: WithdrawalClaim,
    proof: WithdrawalProof,
) -> Result<Response, ContractError> {
    if claim.amount.is_zero() {
        return Err(ContractError::ZeroAmount);
    }

    let (asset_addr, entry) = load_allowed(deps.storage, deps.api, &asset, AssetKind::Ft)?;
    let asset = AssetInfo::Cw20 {
        contract_addr: asset_addr,
    };
    let verified = verify_withdrawal(deps.as_ref(), &info, AssetKind::Ft, &asset, &claim, &proof)?;

    let custody = env.contract.address.clone();
    let capability = resolve(&asset);
    let msg = match entry.custody {
        CustodyMode::Escrow => {
            require_escrow_balance(deps.as_ref(), capability.as_ref(), &custody, claim.amount)?;
            capability.transfer_msg(claim.amount, &custody, &verified.recipient, &custody)?
        }
        CustodyMode::Mint => capability.mint_msg(claim.amount, &verified.recipient)?,
    };

    complete(deps, env, capability.as_ref(), msg, &claim, verified, entry.custody)
}

pub fn execute_withdraw_nft(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    asset: String,
    claim: WithdrawalClaim,
    proof: WithdrawalProof,
) -> Result<Response, ContractError> {
    if claim.amount.is_zero() {
        return Err(ContractError::ZeroAmount);
    }

    let (asset_addr, entry) = load_allowed(deps.storage, deps.api, &asset, AssetKind::Nft)?;
    let asset = AssetInfo::Nft {
        contract_addr: asset_addr,
    };
    let verified = verify_withdrawal(deps.as_ref(), &info, AssetKind::Nft, &asset, &claim, &proof)?;

    let custody = env.contract.address.clone();
    let capability = resolve(&asset);
    let id = claim.amount;

    // A mint-mode id that came back to L1 earlier sits in custody and is
    // released instead of minted again
    let current_owner = capability.owner_of(&deps.querier, id).ok();
    let (msg, mode) = match (entry.custody, current_owner) {
        (CustodyMode::Escrow, Some(owner)) if owner == custody => (
            capability.transfer_msg(id, &custody, &verified.recipient, &custody)?,
            CustodyMode::Escrow,
        ),
        (CustodyMode::Escrow, _) => {
            return Err(ContractError::AssetNotOwnedByCustody {
                asset: asset.to_string(),
                id,
            })
        }
        (CustodyMode::Mint, Some(owner)) if owner == custody => (
            capability.transfer_msg(id, &custody, &verified.recipient, &custody)?,
            CustodyMode::Escrow,
        ),
        (CustodyMode::Mint, Some(_)) => {
            return Err(ContractError::MintFailed {
                asset: asset.to_string(),
                id,
            })
        }
        (CustodyMode::Mint, None) => (
            capability.mint_msg(id, &verified.recipient)?,
            CustodyMode::Mint,
        ),
    };

    complete(deps, env, capability.as_ref(), msg, &claim, verified, mode)
}

fn verify_withdrawal(
    deps: Deps,
    info: &MessageInfo,
    kind: AssetKind,
    asset: &AssetInfo,
    claim: &WithdrawalClaim,
    proof: &WithdrawalProof,
) -> Result<VerifiedWithdrawal, ContractError> {
    let memo = validate_memo(&claim.memo)?;
    let recipient = deps
        .api
        .addr_validate(&claim.recipient)
        .map_err(|err| ContractError::validation(format!("invalid recipient: {}", err)))?;

    let root = parse_hash(&proof.withdrawal_root)?;
    let leaf = parse_hash(&proof.withdrawal_leaf_hash)?;
    let path = proof
        .sibling_hashes
        .iter()
        .map(|sibling| {
            Ok(MerklePathNode {
                hash: parse_hash(&sibling.hash)?,
                is_left_side: sibling.is_left_side,
            })
        })
        .collect::<Result<Vec<_>, ContractError>>()?;

    let expected_leaf = withdrawal_leaf_hash(
        kind,
        asset.id(),
        recipient.as_str(),
        claim.amount.u128(),
        claim.withdrawal_id,
        claim.height,
        claim.memo.as_ref().map(Binary::as_slice).unwrap_or_default(),
    );
    if leaf != expected_leaf {
        deps.api.debug(&format!(
            "bridge: leaf mismatch, supplied {} rebuilt {}",
            bytes32_to_hex(&leaf),
            bytes32_to_hex(&expected_leaf)
        ));
        return Err(ContractError::LeafHashMismatch);
    }

    match BLOCK_COMMITS.may_load(deps.storage, claim.height)? {
        Some(commit) if commit.withdrawal_root == root => {}
        _ => {
            return Err(ContractError::InvalidMerkleRoot {
                height: claim.height,
            })
        }
    }

    if !verify_proof(&leaf, &path, &root) {
        return Err(ContractError::MerkleProofMismatch);
    }

    if PROCESSED_WITHDRAWALS.has(deps.storage, (root.as_slice(), leaf.as_slice())) {
        return Err(ContractError::WithdrawalAlreadyProcessed);
    }

    let config = CONFIG.load(deps.storage)?;
    if config.withdrawal_policy == WithdrawalPolicy::CommittersOnly {
        require_committer(&StoredCommitters::new(deps.storage), &info.sender)?;
    }

    Ok(VerifiedWithdrawal {
        recipient,
        root,
        leaf,
        memo,
    })
}

fn require_escrow_balance(
    deps: Deps,
    capability: &dyn AssetCapability,
    custody: &Addr,
    amount: Uint128,
) -> Result<(), ContractError> {
    let available = capability.holding(&deps.querier, custody, amount)?;
    if available < amount {
        return Err(ContractError::InsufficientBalance {
            asset: capability.info().to_string(),
            available,
            requested: amount,
        });
    }
    Ok(())
}

/// Mark the claim processed and dispatch the release or mint.
fn complete(
    mut deps: DepsMut,
    env: Env,
    capability: &dyn AssetCapability,
    msg: CosmosMsg,
    claim: &WithdrawalClaim,
    verified: VerifiedWithdrawal,
    mode: CustodyMode,
) -> Result<Response, ContractError> {
    PROCESSED_WITHDRAWALS.save(
        deps.storage,
        (verified.root.as_slice(), verified.leaf.as_slice()),
        &env.block.height,
    )?;

    let mut stats = STATS.load(deps.storage)?;
    stats.total_withdrawals += 1;
    STATS.save(deps.storage, &stats)?;

    let sub_msg = dispatch_verified(
        deps.branch(),
        capability,
        msg,
        claim.amount,
        &verified.recipient,
    )?;

    let kind = capability.info().kind();
    let quantity_key = if kind == AssetKind::Nft { "id" } else { "amount" };
    let mut event = Event::new(format!("withdraw-{}", kind))
        .add_attribute("recipient", verified.recipient.clone())
        .add_attribute("asset", capability.info().to_string())
        .add_attribute(quantity_key, claim.amount.to_string())
        .add_attribute("withdrawal_id", claim.withdrawal_id.to_string())
        .add_attribute("height", claim.height.to_string())
        .add_attribute("custody", mode.as_str())
        .add_attribute("withdrawal_root", bytes32_to_hex(&verified.root))
        .add_attribute("withdrawal_leaf_hash", bytes32_to_hex(&verified.leaf));
    if kind == AssetKind::Ft {
        event = event.add_attribute("memo", verified.memo);
    }

    Ok(Response::new()
        .add_submessage(sub_msg)
        .add_event(event)
        .add_attribute("method", format!("withdraw_{}", kind))
        .add_attribute("recipient", verified.recipient)
        .add_attribute(quantity_key, claim.amount.to_string()))
}
