//! Hash computation for withdrawal claims
//!
//! L2 proof producers must build withdrawal leaves byte for byte the way
//! [`withdrawal_leaf_hash`] does, otherwise the committed root never matches.
//!
//! # Leaf Layout (225 bytes hashed)
//! - Byte 0:        leaf tag (0x00)
//! - Bytes 1-32:    asset kind (uint256, 0 coin / 1 ft / 2 nft)
//! - Bytes 33-64:   keccak256(asset identifier string)
//! - Bytes 65-96:   keccak256(recipient address string)
//! - Bytes 97-128:  amount or token id (uint256, big-endian, left-padded)
//! - Bytes 129-160: withdrawal id (uint256, big-endian, left-padded)
//! - Bytes 161-192: L2 height (uint256, big-endian, left-padded)
//! - Bytes 193-224: keccak256(memo bytes), keccak256("") without a memo

use common::AssetKind;
use cosmwasm_std::Binary;
use tiny_keccak::{Hasher, Keccak};

use crate::error::ContractError;
use crate::merkle::LEAF_TAG;

/// Compute keccak256 hash of arbitrary data
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

/// Compute the leaf committed under a withdrawal root for one claim
///
/// # Arguments
/// * `kind` - Asset family of the claim
/// * `asset` - Native denom or L1 token contract address
/// * `recipient` - L1 recipient address
/// * `amount` - Amount, or token id for NFTs
/// * `withdrawal_id` - Identifier assigned by the subnet
/// * `height` - L2 height whose withdrawal root contains the leaf
/// * `memo` - FT transfer memo, empty for coins and NFTs
pub fn withdrawal_leaf_hash(
    kind: AssetKind,
    asset: &str,
    recipient: &str,
    amount: u128,
    withdrawal_id: u64,
    height: u64,
    memo: &[u8],
) -> [u8; 32] {
    let mut data = [0u8; 225];
    data[0] = LEAF_TAG;

    data[32] = kind.tag();
    data[33..65].copy_from_slice(&keccak256(asset.as_bytes()));
    data[65..97].copy_from_slice(&keccak256(recipient.as_bytes()));

    // u128 goes into the last 16 bytes of its slot
    data[97 + 16..129].copy_from_slice(&amount.to_be_bytes());
    data[129 + 24..161].copy_from_slice(&withdrawal_id.to_be_bytes());
    data[161 + 24..193].copy_from_slice(&height.to_be_bytes());
    data[193..225].copy_from_slice(&keccak256(memo));

    keccak256(&data)
}

/// Decode a 32-byte hash supplied in a message
pub fn parse_hash(bytes: &Binary) -> Result<[u8; 32], ContractError> {
    bytes
        .as_slice()
        .try_into()
        .map_err(|_| ContractError::InvalidHashLength { got: bytes.len() })
}

/// Convert 32-byte hash to hex string (for attributes/logging)
pub fn bytes32_to_hex(bytes: &[u8; 32]) -> String {
    format!("0x{}", hex::encode(bytes))
}
