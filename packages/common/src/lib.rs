//! Common - Shared Types for the Subnet Bridge Contracts
//!
//! This package provides the asset identifiers used by the settlement
//! contract and the message interface that NFT collaborator contracts expose.

pub mod asset;
pub mod nft;

pub use asset::{Asset, AssetInfo, AssetKind, CustodyMode};
