use std::fmt;

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};

/// Asset family moved across the bridge.
#[cw_serde]
#[derive(Copy, Eq)]
pub enum AssetKind {
    /// Native L1 coin (bank module denom)
    Coin,
    /// Fungible token (cw20)
    Ft,
    /// Non-fungible token
    Nft,
}

impl AssetKind {
    /// Tag byte used in the withdrawal leaf encoding.
    pub fn tag(&self) -> u8 {
        match self {
            AssetKind::Coin => 0,
            AssetKind::Ft => 1,
            AssetKind::Nft => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AssetKind::Coin => "coin",
            AssetKind::Ft => "ft",
            AssetKind::Nft => "nft",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a withdrawal of a registered asset is satisfied on L1.
#[cw_serde]
#[derive(Copy, Eq)]
pub enum CustodyMode {
    /// The asset lives on L2; withdrawals create it on L1.
    Mint,
    /// The asset was deposited earlier; withdrawals release it from custody.
    Escrow,
}

impl CustodyMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CustodyMode::Mint => "mint",
            CustodyMode::Escrow => "escrow",
        }
    }
}

impl fmt::Display for CustodyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies a concrete asset on L1.
#[cw_serde]
pub enum AssetInfo {
    Native { denom: String },
    Cw20 { contract_addr: Addr },
    Nft { contract_addr: Addr },
}

impl AssetInfo {
    pub fn native(denom: impl Into<String>) -> Self {
        AssetInfo::Native {
            denom: denom.into(),
        }
    }

    pub fn kind(&self) -> AssetKind {
        match self {
            AssetInfo::Native { .. } => AssetKind::Coin,
            AssetInfo::Cw20 { .. } => AssetKind::Ft,
            AssetInfo::Nft { .. } => AssetKind::Nft,
        }
    }

    /// Denom for coins, contract address for token contracts.
    pub fn id(&self) -> &str {
        match self {
            AssetInfo::Native { denom } => denom,
            AssetInfo::Cw20 { contract_addr } | AssetInfo::Nft { contract_addr } => {
                contract_addr.as_str()
            }
        }
    }
}

impl fmt::Display for AssetInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// A quantity of an asset. For NFTs the amount is the token id.
#[cw_serde]
pub struct Asset {
    pub info: AssetInfo,
    pub amount: Uint128,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_follows_info_variant() {
        assert_eq!(AssetInfo::native("ustx").kind(), AssetKind::Coin);
        assert_eq!(
            AssetInfo::Cw20 {
                contract_addr: Addr::unchecked("contract1")
            }
            .kind(),
            AssetKind::Ft
        );
        assert_eq!(
            AssetInfo::Nft {
                contract_addr: Addr::unchecked("contract2")
            }
            .id(),
            "contract2"
        );
    }

    #[test]
    fn leaf_tags_are_distinct() {
        let tags = [AssetKind::Coin.tag(), AssetKind::Ft.tag(), AssetKind::Nft.tag()];
        assert_eq!(tags, [0, 1, 2]);
    }
}
