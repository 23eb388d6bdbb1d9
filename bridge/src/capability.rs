//! Asset capabilities
//!
//! The deposit and withdrawal engines never talk to a token contract or the
//! bank module directly. They resolve an [`AssetCapability`] from the asset's
//! [`AssetInfo`] and ask it for messages and holdings.

use common::nft::{token_id, NftExecuteMsg, NftQueryMsg, OwnerOfResponse};
use common::AssetInfo;
use cosmwasm_std::{
    to_json_binary, Addr, BankMsg, Coin, CosmosMsg, QuerierWrapper, StdError, Uint128, WasmMsg,
};
use cw20::{BalanceResponse, Cw20ExecuteMsg, Cw20QueryMsg};

use crate::error::ContractError;

pub trait AssetCapability {
    fn info(&self) -> &AssetInfo;

    /// Message moving `quantity` (token id for NFTs) from `from` to `to`.
    /// `custody` is the bridge itself.
    fn transfer_msg(
        &self,
        quantity: Uint128,
        from: &Addr,
        to: &Addr,
        custody: &Addr,
    ) -> Result<CosmosMsg, ContractError>;

    /// Message creating `quantity` for `to`. The bridge must be the minter.
    fn mint_msg(&self, quantity: Uint128, to: &Addr) -> Result<CosmosMsg, ContractError>;

    /// Units of the asset `account` holds that are relevant to `quantity`.
    /// Balance for coins and FTs, 1 or 0 for an NFT id.
    fn holding(
        &self,
        querier: &QuerierWrapper,
        account: &Addr,
        quantity: Uint128,
    ) -> Result<Uint128, ContractError>;

    /// Units `quantity` represents in [`AssetCapability::holding`] terms.
    fn units(&self, quantity: Uint128) -> Uint128 {
        quantity
    }

    /// Holding the beneficiary must reach once `quantity` has arrived.
    fn expected_holding(&self, before: Uint128, quantity: Uint128) -> Result<Uint128, ContractError> {
        Ok(before.checked_add(self.units(quantity)).map_err(StdError::from)?)
    }

    /// Current owner of an NFT id. Errors if the lookup fails.
    fn owner_of(&self, _querier: &QuerierWrapper, _quantity: Uint128) -> Result<Addr, ContractError> {
        Err(ContractError::validation(format!(
            "{} has no token ownership",
            self.info()
        )))
    }
}

/// Build the capability for an asset
pub fn resolve(info: &AssetInfo) -> Box<dyn AssetCapability> {
    match info {
        AssetInfo::Native { .. } => Box::new(NativeCoin { info: info.clone() }),
        AssetInfo::Cw20 { .. } => Box::new(FungibleToken { info: info.clone() }),
        AssetInfo::Nft { .. } => Box::new(NonFungibleToken { info: info.clone() }),
    }
}

fn call_failed(err: StdError) -> ContractError {
    ContractError::ContractCallFailed {
        reason: err.to_string(),
    }
}

// ============================================================================
// Native Coin
// ============================================================================

pub struct NativeCoin {
    info: AssetInfo,
}

impl AssetCapability for NativeCoin {
    fn info(&self) -> &AssetInfo {
        &self.info
    }

    fn transfer_msg(
        &self,
        quantity: Uint128,
        from: &Addr,
        to: &Addr,
        custody: &Addr,
    ) -> Result<CosmosMsg, ContractError> {
        if from != custody {
            return Err(ContractError::validation(
                "native coins can only be sent from custody",
            ));
        }
        Ok(CosmosMsg::Bank(BankMsg::Send {
            to_address: to.to_string(),
            amount: vec![Coin {
                denom: self.info.id().to_string(),
                amount: quantity,
            }],
        }))
    }

    fn mint_msg(&self, _quantity: Uint128, _to: &Addr) -> Result<CosmosMsg, ContractError> {
        Err(ContractError::validation("native coins cannot be minted"))
    }

    fn holding(
        &self,
        querier: &QuerierWrapper,
        account: &Addr,
        _quantity: Uint128,
    ) -> Result<Uint128, ContractError> {
        let balance = querier
            .query_balance(account, self.info.id())
            .map_err(call_failed)?;
        Ok(balance.amount)
    }
}

// ============================================================================
// Fungible Token (cw20)
// ============================================================================

pub struct FungibleToken {
    info: AssetInfo,
}

impl AssetCapability for FungibleToken {
    fn info(&self) -> &AssetInfo {
        &self.info
    }

    fn transfer_msg(
        &self,
        quantity: Uint128,
        from: &Addr,
        to: &Addr,
        custody: &Addr,
    ) -> Result<CosmosMsg, ContractError> {
        let msg = if from == custody {
            Cw20ExecuteMsg::Transfer {
                recipient: to.to_string(),
                amount: quantity,
            }
        } else {
            Cw20ExecuteMsg::TransferFrom {
                owner: from.to_string(),
                recipient: to.to_string(),
                amount: quantity,
            }
        };
        Ok(CosmosMsg::Wasm(WasmMsg::Execute {
            contract_addr: self.info.id().to_string(),
            msg: to_json_binary(&msg)?,
            funds: vec![],
        }))
    }

    fn mint_msg(&self, quantity: Uint128, to: &Addr) -> Result<CosmosMsg, ContractError> {
        Ok(CosmosMsg::Wasm(WasmMsg::Execute {
            contract_addr: self.info.id().to_string(),
            msg: to_json_binary(&Cw20ExecuteMsg::Mint {
                recipient: to.to_string(),
                amount: quantity,
            })?,
            funds: vec![],
        }))
    }

    fn holding(
        &self,
        querier: &QuerierWrapper,
        account: &Addr,
        _quantity: Uint128,
    ) -> Result<Uint128, ContractError> {
        let res: BalanceResponse = querier
            .query_wasm_smart(
                self.info.id(),
                &Cw20QueryMsg::Balance {
                    address: account.to_string(),
                },
            )
            .map_err(call_failed)?;
        Ok(res.balance)
    }
}

// ============================================================================
// Non-Fungible Token
// ============================================================================

pub struct NonFungibleToken {
    info: AssetInfo,
}

impl AssetCapability for NonFungibleToken {
    fn info(&self) -> &AssetInfo {
        &self.info
    }

    fn transfer_msg(
        &self,
        quantity: Uint128,
        _from: &Addr,
        to: &Addr,
        _custody: &Addr,
    ) -> Result<CosmosMsg, ContractError> {
        Ok(CosmosMsg::Wasm(WasmMsg::Execute {
            contract_addr: self.info.id().to_string(),
            msg: to_json_binary(&NftExecuteMsg::TransferNft {
                recipient: to.to_string(),
                token_id: token_id(quantity),
            })?,
            funds: vec![],
        }))
    }

    fn mint_msg(&self, quantity: Uint128, to: &Addr) -> Result<CosmosMsg, ContractError> {
        Ok(CosmosMsg::Wasm(WasmMsg::Execute {
            contract_addr: self.info.id().to_string(),
            msg: to_json_binary(&NftExecuteMsg::Mint {
                token_id: token_id(quantity),
                owner: to.to_string(),
                token_uri: None,
            })?,
            funds: vec![],
        }))
    }

    fn holding(
        &self,
        querier: &QuerierWrapper,
        account: &Addr,
        quantity: Uint128,
    ) -> Result<Uint128, ContractError> {
        // A missing token is held by nobody
        let owned = self
            .owner_of(querier, quantity)
            .map(|owner| owner == *account)
            .unwrap_or(false);
        Ok(if owned { Uint128::one() } else { Uint128::zero() })
    }

    fn units(&self, _quantity: Uint128) -> Uint128 {
        Uint128::one()
    }

    fn expected_holding(&self, _before: Uint128, _quantity: Uint128) -> Result<Uint128, ContractError> {
        Ok(Uint128::one())
    }

    fn owner_of(&self, querier: &QuerierWrapper, quantity: Uint128) -> Result<Addr, ContractError> {
        let res: OwnerOfResponse = querier
            .query_wasm_smart(
                self.info.id(),
                &NftQueryMsg::OwnerOf {
                    token_id: token_id(quantity),
                },
            )
            .map_err(call_failed)?;
        Ok(Addr::unchecked(res.owner))
    }
}
