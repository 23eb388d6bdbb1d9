use cosmwasm_schema::cw_serde;

pub use common::nft::{
    MinterResponse, NftExecuteMsg as ExecuteMsg, NftInfoResponse, NftQueryMsg as QueryMsg,
    NumTokensResponse, OwnerOfResponse, TokensResponse,
};

#[cw_serde]
pub struct InstantiateMsg {
    /// Collection name
    pub name: String,
    /// Collection symbol
    pub symbol: String,
    /// Account allowed to mint (the bridge for subnet-native collections)
    pub minter: String,
}
