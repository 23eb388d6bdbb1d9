//! Message interface of NFT collaborator contracts.
//!
//! The bridge only relies on `TransferNft`, `Mint` and `OwnerOf`. The field
//! names follow the cw721 conventions so existing tooling reads them naturally.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Uint128;

#[cw_serde]
pub enum NftExecuteMsg {
    /// Move `token_id` to `recipient`. Caller must own it or be an approved operator.
    TransferNft { recipient: String, token_id: String },
    /// Create `token_id` owned by `owner`. Minter only.
    Mint {
        token_id: String,
        owner: String,
        token_uri: Option<String>,
    },
    /// Allow `operator` to transfer every token of the caller.
    ApproveAll { operator: String },
    /// Revoke a previous `ApproveAll`.
    RevokeAll { operator: String },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum NftQueryMsg {
    /// Errors when the token does not exist.
    #[returns(OwnerOfResponse)]
    OwnerOf { token_id: String },
    /// Errors when the token does not exist.
    #[returns(NftInfoResponse)]
    NftInfo { token_id: String },
    #[returns(MinterResponse)]
    Minter {},
    #[returns(NumTokensResponse)]
    NumTokens {},
    #[returns(TokensResponse)]
    Tokens {
        owner: String,
        start_after: Option<String>,
        limit: Option<u32>,
    },
}

#[cw_serde]
pub struct OwnerOfResponse {
    pub owner: String,
}

#[cw_serde]
pub struct NftInfoResponse {
    pub token_uri: Option<String>,
}

#[cw_serde]
pub struct MinterResponse {
    pub minter: String,
}

#[cw_serde]
pub struct NumTokensResponse {
    pub count: u64,
}

#[cw_serde]
pub struct TokensResponse {
    pub tokens: Vec<String>,
}

/// Token ids cross the bridge as integers and are stored as decimal strings.
pub fn token_id(id: Uint128) -> String {
    id.to_string()
}
