use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Unauthorized: only the minter can mint")]
    NotMinter,

    #[error("Unauthorized: caller may not move token {token_id}")]
    NotOwnerOrOperator { token_id: String },

    #[error("Token not found: {token_id}")]
    TokenNotFound { token_id: String },

    #[error("Token already minted: {token_id}")]
    TokenClaimed { token_id: String },
}
