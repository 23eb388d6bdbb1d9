use cosmwasm_std::Addr;
use cw_storage_plus::{Item, Map};

pub const CONTRACT_NAME: &str = "crates.io:subnet-nft";
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 50;

pub const MINTER: Item<Addr> = Item::new("minter");

pub const TOKEN_COUNT: Item<u64> = Item::new("token_count");

/// token_id => owner
pub const OWNERS: Map<&str, Addr> = Map::new("owners");

/// token_id => token uri
pub const TOKEN_URIS: Map<&str, String> = Map::new("token_uris");

/// (owner, operator) => approved
pub const OPERATORS: Map<(&Addr, &Addr), bool> = Map::new("operators");
