//! Execute handlers for the subnet bridge contract.
//!
//! - `commit` - L2 block commitments
//! - `registry` - asset allow-list
//! - `deposit` - coin, FT and NFT deposits into custody
//! - `withdraw` - Merkle-verified withdrawals
//! - `admin` - committer set, withdrawal policy and admin role

mod admin;
mod commit;
mod deposit;
mod registry;
mod withdraw;

pub use admin::*;
pub use commit::*;
pub use deposit::*;
pub use registry::*;
pub use withdraw::*;
