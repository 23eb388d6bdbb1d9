//! Committer authorization

use cosmwasm_std::{Addr, Storage};

use crate::error::ContractError;
use crate::state::COMMITTERS;

/// Answers whether an account belongs to the committer set.
///
/// Implementations must be total and side-effect free: an unknown or
/// malformed caller is simply not authorized.
pub trait AuthorizationGate {
    fn is_authorized(&self, caller: &Addr) -> bool;
}

/// The committer set kept in contract storage
pub struct StoredCommitters<'a> {
    storage: &'a dyn Storage,
}

impl<'a> StoredCommitters<'a> {
    pub fn new(storage: &'a dyn Storage) -> Self {
        StoredCommitters { storage }
    }
}

impl AuthorizationGate for StoredCommitters<'_> {
    fn is_authorized(&self, caller: &Addr) -> bool {
        COMMITTERS.has(self.storage, caller)
    }
}

pub fn require_committer(gate: &dyn AuthorizationGate, caller: &Addr) -> Result<(), ContractError> {
    if gate.is_authorized(caller) {
        Ok(())
    } else {
        Err(ContractError::InvalidCommitter)
    }
}
