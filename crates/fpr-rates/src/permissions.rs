//! # Permissions
//!
//! Role registry gating the engine's mutating surface. One admin, any
//! number of operators and alerters, and a single reserve identity that is
//! the only caller allowed to record trades.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::{RatesError, RatesResult};
use crate::types::Address;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Permissions {
    admin: Address,
    operators: BTreeSet<Address>,
    alerters: BTreeSet<Address>,
    reserve: Address,
}

impl Permissions {
    /// Start with `admin` holding the admin role and no other grants.
    pub fn new(admin: Address) -> Self {
        Self {
            admin,
            operators: BTreeSet::new(),
            alerters: BTreeSet::new(),
            reserve: Address::ZERO,
        }
    }

    pub fn admin(&self) -> Address {
        self.admin
    }

    pub fn reserve(&self) -> Address {
        self.reserve
    }

    pub fn is_operator(&self, caller: Address) -> bool {
        self.operators.contains(&caller)
    }

    pub fn is_alerter(&self, caller: Address) -> bool {
        self.alerters.contains(&caller)
    }

    // ========================================================================
    // Guards
    // ========================================================================

    pub fn require_admin(&self, caller: Address) -> RatesResult<()> {
        if caller != self.admin {
            return Err(RatesError::Unauthorized);
        }
        Ok(())
    }

    pub fn require_operator(&self, caller: Address) -> RatesResult<()> {
        if !self.operators.contains(&caller) {
            return Err(RatesError::Unauthorized);
        }
        Ok(())
    }

    pub fn require_alerter(&self, caller: Address) -> RatesResult<()> {
        if !self.alerters.contains(&caller) {
            return Err(RatesError::Unauthorized);
        }
        Ok(())
    }

    pub fn require_reserve(&self, caller: Address) -> RatesResult<()> {
        if self.reserve == Address::ZERO || caller != self.reserve {
            return Err(RatesError::Unauthorized);
        }
        Ok(())
    }

    // ========================================================================
    // Mutation (admin-gated)
    // ========================================================================

    pub fn transfer_admin(&mut self, caller: Address, new_admin: Address) -> RatesResult<()> {
        self.require_admin(caller)?;
        info!(old = %self.admin, new = %new_admin, "admin transferred");
        self.admin = new_admin;
        Ok(())
    }

    pub fn add_operator(&mut self, caller: Address, operator: Address) -> RatesResult<()> {
        self.require_admin(caller)?;
        self.operators.insert(operator);
        Ok(())
    }

    pub fn remove_operator(&mut self, caller: Address, operator: Address) -> RatesResult<()> {
        self.require_admin(caller)?;
        self.operators.remove(&operator);
        Ok(())
    }

    pub fn add_alerter(&mut self, caller: Address, alerter: Address) -> RatesResult<()> {
        self.require_admin(caller)?;
        self.alerters.insert(alerter);
        Ok(())
    }

    pub fn remove_alerter(&mut self, caller: Address, alerter: Address) -> RatesResult<()> {
        self.require_admin(caller)?;
        self.alerters.remove(&alerter);
        Ok(())
    }

    /// Point the recording role at a new reserve identity.
    pub fn set_reserve(&mut self, caller: Address, reserve: Address) -> RatesResult<()> {
        self.require_admin(caller)?;
        info!(%reserve, "reserve updated");
        self.reserve = reserve;
        Ok(())
    }
}
