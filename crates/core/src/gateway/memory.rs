//! In-memory settlement ledger.
//!
//! Models a fungible token with balances and approve/pull allowances, with the
//! ledger's custody as a separate balance. Used by tests and the scenario
//! runner in place of a real settlement network.

use std::collections::HashMap;

use tally_shared::types::PartyId;
use tracing::debug;

use super::{GatewayError, SettlementGateway, Transfer};

/// Token balances held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemorySettlement {
    balances: HashMap<PartyId, i64>,
    allowances: HashMap<PartyId, i64>,
    custody: i64,
    fail_next: Option<GatewayError>,
    history: Vec<Transfer>,
}

impl InMemorySettlement {
    /// Creates an empty settlement ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Credits `amount` of new tokens to `party`.
    pub fn mint(&mut self, party: PartyId, amount: i64) {
        *self.balances.entry(party).or_insert(0) += amount;
    }

    /// Sets how much the ledger may pull from `owner`.
    pub fn approve(&mut self, owner: PartyId, amount: i64) {
        self.balances.entry(owner).or_insert(0);
        self.allowances.insert(owner, amount);
    }

    /// Token balance of `party` (zero if unknown).
    #[must_use]
    pub fn balance_of(&self, party: PartyId) -> i64 {
        self.balances.get(&party).copied().unwrap_or(0)
    }

    /// Remaining allowance from `owner` to the ledger.
    #[must_use]
    pub fn allowance(&self, owner: PartyId) -> i64 {
        self.allowances.get(&owner).copied().unwrap_or(0)
    }

    /// Tokens held in the ledger's custody.
    #[must_use]
    pub const fn custody_balance(&self) -> i64 {
        self.custody
    }

    /// Makes the next transfer fail with `error`.
    pub fn fail_next(&mut self, error: GatewayError) {
        self.fail_next = Some(error);
    }

    /// Successful transfers, oldest first.
    #[must_use]
    pub fn history(&self) -> &[Transfer] {
        &self.history
    }
}

impl SettlementGateway for InMemorySettlement {
    fn pull(&mut self, from: PartyId, amount: i64) -> Result<(), GatewayError> {
        if let Some(err) = self.fail_next.take() {
            return Err(err);
        }
        let available = *self
            .balances
            .get(&from)
            .ok_or(GatewayError::UnknownParty(from))?;
        let allowance = self.allowance(from);
        if allowance < amount {
            return Err(GatewayError::InsufficientAllowance {
                allowance,
                requested: amount,
            });
        }
        if available < amount {
            return Err(GatewayError::InsufficientFunds {
                available,
                requested: amount,
            });
        }

        self.balances.insert(from, available - amount);
        self.allowances.insert(from, allowance - amount);
        self.custody += amount;
        self.history.push(Transfer::pull(from, amount));
        debug!(party = %from, amount, custody = self.custody, "Settlement pull");
        Ok(())
    }

    fn push(&mut self, to: PartyId, amount: i64) -> Result<(), GatewayError> {
        if let Some(err) = self.fail_next.take() {
            return Err(err);
        }
        if self.custody < amount {
            return Err(GatewayError::InsufficientFunds {
                available: self.custody,
                requested: amount,
            });
        }

        self.custody -= amount;
        *self.balances.entry(to).or_insert(0) += amount;
        self.history.push(Transfer::push(to, amount));
        debug!(party = %to, amount, custody = self.custody, "Settlement push");
        Ok(())
    }
}
