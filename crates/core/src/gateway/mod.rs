//! Settlement gateway contract.
//!
//! The ledger records obligations; real value moves on an external settlement
//! ledger. This trait is the only way the ledger asks for that movement. It is
//! injected into [`crate::transactions::Ledger`] rather than reached through
//! global state, so the accounting can be tested without a real token.

mod error;
mod memory;

use serde::{Deserialize, Serialize};
use tally_shared::types::PartyId;

pub use error::GatewayError;
pub use memory::InMemorySettlement;

/// Moves settlement value between counterparties and the ledger's custody.
pub trait SettlementGateway {
    /// Pulls `amount` from `from` into custody.
    ///
    /// Fails if `from` has not authorized at least `amount` or does not hold it.
    fn pull(&mut self, from: PartyId, amount: i64) -> Result<(), GatewayError>;

    /// Pushes `amount` from custody to `to`.
    ///
    /// Fails if custody holds less than `amount`.
    fn push(&mut self, to: PartyId, amount: i64) -> Result<(), GatewayError>;
}

/// Direction of a settlement transfer relative to the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferDirection {
    /// Counterparty to custody.
    Pull,
    /// Custody to counterparty.
    Push,
}

/// A single gateway call requested by a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    /// Pull or push.
    pub direction: TransferDirection,
    /// The counterparty.
    pub party: PartyId,
    /// Amount in the smallest settlement unit.
    pub amount: i64,
}

impl Transfer {
    /// A pull from `party`.
    #[must_use]
    pub const fn pull(party: PartyId, amount: i64) -> Self {
        Self {
            direction: TransferDirection::Pull,
            party,
            amount,
        }
    }

    /// A push to `party`.
    #[must_use]
    pub const fn push(party: PartyId, amount: i64) -> Self {
        Self {
            direction: TransferDirection::Push,
            party,
            amount,
        }
    }

    /// Change to custody (and therefore to the `Cash` account) this transfer causes.
    #[must_use]
    pub const fn cash_effect(&self) -> i64 {
        match self.direction {
            TransferDirection::Pull => self.amount,
            TransferDirection::Push => -self.amount,
        }
    }

    /// Executes the transfer against `gateway`.
    ///
    /// # Errors
    ///
    /// Returns whatever the gateway reports.
    pub fn execute<G: SettlementGateway + ?Sized>(&self, gateway: &mut G) -> Result<(), GatewayError> {
        match self.direction {
            TransferDirection::Pull => gateway.pull(self.party, self.amount),
            TransferDirection::Push => gateway.push(self.party, self.amount),
        }
    }
}
