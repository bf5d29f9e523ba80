//! Settlement gateway errors.

use tally_shared::types::PartyId;
use thiserror::Error;

/// Reasons the settlement ledger declines a transfer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The counterparty has not authorized the ledger to pull this much.
    #[error("Allowance {allowance} is below requested {requested}")]
    InsufficientAllowance {
        /// Currently authorized amount.
        allowance: i64,
        /// Amount the ledger asked for.
        requested: i64,
    },

    /// The source holds less than requested.
    #[error("Available balance {available} is below requested {requested}")]
    InsufficientFunds {
        /// Balance held by the source.
        available: i64,
        /// Amount the ledger asked for.
        requested: i64,
    },

    /// The counterparty has no account on the settlement ledger.
    #[error("Unknown settlement party: {0}")]
    UnknownParty(PartyId),

    /// The settlement ledger could not be reached.
    #[error("Settlement ledger unavailable")]
    Unavailable,
}
