//! Double-entry ledger state.
//!
//! This module implements the core ledger bookkeeping:
//! - The fixed chart of accounts
//! - Signed delta sets and their balance check
//! - Current balances with atomic, identity-checked application
//! - Cash-flow classification of the last transaction
//! - An in-memory journal of committed transactions
//! - Error types for ledger operations

pub mod account;
pub mod cash_flow;
pub mod delta;
pub mod error;
pub mod journal;
pub mod state;

pub use account::{Account, AccountCategory, Permanence};
pub use cash_flow::{CashFlowCategory, CashFlowClassification};
pub use delta::DeltaSet;
pub use error::LedgerError;
pub use journal::{Journal, JournalEntry};
pub use state::LedgerState;
