//! Business-event handlers.
//!
//! Each event is first turned into a pure [`TransactionPlan`] (account deltas,
//! at most one settlement transfer, cash-flow category). [`Ledger`] then
//! commits plans one at a time: preview, transfer, swap, classify, journal.
//! [`SharedLedger`] serializes commits across threads and publishes immutable
//! snapshots for readers.

mod kind;
mod ledger;
pub mod plan;
mod shared;

#[cfg(test)]
mod props;

pub use kind::TransactionKind;
pub use ledger::Ledger;
pub use plan::TransactionPlan;
pub use shared::{LedgerSnapshot, SharedLedger};
