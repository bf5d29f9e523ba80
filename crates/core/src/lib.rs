//! Core ledger engine for Tally.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Balances, handlers, policies and statements all live here; value moves only
//! through an injected [`gateway::SettlementGateway`].
//!
//! # Modules
//!
//! - `ledger` - Chart of accounts, balances, deltas, cash-flow classification
//! - `gateway` - Settlement gateway contract and an in-memory implementation
//! - `schedule` - Debt amortization and depreciation policies
//! - `transactions` - Business-event handlers and the commit pipeline
//! - `reports` - Balance sheet, income statement and cash-flow statement

pub mod gateway;
pub mod ledger;
pub mod reports;
pub mod schedule;
pub mod transactions;

pub use gateway::{InMemorySettlement, SettlementGateway};
pub use ledger::{Account, LedgerError, LedgerState};
pub use reports::{StatementComputer, StatementKind};
pub use transactions::{Ledger, SharedLedger};
