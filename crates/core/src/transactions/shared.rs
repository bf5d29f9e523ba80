//! Thread-safe ledger handle.
//!
//! Writers take a single mutex around "gateway call + commit", so at most one
//! transaction is in flight. After every transaction the writer publishes an
//! immutable [`LedgerSnapshot`]; readers only clone the `Arc` under a short
//! read lock and never wait on a slow gateway call or see partial state.

use std::sync::{Arc, Mutex, PoisonError, RwLock};

use serde::Serialize;

use super::Ledger;
use crate::gateway::SettlementGateway;
use crate::ledger::{Account, CashFlowClassification, LedgerError, LedgerState};
use crate::reports::{StatementComputer, StatementKind};

/// Committed state as seen by readers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerSnapshot {
    /// Balances after the last committed transaction.
    pub state: LedgerState,
    /// Cash-flow classification of that transaction.
    pub cash_flow: CashFlowClassification,
    /// Whether the ledger was quarantined when the snapshot was taken.
    pub quarantined: bool,
}

impl LedgerSnapshot {
    /// Balance of a single account.
    #[must_use]
    pub fn balance(&self, account: Account) -> i64 {
        self.state.get(account)
    }

    /// Reads one named line from a statement.
    ///
    /// # Errors
    ///
    /// Returns `UnknownLineItem`, `CashFlowMismatch` or `Quarantined`.
    pub fn query(&self, statement: StatementKind, line: &str) -> Result<i64, LedgerError> {
        if self.quarantined {
            return Err(LedgerError::Quarantined);
        }
        StatementComputer::query(&self.state, &self.cash_flow, statement, line)
    }
}

/// A ledger shared between threads.
pub struct SharedLedger<G> {
    writer: Mutex<Ledger<G>>,
    published: RwLock<Arc<LedgerSnapshot>>,
}

impl<G: SettlementGateway> SharedLedger<G> {
    /// Wraps `ledger` and publishes its current state.
    pub fn new(ledger: Ledger<G>) -> Self {
        let snapshot = Arc::new(ledger.snapshot());
        Self {
            writer: Mutex::new(ledger),
            published: RwLock::new(snapshot),
        }
    }

    /// Runs `f` as the only active transaction, then publishes the result.
    ///
    /// The snapshot is republished even when `f` fails, so a quarantine is
    /// visible to readers immediately.
    ///
    /// # Errors
    ///
    /// Returns whatever `f` returns, or `Quarantined` if a previous writer
    /// panicked mid-transaction.
    pub fn transact<T, F>(&self, f: F) -> Result<T, LedgerError>
    where
        F: FnOnce(&mut Ledger<G>) -> Result<T, LedgerError>,
    {
        let mut ledger = self.writer.lock().map_err(|_| LedgerError::Quarantined)?;
        let result = f(&mut ledger);
        let snapshot = Arc::new(ledger.snapshot());
        *self.published.write().unwrap_or_else(PoisonError::into_inner) = snapshot;
        result
    }

    /// The last published state.
    #[must_use]
    pub fn snapshot(&self) -> Arc<LedgerSnapshot> {
        Arc::clone(&self.published.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Reads one named line from the last published state.
    ///
    /// # Errors
    ///
    /// See [`LedgerSnapshot::query`].
    pub fn query(&self, statement: StatementKind, line: &str) -> Result<i64, LedgerError> {
        self.snapshot().query(statement, line)
    }
}
