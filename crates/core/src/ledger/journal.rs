//! In-memory record of committed transactions.
//!
//! Not persisted. The statements only ever read the latest cash-flow
//! classification; the journal exists for inspection and tests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tally_shared::types::{PartyId, TransactionId};

use super::cash_flow::CashFlowClassification;
use super::delta::DeltaSet;
use crate::transactions::TransactionKind;

/// One committed transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Unique identifier (time-ordered).
    pub id: TransactionId,
    /// Business event.
    pub kind: TransactionKind,
    /// Counterparty on the settlement ledger, if value moved.
    pub counterparty: Option<PartyId>,
    /// Applied balance changes.
    pub deltas: DeltaSet,
    /// Cash-flow classification recorded for this transaction.
    pub cash_flow: CashFlowClassification,
    /// When the transaction was committed.
    pub recorded_at: DateTime<Utc>,
}

/// Append-only list of committed transactions.
#[derive(Debug, Clone, Default)]
pub struct Journal {
    entries: Vec<JournalEntry>,
}

impl Journal {
    /// Appends a committed transaction and returns its ID.
    pub fn append(
        &mut self,
        kind: TransactionKind,
        counterparty: Option<PartyId>,
        deltas: DeltaSet,
        cash_flow: CashFlowClassification,
    ) -> TransactionId {
        let id = TransactionId::new();
        self.entries.push(JournalEntry {
            id,
            kind,
            counterparty,
            deltas,
            cash_flow,
            recorded_at: Utc::now(),
        });
        id
    }

    /// Committed transactions, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    /// Number of committed transactions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing has been committed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of every committed cash change.
    #[must_use]
    pub fn net_cash(&self) -> i64 {
        self.entries.iter().map(|e| e.deltas.cash_delta()).sum()
    }
}
