//! Cash-flow classification of the most recent transaction.

use serde::{Deserialize, Serialize};

use crate::transactions::TransactionKind;

/// Cash-flow statement section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CashFlowCategory {
    /// Day-to-day trading: sales, purchases of inventory, salaries, interest, taxes.
    Operating,
    /// Purchases of property, plant and equipment.
    Investing,
    /// Equity raised and debt borrowed or repaid.
    Financing,
}

impl std::fmt::Display for CashFlowCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Operating => write!(f, "operating"),
            Self::Investing => write!(f, "investing"),
            Self::Financing => write!(f, "financing"),
        }
    }
}

/// Cash movement of the last applied transaction.
///
/// Overwritten by every commit. `category` is `None` for non-cash
/// transactions and for a fresh ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashFlowClassification {
    /// The transaction that produced this flow.
    pub kind: Option<TransactionKind>,
    /// Statement section the cash movement belongs to.
    pub category: Option<CashFlowCategory>,
    /// Cash received.
    pub received: i64,
    /// Cash paid out.
    pub paid: i64,
    /// Cash balance before the transaction.
    pub beginning_cash: i64,
    /// Cash balance after the transaction.
    pub ending_cash: i64,
}

impl CashFlowClassification {
    /// Classification of a ledger with no transactions.
    #[must_use]
    pub const fn opening() -> Self {
        Self {
            kind: None,
            category: None,
            received: 0,
            paid: 0,
            beginning_cash: 0,
            ending_cash: 0,
        }
    }

    /// Classifies a move of cash from `before` to `after`.
    ///
    /// A transaction without a category is non-cash: its receipts and
    /// disbursements are reported as zero.
    #[must_use]
    pub fn record(
        kind: TransactionKind,
        category: Option<CashFlowCategory>,
        before: i64,
        after: i64,
    ) -> Self {
        let (received, paid) = match category {
            Some(_) if after >= before => (after - before, 0),
            Some(_) => (0, before - after),
            None => (0, 0),
        };
        Self {
            kind: Some(kind),
            category,
            received,
            paid,
            beginning_cash: before,
            ending_cash: after,
        }
    }

    /// Receipts minus disbursements.
    #[must_use]
    pub const fn net_flow(&self) -> i64 {
        self.received - self.paid
    }

    /// Net flow if the transaction falls in `category`, else zero.
    #[must_use]
    pub fn flow_in(&self, category: CashFlowCategory) -> i64 {
        if self.category == Some(category) {
            self.net_flow()
        } else {
            0
        }
    }
}

impl Default for CashFlowClassification {
    fn default() -> Self {
        Self::opening()
    }
}
