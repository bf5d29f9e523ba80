//! Ledger error types.
//!
//! Every variant except `InvariantViolation`, `CashFlowMismatch` and
//! `Quarantined` is a local, recoverable condition: the attempted transaction
//! had no effect and the caller may retry with corrected inputs.

use tally_shared::AppError;
use tally_shared::types::DebtId;
use thiserror::Error;

use super::account::Account;
use crate::gateway::GatewayError;
use crate::reports::StatementKind;

/// Errors that can occur during ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    // ========== Caller Errors ==========
    /// An account would go negative where that is not allowed.
    #[error("Insufficient balance in {account}: balance {balance}, change {delta}")]
    InsufficientBalance {
        /// The account that would go negative.
        account: Account,
        /// Balance before the transaction.
        balance: i64,
        /// The rejected change.
        delta: i64,
    },

    /// The settlement ledger declined a pull or push.
    #[error("Settlement transfer failed: {0}")]
    GatewayTransferFailed(#[from] GatewayError),

    /// Caller input is negative or otherwise out of domain.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Query for a line name outside the fixed enumeration.
    #[error("Unknown line item '{line}' on the {statement}")]
    UnknownLineItem {
        /// The statement that was queried.
        statement: StatementKind,
        /// The requested line name.
        line: String,
    },

    /// No outstanding loan with this ID.
    #[error("Debt not found: {0}")]
    UnknownDebt(DebtId),

    /// A balance would leave the `i64` range.
    #[error("Arithmetic overflow on {0}")]
    Overflow(Account),

    // ========== Fatal Errors ==========
    /// Assets no longer equal liabilities plus equity.
    #[error(
        "Accounting identity violated: assets {assets} != liabilities and equity {liabilities_and_equity}"
    )]
    InvariantViolation {
        /// Total assets of the offending state.
        assets: i128,
        /// Total liabilities and equity of the offending state.
        liabilities_and_equity: i128,
    },

    /// The cash-flow statement does not end at the ledger's cash balance.
    #[error("Cash flow ends at {reported} but the ledger holds {ledger}")]
    CashFlowMismatch {
        /// Ending cash computed from the last classification.
        reported: i64,
        /// Current cash balance.
        ledger: i64,
    },

    /// The ledger was quarantined after an invariant violation.
    #[error("Ledger is quarantined after an invariant violation")]
    Quarantined,
}

impl LedgerError {
    /// Creates an `InvalidAmount` error.
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidAmount(reason.into())
    }

    /// Returns the error code for reporting.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientBalance { .. } => "INSUFFICIENT_BALANCE",
            Self::GatewayTransferFailed(_) => "GATEWAY_TRANSFER_FAILED",
            Self::InvalidAmount(_) => "INVALID_AMOUNT",
            Self::UnknownLineItem { .. } => "UNKNOWN_LINE_ITEM",
            Self::UnknownDebt(_) => "UNKNOWN_DEBT",
            Self::Overflow(_) => "OVERFLOW",
            Self::InvariantViolation { .. } => "INVARIANT_VIOLATION",
            Self::CashFlowMismatch { .. } => "CASH_FLOW_MISMATCH",
            Self::Quarantined => "QUARANTINED",
        }
    }

    /// Returns true if the ledger can no longer be trusted.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::InvariantViolation { .. } | Self::CashFlowMismatch { .. } | Self::Quarantined
        )
    }

    /// Returns true if the same call may succeed later without changes.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::GatewayTransferFailed(_))
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        let message = err.to_string();
        match err {
            LedgerError::InvalidAmount(_) | LedgerError::UnknownLineItem { .. } => {
                Self::Validation(message)
            }
            LedgerError::UnknownDebt(_) => Self::NotFound(message),
            LedgerError::InsufficientBalance { .. } | LedgerError::Overflow(_) => {
                Self::BusinessRule(message)
            }
            LedgerError::GatewayTransferFailed(_) => Self::ExternalService(message),
            LedgerError::InvariantViolation { .. }
            | LedgerError::CashFlowMismatch { .. }
            | LedgerError::Quarantined => Self::Internal(message),
        }
    }
}
