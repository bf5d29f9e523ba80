//! Kinds of business event the ledger records.

use serde::{Deserialize, Serialize};

/// Business event behind a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// Shares sold to an investor for cash.
    RaiseEquity,
    /// Salary paid in cash.
    PaySalary,
    /// Long-term loan received.
    TakeLongTermDebt,
    /// Current portion of a loan repaid.
    RepayDebt,
    /// Fixed asset bought, partly on credit.
    BuyFixedAsset,
    /// Inventory bought, partly on credit.
    BuyInventory,
    /// Inventory sold, partly on credit.
    SellInventory,
    /// Supplier paid.
    PayAccountsPayable,
    /// Customer payment collected.
    ReceiveAccountsReceivable,
    /// Interest paid on a loan.
    PayInterest,
    /// Depreciation charged (non-cash).
    DepreciateFixedAsset,
    /// Income taxes paid.
    PayTaxes,
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::RaiseEquity => "raise_equity",
            Self::PaySalary => "pay_salary",
            Self::TakeLongTermDebt => "take_long_term_debt",
            Self::RepayDebt => "repay_debt",
            Self::BuyFixedAsset => "buy_fixed_asset",
            Self::BuyInventory => "buy_inventory",
            Self::SellInventory => "sell_inventory",
            Self::PayAccountsPayable => "pay_accounts_payable",
            Self::ReceiveAccountsReceivable => "receive_accounts_receivable",
            Self::PayInterest => "pay_interest",
            Self::DepreciateFixedAsset => "depreciate_fixed_asset",
            Self::PayTaxes => "pay_taxes",
        };
        f.write_str(name)
    }
}
