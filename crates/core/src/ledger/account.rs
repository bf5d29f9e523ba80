//! The fixed chart of accounts.
//!
//! Every balance the ledger tracks is one of these fifteen accounts. The set is
//! closed so handlers and statement formulas are checked exhaustively at build
//! time; only the external line-name boundary can ask for something unknown.

use serde::{Deserialize, Serialize};

/// Category of an account (determines which statement it feeds).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountCategory {
    /// Resources owned by the entity.
    Asset,
    /// Offsets an asset (accumulated depreciation).
    ContraAsset,
    /// Obligations owed to others.
    Liability,
    /// Owners' claim.
    Equity,
    /// Income earned in the period.
    Revenue,
    /// Cost incurred in the period.
    Expense,
}

/// Whether an account carries over between periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permanence {
    /// Balance-sheet account.
    Permanent,
    /// Income-statement account, reset at period close.
    Temporary,
}

/// A named ledger account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Account {
    /// Settlement value held in custody.
    Cash,
    /// Amounts customers owe.
    AccountsReceivable,
    /// Goods held for sale.
    Inventories,
    /// Historical cost of fixed assets.
    FixedAssetsAtCost,
    /// Depreciation charged against fixed assets so far.
    AccumulatedDepreciation,
    /// Amounts owed to suppliers.
    AccountsPayable,
    /// Debt principal due within the next period.
    CurrentPortionOfDebt,
    /// Debt principal due after the next period.
    LongTermDebt,
    /// Capital contributed by shareholders.
    CapitalStock,
    /// Cumulative deficit counter (expenses and losses minus gains).
    RetainedEarnings,
    /// Sales revenue.
    NetSales,
    /// Inventory cost of the goods sold.
    CostOfGoodsSold,
    /// Salaries and overhead.
    GeneralAndAdministrativeExpenses,
    /// Interest earned minus interest paid (signed).
    NetInterestIncome,
    /// Income taxes charged.
    IncomeTaxes,
}

impl Account {
    /// Every account, in chart order.
    pub const ALL: [Self; 15] = [
        Self::Cash,
        Self::AccountsReceivable,
        Self::Inventories,
        Self::FixedAssetsAtCost,
        Self::AccumulatedDepreciation,
        Self::AccountsPayable,
        Self::CurrentPortionOfDebt,
        Self::LongTermDebt,
        Self::CapitalStock,
        Self::RetainedEarnings,
        Self::NetSales,
        Self::CostOfGoodsSold,
        Self::GeneralAndAdministrativeExpenses,
        Self::NetInterestIncome,
        Self::IncomeTaxes,
    ];

    /// Position of the account in [`Account::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the account category.
    #[must_use]
    pub const fn category(self) -> AccountCategory {
        match self {
            Self::Cash | Self::AccountsReceivable | Self::Inventories | Self::FixedAssetsAtCost => {
                AccountCategory::Asset
            }
            Self::AccumulatedDepreciation => AccountCategory::ContraAsset,
            Self::AccountsPayable | Self::CurrentPortionOfDebt | Self::LongTermDebt => {
                AccountCategory::Liability
            }
            Self::CapitalStock | Self::RetainedEarnings => AccountCategory::Equity,
            Self::NetSales | Self::NetInterestIncome => AccountCategory::Revenue,
            Self::CostOfGoodsSold | Self::GeneralAndAdministrativeExpenses | Self::IncomeTaxes => {
                AccountCategory::Expense
            }
        }
    }

    /// Returns whether the account is a balance-sheet or period account.
    #[must_use]
    pub const fn permanence(self) -> Permanence {
        match self.category() {
            AccountCategory::Revenue | AccountCategory::Expense => Permanence::Temporary,
            _ => Permanence::Permanent,
        }
    }

    /// Returns true if the balance may legitimately drop below zero.
    #[must_use]
    pub const fn allows_negative(self) -> bool {
        matches!(self, Self::RetainedEarnings | Self::NetInterestIncome)
    }

    /// Contribution of one unit of this account to `assets - (liabilities + equity)`.
    ///
    /// Retained earnings is stored as a deficit, so it adds back. Temporary
    /// accounts are mirrored into retained earnings by the handlers and carry
    /// no weight of their own.
    #[must_use]
    pub const fn identity_weight(self) -> i64 {
        match self {
            Self::Cash | Self::AccountsReceivable | Self::Inventories | Self::FixedAssetsAtCost => 1,
            Self::AccumulatedDepreciation
            | Self::AccountsPayable
            | Self::CurrentPortionOfDebt
            | Self::LongTermDebt
            | Self::CapitalStock => -1,
            Self::RetainedEarnings => 1,
            Self::NetSales
            | Self::CostOfGoodsSold
            | Self::GeneralAndAdministrativeExpenses
            | Self::NetInterestIncome
            | Self::IncomeTaxes => 0,
        }
    }

    /// PascalCase name used at the query boundary.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Cash => "Cash",
            Self::AccountsReceivable => "AccountsReceivable",
            Self::Inventories => "Inventories",
            Self::FixedAssetsAtCost => "FixedAssetsAtCost",
            Self::AccumulatedDepreciation => "AccumulatedDepreciation",
            Self::AccountsPayable => "AccountsPayable",
            Self::CurrentPortionOfDebt => "CurrentPortionOfDebt",
            Self::LongTermDebt => "LongTermDebt",
            Self::CapitalStock => "CapitalStock",
            Self::RetainedEarnings => "RetainedEarnings",
            Self::NetSales => "NetSales",
            Self::CostOfGoodsSold => "CostOfGoodsSold",
            Self::GeneralAndAdministrativeExpenses => "GeneralAndAdministrativeExpenses",
            Self::NetInterestIncome => "NetInterestIncome",
            Self::IncomeTaxes => "IncomeTaxes",
        }
    }
}

impl std::fmt::Display for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Account {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|account| account.name() == s)
            .ok_or_else(|| format!("Unknown account: {s}"))
    }
}
