//! Report data types.

use serde::{Deserialize, Serialize};

use crate::ledger::{CashFlowCategory, LedgerError};
use crate::transactions::TransactionKind;

/// The three statements the ledger can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementKind {
    /// Assets, liabilities and equity at this moment.
    BalanceSheet,
    /// Revenue and expense accumulated so far.
    IncomeStatement,
    /// Cash movement of the last transaction.
    CashFlowStatement,
}

impl std::fmt::Display for StatementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BalanceSheet => write!(f, "balance sheet"),
            Self::IncomeStatement => write!(f, "income statement"),
            Self::CashFlowStatement => write!(f, "cash flow statement"),
        }
    }
}

/// Declares a closed set of statement lines addressable by PascalCase name.
macro_rules! line_items {
    (
        $(#[$meta:meta])*
        $name:ident on $statement:expr => {
            $( $(#[$vmeta:meta])* $variant:ident ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// Every line, in statement order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Name used at the query boundary.
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $( Self::$variant => stringify!($variant), )+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.name())
            }
        }

        impl std::str::FromStr for $name {
            type Err = LedgerError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|line| line.name() == s)
                    .ok_or_else(|| LedgerError::UnknownLineItem {
                        statement: $statement,
                        line: s.to_string(),
                    })
            }
        }
    };
}

line_items! {
    /// A line of the balance sheet.
    BalanceSheetLine on StatementKind::BalanceSheet => {
        /// Cash held in custody.
        Cash,
        /// Amounts customers owe.
        AccountsReceivable,
        /// Goods held for sale.
        Inventories,
        /// Cash + receivables + inventories.
        CurrentAssets,
        /// Historical cost of fixed assets.
        FixedAssetsAtCost,
        /// Depreciation charged so far.
        AccumulatedDepreciation,
        /// Cost less accumulated depreciation.
        NetFixedAssets,
        /// Current assets + net fixed assets.
        TotalAssets,
        /// Amounts owed to suppliers.
        AccountsPayable,
        /// Debt due within the next period.
        CurrentPortionOfDebt,
        /// Payables + current portion of debt.
        CurrentLiabilities,
        /// Debt due after the next period.
        LongTermDebt,
        /// Capital contributed by shareholders.
        CapitalStock,
        /// Cumulative deficit.
        RetainedEarnings,
        /// Capital stock less the deficit.
        ShareholdersEquity,
        /// Current liabilities + long-term debt + equity.
        TotalLiabilitiesAndEquity,
    }
}

line_items! {
    /// A line of the income statement.
    IncomeStatementLine on StatementKind::IncomeStatement => {
        /// Sales revenue.
        NetSales,
        /// Cost of the goods sold.
        CostOfGoodsSold,
        /// Net sales less cost of goods sold.
        GrossMargin,
        /// Salaries and overhead.
        GeneralAndAdministrativeExpenses,
        /// Total operating expenses.
        OperatingExpenses,
        /// Gross margin less operating expenses.
        IncomeFromOperations,
        /// Interest earned less interest paid.
        NetInterestIncome,
        /// Income taxes charged.
        IncomeTaxes,
        /// Income from operations + net interest income - income taxes.
        NetIncome,
    }
}

line_items! {
    /// A line of the cash-flow statement of the last transaction.
    CashFlowLine on StatementKind::CashFlowStatement => {
        /// Cash before the transaction.
        BeginningCashBalance,
        /// Operating cash received.
        CashReceipts,
        /// Operating cash paid out.
        CashDisbursements,
        /// Receipts less disbursements.
        CashFlowFromOperations,
        /// Net investing flow.
        CashFlowFromInvesting,
        /// Net financing flow.
        CashFlowFromFinancing,
        /// Cash paid for fixed assets.
        PPAndEPurchase,
        /// Cash borrowed less cash repaid.
        NetBorrowings,
        /// Cash paid for income taxes.
        IncomeTaxesPaid,
        /// Cash received for shares.
        SaleOfCapitalStock,
        /// Cash after the transaction.
        EndingCashBalance,
    }
}

/// Full balance sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSheetReport {
    /// Cash held in custody.
    pub cash: i64,
    /// Amounts customers owe.
    pub accounts_receivable: i64,
    /// Goods held for sale.
    pub inventories: i64,
    /// Cash + receivables + inventories.
    pub current_assets: i64,
    /// Historical cost of fixed assets.
    pub fixed_assets_at_cost: i64,
    /// Depreciation charged so far.
    pub accumulated_depreciation: i64,
    /// Cost less accumulated depreciation.
    pub net_fixed_assets: i64,
    /// Current assets + net fixed assets.
    pub total_assets: i64,
    /// Amounts owed to suppliers.
    pub accounts_payable: i64,
    /// Debt due within the next period.
    pub current_portion_of_debt: i64,
    /// Payables + current portion of debt.
    pub current_liabilities: i64,
    /// Debt due after the next period.
    pub long_term_debt: i64,
    /// Capital contributed by shareholders.
    pub capital_stock: i64,
    /// Cumulative deficit.
    pub retained_earnings: i64,
    /// Capital stock less the deficit.
    pub shareholders_equity: i64,
    /// Current liabilities + long-term debt + equity.
    pub total_liabilities_and_equity: i64,
    /// Whether assets equal liabilities plus equity.
    pub is_balanced: bool,
}

/// Full income statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeStatementReport {
    /// Sales revenue.
    pub net_sales: i64,
    /// Cost of the goods sold.
    pub cost_of_goods_sold: i64,
    /// Net sales less cost of goods sold.
    pub gross_margin: i64,
    /// Salaries and overhead.
    pub general_and_administrative_expenses: i64,
    /// Total operating expenses.
    pub operating_expenses: i64,
    /// Gross margin less operating expenses.
    pub income_from_operations: i64,
    /// Interest earned less interest paid.
    pub net_interest_income: i64,
    /// Income taxes charged.
    pub income_taxes: i64,
    /// Income from operations + net interest income - income taxes.
    pub net_income: i64,
}

/// Cash-flow statement of the last transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashFlowReport {
    /// The transaction being reported, `None` on a fresh ledger.
    pub kind: Option<TransactionKind>,
    /// Section the transaction's cash falls in, `None` if non-cash.
    pub category: Option<CashFlowCategory>,
    /// Cash before the transaction.
    pub beginning_cash_balance: i64,
    /// Operating cash received.
    pub cash_receipts: i64,
    /// Operating cash paid out.
    pub cash_disbursements: i64,
    /// Receipts less disbursements.
    pub cash_flow_from_operations: i64,
    /// Net investing flow.
    pub cash_flow_from_investing: i64,
    /// Net financing flow.
    pub cash_flow_from_financing: i64,
    /// Cash paid for fixed assets.
    pub pp_and_e_purchase: i64,
    /// Cash borrowed less cash repaid.
    pub net_borrowings: i64,
    /// Cash paid for income taxes.
    pub income_taxes_paid: i64,
    /// Cash received for shares.
    pub sale_of_capital_stock: i64,
    /// Cash after the transaction.
    pub ending_cash_balance: i64,
    /// Whether the three sections reconcile beginning to ending cash.
    pub is_balanced: bool,
}
