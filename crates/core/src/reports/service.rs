//! Statement computation.
//!
//! Every figure is derived from the current balances (and, for cash flow, the
//! last classification) on each call. Nothing is cached, so a composite line
//! can never disagree with its leaves.

use crate::ledger::{Account, CashFlowCategory, CashFlowClassification, LedgerError, LedgerState};
use crate::transactions::TransactionKind;

use super::types::{
    BalanceSheetLine, BalanceSheetReport, CashFlowLine, CashFlowReport, IncomeStatementLine,
    IncomeStatementReport, StatementKind,
};

/// Stateless query layer over ledger balances.
pub struct StatementComputer;

impl StatementComputer {
    /// Reads the line named `line` from `statement`.
    ///
    /// # Errors
    ///
    /// Returns `UnknownLineItem` for a name outside the statement's lines, or
    /// `CashFlowMismatch` if the cash-flow statement disagrees with the ledger.
    pub fn query(
        state: &LedgerState,
        cash_flow: &CashFlowClassification,
        statement: StatementKind,
        line: &str,
    ) -> Result<i64, LedgerError> {
        match statement {
            StatementKind::BalanceSheet => Ok(Self::balance_sheet(state, line.parse()?)),
            StatementKind::IncomeStatement => Ok(Self::income_statement(state, line.parse()?)),
            StatementKind::CashFlowStatement => Self::cash_flow(state, cash_flow, line.parse()?),
        }
    }

    /// Computes one balance-sheet line.
    #[must_use]
    pub fn balance_sheet(state: &LedgerState, line: BalanceSheetLine) -> i64 {
        let get = |account| i128::from(state.get(account));
        let current_assets =
            || get(Account::Cash) + get(Account::AccountsReceivable) + get(Account::Inventories);
        let net_fixed_assets =
            || get(Account::FixedAssetsAtCost) - get(Account::AccumulatedDepreciation);
        let current_liabilities =
            || get(Account::AccountsPayable) + get(Account::CurrentPortionOfDebt);
        let equity = || get(Account::CapitalStock) - get(Account::RetainedEarnings);

        narrow(match line {
            BalanceSheetLine::Cash => get(Account::Cash),
            BalanceSheetLine::AccountsReceivable => get(Account::AccountsReceivable),
            BalanceSheetLine::Inventories => get(Account::Inventories),
            BalanceSheetLine::CurrentAssets => current_assets(),
            BalanceSheetLine::FixedAssetsAtCost => get(Account::FixedAssetsAtCost),
            BalanceSheetLine::AccumulatedDepreciation => get(Account::AccumulatedDepreciation),
            BalanceSheetLine::NetFixedAssets => net_fixed_assets(),
            BalanceSheetLine::TotalAssets => current_assets() + net_fixed_assets(),
            BalanceSheetLine::AccountsPayable => get(Account::AccountsPayable),
            BalanceSheetLine::CurrentPortionOfDebt => get(Account::CurrentPortionOfDebt),
            BalanceSheetLine::CurrentLiabilities => current_liabilities(),
            BalanceSheetLine::LongTermDebt => get(Account::LongTermDebt),
            BalanceSheetLine::CapitalStock => get(Account::CapitalStock),
            BalanceSheetLine::RetainedEarnings => get(Account::RetainedEarnings),
            BalanceSheetLine::ShareholdersEquity => equity(),
            BalanceSheetLine::TotalLiabilitiesAndEquity => {
                current_liabilities() + get(Account::LongTermDebt) + equity()
            }
        })
    }

    /// Computes one income-statement line.
    ///
    /// Depreciation is charged straight to retained earnings and has no line here.
    #[must_use]
    pub fn income_statement(state: &LedgerState, line: IncomeStatementLine) -> i64 {
        let get = |account| i128::from(state.get(account));
        let gross_margin = || get(Account::NetSales) - get(Account::CostOfGoodsSold);
        let operating_expenses = || get(Account::GeneralAndAdministrativeExpenses);
        let income_from_operations = || gross_margin() - operating_expenses();

        narrow(match line {
            IncomeStatementLine::NetSales => get(Account::NetSales),
            IncomeStatementLine::CostOfGoodsSold => get(Account::CostOfGoodsSold),
            IncomeStatementLine::GrossMargin => gross_margin(),
            IncomeStatementLine::GeneralAndAdministrativeExpenses => {
                get(Account::GeneralAndAdministrativeExpenses)
            }
            IncomeStatementLine::OperatingExpenses => operating_expenses(),
            IncomeStatementLine::IncomeFromOperations => income_from_operations(),
            IncomeStatementLine::NetInterestIncome => get(Account::NetInterestIncome),
            IncomeStatementLine::IncomeTaxes => get(Account::IncomeTaxes),
            IncomeStatementLine::NetIncome => {
                income_from_operations() + get(Account::NetInterestIncome)
                    - get(Account::IncomeTaxes)
            }
        })
    }

    /// Computes one cash-flow line of the last transaction.
    ///
    /// # Errors
    ///
    /// Returns `CashFlowMismatch` if the classification does not end at the
    /// ledger's cash balance.
    pub fn cash_flow(
        state: &LedgerState,
        cash_flow: &CashFlowClassification,
        line: CashFlowLine,
    ) -> Result<i64, LedgerError> {
        let ending = cash_flow.beginning_cash + cash_flow.net_flow();
        let ledger = state.get(Account::Cash);
        if ending != ledger || ending != cash_flow.ending_cash {
            return Err(LedgerError::CashFlowMismatch {
                reported: ending,
                ledger,
            });
        }

        let when = |kinds: &[TransactionKind], amount: i64| match cash_flow.kind {
            Some(kind) if kinds.contains(&kind) => amount,
            _ => 0,
        };
        let operating = cash_flow.category == Some(CashFlowCategory::Operating);

        Ok(match line {
            CashFlowLine::BeginningCashBalance => cash_flow.beginning_cash,
            CashFlowLine::CashReceipts => if operating { cash_flow.received } else { 0 },
            CashFlowLine::CashDisbursements => if operating { cash_flow.paid } else { 0 },
            CashFlowLine::CashFlowFromOperations => cash_flow.flow_in(CashFlowCategory::Operating),
            CashFlowLine::CashFlowFromInvesting => cash_flow.flow_in(CashFlowCategory::Investing),
            CashFlowLine::CashFlowFromFinancing => cash_flow.flow_in(CashFlowCategory::Financing),
            CashFlowLine::PPAndEPurchase => when(&[TransactionKind::BuyFixedAsset], cash_flow.paid),
            CashFlowLine::NetBorrowings => when(
                &[TransactionKind::TakeLongTermDebt, TransactionKind::RepayDebt],
                cash_flow.net_flow(),
            ),
            CashFlowLine::IncomeTaxesPaid => when(&[TransactionKind::PayTaxes], cash_flow.paid),
            CashFlowLine::SaleOfCapitalStock => {
                when(&[TransactionKind::RaiseEquity], cash_flow.received)
            }
            CashFlowLine::EndingCashBalance => ending,
        })
    }

    /// Builds the full balance sheet.
    #[must_use]
    pub fn balance_sheet_report(state: &LedgerState) -> BalanceSheetReport {
        let line = |l| Self::balance_sheet(state, l);
        BalanceSheetReport {
            cash: line(BalanceSheetLine::Cash),
            accounts_receivable: line(BalanceSheetLine::AccountsReceivable),
            inventories: line(BalanceSheetLine::Inventories),
            current_assets: line(BalanceSheetLine::CurrentAssets),
            fixed_assets_at_cost: line(BalanceSheetLine::FixedAssetsAtCost),
            accumulated_depreciation: line(BalanceSheetLine::AccumulatedDepreciation),
            net_fixed_assets: line(BalanceSheetLine::NetFixedAssets),
            total_assets: line(BalanceSheetLine::TotalAssets),
            accounts_payable: line(BalanceSheetLine::AccountsPayable),
            current_portion_of_debt: line(BalanceSheetLine::CurrentPortionOfDebt),
            current_liabilities: line(BalanceSheetLine::CurrentLiabilities),
            long_term_debt: line(BalanceSheetLine::LongTermDebt),
            capital_stock: line(BalanceSheetLine::CapitalStock),
            retained_earnings: line(BalanceSheetLine::RetainedEarnings),
            shareholders_equity: line(BalanceSheetLine::ShareholdersEquity),
            total_liabilities_and_equity: line(BalanceSheetLine::TotalLiabilitiesAndEquity),
            is_balanced: state.verify_identity().is_ok(),
        }
    }

    /// Builds the full income statement.
    #[must_use]
    pub fn income_statement_report(state: &LedgerState) -> IncomeStatementReport {
        let line = |l| Self::income_statement(state, l);
        IncomeStatementReport {
            net_sales: line(IncomeStatementLine::NetSales),
            cost_of_goods_sold: line(IncomeStatementLine::CostOfGoodsSold),
            gross_margin: line(IncomeStatementLine::GrossMargin),
            general_and_administrative_expenses: line(
                IncomeStatementLine::GeneralAndAdministrativeExpenses,
            ),
            operating_expenses: line(IncomeStatementLine::OperatingExpenses),
            income_from_operations: line(IncomeStatementLine::IncomeFromOperations),
            net_interest_income: line(IncomeStatementLine::NetInterestIncome),
            income_taxes: line(IncomeStatementLine::IncomeTaxes),
            net_income: line(IncomeStatementLine::NetIncome),
        }
    }

    /// Builds the cash-flow statement of the last transaction.
    ///
    /// # Errors
    ///
    /// Returns `CashFlowMismatch` if the classification does not end at the
    /// ledger's cash balance.
    pub fn cash_flow_report(
        state: &LedgerState,
        cash_flow: &CashFlowClassification,
    ) -> Result<CashFlowReport, LedgerError> {
        let line = |l| Self::cash_flow(state, cash_flow, l);
        let report = CashFlowReport {
            kind: cash_flow.kind,
            category: cash_flow.category,
            beginning_cash_balance: line(CashFlowLine::BeginningCashBalance)?,
            cash_receipts: line(CashFlowLine::CashReceipts)?,
            cash_disbursements: line(CashFlowLine::CashDisbursements)?,
            cash_flow_from_operations: line(CashFlowLine::CashFlowFromOperations)?,
            cash_flow_from_investing: line(CashFlowLine::CashFlowFromInvesting)?,
            cash_flow_from_financing: line(CashFlowLine::CashFlowFromFinancing)?,
            pp_and_e_purchase: line(CashFlowLine::PPAndEPurchase)?,
            net_borrowings: line(CashFlowLine::NetBorrowings)?,
            income_taxes_paid: line(CashFlowLine::IncomeTaxesPaid)?,
            sale_of_capital_stock: line(CashFlowLine::SaleOfCapitalStock)?,
            ending_cash_balance: line(CashFlowLine::EndingCashBalance)?,
            is_balanced: false,
        };
        let reconciled = report.beginning_cash_balance
            + report.cash_flow_from_operations
            + report.cash_flow_from_investing
            + report.cash_flow_from_financing
            == report.ending_cash_balance;
        Ok(CashFlowReport {
            is_balanced: reconciled,
            ..report
        })
    }
}

/// Narrows a composite figure to `i64`, saturating at the range bounds.
fn narrow(value: i128) -> i64 {
    i64::try_from(value).unwrap_or(if value < 0 { i64::MIN } else { i64::MAX })
}
