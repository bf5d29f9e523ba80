//! Pure transaction planning.
//!
//! Every function here maps (current balances, policy records, event
//! parameters) to a [`TransactionPlan`] without touching the ledger or the
//! settlement gateway. Plans are balanced by construction; the cash delta is
//! always derived from the settlement transfer so the two can never disagree.

use tally_shared::types::PartyId;

use super::TransactionKind;
use crate::gateway::Transfer;
use crate::ledger::{Account, CashFlowCategory, DeltaSet, LedgerError, LedgerState};
use crate::reports::{IncomeStatementLine, StatementComputer};
use crate::schedule::{DebtRecord, FixedAssetRegister};

/// Everything needed to commit one business event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionPlan {
    /// Business event.
    pub kind: TransactionKind,
    /// Balance changes, including the cash leg.
    pub deltas: DeltaSet,
    /// Settlement call to make before committing, if any value moves.
    pub transfer: Option<Transfer>,
    /// Cash-flow section, `None` for non-cash events.
    pub category: Option<CashFlowCategory>,
}

impl TransactionPlan {
    /// A plan whose cash leg is settled by `transfer`.
    ///
    /// Zero-amount transfers are dropped: no gateway call, no cash delta.
    fn settled(
        kind: TransactionKind,
        category: CashFlowCategory,
        transfer: Transfer,
        mut deltas: DeltaSet,
    ) -> Self {
        let transfer = (transfer.amount != 0).then_some(transfer);
        if let Some(transfer) = transfer {
            deltas.add(Account::Cash, transfer.cash_effect());
        }
        Self {
            kind,
            deltas,
            transfer,
            category: Some(category),
        }
    }

    /// A plan that moves no settlement value.
    fn non_cash(kind: TransactionKind, deltas: DeltaSet) -> Self {
        Self {
            kind,
            deltas,
            transfer: None,
            category: None,
        }
    }

    /// Counterparty of the settlement transfer, if any.
    #[must_use]
    pub fn counterparty(&self) -> Option<PartyId> {
        self.transfer.map(|t| t.party)
    }
}

fn positive(what: &str, amount: i64) -> Result<i64, LedgerError> {
    if amount <= 0 {
        return Err(LedgerError::invalid(format!("{what} must be positive, got {amount}")));
    }
    Ok(amount)
}

fn non_negative(what: &str, amount: i64) -> Result<i64, LedgerError> {
    if amount < 0 {
        return Err(LedgerError::invalid(format!("{what} cannot be negative, got {amount}")));
    }
    Ok(amount)
}

/// Splits `total` into a cash part and a credit part.
fn cash_and_credit(total: i64, cash: i64) -> Result<(i64, i64), LedgerError> {
    positive("total", total)?;
    non_negative("cash portion", cash)?;
    if cash > total {
        return Err(LedgerError::invalid(format!(
            "cash portion {cash} exceeds total {total}"
        )));
    }
    Ok((cash, total - cash))
}

/// Shares issued to `investor` for `amount` of cash.
///
/// # Errors
///
/// Returns `InvalidAmount` for a non-positive amount.
pub fn raise_equity(investor: PartyId, amount: i64) -> Result<TransactionPlan, LedgerError> {
    let amount = positive("equity raised", amount)?;
    Ok(TransactionPlan::settled(
        TransactionKind::RaiseEquity,
        CashFlowCategory::Financing,
        Transfer::pull(investor, amount),
        DeltaSet::new().with(Account::CapitalStock, amount),
    ))
}

/// Salary of `amount` paid to `payee`.
///
/// # Errors
///
/// Returns `InvalidAmount` for a non-positive amount.
pub fn pay_salary(payee: PartyId, amount: i64) -> Result<TransactionPlan, LedgerError> {
    let amount = positive("salary", amount)?;
    Ok(TransactionPlan::settled(
        TransactionKind::PaySalary,
        CashFlowCategory::Operating,
        Transfer::push(payee, amount),
        DeltaSet::new()
            .with(Account::GeneralAndAdministrativeExpenses, amount)
            .with(Account::RetainedEarnings, amount),
    ))
}

/// Principal of a newly opened loan received from its lender.
pub fn take_long_term_debt(record: &DebtRecord) -> TransactionPlan {
    TransactionPlan::settled(
        TransactionKind::TakeLongTermDebt,
        CashFlowCategory::Financing,
        Transfer::pull(record.lender, record.principal_outstanding),
        DeltaSet::new()
            .with(Account::CurrentPortionOfDebt, record.split.current)
            .with(Account::LongTermDebt, record.split.long_term),
    )
}

/// Current portion of `record` repaid; `next` is the record after amortization.
///
/// The repaid amount leaves `CurrentPortionOfDebt`, and the next current
/// portion is reclassified out of `LongTermDebt`.
pub fn repay_current_debt(record: &DebtRecord, next: &DebtRecord) -> TransactionPlan {
    let repaid = record.split.current;
    TransactionPlan::settled(
        TransactionKind::RepayDebt,
        CashFlowCategory::Financing,
        Transfer::push(record.lender, repaid),
        DeltaSet::new()
            .with(Account::CurrentPortionOfDebt, next.split.current - repaid)
            .with(Account::LongTermDebt, next.split.long_term - record.split.long_term),
    )
}

/// Fixed asset bought from `seller`, `cash_paid` now and the rest on credit.
///
/// # Errors
///
/// Returns `InvalidAmount` if the cost is not positive or the cash part is
/// negative or larger than the cost.
pub fn buy_fixed_asset(
    register: &FixedAssetRegister,
    seller: PartyId,
    total_cost: i64,
    cash_paid: i64,
) -> Result<TransactionPlan, LedgerError> {
    let (cash, credit) = cash_and_credit(total_cost, cash_paid)?;
    let acquired = register.acquire(total_cost)?;
    Ok(TransactionPlan::settled(
        TransactionKind::BuyFixedAsset,
        CashFlowCategory::Investing,
        Transfer::push(seller, cash),
        DeltaSet::new()
            .with(Account::FixedAssetsAtCost, acquired.cost - register.cost)
            .with(Account::AccountsPayable, credit),
    ))
}

/// Inventory bought from `seller`, `cash_paid` now and the rest on credit.
///
/// # Errors
///
/// Returns `InvalidAmount` if the cost is not positive or the cash part is
/// negative or larger than the cost.
pub fn buy_inventory(
    seller: PartyId,
    total_cost: i64,
    cash_paid: i64,
) -> Result<TransactionPlan, LedgerError> {
    let (cash, credit) = cash_and_credit(total_cost, cash_paid)?;
    Ok(TransactionPlan::settled(
        TransactionKind::BuyInventory,
        CashFlowCategory::Operating,
        Transfer::push(seller, cash),
        DeltaSet::new()
            .with(Account::Inventories, total_cost)
            .with(Account::AccountsPayable, credit),
    ))
}

/// Inventory costing `inventory_cost` sold to `buyer` for `sale_amount`.
///
/// `cash_received` is collected now; the rest becomes a receivable. The
/// gross margin flows into retained earnings.
///
/// # Errors
///
/// Returns `InvalidAmount` for out-of-domain amounts.
pub fn sell_inventory(
    buyer: PartyId,
    sale_amount: i64,
    cash_received: i64,
    inventory_cost: i64,
) -> Result<TransactionPlan, LedgerError> {
    let (cash, credit) = cash_and_credit(sale_amount, cash_received)?;
    let inventory_cost = non_negative("inventory cost", inventory_cost)?;
    let margin = sale_amount - inventory_cost;
    Ok(TransactionPlan::settled(
        TransactionKind::SellInventory,
        CashFlowCategory::Operating,
        Transfer::pull(buyer, cash),
        DeltaSet::new()
            .with(Account::Inventories, -inventory_cost)
            .with(Account::AccountsReceivable, credit)
            .with(Account::NetSales, sale_amount)
            .with(Account::CostOfGoodsSold, inventory_cost)
            .with(Account::RetainedEarnings, -margin),
    ))
}

/// `amount` owed to `creditor` paid off.
///
/// # Errors
///
/// Returns `InvalidAmount` for a non-positive amount.
pub fn pay_accounts_payable(creditor: PartyId, amount: i64) -> Result<TransactionPlan, LedgerError> {
    let amount = positive("payment", amount)?;
    Ok(TransactionPlan::settled(
        TransactionKind::PayAccountsPayable,
        CashFlowCategory::Operating,
        Transfer::push(creditor, amount),
        DeltaSet::new().with(Account::AccountsPayable, -amount),
    ))
}

/// `amount` owed by `debtor` collected.
///
/// # Errors
///
/// Returns `InvalidAmount` for a non-positive amount.
pub fn receive_accounts_receivable(
    debtor: PartyId,
    amount: i64,
) -> Result<TransactionPlan, LedgerError> {
    let amount = positive("collection", amount)?;
    Ok(TransactionPlan::settled(
        TransactionKind::ReceiveAccountsReceivable,
        CashFlowCategory::Operating,
        Transfer::pull(debtor, amount),
        DeltaSet::new().with(Account::AccountsReceivable, -amount),
    ))
}

/// Interest of `amount` paid to `lender`.
///
/// # Errors
///
/// Returns `InvalidAmount` for a non-positive amount.
pub fn pay_interest(lender: PartyId, amount: i64) -> Result<TransactionPlan, LedgerError> {
    let amount = positive("interest", amount)?;
    Ok(TransactionPlan::settled(
        TransactionKind::PayInterest,
        CashFlowCategory::Operating,
        Transfer::push(lender, amount),
        DeltaSet::new()
            .with(Account::NetInterestIncome, -amount)
            .with(Account::RetainedEarnings, amount),
    ))
}

/// Depreciation of `amount` charged against the fixed-asset register.
///
/// The charge reduces equity through retained earnings only; it has no line
/// of its own on the income statement.
///
/// # Errors
///
/// Returns `InvalidAmount` if `amount` is not positive or exceeds net book value.
pub fn depreciate_fixed_asset(
    register: &FixedAssetRegister,
    amount: i64,
) -> Result<TransactionPlan, LedgerError> {
    let amount = positive("depreciation", amount)?;
    let next = register.depreciate(amount)?;
    let charge = next.accumulated_depreciation - register.accumulated_depreciation;
    Ok(TransactionPlan::non_cash(
        TransactionKind::DepreciateFixedAsset,
        DeltaSet::new()
            .with(Account::AccumulatedDepreciation, charge)
            .with(Account::RetainedEarnings, charge),
    ))
}

/// Tax owed at `rate_percent` on income from operations plus net interest.
///
/// Computed as `base * rate / 100`, truncated toward zero. A zero or negative
/// base owes no tax.
///
/// # Errors
///
/// Returns `InvalidAmount` for a rate above 100%.
pub fn tax_due(state: &LedgerState, rate_percent: u32) -> Result<i64, LedgerError> {
    if rate_percent > 100 {
        return Err(LedgerError::invalid(format!(
            "tax rate {rate_percent}% exceeds 100%"
        )));
    }
    let base = i128::from(StatementComputer::income_statement(
        state,
        IncomeStatementLine::IncomeFromOperations,
    )) + i128::from(state.get(Account::NetInterestIncome));
    if base <= 0 {
        return Ok(0);
    }
    let tax = base * i128::from(rate_percent) / 100;
    i64::try_from(tax).map_err(|_| LedgerError::Overflow(Account::IncomeTaxes))
}

/// Income taxes at `rate_percent` paid to `government`.
///
/// # Errors
///
/// See [`tax_due`].
pub fn pay_taxes(
    state: &LedgerState,
    government: PartyId,
    rate_percent: u32,
) -> Result<TransactionPlan, LedgerError> {
    let tax = tax_due(state, rate_percent)?;
    Ok(TransactionPlan::settled(
        TransactionKind::PayTaxes,
        CashFlowCategory::Operating,
        Transfer::push(government, tax),
        DeltaSet::new()
            .with(Account::IncomeTaxes, tax)
            .with(Account::RetainedEarnings, tax),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::StraightLineDebt;
    use rstest::rstest;

    fn state_with(deltas: DeltaSet) -> LedgerState {
        let mut state = LedgerState::new();
        state.apply_deltas(&deltas).unwrap();
        state
    }

    #[test]
    fn test_every_plan_is_balanced() {
        let party = PartyId::new();
        let debt = DebtRecord::open(party, 50_000, 10, 10, &StraightLineDebt).unwrap();
        let next = debt.amortize(&StraightLineDebt);
        let register = FixedAssetRegister {
            cost: 10_000,
            accumulated_depreciation: 0,
        };

        let plans = vec![
            raise_equity(party, 1_000_000).unwrap(),
            pay_salary(party, 5_000).unwrap(),
            take_long_term_debt(&debt),
            repay_current_debt(&debt, &next),
            buy_fixed_asset(&register, party, 10_000, 5_000).unwrap(),
            buy_inventory(party, 500, 500).unwrap(),
            sell_inventory(party, 20_000, 10_000, 500).unwrap(),
            pay_accounts_payable(party, 5_000).unwrap(),
            receive_accounts_receivable(party, 10_000).unwrap(),
            pay_interest(party, 5_000).unwrap(),
            depreciate_fixed_asset(&register, 2_000).unwrap(),
            pay_taxes(&LedgerState::new(), party, 30).unwrap(),
        ];

        for plan in plans {
            assert!(plan.deltas.is_balanced(), "{} is unbalanced", plan.kind);
            let settled = plan.transfer.map_or(0, |t| t.cash_effect());
            assert_eq!(plan.deltas.cash_delta(), settled, "{}", plan.kind);
        }
    }

    #[test]
    fn test_debt_split_into_current_and_long_term() {
        let lender = PartyId::new();
        let debt = DebtRecord::open(lender, 50_000, 10, 10, &StraightLineDebt).unwrap();
        let plan = take_long_term_debt(&debt);

        assert_eq!(plan.deltas.get(Account::CurrentPortionOfDebt), 5_000);
        assert_eq!(plan.deltas.get(Account::LongTermDebt), 45_000);
        assert_eq!(plan.deltas.cash_delta(), 50_000);
        assert_eq!(plan.transfer, Some(Transfer::pull(lender, 50_000)));
        assert_eq!(plan.category, Some(CashFlowCategory::Financing));
    }

    #[test]
    fn test_repayment_reclassifies_next_portion() {
        let debt = DebtRecord::open(PartyId::new(), 50_000, 10, 10, &StraightLineDebt).unwrap();
        let next = debt.amortize(&StraightLineDebt);
        let plan = repay_current_debt(&debt, &next);

        assert_eq!(plan.deltas.cash_delta(), -5_000);
        assert_eq!(plan.deltas.get(Account::CurrentPortionOfDebt), 0);
        assert_eq!(plan.deltas.get(Account::LongTermDebt), -5_000);
    }

    #[test]
    fn test_credit_sale_split() {
        let plan = sell_inventory(PartyId::new(), 20_000, 10_000, 500).unwrap();

        assert_eq!(plan.deltas.get(Account::NetSales), 20_000);
        assert_eq!(plan.deltas.get(Account::CostOfGoodsSold), 500);
        assert_eq!(plan.deltas.get(Account::AccountsReceivable), 10_000);
        assert_eq!(plan.deltas.cash_delta(), 10_000);
        assert_eq!(plan.deltas.get(Account::Inventories), -500);
        assert_eq!(plan.deltas.get(Account::RetainedEarnings), -19_500);
    }

    #[test]
    fn test_full_credit_purchase_skips_gateway() {
        let plan = buy_inventory(PartyId::new(), 800, 0).unwrap();
        assert_eq!(plan.transfer, None);
        assert_eq!(plan.deltas.cash_delta(), 0);
        assert_eq!(plan.deltas.get(Account::AccountsPayable), 800);
        assert_eq!(plan.category, Some(CashFlowCategory::Operating));
    }

    #[test]
    fn test_depreciation_is_non_cash() {
        let register = FixedAssetRegister {
            cost: 10_000,
            accumulated_depreciation: 0,
        };
        let plan = depreciate_fixed_asset(&register, 2_000).unwrap();
        assert_eq!(plan.transfer, None);
        assert_eq!(plan.category, None);
        assert_eq!(plan.deltas.get(Account::AccumulatedDepreciation), 2_000);
        assert_eq!(plan.deltas.get(Account::RetainedEarnings), 2_000);
    }

    #[rstest]
    #[case(-1, 0)]
    #[case(0, 0)]
    #[case(100, -1)]
    #[case(100, 101)]
    fn test_purchase_rejects_bad_split(#[case] total: i64, #[case] cash: i64) {
        let err = buy_inventory(PartyId::new(), total, cash).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_AMOUNT");
    }

    #[rstest]
    #[case(9_500, 30, 2_850)]
    #[case(9_999, 30, 2_999)]
    #[case(1, 30, 0)]
    #[case(9_500, 0, 0)]
    #[case(9_500, 100, 9_500)]
    fn test_tax_truncates_toward_zero(#[case] base: i64, #[case] rate: u32, #[case] tax: i64) {
        let state = state_with(
            DeltaSet::new()
                .with(Account::Cash, base)
                .with(Account::NetSales, base)
                .with(Account::RetainedEarnings, -base),
        );
        assert_eq!(tax_due(&state, rate).unwrap(), tax);
    }

    #[test]
    fn test_tax_base_includes_net_interest() {
        let state = state_with(
            DeltaSet::new()
                .with(Account::Cash, 14_500)
                .with(Account::NetSales, 14_500)
                .with(Account::NetInterestIncome, -5_000)
                .with(Account::CapitalStock, 5_000)
                .with(Account::RetainedEarnings, -9_500),
        );
        assert_eq!(tax_due(&state, 30).unwrap(), 2_850);
    }

    #[test]
    fn test_no_tax_on_a_loss() {
        let state = state_with(
            DeltaSet::new()
                .with(Account::CapitalStock, 1_000)
                .with(Account::Cash, 0)
                .with(Account::GeneralAndAdministrativeExpenses, 1_000)
                .with(Account::RetainedEarnings, 1_000),
        );
        assert_eq!(tax_due(&state, 30).unwrap(), 0);
        assert_eq!(pay_taxes(&state, PartyId::new(), 30).unwrap().transfer, None);
    }

    #[test]
    fn test_tax_rate_above_hundred_rejected() {
        assert!(tax_due(&LedgerState::new(), 101).is_err());
    }
}
