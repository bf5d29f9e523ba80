//! The caller-facing ledger.
//!
//! Owns the balances, the settlement gateway, the outstanding debt records and
//! the journal. Every handler builds a [`TransactionPlan`] and hands it to a
//! single commit pipeline:
//!
//! 1. Refuse if the ledger is quarantined
//! 2. Preview the deltas (overflow, non-negative rule, accounting identity)
//! 3. Perform at most one settlement transfer
//! 4. Swap in the previewed state
//! 5. Record the cash-flow classification and journal entry
//!
//! Nothing is mutated before step 4, so any failure in steps 1-3 leaves the
//! ledger exactly as it was.

use std::collections::BTreeMap;

use tally_shared::LedgerConfig;
use tally_shared::types::{DebtId, PartyId, TransactionId};
use tracing::{error, info, warn};

use super::TransactionKind;
use super::plan::{self, TransactionPlan};
use super::shared::LedgerSnapshot;
use crate::gateway::SettlementGateway;
use crate::ledger::{Account, CashFlowClassification, Journal, LedgerError, LedgerState};
use crate::reports::{
    BalanceSheetReport, CashFlowReport, IncomeStatementReport, StatementComputer, StatementKind,
};
use crate::schedule::{
    DebtRecord, DebtSchedule, DepreciationSchedule, FixedAssetRegister, StraightLineDebt,
    StraightLineDepreciation,
};

/// Annual rate stamped on loans taken without an explicit rate.
const DEFAULT_INTEREST_RATE_PERCENT: u32 = 10;

/// Double-entry ledger bound to a settlement gateway.
pub struct Ledger<G> {
    gateway: G,
    state: LedgerState,
    last_cash_flow: CashFlowClassification,
    debts: BTreeMap<DebtId, DebtRecord>,
    journal: Journal,
    debt_schedule: Box<dyn DebtSchedule + Send + Sync>,
    depreciation_schedule: Box<dyn DepreciationSchedule + Send + Sync>,
    default_rate_percent: u32,
    quarantined: bool,
}

impl<G: SettlementGateway> Ledger<G> {
    /// Creates an all-zero ledger with straight-line schedules.
    pub fn new(gateway: G) -> Self {
        Self::with_schedules(
            gateway,
            Box::new(StraightLineDebt),
            Box::new(StraightLineDepreciation::default()),
            DEFAULT_INTEREST_RATE_PERCENT,
        )
    }

    /// Creates an all-zero ledger with straight-line schedules tuned by `config`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount` for a zero useful life or a rate above 100%.
    pub fn with_config(gateway: G, config: &LedgerConfig) -> Result<Self, LedgerError> {
        if config.default_interest_rate_percent > 100 {
            return Err(LedgerError::invalid(format!(
                "default interest rate {}% exceeds 100%",
                config.default_interest_rate_percent
            )));
        }
        let depreciation = StraightLineDepreciation::new(config.useful_life_years)?;
        Ok(Self::with_schedules(
            gateway,
            Box::new(StraightLineDebt),
            Box::new(depreciation),
            config.default_interest_rate_percent,
        ))
    }

    /// Creates an all-zero ledger with custom policies.
    pub fn with_schedules(
        gateway: G,
        debt_schedule: Box<dyn DebtSchedule + Send + Sync>,
        depreciation_schedule: Box<dyn DepreciationSchedule + Send + Sync>,
        default_rate_percent: u32,
    ) -> Self {
        Self {
            gateway,
            state: LedgerState::new(),
            last_cash_flow: CashFlowClassification::opening(),
            debts: BTreeMap::new(),
            journal: Journal::default(),
            debt_schedule,
            depreciation_schedule,
            default_rate_percent,
            quarantined: false,
        }
    }

    // ========== Handlers ==========

    /// Sells shares to `investor` for `amount`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount`, `GatewayTransferFailed` or `Quarantined`.
    pub fn raise_equity(
        &mut self,
        investor: PartyId,
        amount: i64,
    ) -> Result<TransactionId, LedgerError> {
        let plan = self.planned(TransactionKind::RaiseEquity, plan::raise_equity(investor, amount))?;
        self.commit(plan)
    }

    /// Pays `amount` of salary to `payee`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount`, `InsufficientBalance`, `GatewayTransferFailed`
    /// or `Quarantined`.
    pub fn pay_salary(&mut self, payee: PartyId, amount: i64) -> Result<TransactionId, LedgerError> {
        let plan = self.planned(TransactionKind::PaySalary, plan::pay_salary(payee, amount))?;
        self.commit(plan)
    }

    /// Borrows `principal` from `lender` over `term_years` at the default rate.
    ///
    /// # Errors
    ///
    /// See [`Ledger::take_long_term_debt_at_rate`].
    pub fn take_long_term_debt(
        &mut self,
        lender: PartyId,
        principal: i64,
        term_years: u32,
    ) -> Result<DebtId, LedgerError> {
        self.take_long_term_debt_at_rate(lender, principal, term_years, self.default_rate_percent)
    }

    /// Borrows `principal` from `lender` over `term_years` at `rate_percent`.
    ///
    /// The principal is split into a current portion and a long-term remainder
    /// by the debt schedule. Returns the ID of the new debt record.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount` for a non-positive principal or term or a rate
    /// above 100%, `GatewayTransferFailed` or `Quarantined`.
    pub fn take_long_term_debt_at_rate(
        &mut self,
        lender: PartyId,
        principal: i64,
        term_years: u32,
        rate_percent: u32,
    ) -> Result<DebtId, LedgerError> {
        let record = self.planned(
            TransactionKind::TakeLongTermDebt,
            DebtRecord::open(
                lender,
                principal,
                term_years,
                rate_percent,
                self.debt_schedule.as_ref(),
            ),
        )?;
        self.commit(plan::take_long_term_debt(&record))?;

        let id = record.id;
        self.debts.insert(id, record);
        Ok(id)
    }

    /// Repays the current portion of `debt_id` and reclassifies the next one.
    ///
    /// The record is dropped once fully repaid.
    ///
    /// # Errors
    ///
    /// Returns `UnknownDebt`, `InsufficientBalance`, `GatewayTransferFailed`
    /// or `Quarantined`.
    pub fn repay_current_debt(&mut self, debt_id: DebtId) -> Result<TransactionId, LedgerError> {
        let record = self.debt(debt_id)?.clone();
        let next = record.amortize(self.debt_schedule.as_ref());
        let id = self.commit(plan::repay_current_debt(&record, &next))?;

        if next.is_settled() {
            self.debts.remove(&debt_id);
        } else {
            self.debts.insert(debt_id, next);
        }
        Ok(id)
    }

    /// One year of interest owed on `debt_id`.
    ///
    /// # Errors
    ///
    /// Returns `UnknownDebt` if no such loan is outstanding.
    pub fn accrue_interest(&self, debt_id: DebtId) -> Result<i64, LedgerError> {
        Ok(self.debt(debt_id)?.annual_interest())
    }

    /// Buys a fixed asset from `seller`, paying `cash_paid` now.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount`, `InsufficientBalance`, `GatewayTransferFailed`
    /// or `Quarantined`.
    pub fn buy_fixed_asset(
        &mut self,
        seller: PartyId,
        total_cost: i64,
        cash_paid: i64,
    ) -> Result<TransactionId, LedgerError> {
        let register = FixedAssetRegister::from_state(&self.state);
        let plan = self.planned(
            TransactionKind::BuyFixedAsset,
            plan::buy_fixed_asset(&register, seller, total_cost, cash_paid),
        )?;
        self.commit(plan)
    }

    /// Buys inventory from `seller`, paying `cash_paid` now.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount`, `InsufficientBalance`, `GatewayTransferFailed`
    /// or `Quarantined`.
    pub fn buy_inventory(
        &mut self,
        seller: PartyId,
        total_cost: i64,
        cash_paid: i64,
    ) -> Result<TransactionId, LedgerError> {
        let plan = self.planned(
            TransactionKind::BuyInventory,
            plan::buy_inventory(seller, total_cost, cash_paid),
        )?;
        self.commit(plan)
    }

    /// Sells inventory costing `inventory_cost` to `buyer` for `sale_amount`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount`, `InsufficientBalance` (not enough inventory),
    /// `GatewayTransferFailed` or `Quarantined`.
    pub fn sell_inventory(
        &mut self,
        buyer: PartyId,
        sale_amount: i64,
        cash_received: i64,
        inventory_cost: i64,
    ) -> Result<TransactionId, LedgerError> {
        let plan = self.planned(
            TransactionKind::SellInventory,
            plan::sell_inventory(buyer, sale_amount, cash_received, inventory_cost),
        )?;
        self.commit(plan)
    }

    /// Pays `amount` owed to `creditor`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount`, `InsufficientBalance`, `GatewayTransferFailed`
    /// or `Quarantined`.
    pub fn pay_accounts_payable(
        &mut self,
        creditor: PartyId,
        amount: i64,
    ) -> Result<TransactionId, LedgerError> {
        let plan = self.planned(
            TransactionKind::PayAccountsPayable,
            plan::pay_accounts_payable(creditor, amount),
        )?;
        self.commit(plan)
    }

    /// Collects `amount` owed by `debtor`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount`, `InsufficientBalance`, `GatewayTransferFailed`
    /// or `Quarantined`.
    pub fn receive_accounts_receivable(
        &mut self,
        debtor: PartyId,
        amount: i64,
    ) -> Result<TransactionId, LedgerError> {
        let plan = self.planned(
            TransactionKind::ReceiveAccountsReceivable,
            plan::receive_accounts_receivable(debtor, amount),
        )?;
        self.commit(plan)
    }

    /// Pays `amount` of interest to `lender`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount`, `InsufficientBalance`, `GatewayTransferFailed`
    /// or `Quarantined`.
    pub fn pay_interest_on_long_term_debt(
        &mut self,
        lender: PartyId,
        amount: i64,
    ) -> Result<TransactionId, LedgerError> {
        let plan = self.planned(TransactionKind::PayInterest, plan::pay_interest(lender, amount))?;
        self.commit(plan)
    }

    /// Charges `amount` of depreciation against fixed assets.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount` (including a charge above net book value) or
    /// `Quarantined`.
    pub fn depreciate_fixed_asset(&mut self, amount: i64) -> Result<TransactionId, LedgerError> {
        let register = FixedAssetRegister::from_state(&self.state);
        let plan = self.planned(
            TransactionKind::DepreciateFixedAsset,
            plan::depreciate_fixed_asset(&register, amount),
        )?;
        self.commit(plan)
    }

    /// Charges one period of depreciation as computed by the depreciation schedule.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount` when nothing is left to depreciate, or `Quarantined`.
    pub fn depreciate_straight_line(&mut self) -> Result<TransactionId, LedgerError> {
        let register = FixedAssetRegister::from_state(&self.state);
        let charge = self.depreciation_schedule.periodic_charge(&register);
        let plan = self.planned(
            TransactionKind::DepreciateFixedAsset,
            plan::depreciate_fixed_asset(&register, charge),
        )?;
        self.commit(plan)
    }

    /// Pays income taxes at `rate_percent` to `government`.
    ///
    /// The tax base is income from operations plus net interest income; see
    /// [`plan::tax_due`] for rounding.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount`, `InsufficientBalance`, `GatewayTransferFailed`
    /// or `Quarantined`.
    pub fn pay_taxes(
        &mut self,
        government: PartyId,
        rate_percent: u32,
    ) -> Result<TransactionId, LedgerError> {
        let plan = self.planned(
            TransactionKind::PayTaxes,
            plan::pay_taxes(&self.state, government, rate_percent),
        )?;
        self.commit(plan)
    }

    // ========== Commit pipeline ==========

    /// Logs a planning failure and refuses planning on a quarantined ledger.
    fn planned<T>(
        &mut self,
        kind: TransactionKind,
        planned: Result<T, LedgerError>,
    ) -> Result<T, LedgerError> {
        self.ensure_open()?;
        planned.map_err(|err| self.reject(kind, err))
    }

    /// Applies `plan` atomically.
    pub(crate) fn commit(&mut self, plan: TransactionPlan) -> Result<TransactionId, LedgerError> {
        self.ensure_open()?;

        let next = self
            .state
            .preview(&plan.deltas)
            .map_err(|err| self.reject(plan.kind, err))?;

        if let Some(transfer) = plan.transfer {
            transfer
                .execute(&mut self.gateway)
                .map_err(|err| self.reject(plan.kind, err.into()))?;
        }

        let beginning_cash = self.state.get(Account::Cash);
        self.state = next;
        let cash_flow = CashFlowClassification::record(
            plan.kind,
            plan.category,
            beginning_cash,
            self.state.get(Account::Cash),
        );
        self.last_cash_flow = cash_flow;

        let counterparty = plan.counterparty();
        let id = self.journal.append(plan.kind, counterparty, plan.deltas, cash_flow);

        info!(
            transaction_id = %id,
            kind = %plan.kind,
            cash = cash_flow.ending_cash,
            net_flow = cash_flow.net_flow(),
            "Transaction committed"
        );
        Ok(id)
    }

    fn reject(&mut self, kind: TransactionKind, err: LedgerError) -> LedgerError {
        if err.is_fatal() {
            self.quarantined = true;
            error!(kind = %kind, error = %err, "Ledger quarantined");
        } else {
            warn!(kind = %kind, code = err.error_code(), error = %err, "Transaction rejected");
        }
        err
    }
}

impl<G> Ledger<G> {
    // ========== Queries ==========

    /// Balance of a single account.
    #[must_use]
    pub fn balance(&self, account: Account) -> i64 {
        self.state.get(account)
    }

    /// Current balances.
    #[must_use]
    pub const fn state(&self) -> &LedgerState {
        &self.state
    }

    /// Cash-flow classification of the last committed transaction.
    #[must_use]
    pub const fn last_cash_flow(&self) -> &CashFlowClassification {
        &self.last_cash_flow
    }

    /// Reads one named line from a statement.
    ///
    /// # Errors
    ///
    /// Returns `UnknownLineItem`, `CashFlowMismatch` or `Quarantined`.
    pub fn query(&self, statement: StatementKind, line: &str) -> Result<i64, LedgerError> {
        self.ensure_open()?;
        StatementComputer::query(&self.state, &self.last_cash_flow, statement, line)
    }

    /// Full balance sheet.
    ///
    /// # Errors
    ///
    /// Returns `Quarantined` if the ledger can no longer be trusted.
    pub fn balance_sheet(&self) -> Result<BalanceSheetReport, LedgerError> {
        self.ensure_open()?;
        Ok(StatementComputer::balance_sheet_report(&self.state))
    }

    /// Full income statement.
    ///
    /// # Errors
    ///
    /// Returns `Quarantined` if the ledger can no longer be trusted.
    pub fn income_statement(&self) -> Result<IncomeStatementReport, LedgerError> {
        self.ensure_open()?;
        Ok(StatementComputer::income_statement_report(&self.state))
    }

    /// Cash-flow statement of the last transaction.
    ///
    /// # Errors
    ///
    /// Returns `CashFlowMismatch` or `Quarantined`.
    pub fn cash_flow_statement(&self) -> Result<CashFlowReport, LedgerError> {
        self.ensure_open()?;
        StatementComputer::cash_flow_report(&self.state, &self.last_cash_flow)
    }

    /// Outstanding loans, ordered by ID.
    pub fn debts(&self) -> impl Iterator<Item = &DebtRecord> {
        self.debts.values()
    }

    /// Looks up an outstanding loan.
    ///
    /// # Errors
    ///
    /// Returns `UnknownDebt` if no such loan is outstanding.
    pub fn debt(&self, debt_id: DebtId) -> Result<&DebtRecord, LedgerError> {
        self.debts.get(&debt_id).ok_or(LedgerError::UnknownDebt(debt_id))
    }

    /// Committed transactions.
    #[must_use]
    pub const fn journal(&self) -> &Journal {
        &self.journal
    }

    /// The settlement gateway.
    #[must_use]
    pub const fn gateway(&self) -> &G {
        &self.gateway
    }

    /// The settlement gateway, for test setup and funding.
    pub fn gateway_mut(&mut self) -> &mut G {
        &mut self.gateway
    }

    /// Returns true after an invariant violation.
    #[must_use]
    pub const fn is_quarantined(&self) -> bool {
        self.quarantined
    }

    /// Immutable copy of the readable state.
    #[must_use]
    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            state: self.state.clone(),
            cash_flow: self.last_cash_flow,
            quarantined: self.quarantined,
        }
    }

    fn ensure_open(&self) -> Result<(), LedgerError> {
        if self.quarantined {
            return Err(LedgerError::Quarantined);
        }
        Ok(())
    }
}
