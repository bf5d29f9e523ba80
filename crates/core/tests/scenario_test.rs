//! End-to-end bookkeeping scenario.
//!
//! A small shop raises capital, borrows, buys a fixed asset and inventory,
//! sells on credit, settles its payables and receivables, pays interest,
//! depreciates and finally pays taxes. Every figure is checked against the
//! hand-computed statements.

#![allow(clippy::too_many_lines)]

use tally_core::gateway::InMemorySettlement;
use tally_core::ledger::{Account, CashFlowCategory};
use tally_core::reports::StatementKind;
use tally_core::transactions::Ledger;
use tally_shared::types::PartyId;

struct Parties {
    stacy: PartyId,
    bank: PartyId,
    supplier: PartyId,
    alice: PartyId,
    employee: PartyId,
    government: PartyId,
}

fn setup() -> (Ledger<InMemorySettlement>, Parties) {
    let parties = Parties {
        stacy: PartyId::new(),
        bank: PartyId::new(),
        supplier: PartyId::new(),
        alice: PartyId::new(),
        employee: PartyId::new(),
        government: PartyId::new(),
    };

    let mut settlement = InMemorySettlement::new();
    for (party, amount) in [
        (parties.stacy, 1_000_000),
        (parties.bank, 50_000),
        (parties.alice, 20_000),
    ] {
        settlement.mint(party, amount);
        settlement.approve(party, amount);
    }
    (Ledger::new(settlement), parties)
}

fn bs(ledger: &Ledger<InMemorySettlement>, line: &str) -> i64 {
    ledger.query(StatementKind::BalanceSheet, line).unwrap()
}

fn is(ledger: &Ledger<InMemorySettlement>, line: &str) -> i64 {
    ledger.query(StatementKind::IncomeStatement, line).unwrap()
}

fn cf(ledger: &Ledger<InMemorySettlement>, line: &str) -> i64 {
    ledger.query(StatementKind::CashFlowStatement, line).unwrap()
}

fn assert_consistent(ledger: &Ledger<InMemorySettlement>) {
    assert_eq!(bs(ledger, "TotalAssets"), bs(ledger, "TotalLiabilitiesAndEquity"));
    assert_eq!(cf(ledger, "EndingCashBalance"), bs(ledger, "Cash"));
    assert_eq!(bs(ledger, "Cash"), ledger.gateway().custody_balance());
}

#[test]
fn test_worked_scenario() {
    let (mut ledger, p) = setup();
    let mut expected_cash = 0;

    ledger.raise_equity(p.stacy, 1_000_000).unwrap();
    expected_cash += 1_000_000;
    assert_eq!(cf(&ledger, "SaleOfCapitalStock"), 1_000_000);
    assert_eq!(cf(&ledger, "CashFlowFromFinancing"), 1_000_000);
    assert_consistent(&ledger);

    ledger.pay_salary(p.employee, 5_000).unwrap();
    expected_cash -= 5_000;
    assert_eq!(cf(&ledger, "CashDisbursements"), 5_000);
    assert_eq!(cf(&ledger, "CashFlowFromOperations"), -5_000);
    assert_eq!(bs(&ledger, "RetainedEarnings"), 5_000);
    assert_consistent(&ledger);

    let debt_id = ledger.take_long_term_debt(p.bank, 50_000, 10).unwrap();
    expected_cash += 50_000;
    assert_eq!(bs(&ledger, "CurrentPortionOfDebt"), 5_000);
    assert_eq!(bs(&ledger, "LongTermDebt"), 45_000);
    assert_eq!(cf(&ledger, "NetBorrowings"), 50_000);
    assert_consistent(&ledger);

    ledger.buy_fixed_asset(p.supplier, 10_000, 5_000).unwrap();
    expected_cash -= 5_000;
    assert_eq!(bs(&ledger, "FixedAssetsAtCost"), 10_000);
    assert_eq!(bs(&ledger, "AccountsPayable"), 5_000);
    assert_eq!(cf(&ledger, "PPAndEPurchase"), 5_000);
    assert_eq!(cf(&ledger, "CashFlowFromInvesting"), -5_000);
    assert_consistent(&ledger);

    ledger.buy_inventory(p.supplier, 500, 500).unwrap();
    expected_cash -= 500;
    assert_eq!(bs(&ledger, "Inventories"), 500);
    assert_consistent(&ledger);

    let before = ledger.state().clone();
    ledger.sell_inventory(p.alice, 20_000, 10_000, 500).unwrap();
    expected_cash += 10_000;
    assert_eq!(is(&ledger, "NetSales"), 20_000);
    assert_eq!(is(&ledger, "CostOfGoodsSold"), 500);
    assert_eq!(
        ledger.balance(Account::AccountsReceivable) - before.get(Account::AccountsReceivable),
        10_000
    );
    assert_eq!(ledger.balance(Account::Cash) - before.get(Account::Cash), 10_000);
    assert_eq!(
        ledger.balance(Account::Inventories) - before.get(Account::Inventories),
        -500
    );
    assert_eq!(cf(&ledger, "CashReceipts"), 10_000);
    assert_consistent(&ledger);

    ledger.pay_accounts_payable(p.supplier, 5_000).unwrap();
    expected_cash -= 5_000;
    assert_eq!(bs(&ledger, "AccountsPayable"), 0);
    assert_consistent(&ledger);

    ledger.receive_accounts_receivable(p.alice, 10_000).unwrap();
    expected_cash += 10_000;
    assert_eq!(bs(&ledger, "AccountsReceivable"), 0);
    assert_consistent(&ledger);

    let interest = ledger.accrue_interest(debt_id).unwrap();
    assert_eq!(interest, 5_000);
    ledger.pay_interest_on_long_term_debt(p.bank, interest).unwrap();
    expected_cash -= 5_000;
    assert_eq!(is(&ledger, "NetInterestIncome"), -5_000);
    assert_consistent(&ledger);

    ledger.depreciate_fixed_asset(2_000).unwrap();
    assert_eq!(bs(&ledger, "AccumulatedDepreciation"), 2_000);
    assert_eq!(bs(&ledger, "NetFixedAssets"), 8_000);
    assert_eq!(ledger.last_cash_flow().category, None);
    assert_eq!(cf(&ledger, "CashFlowFromOperations"), 0);
    assert_consistent(&ledger);

    let income_from_operations = is(&ledger, "IncomeFromOperations");
    let net_interest = is(&ledger, "NetInterestIncome");
    assert_eq!(income_from_operations, 14_500);
    let base = income_from_operations + net_interest;
    assert_eq!(base, 9_500);

    ledger.pay_taxes(p.government, 30).unwrap();
    expected_cash -= base * 30 / 100;
    assert_eq!(is(&ledger, "IncomeTaxes"), 2_850);
    assert_eq!(cf(&ledger, "IncomeTaxesPaid"), 2_850);
    assert_eq!(
        ledger.last_cash_flow().category,
        Some(CashFlowCategory::Operating)
    );
    assert_consistent(&ledger);

    assert_eq!(bs(&ledger, "Cash"), expected_cash);
    assert_eq!(bs(&ledger, "Cash"), 1_046_650);
    assert_eq!(ledger.journal().net_cash(), expected_cash);
    assert_eq!(bs(&ledger, "TotalAssets"), 1_054_650);
    assert_eq!(bs(&ledger, "TotalLiabilitiesAndEquity"), 1_054_650);
    assert_eq!(bs(&ledger, "RetainedEarnings"), -4_650);
    assert_eq!(bs(&ledger, "ShareholdersEquity"), 1_004_650);
    assert_eq!(is(&ledger, "NetIncome"), 6_650);
    assert_eq!(ledger.journal().len(), 11);

    assert_eq!(ledger.gateway().balance_of(p.government), 2_850);
    assert_eq!(ledger.gateway().balance_of(p.employee), 5_000);
    assert_eq!(ledger.gateway().balance_of(p.supplier), 10_500);
}

#[test]
fn test_scenario_reports() {
    let (mut ledger, p) = setup();
    ledger.raise_equity(p.stacy, 1_000_000).unwrap();
    ledger.take_long_term_debt(p.bank, 50_000, 10).unwrap();
    ledger.buy_fixed_asset(p.supplier, 10_000, 5_000).unwrap();

    let balance_sheet = ledger.balance_sheet().unwrap();
    assert!(balance_sheet.is_balanced);
    assert_eq!(balance_sheet.total_assets, 1_055_000);
    assert_eq!(balance_sheet.current_liabilities, 10_000);

    let cash_flow = ledger.cash_flow_statement().unwrap();
    assert!(cash_flow.is_balanced);
    assert_eq!(cash_flow.beginning_cash_balance, 1_050_000);
    assert_eq!(cash_flow.ending_cash_balance, 1_045_000);

    let income = ledger.income_statement().unwrap();
    assert_eq!(income.net_income, 0);
}

#[test]
fn test_declined_pull_changes_nothing() {
    let (mut ledger, p) = setup();
    ledger.raise_equity(p.stacy, 1_000_000).unwrap();
    let before = ledger.snapshot();

    let err = ledger.receive_accounts_receivable(p.alice, 25_000).unwrap_err();
    assert_eq!(err.error_code(), "INSUFFICIENT_BALANCE");

    ledger.sell_inventory(p.alice, 30_000, 0, 0).unwrap();
    let mid = ledger.snapshot();
    // Alice only authorized 20,000.
    let err = ledger.receive_accounts_receivable(p.alice, 25_000).unwrap_err();
    assert_eq!(err.error_code(), "GATEWAY_TRANSFER_FAILED");
    assert_eq!(ledger.snapshot(), mid);
    assert_ne!(mid, before);
}
