//! Property-based tests for the commit pipeline.
//!
//! Random sequences of business events, valid or not, are driven through a
//! ledger backed by the in-memory settlement ledger.

use proptest::prelude::*;
use tally_shared::types::PartyId;

use super::Ledger;
use crate::gateway::{GatewayError, InMemorySettlement};
use crate::ledger::Account;
use crate::reports::{CashFlowLine, StatementComputer};

#[derive(Debug, Clone)]
enum Op {
    RaiseEquity(i64),
    PaySalary(i64),
    TakeDebt(i64, u32),
    RepayDebt,
    BuyFixedAsset(i64, i64),
    BuyInventory(i64, i64),
    SellInventory(i64, i64, i64),
    PayPayables(i64),
    CollectReceivables(i64),
    PayInterest(i64),
    Depreciate(i64),
    PayTaxes(u32),
}

/// Strategy to generate an amount that is sometimes out of domain.
fn amount() -> impl Strategy<Value = i64> {
    prop_oneof![
        8 => 1i64..50_000,
        1 => Just(0i64),
        1 => -1_000i64..0,
    ]
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        amount().prop_map(Op::RaiseEquity),
        amount().prop_map(Op::PaySalary),
        (amount(), 0u32..12).prop_map(|(p, t)| Op::TakeDebt(p, t)),
        Just(Op::RepayDebt),
        (amount(), amount()).prop_map(|(c, p)| Op::BuyFixedAsset(c, p)),
        (amount(), amount()).prop_map(|(c, p)| Op::BuyInventory(c, p)),
        (amount(), amount(), amount()).prop_map(|(s, r, c)| Op::SellInventory(s, r, c)),
        amount().prop_map(Op::PayPayables),
        amount().prop_map(Op::CollectReceivables),
        amount().prop_map(Op::PayInterest),
        amount().prop_map(Op::Depreciate),
        (0u32..120).prop_map(Op::PayTaxes),
    ]
}

/// Ledger whose single counterparty has deep pockets and a large allowance.
fn ledger() -> (Ledger<InMemorySettlement>, PartyId) {
    let party = PartyId::new();
    let mut settlement = InMemorySettlement::new();
    settlement.mint(party, i64::MAX / 4);
    settlement.approve(party, i64::MAX / 4);
    (Ledger::new(settlement), party)
}

fn apply(ledger: &mut Ledger<InMemorySettlement>, party: PartyId, op: &Op) -> bool {
    let result = match *op {
        Op::RaiseEquity(a) => ledger.raise_equity(party, a).map(|_| ()),
        Op::PaySalary(a) => ledger.pay_salary(party, a).map(|_| ()),
        Op::TakeDebt(p, t) => ledger.take_long_term_debt(party, p, t).map(|_| ()),
        Op::RepayDebt => {
            let Some(id) = ledger.debts().next().map(|d| d.id) else {
                return false;
            };
            ledger.repay_current_debt(id).map(|_| ())
        }
        Op::BuyFixedAsset(c, p) => ledger.buy_fixed_asset(party, c, p).map(|_| ()),
        Op::BuyInventory(c, p) => ledger.buy_inventory(party, c, p).map(|_| ()),
        Op::SellInventory(s, r, c) => ledger.sell_inventory(party, s, r, c).map(|_| ()),
        Op::PayPayables(a) => ledger.pay_accounts_payable(party, a).map(|_| ()),
        Op::CollectReceivables(a) => ledger.receive_accounts_receivable(party, a).map(|_| ()),
        Op::PayInterest(a) => ledger.pay_interest_on_long_term_debt(party, a).map(|_| ()),
        Op::Depreciate(a) => ledger.depreciate_fixed_asset(a).map(|_| ()),
        Op::PayTaxes(r) => ledger.pay_taxes(party, r).map(|_| ()),
    };
    if let Err(err) = &result {
        assert!(!err.is_fatal(), "valid handlers must never break the identity: {err}");
    }
    result.is_ok()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// The accounting identity holds after every call, successful or not.
    #[test]
    fn prop_identity_holds_after_every_call(ops in prop::collection::vec(op_strategy(), 1..40)) {
        let (mut ledger, party) = ledger();
        for op in &ops {
            apply(&mut ledger, party, op);
            prop_assert!(ledger.state().verify_identity().is_ok());
            prop_assert!(!ledger.is_quarantined());
        }
    }

    /// Cash on the books always equals the settlement custody, and the
    /// cash-flow statement ends at that balance.
    #[test]
    fn prop_cash_matches_custody(ops in prop::collection::vec(op_strategy(), 1..40)) {
        let (mut ledger, party) = ledger();
        for op in &ops {
            apply(&mut ledger, party, op);
            let cash = ledger.balance(Account::Cash);
            prop_assert_eq!(cash, ledger.gateway().custody_balance());
            let ending = StatementComputer::cash_flow(
                ledger.state(),
                ledger.last_cash_flow(),
                CashFlowLine::EndingCashBalance,
            );
            prop_assert_eq!(ending, Ok(cash));
        }
        prop_assert_eq!(ledger.journal().net_cash(), ledger.balance(Account::Cash));
    }

    /// A failed gateway call leaves every balance bit-for-bit unchanged.
    #[test]
    fn prop_gateway_failure_is_atomic(
        setup in prop::collection::vec(op_strategy(), 0..20),
        op in op_strategy(),
    ) {
        let (mut ledger, party) = ledger();
        for setup_op in &setup {
            apply(&mut ledger, party, setup_op);
        }

        let before = ledger.snapshot();
        let committed_before = ledger.journal().len();
        ledger.gateway_mut().fail_next(GatewayError::Unavailable);
        let applied = apply(&mut ledger, party, &op);

        if !applied {
            prop_assert_eq!(ledger.snapshot(), before);
            prop_assert_eq!(ledger.journal().len(), committed_before);
        }
    }
}
