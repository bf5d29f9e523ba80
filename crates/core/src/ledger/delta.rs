//! Signed balance changes for a single transaction.
//!
//! A `DeltaSet` is what a handler hands to the ledger: one signed change per
//! touched account. It is balanced when its net effect on
//! `assets - (liabilities + equity)` is zero.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::account::Account;

/// Signed per-account changes, ordered by chart position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeltaSet {
    deltas: BTreeMap<Account, i64>,
}

impl DeltaSet {
    /// Creates an empty delta set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `amount` to the change for `account`. Zero changes are dropped.
    #[must_use]
    pub fn with(mut self, account: Account, amount: i64) -> Self {
        self.add(account, amount);
        self
    }

    /// Adds `amount` to the change for `account`.
    pub fn add(&mut self, account: Account, amount: i64) {
        if amount == 0 {
            return;
        }
        let entry = self.deltas.entry(account).or_insert(0);
        *entry += amount;
        if *entry == 0 {
            self.deltas.remove(&account);
        }
    }

    /// Returns the change for `account` (zero if untouched).
    #[must_use]
    pub fn get(&self, account: Account) -> i64 {
        self.deltas.get(&account).copied().unwrap_or(0)
    }

    /// Returns the change to cash.
    #[must_use]
    pub fn cash_delta(&self) -> i64 {
        self.get(Account::Cash)
    }

    /// Iterates over non-zero changes in chart order.
    pub fn iter(&self) -> impl Iterator<Item = (Account, i64)> + '_ {
        self.deltas.iter().map(|(account, amount)| (*account, *amount))
    }

    /// Returns true if no account changes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.deltas.is_empty()
    }

    /// Net effect on `assets - (liabilities + equity)`.
    #[must_use]
    pub fn identity_effect(&self) -> i128 {
        self.iter()
            .map(|(account, amount)| i128::from(account.identity_weight()) * i128::from(amount))
            .sum()
    }

    /// Returns true if the changes preserve the accounting identity.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.identity_effect() == 0
    }
}
