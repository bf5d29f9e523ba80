//! Current balances of every account.
//!
//! `LedgerState` is the single source of truth. Changes go through
//! [`LedgerState::preview`], which builds the post-transaction state on a copy
//! and checks it, so a rejected delta set never touches the live balances.

use serde::{Deserialize, Serialize};

use super::account::Account;
use super::delta::DeltaSet;
use super::error::LedgerError;

/// Balance of every account, indexed by chart position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerState {
    balances: [i64; 15],
}

impl LedgerState {
    /// Creates a ledger with every account at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the balance of `account`.
    #[must_use]
    pub fn get(&self, account: Account) -> i64 {
        self.balances[account.index()]
    }

    /// Returns every `(account, balance)` pair in chart order.
    pub fn balances(&self) -> impl Iterator<Item = (Account, i64)> + '_ {
        Account::ALL.into_iter().map(|account| (account, self.get(account)))
    }

    /// Total assets net of accumulated depreciation.
    #[must_use]
    pub fn total_assets(&self) -> i128 {
        [
            Account::Cash,
            Account::AccountsReceivable,
            Account::Inventories,
            Account::FixedAssetsAtCost,
        ]
        .into_iter()
        .map(|a| i128::from(self.get(a)))
        .sum::<i128>()
            - i128::from(self.get(Account::AccumulatedDepreciation))
    }

    /// Total liabilities plus shareholders' equity.
    #[must_use]
    pub fn total_liabilities_and_equity(&self) -> i128 {
        [
            Account::AccountsPayable,
            Account::CurrentPortionOfDebt,
            Account::LongTermDebt,
            Account::CapitalStock,
        ]
        .into_iter()
        .map(|a| i128::from(self.get(a)))
        .sum::<i128>()
            - i128::from(self.get(Account::RetainedEarnings))
    }

    /// Both sides of the accounting identity: (assets, liabilities + equity).
    #[must_use]
    pub fn identity(&self) -> (i128, i128) {
        (self.total_assets(), self.total_liabilities_and_equity())
    }

    /// Checks `TotalAssets = TotalLiabilities + TotalEquity`.
    ///
    /// # Errors
    ///
    /// Returns `InvariantViolation` if the identity does not hold.
    pub fn verify_identity(&self) -> Result<(), LedgerError> {
        let (assets, liabilities_and_equity) = self.identity();
        if assets != liabilities_and_equity {
            return Err(LedgerError::InvariantViolation {
                assets,
                liabilities_and_equity,
            });
        }
        Ok(())
    }

    /// Builds the state that would result from applying `deltas`.
    ///
    /// Rejects overflow and negative balances on accounts that must stay
    /// non-negative, then checks the accounting identity on the result.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientBalance`, `Overflow`, or `InvariantViolation`.
    pub fn preview(&self, deltas: &DeltaSet) -> Result<Self, LedgerError> {
        let mut next = self.clone();

        for (account, delta) in deltas.iter() {
            let balance = self.get(account);
            let updated = balance
                .checked_add(delta)
                .ok_or(LedgerError::Overflow(account))?;
            if updated < 0 && !account.allows_negative() {
                return Err(LedgerError::InsufficientBalance {
                    account,
                    balance,
                    delta,
                });
            }
            next.balances[account.index()] = updated;
        }

        next.verify_identity()?;
        Ok(next)
    }

    /// Applies `deltas` atomically: either every change lands or none does.
    ///
    /// # Errors
    ///
    /// See [`LedgerState::preview`].
    pub fn apply_deltas(&mut self, deltas: &DeltaSet) -> Result<(), LedgerError> {
        *self = self.preview(deltas)?;
        Ok(())
    }
}
