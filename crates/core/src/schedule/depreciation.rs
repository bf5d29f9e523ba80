//! Fixed-asset register and depreciation policies.
//!
//! Cost and accumulated depreciation are tracked in aggregate. Disposal is not
//! modelled, so neither figure ever decreases.

use serde::{Deserialize, Serialize};

use crate::ledger::{Account, LedgerError, LedgerState};

/// Aggregate fixed assets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedAssetRegister {
    /// Historical cost.
    pub cost: i64,
    /// Depreciation charged so far.
    pub accumulated_depreciation: i64,
}

impl FixedAssetRegister {
    /// Reads the register from the ledger balances.
    #[must_use]
    pub fn from_state(state: &LedgerState) -> Self {
        Self {
            cost: state.get(Account::FixedAssetsAtCost),
            accumulated_depreciation: state.get(Account::AccumulatedDepreciation),
        }
    }

    /// Cost less accumulated depreciation.
    #[must_use]
    pub const fn net_book_value(&self) -> i64 {
        self.cost - self.accumulated_depreciation
    }

    /// Returns the register after capitalising `cost` more assets.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount` for a negative cost.
    pub fn acquire(&self, cost: i64) -> Result<Self, LedgerError> {
        if cost < 0 {
            return Err(LedgerError::invalid("asset cost cannot be negative"));
        }
        let cost = self
            .cost
            .checked_add(cost)
            .ok_or(LedgerError::Overflow(Account::FixedAssetsAtCost))?;
        Ok(Self { cost, ..*self })
    }

    /// Returns the register after charging `amount` of depreciation.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount` if `amount` is negative or exceeds net book value.
    pub fn depreciate(&self, amount: i64) -> Result<Self, LedgerError> {
        if amount < 0 {
            return Err(LedgerError::invalid("depreciation cannot be negative"));
        }
        if amount > self.net_book_value() {
            return Err(LedgerError::invalid(format!(
                "depreciation {amount} exceeds net book value {}",
                self.net_book_value()
            )));
        }
        Ok(Self {
            accumulated_depreciation: self.accumulated_depreciation + amount,
            ..*self
        })
    }
}

/// Policy deciding the depreciation charge for one period.
pub trait DepreciationSchedule {
    /// Charge for the next period given the current register.
    fn periodic_charge(&self, register: &FixedAssetRegister) -> i64;
}

/// Equal charges over the useful life, down to a salvage value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StraightLineDepreciation {
    useful_life_years: u32,
    salvage_value: i64,
}

impl StraightLineDepreciation {
    /// Creates a straight-line schedule with no salvage value.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount` for a zero useful life.
    pub fn new(useful_life_years: u32) -> Result<Self, LedgerError> {
        Self::with_salvage(useful_life_years, 0)
    }

    /// Creates a straight-line schedule that stops at `salvage_value`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount` for a zero useful life or negative salvage.
    pub fn with_salvage(useful_life_years: u32, salvage_value: i64) -> Result<Self, LedgerError> {
        if useful_life_years == 0 {
            return Err(LedgerError::invalid("useful life must be at least one year"));
        }
        if salvage_value < 0 {
            return Err(LedgerError::invalid("salvage value cannot be negative"));
        }
        Ok(Self {
            useful_life_years,
            salvage_value,
        })
    }
}

impl Default for StraightLineDepreciation {
    /// Five years, no salvage value.
    fn default() -> Self {
        Self {
            useful_life_years: 5,
            salvage_value: 0,
        }
    }
}

impl DepreciationSchedule for StraightLineDepreciation {
    fn periodic_charge(&self, register: &FixedAssetRegister) -> i64 {
        let depreciable = (register.cost - self.salvage_value).max(0);
        let remaining = (register.net_book_value() - self.salvage_value).max(0);
        (depreciable / i64::from(self.useful_life_years)).min(remaining)
    }
}
