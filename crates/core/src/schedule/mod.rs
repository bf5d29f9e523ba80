//! Amortization and depreciation policies.
//!
//! Policies are pure: they take the current record plus an event and return
//! the next record. Handlers turn the difference into account deltas, so a new
//! schedule (e.g. declining balance) never touches transaction application.

pub mod debt;
pub mod depreciation;

pub use debt::{DebtRecord, DebtSchedule, DebtSplit, StraightLineDebt};
pub use depreciation::{DepreciationSchedule, FixedAssetRegister, StraightLineDepreciation};
