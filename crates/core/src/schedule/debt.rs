//! Debt records and their current / long-term split.

use serde::{Deserialize, Serialize};
use tally_shared::types::{DebtId, PartyId};

use crate::ledger::LedgerError;

/// Principal due within the next period versus later.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebtSplit {
    /// Feeds `CurrentPortionOfDebt`.
    pub current: i64,
    /// Feeds `LongTermDebt`.
    pub long_term: i64,
}

/// Policy deciding how much outstanding principal falls due next period.
pub trait DebtSchedule {
    /// Splits `outstanding` principal with `remaining_term_years` left.
    fn split(&self, outstanding: i64, remaining_term_years: u32) -> DebtSplit;
}

/// Equal principal repayments over the remaining term.
///
/// The current portion is `outstanding / term` (integer division); the
/// remainder stays long-term and is picked up by later years.
#[derive(Debug, Clone, Copy, Default)]
pub struct StraightLineDebt;

impl DebtSchedule for StraightLineDebt {
    fn split(&self, outstanding: i64, remaining_term_years: u32) -> DebtSplit {
        if remaining_term_years <= 1 {
            return DebtSplit {
                current: outstanding,
                long_term: 0,
            };
        }
        let current = outstanding / i64::from(remaining_term_years);
        DebtSplit {
            current,
            long_term: outstanding - current,
        }
    }
}

/// One outstanding loan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebtRecord {
    /// Unique identifier.
    pub id: DebtId,
    /// Who lent the money.
    pub lender: PartyId,
    /// Principal not yet repaid.
    pub principal_outstanding: i64,
    /// Annual interest rate in whole percent.
    pub annual_rate_percent: u32,
    /// Years left until the final repayment.
    pub remaining_term_years: u32,
    /// Current / long-term split of `principal_outstanding`.
    pub split: DebtSplit,
}

impl DebtRecord {
    /// Opens a new loan and computes its first split.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount` for a non-positive principal or term, or a rate above 100%.
    pub fn open(
        lender: PartyId,
        principal: i64,
        term_years: u32,
        annual_rate_percent: u32,
        schedule: &dyn DebtSchedule,
    ) -> Result<Self, LedgerError> {
        if principal <= 0 {
            return Err(LedgerError::invalid("principal must be positive"));
        }
        if term_years == 0 {
            return Err(LedgerError::invalid("term must be at least one year"));
        }
        if annual_rate_percent > 100 {
            return Err(LedgerError::invalid("interest rate cannot exceed 100%"));
        }

        let mut record = Self {
            id: DebtId::new(),
            lender,
            principal_outstanding: principal,
            annual_rate_percent,
            remaining_term_years: term_years,
            split: DebtSplit::default(),
        };
        record.recompute_split(schedule);
        Ok(record)
    }

    /// Recomputes the split from the outstanding principal and remaining term.
    pub fn recompute_split(&mut self, schedule: &dyn DebtSchedule) {
        self.split = schedule.split(self.principal_outstanding, self.remaining_term_years);
    }

    /// Returns the record after the current portion has been repaid.
    ///
    /// The term shrinks by a year and the next current portion is split off.
    #[must_use]
    pub fn amortize(&self, schedule: &dyn DebtSchedule) -> Self {
        let mut next = self.clone();
        next.principal_outstanding -= self.split.current;
        next.remaining_term_years = self.remaining_term_years.saturating_sub(1);
        next.recompute_split(schedule);
        next
    }

    /// One year of interest on the outstanding principal, truncated toward zero.
    #[must_use]
    pub fn annual_interest(&self) -> i64 {
        let interest =
            i128::from(self.principal_outstanding) * i128::from(self.annual_rate_percent) / 100;
        // Rate is capped at 100%, so interest never exceeds the principal.
        i64::try_from(interest).unwrap_or(i64::MAX)
    }

    /// Returns true once every unit of principal has been repaid.
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        self.principal_outstanding == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn loan(principal: i64, term: u32) -> DebtRecord {
        DebtRecord::open(PartyId::new(), principal, term, 10, &StraightLineDebt).unwrap()
    }

    #[rstest]
    #[case(50_000, 10, 5_000, 45_000)]
    #[case(10_000, 3, 3_333, 6_667)]
    #[case(7, 1, 7, 0)]
    #[case(5, 10, 0, 5)]
    fn test_straight_line_split(
        #[case] principal: i64,
        #[case] term: u32,
        #[case] current: i64,
        #[case] long_term: i64,
    ) {
        let record = loan(principal, term);
        assert_eq!(record.split, DebtSplit { current, long_term });
        assert_eq!(record.split.current + record.split.long_term, principal);
    }

    #[test]
    fn test_amortize_repays_current_and_resplits() {
        let record = loan(50_000, 10);
        let next = record.amortize(&StraightLineDebt);

        assert_eq!(next.id, record.id);
        assert_eq!(next.principal_outstanding, 45_000);
        assert_eq!(next.remaining_term_years, 9);
        assert_eq!(next.split, DebtSplit { current: 5_000, long_term: 40_000 });
    }

    #[test]
    fn test_amortize_to_settlement() {
        let mut record = loan(10_000, 3);
        for _ in 0..3 {
            record = record.amortize(&StraightLineDebt);
        }
        assert!(record.is_settled());
        assert_eq!(record.split, DebtSplit::default());
    }

    #[test]
    fn test_annual_interest_truncates() {
        let mut record = loan(50_000, 10);
        assert_eq!(record.annual_interest(), 5_000);

        record.principal_outstanding = 999;
        assert_eq!(record.annual_interest(), 99);
    }

    #[rstest]
    #[case(0, 10, 10)]
    #[case(-1, 10, 10)]
    #[case(100, 0, 10)]
    #[case(100, 10, 101)]
    fn test_open_rejects_out_of_domain(#[case] principal: i64, #[case] term: u32, #[case] rate: u32) {
        let err = DebtRecord::open(PartyId::new(), principal, term, rate, &StraightLineDebt)
            .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_AMOUNT");
    }
}
