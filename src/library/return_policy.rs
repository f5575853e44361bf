//! Return Policy
//!
//! Decides how a rented reservation is closed and how the user's rating moves.

use chrono::NaiveDate;

use super::types::ReservationStatus;

/// Stars taken for returning after the due date
pub const LATE_RETURN_PENALTY: i32 = -10;
/// Stars granted for returning on or before the due date
pub const ON_TIME_RETURN_BONUS: i32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReturnOutcome {
    pub status: ReservationStatus,
    pub stars_diff: i32,
}

impl ReturnOutcome {
    /// Returning on the due date itself is on time.
    pub fn evaluate(till_date: NaiveDate, returned_on: NaiveDate) -> Self {
        if returned_on > till_date {
            Self {
                status: ReservationStatus::Expired,
                stars_diff: LATE_RETURN_PENALTY,
            }
        } else {
            Self {
                status: ReservationStatus::Returned,
                stars_diff: ON_TIME_RETURN_BONUS,
            }
        }
    }

    #[inline]
    pub fn is_late(&self) -> bool {
        self.status == ReservationStatus::Expired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Days;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_return_on_due_date_is_on_time() {
        let till = date(2026, 10, 16);
        let outcome = ReturnOutcome::evaluate(till, till);

        assert_eq!(outcome.status, ReservationStatus::Returned);
        assert_eq!(outcome.stars_diff, 1);
        assert!(!outcome.is_late());
    }

    #[test]
    fn test_early_return() {
        let outcome = ReturnOutcome::evaluate(date(2026, 10, 16), date(2026, 9, 1));
        assert_eq!(outcome.status, ReservationStatus::Returned);
        assert_eq!(outcome.stars_diff, ON_TIME_RETURN_BONUS);
    }

    #[test]
    fn test_one_day_late_expires() {
        let outcome = ReturnOutcome::evaluate(date(2026, 10, 16), date(2026, 10, 17));

        assert_eq!(outcome.status, ReservationStatus::Expired);
        assert_eq!(outcome.stars_diff, -10);
        assert!(outcome.is_late());
    }

    #[test]
    fn test_outcome_across_year_boundary() {
        let till = date(2026, 12, 31);
        for offset in 0..40u64 {
            let before = till.checked_sub_days(Days::new(offset)).unwrap();
            assert_eq!(
                ReturnOutcome::evaluate(till, before).status,
                ReservationStatus::Returned
            );
            let after = till.checked_add_days(Days::new(offset + 1)).unwrap();
            assert_eq!(
                ReturnOutcome::evaluate(till, after).status,
                ReservationStatus::Expired
            );
        }
    }
}
