//! Admission Policy
//!
//! A user's star rating is their quota of simultaneously rented books.
//! A new reservation is admitted only if it keeps the user within quota.

/// Returns `true` if a user holding `active_count` rented books with `stars`
/// stars may rent one more.
pub fn is_admitted(active_count: usize, stars: i64) -> bool {
    // A count beyond i64 can never fit within a star rating
    i64::try_from(active_count).is_ok_and(|active| active < stars)
}
