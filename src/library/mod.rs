//! Library Reservation Orchestration
//!
//! Composes the reservation, catalog and rating services into user-facing
//! workflows.
//!
//! # Reserve
//!
//! ```text
//! list RENTED → get rating (provision on 404) → admission check
//!     → create reservation → available count -1 → fetch book + library
//! ```
//!
//! # Return
//!
//! ```text
//! get reservation → evaluate date vs tillDate → update status
//!     → available count +1 → stars +1 / -10
//! ```
//!
//! # Invariants
//!
//! 1. **Quota**: a user never holds more RENTED reservations than stars
//! 2. **No compensation**: side effects already applied are never undone
//! 3. **Validate first**: a malformed request makes no downstream call

pub mod admission;
pub mod aggregator;
pub mod coordinator;
pub mod date;
pub mod error;
pub mod return_policy;
pub mod types;


pub use admission::is_admitted;
pub use aggregator::aggregate;
pub use coordinator::LibraryCoordinator;
pub use error::GatewayError;
pub use return_policy::ReturnOutcome;
pub use types::{
    Book, Library, Reservation, ReservationDetails, ReservationReceipt, ReservationStatus,
    ReserveBookRequest, ReturnBookRequest, UserRating,
};
