//! Library Domain Types
//!
//! Wire DTOs shared by the downstream clients and the gateway surface.
//! Field names follow the camelCase contract of the backend services.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use super::date::parse_date;

// ============================================================================
// Reservation
// ============================================================================

/// Reservation lifecycle status
///
/// `RENTED` is the only non-terminal state. A rented reservation is closed
/// exactly once, as either `RETURNED` or `EXPIRED`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    Rented,
    Expired,
    Returned,
}

impl ReservationStatus {
    pub fn can_transition_to(&self, next: ReservationStatus) -> bool {
        matches!(
            (self, next),
            (
                ReservationStatus::Rented,
                ReservationStatus::Returned | ReservationStatus::Expired
            )
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Rented => "RENTED",
            ReservationStatus::Expired => "EXPIRED",
            ReservationStatus::Returned => "RETURNED",
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "RENTED" => Ok(ReservationStatus::Rented),
            "EXPIRED" => Ok(ReservationStatus::Expired),
            "RETURNED" => Ok(ReservationStatus::Returned),
            other => Err(format!("Unknown reservation status: {}", other)),
        }
    }
}

/// Reservation record as returned by the reservation service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub reservation_uid: String,
    /// Not echoed by every reservation endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub book_uid: String,
    pub library_uid: String,
    pub status: ReservationStatus,
    pub start_date: String,
    pub till_date: String,
}

// ============================================================================
// Catalog
// ============================================================================

/// Book metadata from the catalog service
///
/// `Default` is the degraded value used when a batch lookup misses an id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    #[serde(default)]
    pub book_uid: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub condition: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_count: Option<i32>,
}

/// Library metadata from the catalog service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Library {
    #[serde(default)]
    pub library_uid: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
}

/// Query for `GET /api/v1/libraries`, forwarded as-is
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LibrariesQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

/// Query for `GET /api/v1/libraries/{libraryUid}/books`, forwarded as-is
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct LibraryBooksQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_all: Option<String>,
}

// ============================================================================
// Rating
// ============================================================================

/// User star rating. Stars go negative after enough late returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserRating {
    /// The creation endpoint may omit stars; treat absence as zero.
    #[serde(default)]
    #[schema(example = 5)]
    pub stars: i64,
}

// ============================================================================
// Gateway requests
// ============================================================================

/// Body of `POST /api/v1/reservations`
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReserveBookRequest {
    #[validate(length(min = 1, message = "bookUid is required"))]
    pub book_uid: String,
    #[validate(length(min = 1, message = "libraryUid is required"))]
    pub library_uid: String,
    #[validate(custom(function = "validate_date_field"))]
    #[schema(example = "2026-10-30")]
    pub till_date: String,
}

/// Body of `POST /api/v1/reservations/{reservationUid}/return`
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReturnBookRequest {
    /// Accepted for forward compatibility; no return branch reads it.
    #[serde(default)]
    #[schema(example = "EXCELLENT")]
    pub condition: Option<String>,
    #[validate(custom(function = "validate_date_field"))]
    #[schema(example = "2026-10-30")]
    pub date: String,
}

fn validate_date_field(value: &str) -> Result<(), ValidationError> {
    parse_date(value).map(|_| ()).map_err(|_| {
        let mut err = ValidationError::new("date");
        err.message = Some(format!("'{}' is not a YYYY-MM-DD date", value).into());
        err
    })
}

// ============================================================================
// Gateway responses
// ============================================================================

/// Reservation joined with its book and library
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReservationDetails {
    pub reservation_uid: String,
    pub status: ReservationStatus,
    pub start_date: String,
    pub till_date: String,
    pub book: Book,
    pub library: Library,
}

impl ReservationDetails {
    pub fn new(reservation: Reservation, book: Book, library: Library) -> Self {
        Self {
            reservation_uid: reservation.reservation_uid,
            status: reservation.status,
            start_date: reservation.start_date,
            till_date: reservation.till_date,
            book,
            library,
        }
    }
}

/// Result of a successful reservation: details plus the rating used for admission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReservationReceipt {
    #[serde(flatten)]
    pub reservation: ReservationDetails,
    pub rating: UserRating,
}
