//! Reservation handlers: the composite reserve and return workflows

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use super::super::extractors::{UserName, ValidatedJson};
use super::super::state::AppState;
use super::super::types::{ApiResult, ErrorResponse};
use crate::library::types::{
    ReservationDetails, ReservationReceipt, ReserveBookRequest, ReturnBookRequest,
};

/// Caller's rented books with book and library details
///
/// GET /api/v1/reservations
#[utoipa::path(
    get,
    path = "/api/v1/reservations",
    params(("X-User-Name" = String, Header, description = "Caller identity")),
    responses(
        (status = 200, description = "RENTED reservations", body = Vec<ReservationDetails>),
        (status = 400, description = "Missing X-User-Name", body = ErrorResponse)
    ),
    tag = "Reservation"
)]
pub async fn list_reservations(
    State(state): State<Arc<AppState>>,
    UserName(username): UserName,
) -> ApiResult<Json<Vec<ReservationDetails>>> {
    let details = state.coordinator.user_reservations(&username).await?;
    Ok(Json(details))
}

/// Reserve a book
///
/// POST /api/v1/reservations
///
/// Admitted only while the caller's RENTED count stays within their stars.
#[utoipa::path(
    post,
    path = "/api/v1/reservations",
    params(("X-User-Name" = String, Header, description = "Caller identity")),
    request_body = ReserveBookRequest,
    responses(
        (status = 200, description = "Reservation created", body = ReservationReceipt),
        (status = 400, description = "Invalid request or reservations over limit", body = ErrorResponse),
        (status = 503, description = "Bonus Service unavailable", body = ErrorResponse)
    ),
    tag = "Reservation"
)]
pub async fn reserve_book(
    State(state): State<Arc<AppState>>,
    UserName(username): UserName,
    ValidatedJson(request): ValidatedJson<ReserveBookRequest>,
) -> ApiResult<Json<ReservationReceipt>> {
    let receipt = state.coordinator.reserve_book(&username, request).await?;
    Ok(Json(receipt))
}

/// Return a rented book
///
/// POST /api/v1/reservations/{reservationUid}/return
#[utoipa::path(
    post,
    path = "/api/v1/reservations/{reservationUid}/return",
    params(
        ("reservationUid" = String, Path, description = "Reservation UID"),
        ("X-User-Name" = String, Header, description = "Caller identity")
    ),
    request_body = ReturnBookRequest,
    responses(
        (status = 204, description = "Book returned"),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Reservation not found"),
        (status = 503, description = "Bonus Service unavailable", body = ErrorResponse)
    ),
    tag = "Reservation"
)]
pub async fn return_book(
    State(state): State<Arc<AppState>>,
    Path(reservation_uid): Path<String>,
    UserName(username): UserName,
    ValidatedJson(request): ValidatedJson<ReturnBookRequest>,
) -> ApiResult<StatusCode> {
    state
        .coordinator
        .return_book(&reservation_uid, &username, request)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
