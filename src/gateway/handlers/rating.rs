use std::sync::Arc;

use axum::{extract::State, response::Response};

use super::super::extractors::UserName;
use super::super::state::AppState;
use super::super::types::{ApiResult, ErrorResponse, relay};
use crate::library::types::UserRating;

/// Caller's star rating
///
/// GET /api/v1/rating
#[utoipa::path(
    get,
    path = "/api/v1/rating",
    params(("X-User-Name" = String, Header, description = "Caller identity")),
    responses(
        (status = 200, description = "Current rating", body = UserRating),
        (status = 400, description = "Missing X-User-Name", body = ErrorResponse),
        (status = 503, description = "Bonus Service unavailable", body = ErrorResponse)
    ),
    tag = "Rating"
)]
pub async fn get_rating(
    State(state): State<Arc<AppState>>,
    UserName(username): UserName,
) -> ApiResult<Response> {
    let raw = state.coordinator.user_rating(&username).await?;
    Ok(relay(raw))
}
