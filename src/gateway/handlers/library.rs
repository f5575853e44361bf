//! Catalog listings, forwarded to the library service as-is

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    response::Response,
};

use super::super::state::AppState;
use super::super::types::{ApiResult, ErrorResponse, relay};
use crate::library::types::{LibrariesQuery, LibraryBooksQuery};

/// List libraries in a city
///
/// GET /api/v1/libraries
#[utoipa::path(
    get,
    path = "/api/v1/libraries",
    params(LibrariesQuery),
    responses(
        (status = 200, description = "Paginated libraries, as returned by the library service", content_type = "application/json"),
        (status = 500, description = "Library service unreachable", body = ErrorResponse)
    ),
    tag = "Library"
)]
pub async fn list_libraries(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LibrariesQuery>,
) -> ApiResult<Response> {
    let raw = state.coordinator.list_libraries(&query).await?;
    Ok(relay(raw))
}

/// List books held by a library
///
/// GET /api/v1/libraries/{libraryUid}/books
#[utoipa::path(
    get,
    path = "/api/v1/libraries/{libraryUid}/books",
    params(
        ("libraryUid" = String, Path, description = "Library UID"),
        LibraryBooksQuery
    ),
    responses(
        (status = 200, description = "Paginated books, as returned by the library service", content_type = "application/json"),
        (status = 500, description = "Library service unreachable", body = ErrorResponse)
    ),
    tag = "Library"
)]
pub async fn list_library_books(
    State(state): State<Arc<AppState>>,
    Path(library_uid): Path<String>,
    Query(query): Query<LibraryBooksQuery>,
) -> ApiResult<Response> {
    let raw = state
        .coordinator
        .list_library_books(&library_uid, &query)
        .await?;
    Ok(relay(raw))
}
