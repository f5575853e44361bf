//! OpenAPI / Swagger UI Documentation
//!
//! - Swagger UI: `http://localhost:8080/docs`
//! - OpenAPI JSON: `http://localhost:8080/api-docs/openapi.json`

use utoipa::OpenApi;

use crate::gateway::types::ErrorResponse;
use crate::library::types::{
    Book, Library, ReservationDetails, ReservationReceipt, ReservationStatus, ReserveBookRequest,
    ReturnBookRequest, UserRating,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Library Gateway API",
        version = "1.0.0",
        description = "Reservation gateway over the reservation, library and rating services."
    ),
    servers(
        (url = "http://localhost:8080", description = "Development"),
    ),
    paths(
        crate::gateway::handlers::health::health_check,
        crate::gateway::handlers::library::list_libraries,
        crate::gateway::handlers::library::list_library_books,
        crate::gateway::handlers::reservation::list_reservations,
        crate::gateway::handlers::reservation::reserve_book,
        crate::gateway::handlers::reservation::return_book,
        crate::gateway::handlers::rating::get_rating,
    ),
    components(
        schemas(
            Book,
            Library,
            ReservationStatus,
            ReservationDetails,
            ReservationReceipt,
            ReserveBookRequest,
            ReturnBookRequest,
            UserRating,
            ErrorResponse,
        )
    ),
    tags(
        (name = "System", description = "Liveness"),
        (name = "Library", description = "Library and book listings"),
        (name = "Reservation", description = "Reserve and return books"),
        (name = "Rating", description = "User star rating"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for expected in [
            "/manage/health",
            "/api/v1/libraries",
            "/api/v1/libraries/{libraryUid}/books",
            "/api/v1/reservations",
            "/api/v1/reservations/{reservationUid}/return",
            "/api/v1/rating",
        ] {
            assert!(paths.contains(&expected), "missing {}", expected);
        }
    }
}
