//! Downstream Service Clients
//!
//! One narrow capability trait per backend service. The coordinator only sees
//! `Arc<dyn ...>`, so tests substitute the in-memory fakes from [`mock`].
//! No client retries; a failed call is reported once to the caller.

pub mod catalog;
pub mod error;
pub mod http;
pub mod rating;
pub mod reservation;

pub use catalog::HttpCatalogClient;
pub use error::ClientError;
pub use http::{RawResponse, ServiceEndpoint, build_client};
pub use rating::HttpRatingClient;
pub use reservation::HttpReservationClient;

use async_trait::async_trait;

use crate::library::types::{
    Book, LibrariesQuery, Library, LibraryBooksQuery, Reservation, ReservationStatus,
    ReserveBookRequest, UserRating,
};

/// Reservation service capability
#[async_trait]
pub trait ReservationClient: Send + Sync {
    /// Reservations of `username` in the given status. No reservations is `Ok(vec![])`.
    async fn list_by_user(
        &self,
        username: &str,
        status: ReservationStatus,
    ) -> Result<Vec<Reservation>, ClientError>;

    async fn get(&self, reservation_uid: &str) -> Result<Reservation, ClientError>;

    /// Create a RENTED reservation owned by `username`
    async fn create(
        &self,
        username: &str,
        request: &ReserveBookRequest,
    ) -> Result<Reservation, ClientError>;

    /// Close a reservation. The service rejects it unless `username` owns it.
    async fn update_status(
        &self,
        reservation_uid: &str,
        username: &str,
        status: ReservationStatus,
    ) -> Result<(), ClientError>;
}

/// Catalog service capability
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Batch lookup. Unknown ids are simply absent from the result.
    async fn books_by_uids(&self, book_uids: &[String]) -> Result<Vec<Book>, ClientError>;

    async fn libraries_by_uids(&self, library_uids: &[String])
    -> Result<Vec<Library>, ClientError>;

    async fn update_available_count(
        &self,
        library_uid: &str,
        book_uid: &str,
        count_diff: i32,
    ) -> Result<(), ClientError>;

    async fn list_libraries(&self, query: &LibrariesQuery) -> Result<RawResponse, ClientError>;

    async fn list_library_books(
        &self,
        library_uid: &str,
        query: &LibraryBooksQuery,
    ) -> Result<RawResponse, ClientError>;
}

/// Rating service capability
#[async_trait]
pub trait RatingClient: Send + Sync {
    /// A user without a rating record is `Backend { status: 404, .. }`
    async fn get_rating(&self, username: &str) -> Result<UserRating, ClientError>;

    /// Same lookup, relayed without interpretation
    async fn get_rating_raw(&self, username: &str) -> Result<RawResponse, ClientError>;

    async fn create_rating(&self, username: &str) -> Result<UserRating, ClientError>;

    async fn update_stars(&self, username: &str, stars_diff: i32) -> Result<(), ClientError>;
}


#[cfg(test)]
pub use mock::{MockCatalogClient, MockRatingClient, MockReservationClient};
