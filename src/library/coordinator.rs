//! Library Coordinator
//!
//! Runs the composite reserve and return workflows across the reservation,
//! catalog and rating services. Steps run strictly in sequence. Nothing is
//! rolled back: a failure after the reservation is created leaves it RENTED.

use std::sync::Arc;

use tracing::{debug, error, info, warn};
use validator::Validate;

use super::admission::is_admitted;
use super::aggregator::aggregate;
use super::date::parse_date;
use super::error::GatewayError;
use super::return_policy::ReturnOutcome;
use super::types::{
    LibrariesQuery, LibraryBooksQuery, ReservationDetails, ReservationReceipt, ReservationStatus,
    ReserveBookRequest, ReturnBookRequest, UserRating,
};
use crate::clients::{
    CatalogClient, ClientError, HttpCatalogClient, HttpRatingClient, HttpReservationClient,
    RatingClient, RawResponse, ReservationClient, build_client,
};
use crate::config::ServicesConfig;

pub struct LibraryCoordinator {
    reservations: Arc<dyn ReservationClient>,
    catalog: Arc<dyn CatalogClient>,
    rating: Arc<dyn RatingClient>,
}

impl LibraryCoordinator {
    pub fn new(
        reservations: Arc<dyn ReservationClient>,
        catalog: Arc<dyn CatalogClient>,
        rating: Arc<dyn RatingClient>,
    ) -> Self {
        Self {
            reservations,
            catalog,
            rating,
        }
    }

    /// Wire HTTP clients for all three services over one shared connection pool
    pub fn from_config(config: &ServicesConfig) -> Result<Self, ClientError> {
        let client = build_client(config)?;
        let max_in_flight = config.max_conns_per_host;

        Ok(Self::new(
            Arc::new(HttpReservationClient::new(
                &config.reservation_url,
                client.clone(),
                max_in_flight,
            )?),
            Arc::new(HttpCatalogClient::new(
                &config.library_url,
                client.clone(),
                max_in_flight,
            )?),
            Arc::new(HttpRatingClient::new(
                &config.rating_url,
                client,
                max_in_flight,
            )?),
        ))
    }

    fn require_username(username: &str) -> Result<(), GatewayError> {
        if username.trim().is_empty() {
            return Err(GatewayError::Validation("X-User-Name is required".into()));
        }
        Ok(())
    }

    // ========================================================================
    // Pass-through reads
    // ========================================================================

    pub async fn list_libraries(&self, query: &LibrariesQuery) -> Result<RawResponse, GatewayError> {
        Ok(self.catalog.list_libraries(query).await?)
    }

    pub async fn list_library_books(
        &self,
        library_uid: &str,
        query: &LibraryBooksQuery,
    ) -> Result<RawResponse, GatewayError> {
        Ok(self.catalog.list_library_books(library_uid, query).await?)
    }

    /// Caller's rating, relayed as the rating service answered it
    pub async fn user_rating(&self, username: &str) -> Result<RawResponse, GatewayError> {
        Self::require_username(username)?;
        self.rating.get_rating_raw(username).await.map_err(|e| {
            error!(username = %username, error = %e, "rating lookup failed");
            GatewayError::from_rating(e)
        })
    }

    /// Caller's RENTED reservations with book and library attached
    pub async fn user_reservations(
        &self,
        username: &str,
    ) -> Result<Vec<ReservationDetails>, GatewayError> {
        Self::require_username(username)?;
        let reservations = self
            .reservations
            .list_by_user(username, ReservationStatus::Rented)
            .await?;
        aggregate(self.catalog.as_ref(), reservations)
            .await
            .map_err(|e| {
                warn!(
                    username = %username,
                    service = e.service(),
                    status = ?e.status(),
                    error = %e,
                    "reservation listing enrichment failed"
                );
                GatewayError::from(e)
            })
    }

    // ========================================================================
    // Reserve
    // ========================================================================

    /// Rating used for admission. A user without a record gets one created.
    async fn effective_rating(&self, username: &str) -> Result<UserRating, GatewayError> {
        match self.rating.get_rating(username).await {
            Ok(rating) => Ok(rating),
            Err(e) if e.is_not_found() => {
                info!(username = %username, "no rating record, provisioning");
                self.rating.create_rating(username).await.map_err(|e| {
                    error!(username = %username, error = %e, "rating provisioning failed");
                    GatewayError::from_rating(e)
                })
            }
            Err(e) => {
                error!(
                    username = %username,
                    status = ?e.status(),
                    error = %e,
                    "rating lookup failed"
                );
                Err(GatewayError::BonusServiceUnavailable)
            }
        }
    }

    pub async fn reserve_book(
        &self,
        username: &str,
        request: ReserveBookRequest,
    ) -> Result<ReservationReceipt, GatewayError> {
        // Re-checked here so internal callers cannot skip the handler's validation
        Self::require_username(username)?;
        request.validate()?;

        let active = self
            .reservations
            .list_by_user(username, ReservationStatus::Rented)
            .await
            .map_err(|e| {
                error!(username = %username, error = %e, "listing rented reservations failed");
                GatewayError::from(e)
            })?;

        let rating = self.effective_rating(username).await?;

        if !is_admitted(active.len(), rating.stars) {
            info!(
                username = %username,
                active = active.len(),
                stars = rating.stars,
                "reservation rejected: over limit"
            );
            return Err(GatewayError::LimitExceeded);
        }

        let created = self
            .reservations
            .create(username, &request)
            .await
            .map_err(|e| {
                error!(username = %username, error = %e, "reservation create failed");
                GatewayError::from(e)
            })?;
        info!(
            username = %username,
            reservation_uid = %created.reservation_uid,
            book_uid = %created.book_uid,
            "reservation created"
        );

        // Keyed by the ids the reservation service stored, not the request's
        if let Err(e) = self
            .catalog
            .update_available_count(&created.library_uid, &created.book_uid, -1)
            .await
        {
            warn!(
                reservation_uid = %created.reservation_uid,
                error = %e,
                "available count decrement failed, reservation left RENTED"
            );
            return Err(e.into());
        }

        let reservation_uid = created.reservation_uid.clone();
        let details = aggregate(self.catalog.as_ref(), vec![created])
            .await
            .map_err(|e| {
                warn!(
                    reservation_uid = %reservation_uid,
                    error = %e,
                    "metadata lookup failed, reservation left RENTED"
                );
                GatewayError::from(e)
            })?
            .into_iter()
            .next()
            .ok_or_else(|| GatewayError::Internal("reservation details missing".into()))?;

        Ok(ReservationReceipt {
            reservation: details,
            rating,
        })
    }

    // ========================================================================
    // Return
    // ========================================================================

    pub async fn return_book(
        &self,
        reservation_uid: &str,
        username: &str,
        request: ReturnBookRequest,
    ) -> Result<(), GatewayError> {
        Self::require_username(username)?;
        request.validate()?;
        let returned_on =
            parse_date(&request.date).map_err(|e| GatewayError::Validation(e.to_string()))?;

        let reservation = self.reservations.get(reservation_uid).await.map_err(|e| {
            warn!(reservation_uid = %reservation_uid, error = %e, "reservation lookup failed");
            GatewayError::from(e)
        })?;

        let till_date = parse_date(&reservation.till_date).map_err(|e| {
            error!(
                reservation_uid = %reservation_uid,
                till_date = %reservation.till_date,
                "unparseable tillDate from reservation service"
            );
            GatewayError::Internal(format!("invalid tillDate: {}", e))
        })?;

        let outcome = ReturnOutcome::evaluate(till_date, returned_on);
        debug!(
            reservation_uid = %reservation_uid,
            status = %outcome.status,
            stars_diff = outcome.stars_diff,
            "return evaluated"
        );

        self.reservations
            .update_status(reservation_uid, username, outcome.status)
            .await
            .map_err(|e| {
                warn!(reservation_uid = %reservation_uid, error = %e, "status update failed");
                GatewayError::from(e)
            })?;

        self.catalog
            .update_available_count(&reservation.library_uid, &reservation.book_uid, 1)
            .await
            .map_err(|e| {
                warn!(
                    reservation_uid = %reservation_uid,
                    error = %e,
                    "available count increment failed after status update"
                );
                GatewayError::from(e)
            })?;

        self.rating
            .update_stars(username, outcome.stars_diff)
            .await
            .map_err(|e| {
                error!(
                    username = %username,
                    stars_diff = outcome.stars_diff,
                    error = %e,
                    "rating update failed after return"
                );
                GatewayError::from_rating(e)
            })?;

        info!(
            reservation_uid = %reservation_uid,
            username = %username,
            status = %outcome.status,
            late = outcome.is_late(),
            "book returned"
        );
        Ok(())
    }
}
