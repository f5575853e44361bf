//! Reservation service client

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::HeaderValue;
use tracing::debug;

use super::ReservationClient;
use super::error::ClientError;
use super::http::ServiceEndpoint;
use crate::library::types::{Reservation, ReservationStatus, ReserveBookRequest};

pub const SERVICE: &str = "reservation";

/// Header carrying the caller identity to the reservation service
pub const USER_NAME_HEADER: &str = "X-User-Name";

pub struct HttpReservationClient {
    endpoint: ServiceEndpoint,
}

impl HttpReservationClient {
    pub fn new(base_url: &str, client: Client, max_in_flight: usize) -> Result<Self, ClientError> {
        Ok(Self {
            endpoint: ServiceEndpoint::new(SERVICE, base_url, client, max_in_flight)?,
        })
    }
}

/// Identity header value carrying the name's raw UTF-8 bytes
fn identity(username: &str) -> Result<HeaderValue, ClientError> {
    HeaderValue::from_bytes(username.as_bytes()).map_err(|e| ClientError::InvalidRequest {
        service: SERVICE,
        reason: format!("{} not representable as a header: {}", USER_NAME_HEADER, e),
    })
}

#[async_trait]
impl ReservationClient for HttpReservationClient {
    async fn list_by_user(
        &self,
        username: &str,
        status: ReservationStatus,
    ) -> Result<Vec<Reservation>, ClientError> {
        let request = self
            .endpoint
            .get(&["reservations", "by-user", username])
            .query(&[("status", status.as_str())]);
        let response = self.endpoint.send_ok(request).await?;

        // The service answers 204 with no body when the user has no reservations
        if response.body.trim().is_empty() {
            debug!(username = %username, "no reservations for user");
            return Ok(Vec::new());
        }
        self.endpoint.decode(&response.body)
    }

    async fn get(&self, reservation_uid: &str) -> Result<Reservation, ClientError> {
        let request = self.endpoint.get(&["reservations", reservation_uid]);
        self.endpoint.send_json(request).await
    }

    async fn create(
        &self,
        username: &str,
        request: &ReserveBookRequest,
    ) -> Result<Reservation, ClientError> {
        let request = self
            .endpoint
            .post(&["reservations", ""])
            .header(USER_NAME_HEADER, identity(username)?)
            .json(request);
        self.endpoint.send_json(request).await
    }

    async fn update_status(
        &self,
        reservation_uid: &str,
        username: &str,
        status: ReservationStatus,
    ) -> Result<(), ClientError> {
        let request = self
            .endpoint
            .put(&["reservations", reservation_uid, "status"])
            .header(USER_NAME_HEADER, identity(username)?)
            .query(&[("status", status.as_str())]);
        self.endpoint.send_ok(request).await.map(|_| ())
    }
}
