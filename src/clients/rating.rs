//! Rating (bonus) service client

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use super::RatingClient;
use super::error::ClientError;
use super::http::{RawResponse, ServiceEndpoint};
use crate::library::types::UserRating;

pub const SERVICE: &str = "rating";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateRatingRequest<'a> {
    user_name: &'a str,
}

pub struct HttpRatingClient {
    endpoint: ServiceEndpoint,
}

impl HttpRatingClient {
    pub fn new(base_url: &str, client: Client, max_in_flight: usize) -> Result<Self, ClientError> {
        Ok(Self {
            endpoint: ServiceEndpoint::new(SERVICE, base_url, client, max_in_flight)?,
        })
    }
}

#[async_trait]
impl RatingClient for HttpRatingClient {
    async fn get_rating(&self, username: &str) -> Result<UserRating, ClientError> {
        let request = self.endpoint.get(&["rating", username]);
        self.endpoint.send_json(request).await
    }

    async fn get_rating_raw(&self, username: &str) -> Result<RawResponse, ClientError> {
        let request = self.endpoint.get(&["rating", username]);
        self.endpoint.send(request).await
    }

    async fn create_rating(&self, username: &str) -> Result<UserRating, ClientError> {
        let request = self
            .endpoint
            .post(&["rating", ""])
            .json(&CreateRatingRequest { user_name: username });
        self.endpoint.send_json(request).await
    }

    async fn update_stars(&self, username: &str, stars_diff: i32) -> Result<(), ClientError> {
        let request = self
            .endpoint
            .put(&["rating", username])
            .query(&[("starsDiff", stars_diff)]);
        self.endpoint.send_ok(request).await.map(|_| ())
    }
}
