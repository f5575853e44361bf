//! Shared HTTP transport for downstream services.
//!
//! One `reqwest::Client` (and its connection pool) is shared by all three
//! services. Each service gets its own semaphore so a slow host cannot take
//! every in-flight slot.

use std::sync::Arc;

use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tokio::sync::Semaphore;
use tracing::debug;

use super::error::ClientError;
use crate::config::ServicesConfig;

/// Raw downstream response, relayed verbatim by pass-through endpoints
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    #[inline]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Build the shared client: per-call timeout and bounded idle pool per host.
pub fn build_client(config: &ServicesConfig) -> Result<Client, ClientError> {
    Client::builder()
        .timeout(config.request_timeout())
        .pool_max_idle_per_host(config.max_conns_per_host)
        .build()
        .map_err(|e| ClientError::connectivity("gateway", format!("Failed to create HTTP client: {}", e)))
}

/// HTTP endpoint of a single downstream service
#[derive(Clone)]
pub struct ServiceEndpoint {
    service: &'static str,
    base_url: Url,
    client: Client,
    permits: Arc<Semaphore>,
}

impl ServiceEndpoint {
    pub fn new(
        service: &'static str,
        base_url: &str,
        client: Client,
        max_in_flight: usize,
    ) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| ClientError::invalid_url(service, e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::invalid_url(service, "URL cannot carry a path"));
        }
        Ok(Self {
            service,
            base_url,
            client,
            permits: Arc::new(Semaphore::new(max_in_flight.max(1))),
        })
    }

    /// Append percent-encoded path segments to the base URL.
    /// A trailing `""` segment yields a trailing slash.
    pub fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub fn get(&self, segments: &[&str]) -> RequestBuilder {
        self.client.get(self.url(segments))
    }

    pub fn post(&self, segments: &[&str]) -> RequestBuilder {
        self.client.post(self.url(segments))
    }

    pub fn put(&self, segments: &[&str]) -> RequestBuilder {
        self.client.put(self.url(segments))
    }

    /// Send and read the full body, whatever the status.
    pub async fn send(&self, request: RequestBuilder) -> Result<RawResponse, ClientError> {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|_| ClientError::connectivity(self.service, "connection limiter closed"))?;

        let response = request
            .send()
            .await
            .map_err(|e| ClientError::from_reqwest(self.service, e))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ClientError::from_reqwest(self.service, e))?;

        debug!(service = self.service, status, "downstream response");
        Ok(RawResponse { status, body })
    }

    /// Send and require a 2xx status. Non-success becomes `ClientError::Backend`.
    pub async fn send_ok(&self, request: RequestBuilder) -> Result<RawResponse, ClientError> {
        let response = self.send(request).await?;
        if response.is_success() {
            Ok(response)
        } else {
            Err(ClientError::backend(
                self.service,
                response.status,
                response.body,
            ))
        }
    }

    /// Send, require 2xx and decode the JSON body.
    pub async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = self.send_ok(request).await?;
        self.decode(&response.body)
    }

    pub fn decode<T: DeserializeOwned>(&self, body: &str) -> Result<T, ClientError> {
        serde_json::from_str(body).map_err(|e| ClientError::decode(self.service, e.to_string()))
    }
}
