//! Downstream Client Errors
//!
//! Separates "could not talk to the service" from "the service said no".

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    /// Unreachable, connection reset or timed out
    #[error("{service} service unreachable: {reason}")]
    Connectivity {
        service: &'static str,
        reason: String,
    },

    /// Well-formed non-success response
    #[error("{service} service responded with status {status}")]
    Backend {
        service: &'static str,
        status: u16,
        body: String,
    },

    /// Misconfigured base URL, detected when the client is built
    #[error("invalid {service} service URL: {reason}")]
    InvalidUrl {
        service: &'static str,
        reason: String,
    },

    /// Request could not be built from the caller's input
    #[error("cannot build {service} service request: {reason}")]
    InvalidRequest {
        service: &'static str,
        reason: String,
    },

    /// Success status but a body that does not match the contract
    #[error("{service} service returned an unexpected body: {reason}")]
    Decode {
        service: &'static str,
        reason: String,
    },
}

impl ClientError {
    pub fn connectivity(service: &'static str, reason: impl Into<String>) -> Self {
        ClientError::Connectivity {
            service,
            reason: reason.into(),
        }
    }

    pub fn backend(service: &'static str, status: u16, body: impl Into<String>) -> Self {
        ClientError::Backend {
            service,
            status,
            body: body.into(),
        }
    }

    pub fn decode(service: &'static str, reason: impl Into<String>) -> Self {
        ClientError::Decode {
            service,
            reason: reason.into(),
        }
    }

    pub fn invalid_url(service: &'static str, reason: impl Into<String>) -> Self {
        ClientError::InvalidUrl {
            service,
            reason: reason.into(),
        }
    }

    pub fn service(&self) -> &'static str {
        match self {
            ClientError::Connectivity { service, .. }
            | ClientError::Backend { service, .. }
            | ClientError::InvalidUrl { service, .. }
            | ClientError::InvalidRequest { service, .. }
            | ClientError::Decode { service, .. } => service,
        }
    }

    #[inline]
    pub fn is_connectivity(&self) -> bool {
        matches!(self, ClientError::Connectivity { .. })
    }

    #[inline]
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Backend { status: 404, .. })
    }

    /// Backend status, if the service answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Backend { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Classify a transport-level reqwest failure
    pub fn from_reqwest(service: &'static str, e: reqwest::Error) -> Self {
        if e.is_decode() {
            ClientError::decode(service, e.to_string())
        } else if e.is_timeout() {
            ClientError::connectivity(service, format!("timed out: {}", e))
        } else {
            ClientError::connectivity(service, e.to_string())
        }
    }
}
