//! Gateway Error Types
//!
//! Outcomes of the composite workflows, as seen by the HTTP caller.

use thiserror::Error;

use crate::clients::ClientError;

/// Message the original clients key on for an unreachable rating service
pub const BONUS_UNAVAILABLE_MESSAGE: &str = "Bonus Service unavailable";
pub const OVER_LIMIT_MESSAGE: &str = "reservations over limit";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    // === Caller Errors ===
    #[error("{0}")]
    Validation(String),

    // === Business Rejection ===
    #[error("reservations over limit")]
    LimitExceeded,

    // === Downstream Outcomes ===
    #[error("{0} not found")]
    NotFound(String),

    #[error("Bonus Service unavailable")]
    BonusServiceUnavailable,

    /// Downstream non-success relayed verbatim
    #[error("{service} service responded with status {status}")]
    Passthrough {
        service: &'static str,
        status: u16,
        body: String,
    },

    // === System Errors ===
    #[error("Internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    pub fn code(&self) -> &'static str {
        match self {
            GatewayError::Validation(_) => "VALIDATION_ERROR",
            GatewayError::LimitExceeded => "RESERVATIONS_OVER_LIMIT",
            GatewayError::NotFound(_) => "NOT_FOUND",
            GatewayError::BonusServiceUnavailable => "BONUS_SERVICE_UNAVAILABLE",
            GatewayError::Passthrough { .. } => "BACKEND_ERROR",
            GatewayError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn http_status(&self) -> u16 {
        match self {
            GatewayError::Validation(_) | GatewayError::LimitExceeded => 400,
            GatewayError::NotFound(_) => 404,
            GatewayError::BonusServiceUnavailable => 503,
            GatewayError::Passthrough { status, .. } => *status,
            GatewayError::Internal(_) => 500,
        }
    }

    /// Rating-service failures surface as 503, except well-formed rejections
    /// which keep the generic mapping.
    pub fn from_rating(e: ClientError) -> Self {
        if e.is_connectivity() {
            GatewayError::BonusServiceUnavailable
        } else {
            GatewayError::from(e)
        }
    }
}

impl From<ClientError> for GatewayError {
    fn from(e: ClientError) -> Self {
        match e {
            ClientError::Backend {
                service,
                status,
                body,
            } => {
                if body.trim().is_empty() {
                    if status == 404 {
                        GatewayError::NotFound(service.to_string())
                    } else {
                        GatewayError::Internal(format!(
                            "{} service responded with status {}",
                            service, status
                        ))
                    }
                } else {
                    GatewayError::Passthrough {
                        service,
                        status,
                        body,
                    }
                }
            }
            other => GatewayError::Internal(other.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for GatewayError {
    fn from(e: validator::ValidationErrors) -> Self {
        GatewayError::Validation(e.to_string())
    }
}
