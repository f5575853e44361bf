//! API error envelope and pass-through responses
//!
//! - `ApiError`: workflow outcome rendered as an HTTP response
//! - `ErrorResponse`: `{code, message}` body for gateway-produced errors
//! - `relay`: downstream status and body forwarded verbatim

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::clients::RawResponse;
use crate::library::GatewayError;

/// Error body. `message` is what existing clients read.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "RESERVATIONS_OVER_LIMIT")]
    pub code: String,
    #[schema(example = "reservations over limit")]
    pub message: String,
}

#[derive(Debug)]
pub struct ApiError(pub GatewayError);

pub type ApiResult<T> = Result<T, ApiError>;

impl From<GatewayError> for ApiError {
    fn from(e: GatewayError) -> Self {
        ApiError(e)
    }
}

fn status_of(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_of(self.0.http_status());
        if status.is_server_error() {
            error!(code = self.0.code(), error = %self.0, "request failed");
        }

        match self.0 {
            GatewayError::Passthrough { body, .. } => {
                (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
            }
            err => (
                status,
                Json(ErrorResponse {
                    code: err.code().to_string(),
                    message: err.to_string(),
                }),
            )
                .into_response(),
        }
    }
}

/// Forward a downstream answer unchanged
pub fn relay(raw: RawResponse) -> Response {
    (
        status_of(raw.status),
        [(header::CONTENT_TYPE, "application/json")],
        raw.body,
    )
        .into_response()
}
