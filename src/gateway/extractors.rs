//! Request extractors
//!
//! Reject malformed input before any handler (and so any downstream call) runs.

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use super::types::ApiError;
use crate::clients::reservation::USER_NAME_HEADER;
use crate::library::GatewayError;

/// Caller identity from the `X-User-Name` header, already verified upstream.
/// Names are UTF-8 and may carry non-ASCII bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserName(pub String);

impl<S> FromRequestParts<S> for UserName
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(USER_NAME_HEADER)
            .and_then(|v| std::str::from_utf8(v.as_bytes()).ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(|v| UserName(v.to_string()))
            .ok_or_else(|| {
                ApiError(GatewayError::Validation(format!(
                    "{} header is required",
                    USER_NAME_HEADER
                )))
            })
    }
}

/// JSON body that passed its `validator` rules
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| GatewayError::Validation(e.body_text()))?;
        value.validate().map_err(GatewayError::from)?;
        Ok(ValidatedJson(value))
    }
}
