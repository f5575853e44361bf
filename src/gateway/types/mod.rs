//! Gateway types module
//!
//! ## Output Types
//! - [`ApiError`]: workflow error rendered as an HTTP response
//! - [`ErrorResponse`]: JSON error body
//! - [`relay`]: verbatim pass-through of a downstream response

pub mod response;

pub use response::{ApiError, ApiResult, ErrorResponse, relay};
