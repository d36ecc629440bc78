//! Shared request/response types for the HTTP API

pub mod error;
pub mod json;

pub use error::{ApiError, ApiErrorResponse, ApiErrorType};
pub use json::ValidatedJson;
