//! API middleware components

pub mod admin_auth;
pub mod logging;
pub mod metrics;
pub mod security;

pub use admin_auth::{extract_api_key_from_headers, AdminApiKey, RequireAdmin};
pub use logging::{logging_middleware, make_request_span, redact_uri};
pub use metrics::metrics_middleware;
pub use security::security_headers_middleware;
