//! Request logging with redaction
//!
//! Upload tokens travel in the query string, so the logged URI has its
//! `token` parameter replaced before it reaches any log line.

use std::time::Instant;

use axum::{
    body::Body,
    extract::MatchedPath,
    http::{Request, Uri},
    middleware::Next,
    response::Response,
};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug_span, info, Span};

const REDACTED: &str = "[REDACTED]";

static TOKEN_PARAM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(^|&)(token)=[^&]*").expect("valid token regex"));

/// Logs each request and its completion.
/// `TraceLayer` owns the span, so no span is created here.
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let uri = redact_uri(request.uri());
    let path = extract_path(&request);
    let request_id = extract_request_id(&request);
    let headers_log = redact_headers(&request);

    info!(
        method = %method,
        path = %path,
        uri = %uri,
        request_id = %request_id,
        headers = %headers_log,
        "Incoming request"
    );

    let response = next.run(request).await;

    info!(
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        duration_ms = start.elapsed().as_millis() as u64,
        request_id = %request_id,
        "Request completed"
    );

    response
}

/// Span for `TraceLayer`; same fields as the default span but with the
/// `token` query value hidden
pub fn make_request_span(request: &Request<Body>) -> Span {
    debug_span!(
        "request",
        method = %request.method(),
        uri = %redact_uri(request.uri()),
        version = ?request.version(),
    )
}

fn extract_path(request: &Request<Body>) -> String {
    request
        .extensions()
        .get::<MatchedPath>()
        .map(|mp| mp.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string())
}

fn extract_request_id(request: &Request<Body>) -> String {
    request
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Path plus query with the `token` value hidden
pub fn redact_uri(uri: &Uri) -> String {
    match uri.query() {
        Some(query) => format!("{}?{}", uri.path(), redact_query(query)),
        None => uri.path().to_string(),
    }
}

fn redact_query(query: &str) -> String {
    TOKEN_PARAM
        .replace_all(query, format!("${{1}}${{2}}={}", REDACTED).as_str())
        .into_owned()
}

fn redact_headers(request: &Request<Body>) -> String {
    request
        .headers()
        .iter()
        .filter(|(name, _)| should_log_header(name.as_str()))
        .map(|(name, value)| {
            let value = if is_sensitive_header(name.as_str()) {
                REDACTED
            } else {
                value.to_str().unwrap_or("[invalid]")
            };
            format!("{}={}", name.as_str(), value)
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn is_sensitive_header(name: &str) -> bool {
    matches!(
        name,
        "authorization" | "x-api-key" | "cookie" | "set-cookie" | "proxy-authorization"
    )
}

fn should_log_header(name: &str) -> bool {
    matches!(
        name,
        "content-type"
            | "content-length"
            | "user-agent"
            | "x-request-id"
            | "x-forwarded-for"
            | "authorization"
            | "x-api-key"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_uri_hides_token() {
        let uri: Uri = "/api/vault-upload?token=abc.def".parse().unwrap();
        assert_eq!(redact_uri(&uri), "/api/vault-upload?token=[REDACTED]");
    }

    #[test]
    fn test_redact_uri_keeps_other_params() {
        let uri: Uri = "/upload?lang=en&token=abc.def&x=1".parse().unwrap();
        assert_eq!(redact_uri(&uri), "/upload?lang=en&token=[REDACTED]&x=1");
    }

    #[test]
    fn test_redact_uri_leaves_similar_names() {
        let uri: Uri = "/upload?mytoken=keep".parse().unwrap();
        assert_eq!(redact_uri(&uri), "/upload?mytoken=keep");
    }

    #[test]
    fn test_redact_uri_without_query() {
        let uri: Uri = "/health".parse().unwrap();
        assert_eq!(redact_uri(&uri), "/health");
    }

    #[test]
    fn test_sensitive_headers() {
        assert!(is_sensitive_header("authorization"));
        assert!(is_sensitive_header("x-api-key"));
        assert!(!is_sensitive_header("content-type"));
        assert!(!should_log_header("etag"));
    }

    #[test]
    fn test_redact_headers() {
        let request = Request::builder()
            .header("authorization", "Bearer admin-key")
            .header("content-type", "application/json")
            .body(Body::empty())
            .unwrap();

        let logged = redact_headers(&request);
        assert!(logged.contains("authorization=[REDACTED]"));
        assert!(logged.contains("content-type=application/json"));
        assert!(!logged.contains("admin-key"));
    }
}
