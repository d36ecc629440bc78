use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderName, Method},
    middleware,
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use super::admin;
use super::health;
use super::middleware::{
    logging_middleware, make_request_span, metrics_middleware, security_headers_middleware,
};
use super::state::AppState;
use super::upload;
use crate::infrastructure::observability::{create_metrics_router, PrometheusMetrics};

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Routes reachable with an upload link
fn create_upload_router(max_upload_bytes: usize) -> Router<AppState> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route(
            "/vault-upload",
            get(upload::check_link).post(upload::upload_file),
        )
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(cors)
}

/// Create the full router; `/metrics` is mounted when a recorder is given
pub fn create_router(state: AppState, metrics: Option<PrometheusMetrics>) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    let mut router = Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        .nest("/api", create_upload_router(state.max_upload_bytes))
        .nest("/admin", admin::create_admin_router())
        .with_state(state);

    if let Some(m) = metrics {
        router = router.merge(create_metrics_router(m));
    }

    router
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
}
