//! Application router and shared state.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{HeaderValue, Method},
    routing::{get, post, put},
    Router,
};
use sqlx::PgPool;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware;
use crate::routes::{assessments, health, reports, share_links};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
}

/// Build the application router.
pub fn create_app(config: Config, pool: PgPool) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(config),
    };

    let cors = build_cors_layer(&state.config);
    let timeout = Duration::from_secs(state.config.server.request_timeout_secs);

    let api_v1 = Router::new()
        .route("/assessments", post(assessments::create_assessment))
        .route("/assessments/:id", get(assessments::get_assessment))
        .route("/assessments/:id/results", get(assessments::list_results))
        .route(
            "/assessments/:id/results/:control_id",
            put(assessments::update_result),
        )
        .route("/reports", post(reports::create_report))
        .route("/reports/:id", get(reports::get_report))
        .route(
            "/reports/:id/share",
            post(share_links::create_share_link).get(share_links::list_share_links),
        )
        // Resolution is public; deactivation authenticates inside the
        // handler. Both use :token so the segments share one router node.
        .route(
            "/reports/share/:token",
            get(share_links::resolve_share_link),
        )
        .route(
            "/reports/share/:token/deactivate",
            post(share_links::deactivate_share_link),
        );

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::ready))
        .nest("/api/v1", api_v1)
        .layer(axum::middleware::from_fn(middleware::trace_id))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(timeout))
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}

fn build_cors_layer(config: &Config) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    if config.security.cors_origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        layer.allow_origin(AllowOrigin::list(origins))
    }
}
