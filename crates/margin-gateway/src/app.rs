use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::config::GatewayConfig;
use crate::cors::build_cors_layer;
use crate::handlers::{create_share_handler, get_share_handler, health_handler, not_found_handler};
use crate::state::AppState;

pub struct App {}

impl App {
    pub fn router(state: AppState, config: &GatewayConfig) -> Router {
        let api = Router::new()
            .route("/share", post(create_share_handler))
            .route("/share/{code}", get(get_share_handler))
            .fallback(not_found_handler)
            .method_not_allowed_fallback(not_found_handler)
            // Applied last so unmatched `/api/*` responses carry CORS headers too.
            .layer(build_cors_layer(config));

        Router::new()
            .route("/health", get(health_handler))
            .nest("/api", api)
            .fallback(not_found_handler)
            .method_not_allowed_fallback(not_found_handler)
            .layer(DefaultBodyLimit::max(config.max_body_bytes))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}
