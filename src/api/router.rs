//! Analysis API router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! Routes are nested under `/api/`.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::analysis::engine::AnalysisEngine;
use crate::api::endpoints;
use crate::api::types::ApiContext;

/// Build the analysis API router.
///
/// CORS is permissive: the server binds to loopback and serves local web
/// and mobile clients only.
pub fn api_router(engine: Arc<AnalysisEngine>) -> Router {
    let ctx = ApiContext::new(engine);

    let routes = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/analysis/query", post(endpoints::analysis::analyze))
        .route("/analysis/diseases", get(endpoints::registry::diseases))
        .route("/analysis/symptoms", get(endpoints::registry::symptoms))
        .with_state(ctx);

    Router::new().nest("/api", routes).layer(CorsLayer::permissive())
}
