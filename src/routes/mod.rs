//! Service-level routes

pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/cache/invalidate", post(health::invalidate_cache))
        .route(
            "/api/cache/routes/:route_id/invalidate",
            post(health::invalidate_route),
        )
        .route("/api/cache/buses/:bus_id/invalidate", post(health::invalidate_bus))
}
