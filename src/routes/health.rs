//! Health and cache maintenance handlers

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::cache::CacheStats;
use crate::config::PricingSettings;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub healthy: bool,
    pub version: &'static str,
    pub pricing: PricingSettings,
    pub cache: CacheStats,
    /// Open connections in the pool; zero until the first lookup
    pub db_connections: u32,
}

/// Health check endpoint
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        healthy: true,
        version: env!("CARGO_PKG_VERSION"),
        pricing: state.settings.clone(),
        cache: state.cache.stats(),
        db_connections: state.db.size(),
    })
}

#[derive(Debug, Serialize)]
pub struct InvalidateResponse {
    pub invalidated: bool,
    pub cache: CacheStats,
}

/// Drop all cached routes and buses so the next lookup reads fresh fares
pub async fn invalidate_cache(State(state): State<AppState>) -> Json<InvalidateResponse> {
    state.cache.invalidate_all();
    state.cache.routes.run_pending_tasks().await;
    state.cache.buses.run_pending_tasks().await;
    Json(InvalidateResponse {
        invalidated: true,
        cache: state.cache.stats(),
    })
}

/// Drop one cached route, e.g. after the backend edits its fare
pub async fn invalidate_route(
    State(state): State<AppState>,
    Path(route_id): Path<Uuid>,
) -> Json<InvalidateResponse> {
    state.cache.invalidate_route(route_id).await;
    state.cache.routes.run_pending_tasks().await;
    Json(InvalidateResponse {
        invalidated: true,
        cache: state.cache.stats(),
    })
}

/// Drop one cached bus, e.g. after the backend edits its capacity
pub async fn invalidate_bus(
    State(state): State<AppState>,
    Path(bus_id): Path<Uuid>,
) -> Json<InvalidateResponse> {
    state.cache.invalidate_bus(bus_id).await;
    state.cache.buses.run_pending_tasks().await;
    Json(InvalidateResponse {
        invalidated: true,
        cache: state.cache.stats(),
    })
}
