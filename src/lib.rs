//! Fare and hiring cost pricing for the bus transit admin console.
//!
//! The [`pricing`] module holds the pure calculators; the rest of the crate
//! wraps them in an axum service that resolves route and bus reference data
//! from the backend database.

pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod pricing;
pub mod routes;

use axum::Router;
use sqlx::PgPool;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::cache::ReferenceCache;
use crate::config::PricingSettings;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub cache: ReferenceCache,
    pub settings: PricingSettings,
}

impl AppState {
    pub fn new(db: PgPool, settings: PricingSettings) -> Self {
        Self {
            db,
            cache: ReferenceCache::new(),
            settings,
        }
    }
}

/// Build the application router
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::router())
        .nest("/api/pricing", pricing::router())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
