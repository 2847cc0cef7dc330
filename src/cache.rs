//! In-memory caching using moka
//!
//! Holds route and bus reference data so live price previews do not hit the
//! database on every keystroke. Fares and capacities change rarely, so the
//! cache is refreshed on a timer and invalidated on demand.

use moka::future::Cache;
use serde::Serialize;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tracing::{info, warn};
use uuid::Uuid;

use crate::db::queries;
use crate::models::{Bus, Route};

/// Reference data cache keyed by row id
#[derive(Clone)]
pub struct ReferenceCache {
    /// Routes (id -> Route)
    pub routes: Cache<Uuid, Arc<Route>>,
    /// Buses (id -> Bus)
    pub buses: Cache<Uuid, Arc<Bus>>,
}

impl ReferenceCache {
    /// Create a new cache instance with configured TTLs
    pub fn new() -> Self {
        Self {
            // Routes: 1000 entries, 30 min TTL, 10 min idle
            routes: Cache::builder()
                .max_capacity(1_000)
                .time_to_live(Duration::from_secs(30 * 60))
                .time_to_idle(Duration::from_secs(10 * 60))
                .build(),

            // Buses: 1000 entries, 30 min TTL, 10 min idle
            buses: Cache::builder()
                .max_capacity(1_000)
                .time_to_live(Duration::from_secs(30 * 60))
                .time_to_idle(Duration::from_secs(10 * 60))
                .build(),
        }
    }

    /// Get cache statistics for monitoring
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            routes_size: self.routes.entry_count(),
            buses_size: self.buses.entry_count(),
        }
    }

    /// Invalidate all caches
    pub fn invalidate_all(&self) {
        self.routes.invalidate_all();
        self.buses.invalidate_all();
        info!("All reference caches invalidated");
    }

    /// Invalidate a single route, e.g. after its fare is edited
    pub async fn invalidate_route(&self, route_id: Uuid) {
        self.routes.invalidate(&route_id).await;
        info!("Cache invalidated for route: {}", route_id);
    }

    /// Invalidate a single bus, e.g. after its capacity is edited
    pub async fn invalidate_bus(&self, bus_id: Uuid) {
        self.buses.invalidate(&bus_id).await;
        info!("Cache invalidated for bus: {}", bus_id);
    }
}

impl Default for ReferenceCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache statistics for monitoring endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub routes_size: u64,
    pub buses_size: u64,
}

/// Start background cache warmer
///
/// Warms the cache on startup and refreshes every `refresh` interval.
pub async fn start_cache_warmer(cache: ReferenceCache, db: PgPool, refresh: Duration) {
    let mut interval = interval(refresh);
    loop {
        // First tick completes immediately, so this also performs the initial warm-up
        interval.tick().await;
        warm_cache(&cache, &db).await;
    }
}

/// Load every active route and bus into the cache
pub async fn warm_cache(cache: &ReferenceCache, db: &PgPool) {
    info!("Starting reference cache warm-up...");

    match queries::list_active_routes(db).await {
        Ok(routes) => {
            for route in routes {
                cache.routes.insert(route.id, Arc::new(route)).await;
            }
        }
        Err(e) => warn!("Failed to warm route cache: {}", e),
    }

    match queries::list_buses(db).await {
        Ok(buses) => {
            for bus in buses {
                cache.buses.insert(bus.id, Arc::new(bus)).await;
            }
        }
        Err(e) => warn!("Failed to warm bus cache: {}", e),
    }

    // Pending inserts are only reflected in entry_count after maintenance runs
    cache.routes.run_pending_tasks().await;
    cache.buses.run_pending_tasks().await;

    info!("Reference cache warm-up complete. Stats: {:?}", cache.stats());
}
