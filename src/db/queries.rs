//! Database queries for route and bus reference data
//!
//! The backend owns these tables; this service only reads them.

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{Bus, Route};

/// Routes that can be priced. Single lookups and the cache warmer share this
/// filter, so a deactivated route is unknown whether or not it was cached.
const ACTIVE_ROUTES: &str = r#"
        SELECT
            id,
            route_code,
            name,
            source,
            destination,
            distance,
            base_fare,
            is_active,
            deleted_at
        FROM routes
        WHERE is_active = TRUE
          AND deleted_at IS NULL
"#;

fn route_by_id_sql() -> String {
    format!("{ACTIVE_ROUTES}  AND id = $1")
}

fn active_routes_sql() -> String {
    format!("{ACTIVE_ROUTES}ORDER BY route_code")
}

/// Get an active route by id
pub async fn get_route(pool: &PgPool, route_id: Uuid) -> Result<Option<Route>> {
    let sql = route_by_id_sql();
    let route = sqlx::query_as::<_, Route>(&sql)
        .bind(route_id)
        .fetch_optional(pool)
        .await?;

    Ok(route)
}

/// Get all active routes
pub async fn list_active_routes(pool: &PgPool) -> Result<Vec<Route>> {
    let sql = active_routes_sql();
    let routes = sqlx::query_as::<_, Route>(&sql).fetch_all(pool).await?;

    Ok(routes)
}

/// Get a bus by id, excluding soft-deleted rows
pub async fn get_bus(pool: &PgPool, bus_id: Uuid) -> Result<Option<Bus>> {
    let bus = sqlx::query_as::<_, Bus>(
        r#"
        SELECT
            id,
            bus_number,
            type AS bus_type,
            capacity,
            status,
            deleted_at
        FROM buses
        WHERE id = $1
          AND deleted_at IS NULL
        "#,
    )
    .bind(bus_id)
    .fetch_optional(pool)
    .await?;

    Ok(bus)
}

/// Get every bus that has not been removed from the fleet
pub async fn list_buses(pool: &PgPool) -> Result<Vec<Bus>> {
    let buses = sqlx::query_as::<_, Bus>(
        r#"
        SELECT
            id,
            bus_number,
            type AS bus_type,
            capacity,
            status,
            deleted_at
        FROM buses
        WHERE deleted_at IS NULL
        ORDER BY bus_number
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(buses)
}
