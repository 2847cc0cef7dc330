//! Pricing service functions with database access.
//!
//! These resolve route and bus ids to reference data through the cache and
//! database, then hand the resolved snapshot to the pure calculators.

use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::cache::ReferenceCache;
use crate::db::queries;
use crate::models::{Bus, Route};

use super::calculators::{compute_booking_fare, compute_hiring_cost_with_policy};
use super::models::{
    BookingFare, BookingPricingInput, BusCapacity, HiringCost, Quote, RateType, RateUnitPolicy,
    RouteFare,
};
use super::requests::{BookingQuoteRequest, HiringQuoteRequest};

/// Pricing service error types
#[derive(Debug, Clone)]
pub enum PricingError {
    UnknownRoute {
        route_id: String,
    },
    UnknownBus {
        bus_id: String,
    },
    ReferenceLookup {
        message: String,
    },
    ConfigurationError {
        message: String,
        errors: Vec<String>,
    },
}

impl std::fmt::Display for PricingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PricingError::UnknownRoute { route_id } => {
                write!(f, "No route found with id {}", route_id)
            }
            PricingError::UnknownBus { bus_id } => {
                write!(f, "No bus found with id {}", bus_id)
            }
            PricingError::ReferenceLookup { message } => {
                write!(f, "Reference data lookup failed: {}", message)
            }
            PricingError::ConfigurationError { message, .. } => {
                write!(f, "Configuration error: {}", message)
            }
        }
    }
}

impl std::error::Error for PricingError {}

/// Resolve a route id to its fare, cache first.
pub async fn resolve_route(
    pool: &PgPool,
    cache: &ReferenceCache,
    route_id: Uuid,
) -> Result<RouteFare, PricingError> {
    if let Some(cached) = cache.routes.get(&route_id).await {
        tracing::debug!("Cache HIT for route: {}", route_id);
        return Ok(cached.fare());
    }

    tracing::debug!("Cache MISS for route: {}", route_id);
    let route: Route = queries::get_route(pool, route_id)
        .await
        .map_err(|e| PricingError::ReferenceLookup {
            message: e.to_string(),
        })?
        .ok_or_else(|| PricingError::UnknownRoute {
            route_id: route_id.to_string(),
        })?;

    let fare = route.fare();
    cache.routes.insert(route_id, Arc::new(route)).await;
    Ok(fare)
}

/// Resolve a bus id to its capacity, cache first.
pub async fn resolve_bus(
    pool: &PgPool,
    cache: &ReferenceCache,
    bus_id: Uuid,
) -> Result<BusCapacity, PricingError> {
    if let Some(cached) = cache.buses.get(&bus_id).await {
        tracing::debug!("Cache HIT for bus: {}", bus_id);
        return cached.capacity();
    }

    tracing::debug!("Cache MISS for bus: {}", bus_id);
    let bus: Bus = queries::get_bus(pool, bus_id)
        .await
        .map_err(|e| PricingError::ReferenceLookup {
            message: e.to_string(),
        })?
        .ok_or_else(|| PricingError::UnknownBus {
            bus_id: bus_id.to_string(),
        })?;

    let capacity = bus.capacity()?;
    cache.buses.insert(bus_id, Arc::new(bus)).await;
    Ok(capacity)
}

/// Price a booking whose route is given by id.
///
/// No route id yet is the normal "nothing selected" state and yields an
/// incomplete quote; an id that does not resolve is an error.
pub async fn quote_booking(
    pool: &PgPool,
    cache: &ReferenceCache,
    request: &BookingQuoteRequest,
) -> Result<Quote<BookingFare>, PricingError> {
    let route = match request.route_id {
        Some(id) => Some(resolve_route(pool, cache, id).await?),
        None => None,
    };

    Ok(compute_booking_fare(&BookingPricingInput {
        route,
        passenger_count: request.passenger_count,
        booking_type: request.booking_type,
    }))
}

/// Price a hiring whose route and bus are given by id.
///
/// Route and bus are only looked up for route-based hirings; other rate
/// types never read them.
pub async fn quote_hiring(
    pool: &PgPool,
    cache: &ReferenceCache,
    policy: RateUnitPolicy,
    request: &HiringQuoteRequest,
) -> Result<Quote<HiringCost>, PricingError> {
    let (route, bus) = if request.terms.rate_type == RateType::RouteBased {
        let route = match request.route_id {
            Some(id) => Some(resolve_route(pool, cache, id).await?),
            None => None,
        };
        let bus = match request.bus_id {
            Some(id) => Some(resolve_bus(pool, cache, id).await?),
            None => None,
        };
        (route, bus)
    } else {
        (None, None)
    };

    let input = request.terms.to_input(route, bus);
    Ok(compute_hiring_cost_with_policy(&input, policy))
}
