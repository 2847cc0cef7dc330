//! Route reference data

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::pricing::RouteFare;

/// Route from the backend's `routes` table
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Route {
    pub id: Uuid,
    pub route_code: String,
    pub name: String,
    pub source: String,
    pub destination: String,
    pub distance: Option<Decimal>,
    pub base_fare: Decimal,
    pub is_active: bool,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Route {
    /// Fare reference data for the calculators
    pub fn fare(&self) -> RouteFare {
        RouteFare::new(self.base_fare).with_distance(self.distance.unwrap_or(Decimal::ZERO))
    }
}
