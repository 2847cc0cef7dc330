//! Bus reference data

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::pricing::{BusCapacity, BusStatus, PricingError};

/// Bus from the backend's `buses` table
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Bus {
    pub id: Uuid,
    pub bus_number: String,
    pub bus_type: String,
    pub capacity: i32,
    pub status: String,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Bus {
    /// Capacity reference data for the calculators.
    ///
    /// Fails only when the stored status is not one the admin console offers.
    pub fn capacity(&self) -> Result<BusCapacity, PricingError> {
        let status = self
            .status
            .parse::<BusStatus>()
            .map_err(|e| PricingError::ConfigurationError {
                message: format!("Bus {} has an unrecognized status", self.bus_number),
                errors: vec![e],
            })?;

        Ok(BusCapacity {
            capacity: self.capacity,
            status,
        })
    }
}
