//! Request DTOs for pricing API endpoints.
//!
//! Amounts travel as decimal strings. Fields the form may leave blank are
//! optional and fall back to the form's own defaults.

use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use super::models::{
    BookingPricingInput, BusCapacity, BusStatus, HiringPricingInput, RateType, RouteFare, TripType,
};

/// Route fare supplied inline by the form
#[derive(Debug, Clone, Deserialize)]
pub struct RouteFareRequest {
    #[serde(with = "rust_decimal::serde::str")]
    pub base_fare: Decimal,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub distance_km: Option<Decimal>,
}

impl RouteFareRequest {
    pub fn to_fare(&self) -> RouteFare {
        RouteFare::new(self.base_fare).with_distance(self.distance_km.unwrap_or(Decimal::ZERO))
    }
}

/// Bus capacity supplied inline by the form
#[derive(Debug, Clone, Deserialize)]
pub struct BusCapacityRequest {
    pub capacity: i32,
    #[serde(default)]
    pub status: Option<BusStatus>,
}

impl BusCapacityRequest {
    pub fn to_capacity(&self) -> BusCapacity {
        BusCapacity {
            capacity: self.capacity,
            status: self.status.unwrap_or(BusStatus::Active),
        }
    }
}

/// Live booking fare preview from a form snapshot
#[derive(Debug, Clone, Deserialize)]
pub struct BookingFareRequest {
    #[serde(default)]
    pub route: Option<RouteFareRequest>,
    pub passenger_count: i32,
    #[serde(default)]
    pub booking_type: TripType,
}

impl BookingFareRequest {
    pub fn to_input(&self) -> BookingPricingInput {
        BookingPricingInput {
            route: self.route.as_ref().map(RouteFareRequest::to_fare),
            passenger_count: self.passenger_count,
            booking_type: self.booking_type,
        }
    }
}

/// Booking quote resolving the route from reference data
#[derive(Debug, Clone, Deserialize)]
pub struct BookingQuoteRequest {
    #[serde(default)]
    pub route_id: Option<Uuid>,
    pub passenger_count: i32,
    #[serde(default)]
    pub booking_type: TripType,
}

/// Hiring form fields other than the route and bus
#[derive(Debug, Clone, Deserialize)]
pub struct HiringTermsRequest {
    #[serde(default)]
    pub rate_type: RateType,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub base_rate: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub route_price_multiplier: Option<Decimal>,
    #[serde(default)]
    pub trip_type: TripType,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub driver_allowance: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub rate_units: Option<Decimal>,
}

impl HiringTermsRequest {
    /// Build calculator input around already-resolved reference data
    pub fn to_input(&self, route: Option<RouteFare>, bus: Option<BusCapacity>) -> HiringPricingInput {
        HiringPricingInput {
            rate_type: self.rate_type,
            base_rate: self.base_rate.unwrap_or(Decimal::ZERO),
            route,
            bus,
            route_price_multiplier: self.route_price_multiplier.unwrap_or(Decimal::ONE),
            trip_type: self.trip_type,
            driver_allowance: self.driver_allowance.unwrap_or(Decimal::ZERO),
            rate_units: self.rate_units,
        }
    }
}

/// Live hiring cost preview from a form snapshot
#[derive(Debug, Clone, Deserialize)]
pub struct HiringCostRequest {
    #[serde(default)]
    pub route: Option<RouteFareRequest>,
    #[serde(default)]
    pub bus: Option<BusCapacityRequest>,
    #[serde(flatten)]
    pub terms: HiringTermsRequest,
}

impl HiringCostRequest {
    pub fn to_input(&self) -> HiringPricingInput {
        self.terms.to_input(
            self.route.as_ref().map(RouteFareRequest::to_fare),
            self.bus.as_ref().map(BusCapacityRequest::to_capacity),
        )
    }
}

/// Hiring quote resolving route and bus from reference data
#[derive(Debug, Clone, Deserialize)]
pub struct HiringQuoteRequest {
    #[serde(default)]
    pub route_id: Option<Uuid>,
    #[serde(default)]
    pub bus_id: Option<Uuid>,
    #[serde(flatten)]
    pub terms: HiringTermsRequest,
}

/// Booking snapshot plus the total the form is about to submit
#[derive(Debug, Clone, Deserialize)]
pub struct ReconcileBookingRequest {
    #[serde(with = "rust_decimal::serde::str")]
    pub submitted_total: Decimal,
    #[serde(flatten)]
    pub snapshot: BookingFareRequest,
}

/// Hiring snapshot plus the total the form is about to submit
#[derive(Debug, Clone, Deserialize)]
pub struct ReconcileHiringRequest {
    #[serde(with = "rust_decimal::serde::str")]
    pub submitted_total: Decimal,
    #[serde(flatten)]
    pub snapshot: HiringCostRequest,
}

/// Request to summarize payments against a hiring
#[derive(Debug, Clone, Deserialize)]
pub struct HiringBalanceRequest {
    #[serde(with = "rust_decimal::serde::str")]
    pub total_cost: Decimal,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub total_paid: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_hiring_request_defaults() {
        let req: HiringCostRequest = serde_json::from_value(json!({
            "rate_type": "Fixed",
            "base_rate": "80000"
        }))
        .unwrap();
        let input = req.to_input();
        assert_eq!(input.rate_type, RateType::Fixed);
        assert_eq!(input.base_rate, dec!(80000));
        assert_eq!(input.route_price_multiplier, dec!(1));
        assert_eq!(input.driver_allowance, dec!(0));
        assert_eq!(input.trip_type, TripType::OneWay);
        assert!(input.route.is_none());
        assert!(input.bus.is_none());
    }

    #[test]
    fn test_hiring_request_inline_reference_data() {
        let req: HiringCostRequest = serde_json::from_value(json!({
            "route": { "base_fare": "200", "distance_km": "150" },
            "bus": { "capacity": 40, "status": "Out of Service" },
            "route_price_multiplier": "1.5",
            "trip_type": "Round-Trip",
            "driver_allowance": "5000"
        }))
        .unwrap();
        let input = req.to_input();
        assert_eq!(input.rate_type, RateType::RouteBased);
        assert_eq!(input.route.unwrap().distance_km, dec!(150));
        assert_eq!(input.bus.unwrap().status, BusStatus::OutOfService);
        assert_eq!(input.route_price_multiplier, dec!(1.5));
    }

    #[test]
    fn test_booking_request_without_route() {
        let req: BookingFareRequest =
            serde_json::from_value(json!({ "passenger_count": 2 })).unwrap();
        let input = req.to_input();
        assert!(input.route.is_none());
        assert_eq!(input.booking_type, TripType::OneWay);
    }

    #[test]
    fn test_reconcile_request_flattens_snapshot() {
        let req: ReconcileBookingRequest = serde_json::from_value(json!({
            "submitted_total": "15000.00",
            "route": { "base_fare": "5000" },
            "passenger_count": 3,
            "booking_type": "One-Way"
        }))
        .unwrap();
        assert_eq!(req.submitted_total, dec!(15000));
        assert_eq!(req.snapshot.passenger_count, 3);
    }
}
