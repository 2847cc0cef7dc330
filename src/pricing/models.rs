//! Pricing inputs and results.
//!
//! Inputs are snapshots of the booking/hiring form at one instant. They are
//! built fresh for each calculation and never persisted.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Fare reference data for a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteFare {
    /// Fare per passenger for one direction of the route
    pub base_fare: Decimal,
    /// Informational only
    pub distance_km: Decimal,
}

impl RouteFare {
    pub fn new(base_fare: Decimal) -> Self {
        Self {
            base_fare,
            distance_km: Decimal::ZERO,
        }
    }

    pub fn with_distance(mut self, distance_km: Decimal) -> Self {
        self.distance_km = distance_km;
        self
    }
}

/// Operational status of a bus. Informational; pricing never gates on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BusStatus {
    Active,
    Maintenance,
    #[serde(rename = "Out of Service")]
    OutOfService,
    Reserved,
}

impl FromStr for BusStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Active" => Ok(BusStatus::Active),
            "Maintenance" => Ok(BusStatus::Maintenance),
            "Out of Service" => Ok(BusStatus::OutOfService),
            "Reserved" => Ok(BusStatus::Reserved),
            other => Err(format!("unknown bus status '{}'", other)),
        }
    }
}

/// Capacity reference data for a bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusCapacity {
    pub capacity: i32,
    pub status: BusStatus,
}

impl BusCapacity {
    pub fn new(capacity: i32) -> Self {
        Self {
            capacity,
            status: BusStatus::Active,
        }
    }
}

/// One-way or round trip. Round trip doubles the one-way price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TripType {
    #[default]
    #[serde(rename = "One-Way")]
    OneWay,
    #[serde(rename = "Round-Trip")]
    RoundTrip,
}

impl TripType {
    pub fn multiplier(&self) -> i32 {
        match self {
            TripType::OneWay => 1,
            TripType::RoundTrip => 2,
        }
    }
}

/// How a hiring is rated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RateType {
    #[default]
    #[serde(rename = "Route-Based")]
    RouteBased,
    Fixed,
    #[serde(rename = "Per Day")]
    PerDay,
    #[serde(rename = "Per Hour")]
    PerHour,
    #[serde(rename = "Per Kilometer")]
    PerKilometer,
}

impl RateType {
    /// Whether the rate is charged per day, hour or kilometre
    pub fn is_metered(&self) -> bool {
        matches!(
            self,
            RateType::PerDay | RateType::PerHour | RateType::PerKilometer
        )
    }

    fn unit_label(&self) -> Option<&'static str> {
        match self {
            RateType::PerDay => Some("days"),
            RateType::PerHour => Some("hours"),
            RateType::PerKilometer => Some("km"),
            RateType::RouteBased | RateType::Fixed => None,
        }
    }
}

/// Whether per-day, per-hour and per-kilometre rates scale by units.
///
/// `Flat` charges `base_rate` once for every non-route rate type.
/// `Metered` multiplies the metered rate types by the supplied unit count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateUnitPolicy {
    #[default]
    Flat,
    Metered,
}

impl FromStr for RateUnitPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "flat" => Ok(RateUnitPolicy::Flat),
            "metered" => Ok(RateUnitPolicy::Metered),
            other => Err(format!("expected 'flat' or 'metered', got '{}'", other)),
        }
    }
}

/// Booking form snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct BookingPricingInput {
    pub route: Option<RouteFare>,
    /// Number of passenger entries on the form
    pub passenger_count: i32,
    pub booking_type: TripType,
}

/// Hiring form snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct HiringPricingInput {
    pub rate_type: RateType,
    pub base_rate: Decimal,
    pub route: Option<RouteFare>,
    pub bus: Option<BusCapacity>,
    pub route_price_multiplier: Decimal,
    pub trip_type: TripType,
    pub driver_allowance: Decimal,
    /// Days, hours or kilometres; only read under `RateUnitPolicy::Metered`
    pub rate_units: Option<Decimal>,
}

impl Default for HiringPricingInput {
    fn default() -> Self {
        Self {
            rate_type: RateType::RouteBased,
            base_rate: Decimal::ZERO,
            route: None,
            bus: None,
            route_price_multiplier: Decimal::ONE,
            trip_type: TripType::OneWay,
            driver_allowance: Decimal::ZERO,
            rate_units: None,
        }
    }
}

/// Priced booking
#[derive(Debug, Clone, PartialEq)]
pub struct BookingFare {
    pub base_fare: Decimal,
    pub passenger_count: i32,
    pub trip_multiplier: i32,
    pub total_fare: Decimal,
}

impl BookingFare {
    /// Human-readable factors, e.g. `₦5000 × 3 passengers × 2 (round-trip)`
    pub fn breakdown(&self, symbol: &str) -> String {
        let noun = if self.passenger_count == 1 {
            "passenger"
        } else {
            "passengers"
        };
        let mut out = format!(
            "{}{} × {} {}",
            symbol,
            self.base_fare.normalize(),
            self.passenger_count,
            noun
        );
        if self.trip_multiplier == 2 {
            out.push_str(" × 2 (round-trip)");
        }
        out
    }
}

/// Factors behind a route-based hiring price
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteBasis {
    pub base_fare: Decimal,
    pub capacity: i32,
    pub multiplier: Decimal,
}

/// Factors behind a metered hiring price
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeteredBasis {
    pub rate: Decimal,
    pub units: Decimal,
}

/// Priced hiring
#[derive(Debug, Clone, PartialEq)]
pub struct HiringCost {
    pub rate_type: RateType,
    pub base_component: Decimal,
    pub trip_multiplier: i32,
    pub driver_allowance: Decimal,
    pub total_cost: Decimal,
    /// Present when the base came from route fare × capacity
    pub route_basis: Option<RouteBasis>,
    /// Present when a metered rate was scaled by units
    pub metered_basis: Option<MeteredBasis>,
}

impl HiringCost {
    /// Human-readable factors, e.g.
    /// `₦200 × 40 seats × 1.5 × 2 (round-trip) + ₦5000 (driver allowance)`
    pub fn breakdown(&self, symbol: &str) -> String {
        let mut out = match (&self.route_basis, &self.metered_basis) {
            (Some(basis), _) => format!(
                "{}{} × {} seats × {}",
                symbol,
                basis.base_fare.normalize(),
                basis.capacity,
                basis.multiplier.normalize()
            ),
            (None, Some(metered)) => format!(
                "{}{} × {} {}",
                symbol,
                metered.rate.normalize(),
                metered.units.normalize(),
                self.rate_type.unit_label().unwrap_or("units")
            ),
            (None, None) => format!("{}{}", symbol, self.base_component.normalize()),
        };
        if self.trip_multiplier == 2 {
            out.push_str(" × 2 (round-trip)");
        }
        if self.driver_allowance > Decimal::ZERO {
            out.push_str(&format!(
                " + {}{} (driver allowance)",
                symbol,
                self.driver_allowance.normalize()
            ));
        }
        out
    }
}

/// Why a quote could not be priced yet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncompleteInput {
    MissingRoute,
    MissingBus,
    NegativeBaseFare,
    NegativePassengerCount,
    InvalidCapacity,
    NegativeBaseRate,
    NonPositiveMultiplier,
    NegativeDriverAllowance,
    MissingRateUnits,
    NegativeRateUnits,
    /// The computed amount does not fit in a `Decimal`
    AmountTooLarge,
}

impl IncompleteInput {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            IncompleteInput::MissingRoute => "missing_route",
            IncompleteInput::MissingBus => "missing_bus",
            IncompleteInput::NegativeBaseFare => "negative_base_fare",
            IncompleteInput::NegativePassengerCount => "negative_passenger_count",
            IncompleteInput::InvalidCapacity => "invalid_capacity",
            IncompleteInput::NegativeBaseRate => "negative_base_rate",
            IncompleteInput::NonPositiveMultiplier => "non_positive_multiplier",
            IncompleteInput::NegativeDriverAllowance => "negative_driver_allowance",
            IncompleteInput::MissingRateUnits => "missing_rate_units",
            IncompleteInput::NegativeRateUnits => "negative_rate_units",
            IncompleteInput::AmountTooLarge => "amount_too_large",
        }
    }
}

impl fmt::Display for IncompleteInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            IncompleteInput::MissingRoute => "Select a route to calculate the price",
            IncompleteInput::MissingBus => "Select a bus to calculate the price",
            IncompleteInput::NegativeBaseFare => "Route base fare cannot be negative",
            IncompleteInput::NegativePassengerCount => "Passenger count cannot be negative",
            IncompleteInput::InvalidCapacity => "Bus capacity must be greater than zero",
            IncompleteInput::NegativeBaseRate => "Base rate cannot be negative",
            IncompleteInput::NonPositiveMultiplier => {
                "Route price multiplier must be greater than zero"
            }
            IncompleteInput::NegativeDriverAllowance => "Driver allowance cannot be negative",
            IncompleteInput::MissingRateUnits => "Enter the number of days, hours or kilometres",
            IncompleteInput::NegativeRateUnits => "Rate units cannot be negative",
            IncompleteInput::AmountTooLarge => "Amount is too large to price",
        };
        f.write_str(msg)
    }
}

/// Outcome of a price calculation.
///
/// `Incomplete` is a normal transient state of the form, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum Quote<T> {
    Priced(T),
    Incomplete(IncompleteInput),
}

impl<T> Quote<T> {
    pub fn is_priced(&self) -> bool {
        matches!(self, Quote::Priced(_))
    }

    pub fn priced(&self) -> Option<&T> {
        match self {
            Quote::Priced(value) => Some(value),
            Quote::Incomplete(_) => None,
        }
    }

    pub fn incomplete_reason(&self) -> Option<IncompleteInput> {
        match self {
            Quote::Priced(_) => None,
            Quote::Incomplete(reason) => Some(*reason),
        }
    }
}

/// Derived payment state of a hiring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PaymentStatus {
    Pending,
    #[serde(rename = "Partially Paid")]
    PartiallyPaid,
    Paid,
}

/// Paid and outstanding amounts for a hiring
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceSummary {
    pub total_cost: Decimal,
    pub total_paid: Decimal,
    pub remaining_balance: Decimal,
    pub payment_status: PaymentStatus,
}

/// Comparison of a submitted total against a fresh recomputation
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    pub submitted: Decimal,
    /// `None` when the snapshot is incomplete
    pub authoritative: Option<Decimal>,
    pub matches: bool,
}
