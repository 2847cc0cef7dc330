//! Pricing engine module for bookings and hirings.
//!
//! Provides the live fare and hiring cost calculations the admin console
//! shows while a booking or hiring form is being edited. The backend
//! recomputes and stores the authoritative total on submit.

pub mod calculators;
pub mod models;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod services;

// Re-export commonly used items
pub use calculators::{
    compute_booking_fare, compute_hiring_cost, compute_hiring_cost_with_policy,
    is_non_negative_number, is_positive_number, reconcile_total, round_currency, round_money,
    settle_balance,
};
pub use models::{
    BalanceSummary, BookingFare, BookingPricingInput, BusCapacity, BusStatus, HiringCost,
    HiringPricingInput, IncompleteInput, PaymentStatus, Quote, RateType, RateUnitPolicy,
    Reconciliation, RouteFare, TripType,
};
pub use routes::router;
pub use services::PricingError;
