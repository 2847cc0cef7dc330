//! Core pricing calculation functions.
//!
//! Pure functions for fare and hiring cost math - no database access.
//! Called synchronously on every form change to render a live price preview;
//! the backend recomputes and stores the authoritative total.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

use crate::pricing::models::{
    BalanceSummary, BookingFare, BookingPricingInput, HiringCost, HiringPricingInput,
    IncompleteInput, MeteredBasis, PaymentStatus, Quote, RateType, RateUnitPolicy, Reconciliation,
    RouteBasis,
};

/// Decimal places for every displayed amount
pub const CURRENCY_PLACES: u32 = 2;

/// Round to specified decimal places, halves rounding away from zero.
///
/// All amounts priced here are non-negative, so this is round-half-up.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use transit_pricing::pricing::round_money;
///
/// assert_eq!(round_money(dec!(2.5), 0), dec!(3));
/// assert_eq!(round_money(dec!(10.005), 2), dec!(10.01));
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero)
}

/// Round to currency precision (2 places, half-up)
pub fn round_currency(amount: Decimal) -> Decimal {
    round_money(amount, CURRENCY_PLACES)
}

/// True for amounts strictly above zero
pub fn is_positive_number(value: Decimal) -> bool {
    value > Decimal::ZERO
}

/// True for zero or any positive amount
pub fn is_non_negative_number(value: Decimal) -> bool {
    value >= Decimal::ZERO
}

/// Compute the total fare for a passenger booking.
///
/// `base_fare × passenger_count × (2 if round trip else 1)`, rounded to
/// currency precision. Without a route the quote is incomplete. A zero
/// passenger count prices at zero; the "at least one passenger" rule belongs
/// to the form. A product too large for `Decimal` is incomplete rather than
/// a panic.
pub fn compute_booking_fare(input: &BookingPricingInput) -> Quote<BookingFare> {
    let Some(route) = input.route else {
        return Quote::Incomplete(IncompleteInput::MissingRoute);
    };
    if !is_non_negative_number(route.base_fare) {
        return Quote::Incomplete(IncompleteInput::NegativeBaseFare);
    }
    if input.passenger_count < 0 {
        return Quote::Incomplete(IncompleteInput::NegativePassengerCount);
    }

    let trip_multiplier = input.booking_type.multiplier();
    let Some(total) = route
        .base_fare
        .checked_mul(Decimal::from(input.passenger_count))
        .and_then(|amount| amount.checked_mul(Decimal::from(trip_multiplier)))
    else {
        return Quote::Incomplete(IncompleteInput::AmountTooLarge);
    };

    Quote::Priced(BookingFare {
        base_fare: route.base_fare,
        passenger_count: input.passenger_count,
        trip_multiplier,
        total_fare: round_currency(total),
    })
}

/// Compute the total cost of a vehicle hiring under the flat rate-unit policy.
pub fn compute_hiring_cost(input: &HiringPricingInput) -> Quote<HiringCost> {
    compute_hiring_cost_with_policy(input, RateUnitPolicy::Flat)
}

/// Compute the total cost of a vehicle hiring.
///
/// `(base_component × trip_multiplier) + driver_allowance`, rounded to
/// currency precision, where the base component is:
/// - `RouteBased`: `route.base_fare × bus.capacity × route_price_multiplier`
/// - any other rate type: `base_rate`, or `base_rate × rate_units` for
///   per-day/hour/km rates when `policy` is `Metered`
///
/// A route-based hiring without both a route and a bus is incomplete and
/// never falls back to `base_rate`. Any intermediate amount that overflows
/// `Decimal` makes the quote incomplete.
pub fn compute_hiring_cost_with_policy(
    input: &HiringPricingInput,
    policy: RateUnitPolicy,
) -> Quote<HiringCost> {
    if !is_non_negative_number(input.driver_allowance) {
        return Quote::Incomplete(IncompleteInput::NegativeDriverAllowance);
    }

    let (base_component, route_basis, metered_basis) = match input.rate_type {
        RateType::RouteBased => {
            let Some(route) = input.route else {
                return Quote::Incomplete(IncompleteInput::MissingRoute);
            };
            let Some(bus) = input.bus else {
                return Quote::Incomplete(IncompleteInput::MissingBus);
            };
            if !is_non_negative_number(route.base_fare) {
                return Quote::Incomplete(IncompleteInput::NegativeBaseFare);
            }
            if bus.capacity <= 0 {
                return Quote::Incomplete(IncompleteInput::InvalidCapacity);
            }
            if !is_positive_number(input.route_price_multiplier) {
                return Quote::Incomplete(IncompleteInput::NonPositiveMultiplier);
            }

            let basis = RouteBasis {
                base_fare: route.base_fare,
                capacity: bus.capacity,
                multiplier: input.route_price_multiplier,
            };
            let Some(base) = basis
                .base_fare
                .checked_mul(Decimal::from(basis.capacity))
                .and_then(|amount| amount.checked_mul(basis.multiplier))
            else {
                return Quote::Incomplete(IncompleteInput::AmountTooLarge);
            };
            (base, Some(basis), None)
        }
        rate_type => {
            if !is_non_negative_number(input.base_rate) {
                return Quote::Incomplete(IncompleteInput::NegativeBaseRate);
            }
            if policy == RateUnitPolicy::Metered && rate_type.is_metered() {
                let Some(units) = input.rate_units else {
                    return Quote::Incomplete(IncompleteInput::MissingRateUnits);
                };
                if !is_non_negative_number(units) {
                    return Quote::Incomplete(IncompleteInput::NegativeRateUnits);
                }
                let basis = MeteredBasis {
                    rate: input.base_rate,
                    units,
                };
                let Some(base) = basis.rate.checked_mul(basis.units) else {
                    return Quote::Incomplete(IncompleteInput::AmountTooLarge);
                };
                (base, None, Some(basis))
            } else {
                (input.base_rate, None, None)
            }
        }
    };

    let trip_multiplier = input.trip_type.multiplier();
    let Some(total) = base_component
        .checked_mul(Decimal::from(trip_multiplier))
        .and_then(|amount| amount.checked_add(input.driver_allowance))
    else {
        return Quote::Incomplete(IncompleteInput::AmountTooLarge);
    };

    Quote::Priced(HiringCost {
        rate_type: input.rate_type,
        base_component,
        trip_multiplier,
        driver_allowance: input.driver_allowance,
        total_cost: round_currency(total),
        route_basis,
        metered_basis,
    })
}

/// Compare a submitted total against a fresh recomputation.
///
/// The submitted amount is rounded to currency precision first. An
/// incomplete quote never matches.
pub fn reconcile_total(submitted: Decimal, authoritative: Option<Decimal>) -> Reconciliation {
    let submitted = round_currency(submitted);
    let matches = authoritative.is_some_and(|total| total == submitted);
    Reconciliation {
        submitted,
        authoritative,
        matches,
    }
}

/// Summarize payments made against a hiring total.
///
/// Overpayment leaves a zero balance rather than a negative one.
pub fn settle_balance(total_cost: Decimal, total_paid: Decimal) -> BalanceSummary {
    let total_cost = round_currency(total_cost);
    let total_paid = round_currency(total_paid);
    let remaining_balance = (total_cost - total_paid).max(Decimal::ZERO);

    let payment_status = if total_paid <= Decimal::ZERO {
        PaymentStatus::Pending
    } else if remaining_balance > Decimal::ZERO {
        PaymentStatus::PartiallyPaid
    } else {
        PaymentStatus::Paid
    };

    BalanceSummary {
        total_cost,
        total_paid,
        remaining_balance,
        payment_status,
    }
}
