//! Response DTOs for pricing API endpoints.

use rust_decimal::Decimal;
use serde::Serialize;

use super::calculators::{round_currency, CURRENCY_PLACES};
use super::models::{
    BalanceSummary, BookingFare, HiringCost, IncompleteInput, PaymentStatus, Quote, RateType,
    Reconciliation,
};
use crate::config::PricingSettings;

/// Money value for JSON responses
#[derive(Debug, Clone, Serialize)]
pub struct MoneyResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub currency: String,
}

impl MoneyResponse {
    /// Always rendered at currency precision, e.g. `15000.00`
    pub fn new(amount: Decimal, currency: &str) -> Self {
        let mut amount = round_currency(amount);
        amount.rescale(CURRENCY_PLACES);
        Self {
            amount,
            currency: currency.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteStatus {
    Priced,
    Incomplete,
}

/// Why no total is shown yet
#[derive(Debug, Clone, Serialize)]
pub struct IncompleteResponse {
    pub reason: &'static str,
    pub message: String,
}

impl From<IncompleteInput> for IncompleteResponse {
    fn from(reason: IncompleteInput) -> Self {
        Self {
            reason: reason.code(),
            message: reason.to_string(),
        }
    }
}

/// A priced or incomplete quote
#[derive(Debug, Clone, Serialize)]
pub struct QuoteResponse<T> {
    pub status: QuoteStatus,
    #[serde(flatten)]
    pub priced: Option<T>,
    #[serde(flatten)]
    pub incomplete: Option<IncompleteResponse>,
}

impl<T> QuoteResponse<T> {
    fn from_quote<Q>(quote: &Quote<Q>, detail: impl FnOnce(&Q) -> T) -> Self {
        match quote {
            Quote::Priced(value) => Self {
                status: QuoteStatus::Priced,
                priced: Some(detail(value)),
                incomplete: None,
            },
            Quote::Incomplete(reason) => Self {
                status: QuoteStatus::Incomplete,
                priced: None,
                incomplete: Some((*reason).into()),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BookingFareDetail {
    pub total_fare: MoneyResponse,
    pub base_fare: MoneyResponse,
    pub passenger_count: i32,
    pub trip_multiplier: i32,
    pub breakdown: String,
}

pub type BookingFareResponse = QuoteResponse<BookingFareDetail>;

impl BookingFareResponse {
    pub fn from_booking(quote: &Quote<BookingFare>, settings: &PricingSettings) -> Self {
        Self::from_quote(quote, |fare| BookingFareDetail {
            total_fare: MoneyResponse::new(fare.total_fare, &settings.currency_code),
            base_fare: MoneyResponse::new(fare.base_fare, &settings.currency_code),
            passenger_count: fare.passenger_count,
            trip_multiplier: fare.trip_multiplier,
            breakdown: fare.breakdown(&settings.currency_symbol),
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HiringCostDetail {
    pub total_cost: MoneyResponse,
    pub base_component: MoneyResponse,
    pub driver_allowance: MoneyResponse,
    pub rate_type: RateType,
    pub trip_multiplier: i32,
    pub breakdown: String,
}

pub type HiringCostResponse = QuoteResponse<HiringCostDetail>;

impl HiringCostResponse {
    pub fn from_hiring(quote: &Quote<HiringCost>, settings: &PricingSettings) -> Self {
        Self::from_quote(quote, |cost| HiringCostDetail {
            total_cost: MoneyResponse::new(cost.total_cost, &settings.currency_code),
            base_component: MoneyResponse::new(cost.base_component, &settings.currency_code),
            driver_allowance: MoneyResponse::new(cost.driver_allowance, &settings.currency_code),
            rate_type: cost.rate_type,
            trip_multiplier: cost.trip_multiplier,
            breakdown: cost.breakdown(&settings.currency_symbol),
        })
    }
}

/// Response for submit-time reconciliation
#[derive(Debug, Serialize)]
pub struct ReconciliationResponse {
    pub matches: bool,
    pub submitted: MoneyResponse,
    pub authoritative: Option<MoneyResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incomplete: Option<IncompleteResponse>,
}

impl ReconciliationResponse {
    pub fn new(
        result: &Reconciliation,
        incomplete: Option<IncompleteInput>,
        settings: &PricingSettings,
    ) -> Self {
        Self {
            matches: result.matches,
            submitted: MoneyResponse::new(result.submitted, &settings.currency_code),
            authoritative: result
                .authoritative
                .map(|total| MoneyResponse::new(total, &settings.currency_code)),
            incomplete: incomplete.map(Into::into),
        }
    }
}

/// Response for hiring balance summary
#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    pub total_cost: MoneyResponse,
    pub total_paid: MoneyResponse,
    pub remaining_balance: MoneyResponse,
    pub payment_status: PaymentStatus,
}

impl BalanceResponse {
    pub fn new(summary: &BalanceSummary, settings: &PricingSettings) -> Self {
        let currency = settings.currency_code.as_str();
        Self {
            total_cost: MoneyResponse::new(summary.total_cost, currency),
            total_paid: MoneyResponse::new(summary.total_paid, currency),
            remaining_balance: MoneyResponse::new(summary.remaining_balance, currency),
            payment_status: summary.payment_status,
        }
    }
}

/// Generic pricing error response
#[derive(Debug, Serialize)]
pub struct PricingErrorResponse {
    pub error_type: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}
