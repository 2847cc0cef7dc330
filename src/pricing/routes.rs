//! Pricing API route handlers

use axum::{extract::State, routing::post, Json, Router};
use rust_decimal::Decimal;

use crate::error::{AppError, Result};
use crate::AppState;

use super::calculators::{
    compute_booking_fare, compute_hiring_cost_with_policy, is_non_negative_number,
    reconcile_total, settle_balance,
};
use super::requests::{
    BookingFareRequest, BookingQuoteRequest, HiringBalanceRequest, HiringCostRequest,
    HiringQuoteRequest, ReconcileBookingRequest, ReconcileHiringRequest,
};
use super::responses::{
    BalanceResponse, BookingFareResponse, HiringCostResponse, ReconciliationResponse,
};
use super::services;

/// Pricing routes, mounted under `/api/pricing`
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/booking-fare", post(booking_fare))
        .route("/hiring-cost", post(hiring_cost))
        .route("/bookings/quote", post(quote_booking))
        .route("/hirings/quote", post(quote_hiring))
        .route("/bookings/reconcile", post(reconcile_booking))
        .route("/hirings/reconcile", post(reconcile_hiring))
        .route("/hirings/balance", post(hiring_balance))
}

/// Live booking fare preview from an inline form snapshot
async fn booking_fare(
    State(state): State<AppState>,
    Json(request): Json<BookingFareRequest>,
) -> Json<BookingFareResponse> {
    let quote = compute_booking_fare(&request.to_input());
    Json(BookingFareResponse::from_booking(&quote, &state.settings))
}

/// Live hiring cost preview from an inline form snapshot
async fn hiring_cost(
    State(state): State<AppState>,
    Json(request): Json<HiringCostRequest>,
) -> Json<HiringCostResponse> {
    let quote =
        compute_hiring_cost_with_policy(&request.to_input(), state.settings.rate_unit_policy);
    Json(HiringCostResponse::from_hiring(&quote, &state.settings))
}

async fn quote_booking(
    State(state): State<AppState>,
    Json(request): Json<BookingQuoteRequest>,
) -> Result<Json<BookingFareResponse>> {
    let quote = services::quote_booking(&state.db, &state.cache, &request).await?;
    Ok(Json(BookingFareResponse::from_booking(&quote, &state.settings)))
}

async fn quote_hiring(
    State(state): State<AppState>,
    Json(request): Json<HiringQuoteRequest>,
) -> Result<Json<HiringCostResponse>> {
    let quote = services::quote_hiring(
        &state.db,
        &state.cache,
        state.settings.rate_unit_policy,
        &request,
    )
    .await?;
    Ok(Json(HiringCostResponse::from_hiring(&quote, &state.settings)))
}

/// Recompute a booking total from the submitted snapshot
async fn reconcile_booking(
    State(state): State<AppState>,
    Json(request): Json<ReconcileBookingRequest>,
) -> Json<ReconciliationResponse> {
    let quote = compute_booking_fare(&request.snapshot.to_input());
    let result = reconcile_total(
        request.submitted_total,
        quote.priced().map(|fare| fare.total_fare),
    );
    if !result.matches {
        tracing::info!(
            submitted = %result.submitted,
            authoritative = ?result.authoritative,
            "Submitted booking total differs from recomputed fare"
        );
    }
    Json(ReconciliationResponse::new(
        &result,
        quote.incomplete_reason(),
        &state.settings,
    ))
}

/// Recompute a hiring total from the submitted snapshot
async fn reconcile_hiring(
    State(state): State<AppState>,
    Json(request): Json<ReconcileHiringRequest>,
) -> Json<ReconciliationResponse> {
    let quote = compute_hiring_cost_with_policy(
        &request.snapshot.to_input(),
        state.settings.rate_unit_policy,
    );
    let result = reconcile_total(
        request.submitted_total,
        quote.priced().map(|cost| cost.total_cost),
    );
    if !result.matches {
        tracing::info!(
            submitted = %result.submitted,
            authoritative = ?result.authoritative,
            "Submitted hiring total differs from recomputed cost"
        );
    }
    Json(ReconciliationResponse::new(
        &result,
        quote.incomplete_reason(),
        &state.settings,
    ))
}

async fn hiring_balance(
    State(state): State<AppState>,
    Json(request): Json<HiringBalanceRequest>,
) -> Result<Json<BalanceResponse>> {
    let total_paid = request.total_paid.unwrap_or(Decimal::ZERO);
    if !is_non_negative_number(request.total_cost) {
        return Err(AppError::Validation("total_cost cannot be negative".to_string()));
    }
    if !is_non_negative_number(total_paid) {
        return Err(AppError::Validation("total_paid cannot be negative".to_string()));
    }

    let summary = settle_balance(request.total_cost, total_paid);
    Ok(Json(BalanceResponse::new(&summary, &state.settings)))
}
