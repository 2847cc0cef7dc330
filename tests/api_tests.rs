//! HTTP tests for the pricing endpoints that need no database.

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;
use tower::ServiceExt;
use uuid::Uuid;

use transit_pricing::config::PricingSettings;
use transit_pricing::pricing::RateUnitPolicy;
use transit_pricing::{app, AppState};

fn test_app(settings: PricingSettings) -> Router {
    // Nothing listens here, so any reference lookup fails fast
    let db = PgPoolOptions::new()
        .acquire_timeout(Duration::from_millis(500))
        .connect_lazy("postgres://localhost/transit_test")
        .unwrap();
    app(AppState::new(db, settings))
}

async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn booking_fare_one_way() {
    let (status, body) = post_json(
        test_app(PricingSettings::default()),
        "/api/pricing/booking-fare",
        json!({
            "route": { "base_fare": "5000" },
            "passenger_count": 3,
            "booking_type": "One-Way"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "priced");
    assert_eq!(body["total_fare"]["amount"], "15000.00");
    assert_eq!(body["total_fare"]["currency"], "NGN");
    assert_eq!(body["breakdown"], "₦5000 × 3 passengers");
}

#[tokio::test]
async fn booking_fare_round_trip() {
    let (_, body) = post_json(
        test_app(PricingSettings::default()),
        "/api/pricing/booking-fare",
        json!({
            "route": { "base_fare": "5000" },
            "passenger_count": 3,
            "booking_type": "Round-Trip"
        }),
    )
    .await;

    assert_eq!(body["total_fare"]["amount"], "30000.00");
    assert_eq!(body["trip_multiplier"], 2);
}

#[tokio::test]
async fn booking_fare_without_route_is_incomplete() {
    let (status, body) = post_json(
        test_app(PricingSettings::default()),
        "/api/pricing/booking-fare",
        json!({ "passenger_count": 1 }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "incomplete");
    assert_eq!(body["reason"], "missing_route");
    assert!(body.get("total_fare").is_none());
}

#[tokio::test]
async fn booking_fare_too_large_is_incomplete() {
    let (status, body) = post_json(
        test_app(PricingSettings::default()),
        "/api/pricing/booking-fare",
        json!({
            "route": { "base_fare": "50000000000000000000000000000" },
            "passenger_count": 3
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "incomplete");
    assert_eq!(body["reason"], "amount_too_large");
    assert!(body.get("total_fare").is_none());
}

#[tokio::test]
async fn booking_quote_unresolvable_route() {
    let (status, body) = post_json(
        test_app(PricingSettings::default()),
        "/api/pricing/bookings/quote",
        json!({
            "route_id": Uuid::new_v4(),
            "passenger_count": 2
        }),
    )
    .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error_type"], "reference_lookup_failed");
}

#[tokio::test]
async fn hiring_quote_unresolvable_reference() {
    let (status, body) = post_json(
        test_app(PricingSettings::default()),
        "/api/pricing/hirings/quote",
        json!({
            "rate_type": "Route-Based",
            "route_id": Uuid::new_v4(),
            "bus_id": Uuid::new_v4()
        }),
    )
    .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error_type"], "reference_lookup_failed");
}

#[tokio::test]
async fn hiring_quote_fixed_rate_skips_lookup() {
    let (status, body) = post_json(
        test_app(PricingSettings::default()),
        "/api/pricing/hirings/quote",
        json!({
            "rate_type": "Fixed",
            "base_rate": "80000",
            "route_id": Uuid::new_v4(),
            "bus_id": Uuid::new_v4()
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_cost"]["amount"], "80000.00");
}

#[tokio::test]
async fn hiring_cost_route_based() {
    let (status, body) = post_json(
        test_app(PricingSettings::default()),
        "/api/pricing/hiring-cost",
        json!({
            "rate_type": "Route-Based",
            "route": { "base_fare": "200" },
            "bus": { "capacity": 40 },
            "route_price_multiplier": "1.5",
            "trip_type": "One-Way",
            "driver_allowance": "5000"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "priced");
    assert_eq!(body["base_component"]["amount"], "12000.00");
    assert_eq!(body["total_cost"]["amount"], "17000.00");
    assert_eq!(
        body["breakdown"],
        "₦200 × 40 seats × 1.5 + ₦5000 (driver allowance)"
    );
}

#[tokio::test]
async fn hiring_cost_route_based_round_trip() {
    let (_, body) = post_json(
        test_app(PricingSettings::default()),
        "/api/pricing/hiring-cost",
        json!({
            "rate_type": "Route-Based",
            "route": { "base_fare": "200" },
            "bus": { "capacity": 40 },
            "route_price_multiplier": "1.5",
            "trip_type": "Round-Trip",
            "driver_allowance": "5000"
        }),
    )
    .await;

    assert_eq!(body["total_cost"]["amount"], "29000.00");
}

#[tokio::test]
async fn hiring_cost_fixed_round_trip() {
    let (_, body) = post_json(
        test_app(PricingSettings::default()),
        "/api/pricing/hiring-cost",
        json!({
            "rate_type": "Fixed",
            "base_rate": "80000",
            "trip_type": "Round-Trip"
        }),
    )
    .await;

    assert_eq!(body["status"], "priced");
    assert_eq!(body["total_cost"]["amount"], "160000.00");
    assert_eq!(body["rate_type"], "Fixed");
}

#[tokio::test]
async fn hiring_cost_without_bus_is_incomplete() {
    let (_, body) = post_json(
        test_app(PricingSettings::default()),
        "/api/pricing/hiring-cost",
        json!({
            "rate_type": "Route-Based",
            "route": { "base_fare": "200" },
            "base_rate": "80000"
        }),
    )
    .await;

    assert_eq!(body["status"], "incomplete");
    assert_eq!(body["reason"], "missing_bus");
    assert!(body.get("total_cost").is_none());
}

#[tokio::test]
async fn hiring_cost_per_day_is_flat_by_default() {
    let (_, body) = post_json(
        test_app(PricingSettings::default()),
        "/api/pricing/hiring-cost",
        json!({
            "rate_type": "Per Day",
            "base_rate": "30000",
            "rate_units": "3"
        }),
    )
    .await;

    assert_eq!(body["total_cost"]["amount"], "30000.00");
}

#[tokio::test]
async fn hiring_cost_per_day_metered_when_configured() {
    let settings = PricingSettings {
        rate_unit_policy: RateUnitPolicy::Metered,
        ..PricingSettings::default()
    };
    let (_, body) = post_json(
        test_app(settings),
        "/api/pricing/hiring-cost",
        json!({
            "rate_type": "Per Day",
            "base_rate": "30000",
            "rate_units": "3"
        }),
    )
    .await;

    assert_eq!(body["total_cost"]["amount"], "90000.00");
    assert_eq!(body["breakdown"], "₦30000 × 3 days");
}

#[tokio::test]
async fn reconcile_booking_detects_stale_total() {
    let (status, body) = post_json(
        test_app(PricingSettings::default()),
        "/api/pricing/bookings/reconcile",
        json!({
            "submitted_total": "10000",
            "route": { "base_fare": "5000" },
            "passenger_count": 3
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["matches"], false);
    assert_eq!(body["submitted"]["amount"], "10000.00");
    assert_eq!(body["authoritative"]["amount"], "15000.00");
}

#[tokio::test]
async fn reconcile_hiring_matching_total() {
    let (_, body) = post_json(
        test_app(PricingSettings::default()),
        "/api/pricing/hirings/reconcile",
        json!({
            "submitted_total": "17000.00",
            "rate_type": "Route-Based",
            "route": { "base_fare": "200" },
            "bus": { "capacity": 40 },
            "route_price_multiplier": "1.5",
            "driver_allowance": "5000"
        }),
    )
    .await;

    assert_eq!(body["matches"], true);
}

#[tokio::test]
async fn reconcile_incomplete_snapshot_never_matches() {
    let (_, body) = post_json(
        test_app(PricingSettings::default()),
        "/api/pricing/hirings/reconcile",
        json!({
            "submitted_total": "0",
            "rate_type": "Route-Based"
        }),
    )
    .await;

    assert_eq!(body["matches"], false);
    assert!(body["authoritative"].is_null());
    assert_eq!(body["incomplete"]["reason"], "missing_route");
}

#[tokio::test]
async fn hiring_balance_partially_paid() {
    let (status, body) = post_json(
        test_app(PricingSettings::default()),
        "/api/pricing/hirings/balance",
        json!({ "total_cost": "17000", "total_paid": "5000" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["remaining_balance"]["amount"], "12000.00");
    assert_eq!(body["payment_status"], "Partially Paid");
}

#[tokio::test]
async fn hiring_balance_rejects_negative_payment() {
    let (status, body) = post_json(
        test_app(PricingSettings::default()),
        "/api/pricing/hirings/balance",
        json!({ "total_cost": "17000", "total_paid": "-1" }),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error_type"], "validation_error");
}

#[tokio::test]
async fn health_reports_settings() {
    let response = test_app(PricingSettings::default())
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["healthy"], true);
    assert_eq!(body["pricing"]["currency_code"], "NGN");
    assert_eq!(body["pricing"]["rate_unit_policy"], "flat");
    assert_eq!(body["cache"]["routes_size"], 0);
}

#[tokio::test]
async fn invalidate_single_rows() {
    for kind in ["routes", "buses"] {
        let uri = format!("/api/cache/{}/{}/invalidate", kind, Uuid::new_v4());
        let (status, body) =
            post_json(test_app(PricingSettings::default()), &uri, json!({})).await;

        assert_eq!(status, StatusCode::OK, "{}", kind);
        assert_eq!(body["invalidated"], true);
    }
}

#[tokio::test]
async fn invalidate_single_bus_rejects_bad_id() {
    let (status, _) = post_json(
        test_app(PricingSettings::default()),
        "/api/cache/buses/not-a-uuid/invalidate",
        json!({}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}
