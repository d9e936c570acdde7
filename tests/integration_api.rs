//! Integration tests for the HTTP query API.

#![cfg(feature = "api")]

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use rust_decimal_macros::dec;
use tower::util::ServiceExt;

use energy_savings::api::{AppState, router};
use energy_savings::catalog::Catalog;

fn builtin_state() -> Arc<AppState> {
    Arc::new(AppState {
        catalog: Catalog::builtin(),
        max_consumption_kwh: dec!(1000000000),
    })
}

async fn get_json(state: Arc<AppState>, uri: &str) -> (StatusCode, serde_json::Value) {
    let app = router(state, true);
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

#[tokio::test]
async fn states_endpoint_exposes_tariffs() {
    let (status, json) = get_json(builtin_state(), "/states").await;
    assert_eq!(status, StatusCode::OK);

    let states = json.as_array().unwrap();
    assert_eq!(states.len(), 8);
    for s in states {
        assert!(s.get("code").is_some());
        assert!(s.get("name").is_some());
        assert!(s.get("base_tariff_per_kwh").is_some());
    }
}

#[tokio::test]
async fn simulation_full_structure() {
    let (status, json) =
        get_json(builtin_state(), "/simulate?state=SP&consumption_kwh=30000").await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(json["state"]["code"], "SP");
    assert_eq!(json["state"]["name"], "São Paulo");
    assert_eq!(json["consumption_kwh"], "30000");
    assert_eq!(json["current_monthly_cost"], "27600.00");
    assert_eq!(json["current_annual_cost"], "331200.00");
    assert_eq!(json["total_suppliers"], 3);

    let solutions = json["available_solutions"].as_array().unwrap();
    assert_eq!(solutions.len(), 2);
    assert_eq!(solutions[0]["solution_type"], "GD");
    assert_eq!(solutions[1]["solution_type"], "Mercado Livre");

    let gd_best = &solutions[0]["best_offer"];
    assert_eq!(gd_best["supplier"]["id"], "f1");
    assert_eq!(gd_best["solution_type"], "GD");
    assert_eq!(gd_best["current_monthly_cost"], "27600.00");
    assert_eq!(gd_best["cost_with_supplier"], "19500.00");
    assert_eq!(gd_best["monthly_savings"], "8100.00");
    assert_eq!(gd_best["percent_savings"], "29.35");
    assert_eq!(gd_best["annual_savings"], "97200.00");

    let gd_suppliers = solutions[0]["suppliers"].as_array().unwrap();
    assert_eq!(gd_suppliers.len(), 2);
    assert_eq!(gd_suppliers[1]["id"], "f3");
    assert_eq!(gd_suppliers[1]["cost_per_kwh_open_market"], "0.61");
}

#[tokio::test]
async fn every_money_field_has_two_fraction_digits() {
    let (status, json) =
        get_json(builtin_state(), "/simulate?state=RS&consumption_kwh=1234.567").await;
    assert_eq!(status, StatusCode::OK);

    let best = &json["available_solutions"][0]["best_offer"];
    for field in [
        "current_monthly_cost",
        "cost_with_supplier",
        "monthly_savings",
        "percent_savings",
        "annual_savings",
    ] {
        let value = best[field].as_str().unwrap();
        let fraction = value.split('.').nth(1).unwrap_or("");
        assert_eq!(fraction.len(), 2, "{field} = {value}");
    }
}

#[tokio::test]
async fn absent_results_map_to_404() {
    let catalog = common::fixture_catalog();
    let state = Arc::new(AppState {
        catalog,
        max_consumption_kwh: dec!(1000000),
    });

    for uri in [
        "/simulate?state=SP&consumption_kwh=0",
        "/simulate?state=SP&consumption_kwh=-5",
        "/simulate?state=XX&consumption_kwh=1000",
        "/simulate?state=AM&consumption_kwh=1000",
    ] {
        let (status, json) = get_json(Arc::clone(&state), uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert!(json.get("error").is_some(), "{uri}");
    }
}

#[tokio::test]
async fn overflowing_consumption_is_404_under_unbounded_config() {
    let state = Arc::new(AppState {
        catalog: Catalog::builtin(),
        max_consumption_kwh: rust_decimal::Decimal::MAX,
    });
    let (status, json) = get_json(
        state,
        "/simulate?state=SP&consumption_kwh=10000000000000000000000000000",
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json.get("error").is_some());
}

#[tokio::test]
async fn missing_parameters_return_400() {
    let (status, _) = get_json(builtin_state(), "/simulate?state=SP").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn health_and_root() {
    let (status, json) = get_json(builtin_state(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");

    let (status, json) = get_json(builtin_state(), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "online");
}

#[tokio::test]
async fn cors_preflight_allowed_when_permissive() {
    let app = router(builtin_state(), true);
    let req = Request::builder()
        .method(Method::OPTIONS)
        .uri("/simulate")
        .header("Origin", "http://localhost:5173")
        .header("Access-Control-Request-Method", "GET")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();

    assert!(resp.status().is_success());
    assert!(resp.headers().contains_key("access-control-allow-origin"));
}

#[tokio::test]
async fn no_cors_headers_when_disabled() {
    let app = router(builtin_state(), false);
    let req = Request::builder()
        .uri("/health")
        .header("Origin", "http://localhost:5173")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(!resp.headers().contains_key("access-control-allow-origin"));
}
