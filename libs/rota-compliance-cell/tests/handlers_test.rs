// libs/rota-compliance-cell/tests/handlers_test.rs

use std::sync::Arc;

use assert_matches::assert_matches;
use axum::extract::{Query, State};
use axum_extra::TypedHeader;
use headers::Authorization;
use serde_json::json;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

use rota_compliance_cell::handlers::{compliance_sweep, doctor_calendar};
use rota_compliance_cell::models::{DateRangeQuery, MonthQuery};
use shared_config::AppConfig;
use shared_models::error::AppError;

fn mock_config(mock_server: &MockServer) -> Arc<AppConfig> {
    Arc::new(AppConfig {
        supabase_url: mock_server.uri(),
        supabase_anon_key: "test-anon-key".to_string(),
        supabase_jwt_secret: "test-secret".to_string(),
    })
}

fn bearer() -> TypedHeader<Authorization<headers::authorization::Bearer>> {
    TypedHeader(Authorization::bearer("test-token").unwrap())
}

#[tokio::test]
async fn doctor_calendar_rejects_malformed_month() {
    let mock_server = MockServer::start().await;
    let config = mock_config(&mock_server);

    let result = doctor_calendar(
        State(config),
        bearer(),
        Query(MonthQuery {
            month: "november-2025".to_string(),
        }),
    )
    .await;

    assert_matches!(result, Err(AppError::BadRequest(_)));
}

#[tokio::test]
async fn doctor_calendar_returns_days_with_warnings() {
    let mock_server = MockServer::start().await;
    let config = mock_config(&mock_server);

    Mock::given(method("GET"))
        .and(path("/rest/v1/rota_slots"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vec![json!({
            "Appointment Date": "03-Nov-2025",
            "Session Holder": "SMITH, Jane (Dr)",
            "Slot Type": "Book on the Day",
            "Duration": 10,
            "Availability": "Available"
        })]))
        .mount(&mock_server)
        .await;

    let response = doctor_calendar(
        State(config),
        bearer(),
        Query(MonthQuery {
            month: "2025-11".to_string(),
        }),
    )
    .await
    .unwrap();

    let body = response.0;
    let days = body["days"].as_array().unwrap();
    assert_eq!(days.len(), 1);
    assert_eq!(days[0]["date"], "2025-11-03");
    assert_eq!(days[0]["aggregate"]["on_the_day_count"], 1);
    assert_eq!(body["excluded_rows"], 0);
}

#[tokio::test]
async fn compliance_sweep_rejects_reversed_range() {
    let mock_server = MockServer::start().await;
    let config = mock_config(&mock_server);

    let result = compliance_sweep(
        State(config),
        bearer(),
        Query(DateRangeQuery {
            from: "2025-11-30".to_string(),
            to: "2025-11-01".to_string(),
        }),
    )
    .await;

    assert_matches!(result, Err(AppError::BadRequest(_)));
}

#[tokio::test]
async fn compliance_sweep_flags_only_violating_slots() {
    let mock_server = MockServer::start().await;
    let config = mock_config(&mock_server);

    Mock::given(method("GET"))
        .and(path("/rest/v1/rota_slots"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vec![
            json!({
                "date": "2025-11-03",
                "clinician_name": "UNKNOWN",
                "slot_type": "Blood Clinic",
                "duration_minutes": 5,
                "availability": "Booked"
            }),
            json!({
                "date": "2025-11-03",
                "clinician_name": "MANSELL, Kelly (Miss)",
                "slot_type": "Blood Clinic",
                "duration_minutes": 15,
                "availability": "Booked"
            }),
        ]))
        .mount(&mock_server)
        .await;

    let response = compliance_sweep(
        State(config),
        bearer(),
        Query(DateRangeQuery {
            from: "2025-11-01".to_string(),
            to: "2025-11-30".to_string(),
        }),
    )
    .await
    .unwrap();

    let body = response.0;
    let flagged = body["flagged"].as_array().unwrap();
    assert_eq!(flagged.len(), 1);
    assert_eq!(flagged[0]["violations"].as_array().unwrap().len(), 2);
    assert_eq!(body["total_slots"], 2);
}
