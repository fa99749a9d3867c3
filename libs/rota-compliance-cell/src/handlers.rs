use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use axum_extra::TypedHeader;
use chrono::Local;
use headers::{authorization::Bearer, Authorization};
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{AlternativesRequest, DateRangeQuery, MonthQuery};
use crate::services::doctor_rota::aggregate_doctor_month;
use crate::services::nurse_rota::aggregate_nurse_month;
use crate::services::warnings::{classify_doctor_day, classify_nurse_day, doctor_day_warnings};
use crate::services::{dates, rules, AlternativeSlotService, SlotFeedService};

const DEFAULT_HORIZON_DAYS: i64 = 28;

#[axum::debug_handler]
pub async fn doctor_calendar(
    State(config): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<Value>, AppError> {
    let (month_start, month_end) = dates::month_bounds(&query.month)
        .ok_or_else(|| AppError::BadRequest(format!("Invalid month: {}", query.month)))?;

    let feed = SlotFeedService::new(&config);
    let rows = feed
        .fetch_range(month_start, month_end, auth.token())
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    // The snapshot is complete before aggregation starts, and today is read
    // once so every day in the response is classified against the same date.
    let aggregate = aggregate_doctor_month(&rows, month_start, month_end);
    let today = Local::now().date_naive();

    let days: Vec<Value> = aggregate
        .days
        .iter()
        .map(|(date, day)| {
            json!({
                "date": dates::date_key(*date),
                "aggregate": day,
                "warning": classify_doctor_day(day, *date, today),
                "all_warnings": doctor_day_warnings(day),
            })
        })
        .collect();

    Ok(Json(json!({
        "month": query.month,
        "days": days,
        "excluded_rows": aggregate.excluded_rows,
    })))
}

#[axum::debug_handler]
pub async fn nurse_calendar(
    State(config): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<Value>, AppError> {
    let (month_start, month_end) = dates::month_bounds(&query.month)
        .ok_or_else(|| AppError::BadRequest(format!("Invalid month: {}", query.month)))?;

    let feed = SlotFeedService::new(&config);
    let rows = feed
        .fetch_range(month_start, month_end, auth.token())
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let aggregate = aggregate_nurse_month(&rows, month_start, month_end);
    let today = Local::now().date_naive();

    let days: Vec<Value> = aggregate
        .days
        .iter()
        .map(|(date, day)| {
            json!({
                "date": dates::date_key(*date),
                "aggregate": day,
                "warnings": classify_nurse_day(day, *date, today),
            })
        })
        .collect();

    Ok(Json(json!({
        "month": query.month,
        "days": days,
        "excluded_rows": aggregate.excluded_rows,
    })))
}

#[axum::debug_handler]
pub async fn compliance_sweep(
    State(config): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Query(query): Query<DateRangeQuery>,
) -> Result<Json<Value>, AppError> {
    let from = dates::parse_date_key(&query.from)
        .ok_or_else(|| AppError::BadRequest(format!("Invalid from date: {}", query.from)))?;
    let to = dates::parse_date_key(&query.to)
        .ok_or_else(|| AppError::BadRequest(format!("Invalid to date: {}", query.to)))?;
    if to < from {
        return Err(AppError::BadRequest("Date range is reversed".to_string()));
    }

    let feed = SlotFeedService::new(&config);
    let rows = feed
        .fetch_range(from, to, auth.token())
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let flagged: Vec<Value> = rows
        .iter()
        .filter_map(|slot| {
            let violations = rules::evaluate_slot(slot);
            if violations.is_empty() {
                None
            } else {
                Some(json!({
                    "slot": slot,
                    "violations": violations,
                }))
            }
        })
        .collect();

    Ok(Json(json!({
        "flagged": flagged,
        "total_slots": rows.len(),
    })))
}

#[axum::debug_handler]
pub async fn find_alternatives(
    State(config): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Json(request): Json<AlternativesRequest>,
) -> Result<Json<Value>, AppError> {
    let service = AlternativeSlotService::new(&config);
    let today = Local::now().date_naive();
    let horizon_days = request.horizon_days.unwrap_or(DEFAULT_HORIZON_DAYS);

    let alternatives = service
        .find_alternatives(&request.slot, horizon_days, today, auth.token())
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(json!({
        "alternatives": alternatives,
        "total": alternatives.len(),
    })))
}
