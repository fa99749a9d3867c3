use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use axum_extra::TypedHeader;
use chrono::NaiveDate;
use headers::{authorization::Bearer, Authorization};
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{CreateAdminNoteRequest, NotesRangeQuery};
use crate::services::AdminNotesService;

#[axum::debug_handler]
pub async fn create_note(
    State(config): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Json(request): Json<CreateAdminNoteRequest>,
) -> Result<Json<Value>, AppError> {
    if request.action.trim().is_empty() {
        return Err(AppError::ValidationError("Note action cannot be empty".to_string()));
    }

    let service = AdminNotesService::new(&config);

    let note = service
        .create_note(request, auth.token())
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(json!(note)))
}

#[axum::debug_handler]
pub async fn get_latest_note(
    State(config): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Path(date): Path<NaiveDate>,
) -> Result<Json<Value>, AppError> {
    let service = AdminNotesService::new(&config);

    let note = service
        .latest_note_for_date(date, auth.token())
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .ok_or_else(|| AppError::NotFound(format!("No admin note for {}", date)))?;

    Ok(Json(json!(note)))
}

#[axum::debug_handler]
pub async fn list_latest_notes(
    State(config): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Query(query): Query<NotesRangeQuery>,
) -> Result<Json<Value>, AppError> {
    if query.to < query.from {
        return Err(AppError::BadRequest("Date range is reversed".to_string()));
    }

    let service = AdminNotesService::new(&config);

    let notes = service
        .latest_notes_in_range(query.from, query.to, auth.token())
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(json!({
        "notes": notes,
        "total": notes.len(),
    })))
}
