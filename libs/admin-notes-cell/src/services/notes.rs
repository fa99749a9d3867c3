use anyhow::{anyhow, Result};
use chrono::{NaiveDate, Utc};
use reqwest::Method;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::models::{AdminDayNote, CreateAdminNoteRequest};

pub struct AdminNotesService {
    supabase: Arc<SupabaseClient>,
}

impl AdminNotesService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: Arc::new(SupabaseClient::new(config)),
        }
    }

    /// Record a note for a date. Notes are never updated in place: a new row
    /// is inserted and readers take the latest per date.
    pub async fn create_note(
        &self,
        request: CreateAdminNoteRequest,
        auth_token: &str,
    ) -> Result<AdminDayNote> {
        debug!("Recording admin note for {}", request.appointment_date);

        let note_data = json!({
            "appointment_date": request.appointment_date,
            "action": request.action,
            "created_by": request.created_by,
            "created_at": Utc::now().to_rfc3339(),
        });

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            "Prefer",
            reqwest::header::HeaderValue::from_static("return=representation"),
        );

        let result: Vec<Value> = self
            .supabase
            .request_with_headers(
                Method::POST,
                "/rest/v1/admin_day_notes",
                Some(auth_token),
                Some(note_data),
                Some(headers),
            )
            .await?;

        let created = result
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("Failed to create admin note"))?;

        Ok(serde_json::from_value(created)?)
    }

    /// The latest note for one date, if any exists.
    pub async fn latest_note_for_date(
        &self,
        date: NaiveDate,
        auth_token: &str,
    ) -> Result<Option<AdminDayNote>> {
        let path = format!(
            "/rest/v1/admin_day_notes?appointment_date=eq.{}&order=created_at.desc&limit=1",
            date
        );

        let result: Vec<Value> = self
            .supabase
            .request(Method::GET, &path, Some(auth_token), None)
            .await?;

        match result.into_iter().next() {
            Some(row) => Ok(Some(serde_json::from_value(row)?)),
            None => Ok(None),
        }
    }

    /// The latest note per date across a range, for calendar decoration.
    pub async fn latest_notes_in_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        auth_token: &str,
    ) -> Result<Vec<AdminDayNote>> {
        let path = format!(
            "/rest/v1/admin_day_notes?appointment_date=gte.{}&appointment_date=lte.{}&order=appointment_date.asc,created_at.desc",
            from, to
        );

        let result: Vec<Value> = self
            .supabase
            .request(Method::GET, &path, Some(auth_token), None)
            .await?;

        // Rows arrive newest-first within each date; the first one wins.
        let mut latest: BTreeMap<NaiveDate, AdminDayNote> = BTreeMap::new();
        for row in result {
            let note: AdminDayNote = match serde_json::from_value(row) {
                Ok(note) => note,
                Err(error) => {
                    debug!("Dropping malformed admin note row: {}", error);
                    continue;
                }
            };
            latest.entry(note.appointment_date).or_insert(note);
        }

        Ok(latest.into_values().collect())
    }
}
