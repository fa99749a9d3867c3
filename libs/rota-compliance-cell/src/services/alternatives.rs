use anyhow::Result;
use chrono::{Duration, NaiveDate};
use reqwest::Method;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::models::SlotRecord;
use crate::services::identity;
use crate::services::rules::{self, AllowedClinicians};

/// Upper bound on how many substitute slots one lookup returns.
pub const ALTERNATIVES_CAP: usize = 50;

/// Finds available slots that would satisfy the rule a violating slot failed.
///
/// The rule is re-derived from the shared table by slot type, so the finder
/// can never disagree with the evaluator about what compliant means.
pub struct AlternativeSlotService {
    supabase: Arc<SupabaseClient>,
}

impl AlternativeSlotService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: Arc::new(SupabaseClient::new(config)),
        }
    }

    /// Search `[today, today + horizon_days)` for available rows of the same
    /// slot type that meet the rule's duration and clinician requirements.
    /// A slot type with no rule row has nothing to search for: empty result,
    /// not an error.
    pub async fn find_alternatives(
        &self,
        violating: &SlotRecord,
        horizon_days: i64,
        today: NaiveDate,
        auth_token: &str,
    ) -> Result<Vec<SlotRecord>> {
        let Some(rule) = rules::rule_for_slot_type(&violating.slot_type) else {
            debug!(
                "No compliance rule for slot type '{}', nothing to search for",
                violating.slot_type
            );
            return Ok(Vec::new());
        };

        let horizon_end = today + Duration::days(horizon_days.max(0));

        let mut path = format!(
            "/rest/v1/rota_slots?slot_type=ilike.{}&availability=eq.Available&date=gte.{}&date=lt.{}",
            urlencoding::encode(rule.slot_type),
            today,
            horizon_end
        );

        if let Some(minimum) = rule.min_duration_minutes {
            path.push_str(&format!("&duration_minutes=gte.{}", minimum));
        }

        match &rule.allowed {
            AllowedClinicians::Exactly(name) => {
                path.push_str(&format!("&clinician_name=eq.{}", urlencoding::encode(name)));
            }
            AllowedClinicians::AnyOf(names) => {
                let list = names
                    .iter()
                    .map(|name| format!("\"{}\"", name))
                    .collect::<Vec<_>>()
                    .join(",");
                path.push_str(&format!("&clinician_name=in.({})", urlencoding::encode(&list)));
            }
            AllowedClinicians::AnyNurse => {
                let clauses = identity::NURSE_SURNAMES
                    .iter()
                    .map(|surname| format!("clinician_name.ilike.*{}*", surname))
                    .collect::<Vec<_>>()
                    .join(",");
                path.push_str(&format!("&or=({})", urlencoding::encode(&clauses)));
            }
        }

        path.push_str(&format!("&limit={}", ALTERNATIVES_CAP));

        debug!(
            "Searching alternatives for '{}' over {} days",
            rule.slot_type, horizon_days
        );

        let raw_rows: Vec<Value> = self
            .supabase
            .request(Method::GET, &path, Some(auth_token), None)
            .await?;

        // Store-side filters do the heavy lifting; re-evaluating here keeps
        // messy rows (stringly durations and the like) out of the result.
        let alternatives: Vec<SlotRecord> = raw_rows
            .into_iter()
            .filter_map(|row| serde_json::from_value::<SlotRecord>(row).ok())
            .filter(|slot| rules::evaluate_slot(slot).is_empty())
            .take(ALTERNATIVES_CAP)
            .collect();

        debug!("Found {} compliant alternatives", alternatives.len());
        Ok(alternatives)
    }
}
