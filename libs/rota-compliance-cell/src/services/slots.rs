use anyhow::Result;
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{debug, warn};

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::models::SlotRecord;

const PAGE_SIZE: usize = 1000;

/// Read-side access to the `rota_slots` table.
///
/// Aggregation only ever runs over a completed snapshot: `fetch_range`
/// follows pagination to the end before returning, so the pure folds never
/// see a partially-filled collection.
pub struct SlotFeedService {
    supabase: Arc<SupabaseClient>,
}

impl SlotFeedService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: Arc::new(SupabaseClient::new(config)),
        }
    }

    /// Fetch every slot row dated within `[from, to]`, adapting raw rows as
    /// they arrive. A row that fails to adapt is skipped with a warning
    /// rather than failing the whole fetch.
    pub async fn fetch_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        auth_token: &str,
    ) -> Result<Vec<SlotRecord>> {
        debug!("Fetching slot rows from {} to {}", from, to);

        let path = format!(
            "/rest/v1/rota_slots?date=gte.{}&date=lte.{}&order=date.asc",
            from, to
        );

        let raw_rows = self
            .supabase
            .fetch_all_pages(&path, Some(auth_token), PAGE_SIZE)
            .await?;

        let mut slots = Vec::with_capacity(raw_rows.len());
        let mut skipped = 0usize;

        for row in raw_rows {
            match serde_json::from_value::<SlotRecord>(row) {
                Ok(slot) => slots.push(slot),
                Err(error) => {
                    skipped += 1;
                    debug!("Dropping malformed slot row: {}", error);
                }
            }
        }

        if skipped > 0 {
            warn!("Skipped {} malformed slot rows in {}..{}", skipped, from, to);
        }

        debug!("Snapshot complete: {} slot rows", slots.len());
        Ok(slots)
    }
}
