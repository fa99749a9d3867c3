use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use shared_config::AppConfig;

use crate::handlers::*;

pub fn create_rota_router(config: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/doctors/calendar", get(doctor_calendar))
        .route("/nurses/calendar", get(nurse_calendar))
        .route("/compliance", get(compliance_sweep))
        .route("/compliance/alternatives", post(find_alternatives))
        .with_state(config)
}
