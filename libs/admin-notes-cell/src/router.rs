use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use shared_config::AppConfig;

use crate::handlers::*;

pub fn create_admin_notes_router(config: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", post(create_note))
        .route("/", get(list_latest_notes))
        .route("/{date}", get(get_latest_note))
        .with_state(config)
}
