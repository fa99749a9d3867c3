use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use admin_notes_cell::router::create_admin_notes_router;
use rota_compliance_cell::router::create_rota_router;
use shared_config::AppConfig;

pub fn create_router(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", get(|| async { "Practice rota API is running!" }))
        .nest("/rota", create_rota_router(state.clone()))
        .nest("/notes", create_admin_notes_router(state.clone()))
}
