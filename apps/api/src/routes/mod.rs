pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::state::AppState;
use crate::{analysis, chat, render, resumes, rewrite};

/// Uploaded resume PDFs are capped at 10 MiB.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume lifecycle
        .route(
            "/api/v1/resumes/validate",
            post(resumes::handlers::handle_validate),
        )
        .route("/api/v1/resumes", post(resumes::handlers::handle_upload))
        .route(
            "/api/v1/resumes/:id",
            get(resumes::handlers::handle_get_resume),
        )
        // AI operations
        .route(
            "/api/v1/resumes/:id/analyze",
            post(analysis::handlers::handle_analyze),
        )
        .route(
            "/api/v1/resumes/:id/rewrite",
            post(rewrite::handlers::handle_rewrite),
        )
        .route(
            "/api/v1/resumes/:id/revise",
            post(rewrite::handlers::handle_revise),
        )
        // Export
        .route(
            "/api/v1/resumes/:id/export",
            post(render::handlers::handle_export),
        )
        // Advice thread
        .route(
            "/api/v1/resumes/:id/chat",
            get(chat::handlers::handle_list_messages).post(chat::handlers::handle_send_message),
        )
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}
