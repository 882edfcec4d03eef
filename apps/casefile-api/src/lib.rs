//! Casefile API - backend for RPF case and memo management
//!
//! Provides REST endpoints for:
//! - Case and accused registration
//! - Per-accused memo drafts and finalization
//! - Challan eligibility and finalization
//! - Formatted PDF downloads per document

use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod error;
pub mod handlers;
pub mod models;
pub mod queries;
pub mod state;

pub use state::AppState;

/// Build the application router.
pub fn app(state: Arc<AppState>) -> Router {
    // CORS configuration for web clients
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(handlers::health))
        // Cases
        .route(
            "/api/cases",
            post(handlers::cases::create_case).get(handlers::cases::list_cases),
        )
        .route("/api/cases/:case_id", get(handlers::cases::get_case))
        .route("/api/cases/:case_id/close", post(handlers::cases::close_case))
        // Accused
        .route(
            "/api/cases/:case_id/accused",
            post(handlers::accused::add_accused).get(handlers::accused::list_accused),
        )
        // Memos
        .route(
            "/api/cases/:case_id/accused/:accused_id/memos/:kind",
            put(handlers::memos::upsert_memo).get(handlers::memos::get_memo),
        )
        .route(
            "/api/cases/:case_id/accused/:accused_id/completion",
            get(handlers::memos::get_completion),
        )
        // Challan
        .route(
            "/api/cases/:case_id/challan",
            put(handlers::challan::upsert_challan).get(handlers::challan::get_challan),
        )
        // PDF downloads
        .route(
            "/api/cases/:case_id/accused/:accused_id/memos/:kind/pdf",
            get(handlers::pdf::memo_pdf),
        )
        .route("/api/cases/:case_id/challan/pdf", get(handlers::pdf::challan_pdf))
        // Lookups and activity
        .route("/api/profiles", get(handlers::lookups::list_profiles))
        .route("/api/railway-posts", get(handlers::lookups::list_railway_posts))
        .route("/api/law-sections", get(handlers::lookups::list_law_sections))
        .route("/api/cases/:case_id/activity", get(handlers::lookups::case_activity))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
