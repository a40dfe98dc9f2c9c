pub mod config;
pub mod db;
pub mod engine;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod services;
pub mod state;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Full application router; shared between main and the integration tests.
pub fn app_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/api/chat/session", post(handlers::chat::create_session))
        .route(
            "/api/chat/session/:id",
            get(handlers::chat::get_session).delete(handlers::chat::delete_session),
        )
        .route(
            "/api/chat/session/:id/message",
            post(handlers::chat::send_message),
        )
        .route(
            "/api/chat/session/:id/lead",
            post(handlers::forms::submit_lead),
        )
        .route(
            "/api/chat/session/:id/booking",
            post(handlers::forms::submit_booking),
        )
        .route("/api/chat/suggestions", get(handlers::chat::suggestions))
        .route("/api/assistant/generate", post(handlers::assistant::generate))
        .route("/api/admin/status", get(handlers::admin::get_status))
        .route("/api/admin/leads", get(handlers::admin::get_leads))
        .route("/api/admin/bookings", get(handlers::admin::get_bookings))
        .route("/api/admin/events", get(handlers::admin::events_stream))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
