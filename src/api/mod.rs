//! HTTP control surface
//!
//! Exposes the host gestures and tray hooks so a thin front end can drive the
//! widget.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/gesture/primary", post(primary_handler))
        .route("/gesture/secondary", post(secondary_handler))
        .route("/gesture/advance", post(advance_handler))
        .route("/gesture/theme", post(theme_handler))
        .route("/window/drag/start", post(drag_start_handler))
        .route("/window/drag/move", post(drag_move_handler))
        .route("/window/drag/end", post(drag_end_handler))
        .route("/tray/minimize", post(minimize_handler))
        .route("/tray/restore", post(restore_handler))
        .route("/tray/quit", post(quit_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
