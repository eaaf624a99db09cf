//! HTTP endpoint handlers
//!
//! Each handler is one host callback: a click, a window affordance or a tray
//! menu entry.

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::{error, info};

use crate::state::{AppState, TimerState, WindowState};
use super::responses::{
    GestureResponse, HealthResponse, PointerRequest, StatusResponse, WindowResponse,
};

fn gesture_reply(
    state: &AppState,
    action: &str,
    result: Result<TimerState, String>,
) -> Result<Json<GestureResponse>, StatusCode> {
    match result {
        Ok(timer_state) => Ok(Json(GestureResponse::new(
            action,
            timer_state,
            state.current_frame(),
        ))),
        Err(e) => {
            error!("Failed to handle {} gesture: {}", action, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

fn window_reply(
    action: &str,
    result: Result<WindowState, String>,
) -> Result<Json<WindowResponse>, StatusCode> {
    match result {
        Ok(window) => Ok(Json(WindowResponse::new(action, window))),
        Err(e) => {
            error!("Failed to handle {} request: {}", action, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /gesture/primary - Start or stop the run
pub async fn primary_handler(State(state): State<Arc<AppState>>) -> Result<Json<GestureResponse>, StatusCode> {
    let result = state.primary_click();
    gesture_reply(&state, "primary", result)
}

/// Handle POST /gesture/secondary - Reset the run, or next mode from the clock
pub async fn secondary_handler(State(state): State<Arc<AppState>>) -> Result<Json<GestureResponse>, StatusCode> {
    let result = state.secondary_click();
    gesture_reply(&state, "secondary", result)
}

/// Handle POST /gesture/advance - Cycle to the next mode
pub async fn advance_handler(State(state): State<Arc<AppState>>) -> Result<Json<GestureResponse>, StatusCode> {
    let result = state.advance();
    gesture_reply(&state, "advance", result)
}

/// Handle POST /gesture/theme - Toggle dark and light
pub async fn theme_handler(State(state): State<Arc<AppState>>) -> Result<Json<WindowResponse>, StatusCode> {
    window_reply("theme", state.toggle_theme())
}

/// Handle POST /window/drag/start
pub async fn drag_start_handler(
    State(state): State<Arc<AppState>>,
    Json(pointer): Json<PointerRequest>,
) -> Result<Json<WindowResponse>, StatusCode> {
    window_reply("drag-start", state.begin_drag(pointer.into()))
}

/// Handle POST /window/drag/move
pub async fn drag_move_handler(
    State(state): State<Arc<AppState>>,
    Json(pointer): Json<PointerRequest>,
) -> Result<Json<WindowResponse>, StatusCode> {
    window_reply("drag-move", state.drag_to(pointer.into()))
}

/// Handle POST /window/drag/end
pub async fn drag_end_handler(State(state): State<Arc<AppState>>) -> Result<Json<WindowResponse>, StatusCode> {
    window_reply("drag-end", state.end_drag())
}

/// Handle POST /tray/minimize - Hide the widget
pub async fn minimize_handler(State(state): State<Arc<AppState>>) -> Result<Json<WindowResponse>, StatusCode> {
    window_reply("minimize", state.minimize())
}

/// Handle POST /tray/restore - Show the widget again
pub async fn restore_handler(State(state): State<Arc<AppState>>) -> Result<Json<WindowResponse>, StatusCode> {
    window_reply("restore", state.restore())
}

/// Handle POST /tray/quit - Stop all loops and exit
pub async fn quit_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    if let Err(e) = state.quit() {
        error!("Failed to quit: {}", e);
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }

    info!("Quit endpoint called");
    status_handler(State(state)).await
}

/// Handle GET /status - Return the full widget status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let timer_state = match state.get_timer_state() {
        Ok(t) => t,
        Err(e) => {
            error!("Failed to get timer state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let window_state = match state.get_window_state() {
        Ok(w) => w,
        Err(e) => {
            error!("Failed to get window state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        elapsed_seconds: timer_state.elapsed_secs(),
        state: timer_state,
        frame: state.current_frame(),
        window: window_state,
        surface_alive: state.is_surface_alive(),
        quitting: state.is_quitting(),
        uptime: state.get_uptime(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
