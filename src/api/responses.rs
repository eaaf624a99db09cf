//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    display::DisplayFrame,
    state::{Palette, Point, TimerState, WindowState},
};

/// Response for the click and mode gestures
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GestureResponse {
    pub action: String,
    pub timestamp: DateTime<Utc>,
    pub state: TimerState,
    pub frame: DisplayFrame,
}

impl GestureResponse {
    pub fn new(action: &str, state: TimerState, frame: DisplayFrame) -> Self {
        Self {
            action: action.to_string(),
            timestamp: Utc::now(),
            state,
            frame,
        }
    }
}

/// Response for theme, drag and tray requests
#[derive(Debug, Clone, Serialize)]
pub struct WindowResponse {
    pub action: String,
    pub timestamp: DateTime<Utc>,
    pub window: WindowState,
    pub palette: Palette,
}

impl WindowResponse {
    pub fn new(action: &str, window: WindowState) -> Self {
        Self {
            action: action.to_string(),
            timestamp: Utc::now(),
            palette: window.theme.palette(),
            window,
        }
    }
}

/// Request body for drag start and drag move
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PointerRequest {
    pub x: i32,
    pub y: i32,
}

impl From<PointerRequest> for Point {
    fn from(pointer: PointerRequest) -> Self {
        Point::new(pointer.x, pointer.y)
    }
}

/// Full widget status
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub state: TimerState,
    pub elapsed_seconds: f64,
    pub frame: DisplayFrame,
    pub window: WindowState,
    pub surface_alive: bool,
    pub quitting: bool,
    pub uptime: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
