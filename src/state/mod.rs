//! State management module
//!
//! This module contains all state-related structures and their management logic.

pub mod window_state;
pub mod app_state;
pub mod timer_state;

// Re-export main types
pub use window_state::{Palette, Point, Theme, WindowState};
pub use app_state::AppState;
pub use timer_state::{Mode, RunChange, TickOutcome, TimerState, TIMER_DEFAULT_SECONDS};
