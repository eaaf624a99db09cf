//! Desk Clock - the core of an always-on-top clock, stopwatch and countdown widget
//!
//! The library owns the mode state machine and its tick loops and publishes
//! display frames for whatever host paints them. The bundled binary is a
//! headless host with a local HTTP control surface.

pub mod config;
pub mod display;
pub mod state;
pub mod api;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use display::DisplayFrame;
pub use state::{AppState, Mode, Theme, TimerState};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
