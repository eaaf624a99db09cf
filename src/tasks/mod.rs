//! Background tasks module
//!
//! This module contains the run loops and the long-lived tasks that run
//! alongside the control surface.

pub mod clock_refresh;
pub mod console_renderer;
pub mod ticker;

// Re-export main functions
pub use clock_refresh::clock_refresh_task;
pub use console_renderer::console_renderer_task;
pub use ticker::{spawn_run, RunHandle};
