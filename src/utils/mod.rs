//! Utility functions module
//!
//! Process signal handling; a SIGINT or SIGTERM ends the session like a tray quit.

pub mod signals;

pub use signals::shutdown_signal;
