//! Signal handling for graceful shutdown
//!
//! A SIGTERM or SIGINT ends the session the same way the tray quit does:
//! `main` calls `AppState::quit` once this resolves, halting any run.

use signal_hook_tokio::Signals;
use futures::stream::StreamExt;
use tracing::{info, warn};

/// Resolve on the first SIGTERM or SIGINT. Never resolves if the handler
/// could not be registered, leaving tray quit as the only exit.
pub async fn shutdown_signal() {
    let mut signals = match Signals::new([
        signal_hook::consts::SIGTERM,
        signal_hook::consts::SIGINT,
    ]) {
        Ok(signals) => signals,
        Err(e) => {
            warn!("Failed to register signal handler: {}", e);
            return std::future::pending::<()>().await;
        }
    };

    if let Some(signal) = signals.next().await {
        info!("Received signal: {}", signal);
    }
}
