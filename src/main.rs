//! Desk Clock - an always-on-top clock, stopwatch and countdown widget
//!
//! This is the main entry point. It starts in clock mode and serves the host
//! gestures on a local control surface until quit.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use desk_clock::{
    config::Config,
    state::AppState,
    api::create_router,
    tasks::{clock_refresh_task, console_renderer_task},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("desk_clock={},tower_http=info", config.log_level()))
        .init();

    info!("Starting desk-clock v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, theme={:?}",
          config.host, config.port, config.initial_theme());

    // Create application state
    let state = Arc::new(AppState::new(config.initial_theme()));

    // Wall clock refresh and the headless renderer run for the whole session
    tokio::spawn(clock_refresh_task(Arc::clone(&state)));
    tokio::spawn(console_renderer_task(Arc::clone(&state)));

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Control surface on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /gesture/primary    - Start / stop");
    info!("  POST /gesture/secondary  - Reset, or next mode from the clock");
    info!("  POST /gesture/advance    - Next mode");
    info!("  POST /gesture/theme      - Toggle theme");
    info!("  POST /window/drag/*      - Drag start / move / end");
    info!("  POST /tray/minimize      - Hide to tray");
    info!("  POST /tray/restore       - Show again");
    info!("  POST /tray/quit          - Quit");
    info!("  GET  /status             - Current state and frame");
    info!("  GET  /health             - Health check");

    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
        _ = state.wait_for_quit() => {
            info!("Quit requested from tray");
        }
    }

    // Make sure the run loops see the stop before the runtime goes away
    if !state.is_quitting() {
        if let Err(e) = state.quit() {
            tracing::error!("Failed to stop cleanly: {}", e);
        }
    }

    info!("Desk clock shutdown complete");
    Ok(())
}
