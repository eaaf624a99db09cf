//! Wall clock refresh background task

use std::{sync::Arc, time::Duration};
use tokio::time::{interval, MissedTickBehavior};
use tracing::info;

use crate::state::AppState;

/// How often the clock face is repainted
pub const CLOCK_REFRESH: Duration = Duration::from_secs(1);

/// Background task that repaints the wall clock once a second.
///
/// Runs for the whole process lifetime regardless of mode; the repaint itself
/// only happens while clock mode is showing.
pub async fn clock_refresh_task(state: Arc<AppState>) {
    info!("Starting clock refresh task");

    let mut interval = interval(CLOCK_REFRESH);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        interval.tick().await;

        if !state.refresh_clock() {
            info!("Surface closed, stopping clock refresh");
            break;
        }
    }
}
