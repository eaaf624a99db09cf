//! Stopwatch and countdown run loops

use std::{sync::Arc, time::Duration};
use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{interval_at, Instant},
};
use tracing::{debug, info};

use crate::state::{AppState, Mode, TickOutcome};

/// Stopwatch resolution
pub const STOPWATCH_TICK: Duration = Duration::from_millis(100);
/// Countdown resolution
pub const COUNTDOWN_TICK: Duration = Duration::from_secs(1);

/// Owned handle to one running stopwatch or countdown.
///
/// Dropping the handle without calling [`RunHandle::cancel`] also ends the
/// loop, since the task treats a closed cancel channel as a cancellation.
#[derive(Debug)]
pub struct RunHandle {
    pub mode: Mode,
    pub epoch: u64,
    cancel_tx: watch::Sender<bool>,
    join: JoinHandle<()>,
}

impl RunHandle {
    /// Signal the loop to stop. It exits at its next wake-up, without writing.
    pub fn cancel(self) -> JoinHandle<()> {
        // The loop may already be gone after a finished countdown.
        let _ = self.cancel_tx.send(true);
        self.join
    }

    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }
}

/// Period of the run loop for `mode`, or `None` for clock mode
pub fn tick_period(mode: Mode) -> Option<Duration> {
    match mode {
        Mode::Clock => None,
        Mode::Stopwatch => Some(STOPWATCH_TICK),
        Mode::Timer => Some(COUNTDOWN_TICK),
    }
}

/// Spawn the run loop for a freshly started run
pub fn spawn_run(state: Arc<AppState>, mode: Mode, epoch: u64) -> RunHandle {
    let (cancel_tx, cancel_rx) = watch::channel(false);
    let join = tokio::spawn(run_loop(state, mode, epoch, cancel_rx));

    RunHandle {
        mode,
        epoch,
        cancel_tx,
        join,
    }
}

async fn run_loop(state: Arc<AppState>, mode: Mode, epoch: u64, mut cancel_rx: watch::Receiver<bool>) {
    let Some(period) = tick_period(mode) else {
        return;
    };

    debug!("Starting {} loop for run {}", mode.as_str(), epoch);

    // First step lands one full period after the start.
    let mut interval = interval_at(Instant::now() + period, period);

    loop {
        tokio::select! {
            biased;

            _ = cancel_rx.changed() => {
                debug!("{} run {} cancelled", mode.as_str(), epoch);
                break;
            }

            _ = interval.tick() => {
                match state.apply_tick(mode, epoch) {
                    TickOutcome::Applied => {}
                    TickOutcome::Finished => {
                        info!("Countdown finished");
                        break;
                    }
                    TickOutcome::Stale => {
                        debug!("{} run {} is no longer current, exiting", mode.as_str(), epoch);
                        break;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        display::FINISHED_MARKER,
        state::{Theme, TIMER_DEFAULT_SECONDS},
    };
    use tokio::time::sleep;

    fn widget() -> Arc<AppState> {
        Arc::new(AppState::new(Theme::Dark))
    }

    fn stopwatch(state: &Arc<AppState>) {
        state.advance().unwrap();
        assert_eq!(state.get_timer_state().unwrap().mode, Mode::Stopwatch);
    }

    fn countdown(state: &Arc<AppState>) {
        state.advance().unwrap();
        state.advance().unwrap();
        assert_eq!(state.get_timer_state().unwrap().mode, Mode::Timer);
    }

    #[test]
    fn clock_has_no_period() {
        assert_eq!(tick_period(Mode::Clock), None);
        assert_eq!(tick_period(Mode::Stopwatch), Some(STOPWATCH_TICK));
        assert_eq!(tick_period(Mode::Timer), Some(COUNTDOWN_TICK));
    }

    #[tokio::test(start_paused = true)]
    async fn stopwatch_counts_tenths() {
        let state = widget();
        stopwatch(&state);
        state.primary_click().unwrap();

        sleep(Duration::from_millis(1_550)).await;

        let timer = state.get_timer_state().unwrap();
        assert_eq!(timer.elapsed_tenths, 15);
        assert!((timer.elapsed_secs() - 1.5).abs() < 1e-9);
        assert_eq!(state.current_frame().primary, "00:01.5");
    }

    #[tokio::test(start_paused = true)]
    async fn stopwatch_stop_freezes_elapsed() {
        let state = widget();
        stopwatch(&state);
        state.primary_click().unwrap();
        sleep(Duration::from_millis(550)).await;
        state.primary_click().unwrap();

        sleep(Duration::from_secs(2)).await;

        let timer = state.get_timer_state().unwrap();
        assert!(!timer.running);
        assert_eq!(timer.elapsed_tenths, 5);
        assert_eq!(state.current_frame().primary, "00:00.5");
    }

    #[tokio::test(start_paused = true)]
    async fn restart_never_doubles_the_rate() {
        let state = widget();
        stopwatch(&state);
        state.primary_click().unwrap();
        state.primary_click().unwrap();
        state.primary_click().unwrap();

        sleep(Duration::from_millis(1_050)).await;
        assert_eq!(state.get_timer_state().unwrap().elapsed_tenths, 10);

        // Same again mid-run.
        state.primary_click().unwrap();
        state.primary_click().unwrap();
        sleep(Duration::from_millis(1_030)).await;
        assert_eq!(state.get_timer_state().unwrap().elapsed_tenths, 20);
    }

    #[tokio::test(start_paused = true)]
    async fn countdown_runs_to_finish() {
        let state = widget();
        countdown(&state);
        assert_eq!(state.current_frame().primary, "05:00");

        state.primary_click().unwrap();
        assert_eq!(state.get_timer_state().unwrap().remaining, TIMER_DEFAULT_SECONDS);
        assert_eq!(state.current_frame().primary, "05:00");

        sleep(Duration::from_millis(1_050)).await;
        assert_eq!(state.get_timer_state().unwrap().remaining, 299);
        assert_eq!(state.current_frame().primary, "04:59");

        sleep(Duration::from_secs(60)).await;
        assert_eq!(state.get_timer_state().unwrap().remaining, 239);
        assert_eq!(state.current_frame().primary, "03:59");

        sleep(Duration::from_secs(239)).await;
        let timer = state.get_timer_state().unwrap();
        assert_eq!(timer.remaining, 0);
        assert!(!timer.running);
        assert!(timer.finished);
        assert_eq!(state.current_frame().primary, FINISHED_MARKER);
        assert!(!state.has_live_run());
    }

    #[tokio::test(start_paused = true)]
    async fn countdown_resumes_after_stop() {
        let state = widget();
        countdown(&state);
        state.primary_click().unwrap();
        sleep(Duration::from_millis(3_050)).await;
        state.primary_click().unwrap();

        sleep(Duration::from_secs(5)).await;
        assert_eq!(state.get_timer_state().unwrap().remaining, 297);

        state.primary_click().unwrap();
        assert_eq!(state.get_timer_state().unwrap().remaining, 297);
        sleep(Duration::from_millis(1_050)).await;
        assert_eq!(state.get_timer_state().unwrap().remaining, 296);
    }

    #[tokio::test(start_paused = true)]
    async fn reset_while_running_discards_later_ticks() {
        let state = widget();
        stopwatch(&state);
        state.primary_click().unwrap();
        sleep(Duration::from_millis(750)).await;

        state.secondary_click().unwrap();
        sleep(Duration::from_secs(1)).await;

        let timer = state.get_timer_state().unwrap();
        assert_eq!(timer.mode, Mode::Stopwatch);
        assert_eq!(timer.elapsed_tenths, 0);
        assert_eq!(state.current_frame().primary, "00:00.0");
    }

    #[tokio::test(start_paused = true)]
    async fn mode_switch_discards_later_ticks() {
        let state = widget();
        stopwatch(&state);
        state.primary_click().unwrap();
        sleep(Duration::from_millis(350)).await;

        state.advance().unwrap();
        sleep(Duration::from_secs(1)).await;

        let timer = state.get_timer_state().unwrap();
        assert_eq!(timer.mode, Mode::Timer);
        assert_eq!(timer.elapsed_tenths, 0);
        assert_eq!(state.current_frame().primary, "05:00");
        assert!(!state.has_live_run());
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_display_receiver_keeps_the_run_going() {
        let state = widget();
        stopwatch(&state);
        drop(state.subscribe());
        state.primary_click().unwrap();

        sleep(Duration::from_millis(550)).await;
        assert_eq!(state.get_timer_state().unwrap().elapsed_tenths, 5);
        assert!(state.has_live_run());
    }

    #[tokio::test(start_paused = true)]
    async fn closed_surface_ends_the_loop() {
        let state = widget();
        stopwatch(&state);
        state.primary_click().unwrap();
        sleep(Duration::from_millis(350)).await;

        state.close_surface();
        sleep(Duration::from_millis(500)).await;

        assert_eq!(state.get_timer_state().unwrap().elapsed_tenths, 3);
        assert!(!state.has_live_run());
    }
}
