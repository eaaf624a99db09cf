//! Main application state management

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex, MutexGuard,
    },
    time::Instant,
};
use chrono::{DateTime, Local, Utc};
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use super::{Mode, Point, RunChange, TickOutcome, Theme, TimerState, WindowState};
use crate::{
    display::DisplayFrame,
    tasks::ticker::{spawn_run, RunHandle},
};

/// Owned widget state shared between the host, the run loops and the clock
/// refresh.
///
/// Every change goes through one of the gesture methods or a tick, each of
/// which mutates the timer state and publishes the resulting frame while the
/// timer lock is held. Lock order is timer state, then window state, then the
/// run slot.
#[derive(Debug)]
pub struct AppState {
    timer_state: Arc<Mutex<TimerState>>,
    window_state: Arc<Mutex<WindowState>>,
    /// Handle of the current stopwatch/countdown loop, if any
    run: Mutex<Option<RunHandle>>,
    /// Cleared when the host surface is destroyed or the app quits
    surface_alive: AtomicBool,
    start_time: Instant,
    /// Last action tracking
    last_action: Arc<Mutex<Option<String>>>,
    last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Frames for the host to paint
    display_tx: watch::Sender<DisplayFrame>,
    /// Keep the receiver alive to prevent channel closure; host liveness is
    /// tracked by `surface_alive`, not by receiver count
    _display_rx: watch::Receiver<DisplayFrame>,
    /// Flips to true once on quit
    shutdown_tx: watch::Sender<bool>,
    _shutdown_rx: watch::Receiver<bool>,
}

impl AppState {
    /// Create the startup state: clock mode, visible, with the given theme
    pub fn new(theme: Theme) -> Self {
        let timer_state = TimerState::new();
        let window_state = WindowState::new(theme);
        let frame = DisplayFrame::compose(&timer_state, &window_state, &Local::now().naive_local());

        let (display_tx, display_rx) = watch::channel(frame);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        Self {
            timer_state: Arc::new(Mutex::new(timer_state)),
            window_state: Arc::new(Mutex::new(window_state)),
            run: Mutex::new(None),
            surface_alive: AtomicBool::new(true),
            start_time: Instant::now(),
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            display_tx,
            _display_rx: display_rx,
            shutdown_tx,
            _shutdown_rx: shutdown_rx,
        }
    }

    fn lock_timer(&self) -> Result<MutexGuard<'_, TimerState>, String> {
        self.timer_state.lock()
            .map_err(|e| format!("Failed to lock timer state: {}", e))
    }

    fn lock_window(&self) -> Result<MutexGuard<'_, WindowState>, String> {
        self.window_state.lock()
            .map_err(|e| format!("Failed to lock window state: {}", e))
    }

    /// Compose and send the frame for `timer`. Callers hold the timer lock.
    fn publish(&self, timer: &TimerState) -> Result<(), String> {
        let window = self.lock_window()?.clone();
        let frame = DisplayFrame::compose(timer, &window, &Local::now().naive_local());

        if let Err(e) = self.display_tx.send(frame) {
            warn!("Failed to send display frame: {}", e);
        }

        Ok(())
    }

    /// Swap the run slot, cancelling whatever loop was there
    fn replace_run(&self, next: Option<RunHandle>) {
        let mut slot = match self.run.lock() {
            Ok(slot) => slot,
            Err(e) => {
                error!("Failed to lock run slot: {}", e);
                return;
            }
        };

        if let Some(previous) = slot.take() {
            debug!("Cancelling {} run {}", previous.mode.as_str(), previous.epoch);
            let _ = previous.cancel();
        }
        *slot = next;
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Apply a state machine transition, start or cancel the run loop it asks
    /// for, and publish the new frame
    fn gesture<F>(self: &Arc<Self>, action: &str, transition: F) -> Result<TimerState, String>
    where
        F: FnOnce(&mut TimerState) -> RunChange,
    {
        if !self.is_surface_alive() {
            debug!("Ignoring {} gesture, surface is closed", action);
            return self.get_timer_state();
        }

        let mut timer = self.lock_timer()?;
        let change = transition(&mut *timer);

        match change {
            RunChange::Started { mode, epoch } => {
                info!("Starting {} run", mode.as_str());
                self.replace_run(Some(spawn_run(Arc::clone(self), mode, epoch)));
            }
            RunChange::Stopped => {
                info!("Stopping {} run", timer.mode.as_str());
                self.replace_run(None);
            }
            RunChange::Unchanged => {}
        }

        self.publish(&timer)?;
        let snapshot = timer.clone();
        drop(timer); // Release the lock early

        self.record_action(action);
        Ok(snapshot)
    }

    /// Left click: start/stop the stopwatch or countdown; nothing in clock mode
    pub fn primary_click(self: &Arc<Self>) -> Result<TimerState, String> {
        self.gesture("primary", TimerState::primary_click)
    }

    /// Right click: reset the current run, or move on from clock mode
    pub fn secondary_click(self: &Arc<Self>) -> Result<TimerState, String> {
        self.gesture("secondary", TimerState::secondary_click)
    }

    /// Cycle Clock -> Stopwatch -> Timer -> Clock
    pub fn advance(self: &Arc<Self>) -> Result<TimerState, String> {
        let state = self.gesture("advance", TimerState::advance)?;
        info!("Mode switched to {}", state.mode.as_str());
        Ok(state)
    }

    /// Apply a window change and republish the current frame with it
    fn update_window<F>(&self, action: &str, updater: F) -> Result<WindowState, String>
    where
        F: FnOnce(&mut WindowState),
    {
        if !self.is_surface_alive() {
            debug!("Ignoring {} request, surface is closed", action);
            return self.get_window_state();
        }

        let timer = self.lock_timer()?;
        let window = {
            let mut window = self.lock_window()?;
            updater(&mut *window);
            window.clone()
        };
        self.publish(&timer)?;
        drop(timer);

        self.record_action(action);
        Ok(window)
    }

    /// Double click: swap dark and light palettes
    pub fn toggle_theme(&self) -> Result<WindowState, String> {
        let window = self.update_window("theme", |window| {
            window.toggle_theme();
        })?;
        info!("Theme set to {:?}", window.theme);
        Ok(window)
    }

    pub fn begin_drag(&self, pointer: Point) -> Result<WindowState, String> {
        self.update_window("drag-start", |window| window.begin_drag(pointer))
    }

    pub fn drag_to(&self, pointer: Point) -> Result<WindowState, String> {
        self.update_window("drag-move", |window| {
            if window.drag_to(pointer).is_none() {
                debug!("Drag move without a drag in progress");
            }
        })
    }

    pub fn end_drag(&self) -> Result<WindowState, String> {
        self.update_window("drag-end", WindowState::end_drag)
    }

    /// Hide the widget to the tray
    pub fn minimize(&self) -> Result<WindowState, String> {
        info!("Minimizing to tray");
        self.update_window("minimize", WindowState::minimize)
    }

    /// Show, raise and refocus the widget
    pub fn restore(&self) -> Result<WindowState, String> {
        info!("Restoring from tray");
        self.update_window("restore", WindowState::restore)
    }

    /// Stop every loop and signal the process to exit.
    ///
    /// The run is halted before the surface is marked closed, so loops still
    /// waiting on their next period see both and exit without writing.
    pub fn quit(&self) -> Result<(), String> {
        info!("Quit requested");

        let mut timer = self.lock_timer()?;
        timer.halt();
        self.replace_run(None);
        self.surface_alive.store(false, Ordering::SeqCst);
        drop(timer);

        self.record_action("quit");
        if let Err(e) = self.shutdown_tx.send(true) {
            warn!("Failed to send shutdown notification: {}", e);
        }

        Ok(())
    }

    /// Resolve once [`AppState::quit`] has been called
    pub async fn wait_for_quit(&self) {
        let mut shutdown_rx = self.shutdown_tx.subscribe();
        if shutdown_rx.wait_for(|quitting| *quitting).await.is_err() {
            warn!("Shutdown channel closed before quit");
        }
    }

    pub fn is_quitting(&self) -> bool {
        *self.shutdown_tx.borrow()
    }

    /// Mark the host surface as destroyed. Later gestures are no-ops and
    /// loops exit at their next tick.
    pub fn close_surface(&self) {
        info!("Host surface closed");
        self.surface_alive.store(false, Ordering::SeqCst);
    }

    pub fn is_surface_alive(&self) -> bool {
        self.surface_alive.load(Ordering::SeqCst)
    }

    /// Apply one tick of the given run as a single locked step.
    ///
    /// Returns [`TickOutcome::Stale`] when the run is no longer current or the
    /// surface is gone; the loop is expected to exit on it.
    pub fn apply_tick(&self, mode: Mode, epoch: u64) -> TickOutcome {
        if !self.is_surface_alive() {
            return TickOutcome::Stale;
        }

        let mut timer = match self.lock_timer() {
            Ok(timer) => timer,
            Err(e) => {
                error!("{}", e);
                return TickOutcome::Stale;
            }
        };

        let outcome = match mode {
            Mode::Stopwatch => timer.stopwatch_tick(epoch),
            Mode::Timer => timer.countdown_tick(epoch),
            Mode::Clock => TickOutcome::Stale,
        };

        if outcome != TickOutcome::Stale {
            if let Err(e) = self.publish(&timer) {
                error!("Failed to publish tick: {}", e);
            }
        }

        outcome
    }

    /// Repaint the wall clock if clock mode is showing.
    ///
    /// Returns false once the surface is gone and the refresh should stop.
    pub fn refresh_clock(&self) -> bool {
        if !self.is_surface_alive() {
            return false;
        }

        match self.lock_timer() {
            Ok(timer) if timer.mode == Mode::Clock => {
                if let Err(e) = self.publish(&timer) {
                    warn!("Failed to refresh clock: {}", e);
                }
            }
            Ok(_) => {}
            Err(e) => warn!("{}", e),
        }

        true
    }

    /// New receiver for display frames
    pub fn subscribe(&self) -> watch::Receiver<DisplayFrame> {
        self.display_tx.subscribe()
    }

    /// Most recently published frame
    pub fn current_frame(&self) -> DisplayFrame {
        self.display_tx.borrow().clone()
    }

    /// Get current timer state
    pub fn get_timer_state(&self) -> Result<TimerState, String> {
        self.lock_timer().map(|state| state.clone())
    }

    /// Get current window state
    pub fn get_window_state(&self) -> Result<WindowState, String> {
        self.lock_window().map(|state| state.clone())
    }

    /// Whether a stopwatch or countdown loop is still alive
    pub fn has_live_run(&self) -> bool {
        self.run
            .lock()
            .map(|slot| slot.as_ref().map_or(false, |run| !run.is_finished()))
            .unwrap_or(false)
    }

    /// Calculate uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
