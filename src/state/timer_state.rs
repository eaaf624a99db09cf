//! Timer state structure and the mode state machine

use serde::{Deserialize, Serialize};

/// Countdown length armed on the first start after a reset or mode switch
pub const TIMER_DEFAULT_SECONDS: u32 = 300;

/// Display mode of the widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Clock,
    Stopwatch,
    Timer,
}

impl Mode {
    /// Next mode in the Clock -> Stopwatch -> Timer -> Clock cycle
    pub fn next(self) -> Self {
        match self {
            Mode::Clock => Mode::Stopwatch,
            Mode::Stopwatch => Mode::Timer,
            Mode::Timer => Mode::Clock,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Clock => "clock",
            Mode::Stopwatch => "stopwatch",
            Mode::Timer => "timer",
        }
    }

    /// Whether this mode has a start/stop run
    pub fn is_runnable(&self) -> bool {
        !matches!(self, Mode::Clock)
    }
}

/// What a gesture did to the run status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunChange {
    /// Nothing was running before and nothing runs now
    Unchanged,
    /// A run of the given mode started under the given epoch
    Started { mode: Mode, epoch: u64 },
    /// The active run was stopped
    Stopped,
}

/// Result of applying one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The tick advanced the counter; keep ticking
    Applied,
    /// The countdown hit zero; the run is over
    Finished,
    /// The run this tick belongs to is no longer current
    Stale,
}

/// State of the clock / stopwatch / timer machine.
///
/// `elapsed_tenths` is only meaningful in stopwatch mode and `remaining` only
/// in timer mode. `run_epoch` changes every time a run starts or stops, so a
/// tick carrying an older epoch can be recognised and dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub mode: Mode,
    pub running: bool,
    pub elapsed_tenths: u64,
    pub remaining: u32,
    pub finished: bool,
    pub run_epoch: u64,
}

impl TimerState {
    /// Create the startup state: clock mode, nothing running
    pub fn new() -> Self {
        Self {
            mode: Mode::Clock,
            running: false,
            elapsed_tenths: 0,
            remaining: 0,
            finished: false,
            run_epoch: 0,
        }
    }

    /// Stopwatch elapsed time in seconds
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_tenths as f64 / 10.0
    }

    /// Check whether a tick started under `epoch` may still be applied
    pub fn is_current(&self, epoch: u64, mode: Mode) -> bool {
        self.running && self.mode == mode && self.run_epoch == epoch
    }

    /// Stop any run. Bumps the epoch only when a run was actually live.
    pub fn halt(&mut self) -> RunChange {
        if self.running {
            self.running = false;
            self.run_epoch = self.run_epoch.wrapping_add(1);
            RunChange::Stopped
        } else {
            RunChange::Unchanged
        }
    }

    fn reset_counters(&mut self) {
        self.elapsed_tenths = 0;
        self.remaining = 0;
        self.finished = false;
    }

    /// Move to the next mode, dropping any run and resetting all counters
    pub fn advance(&mut self) -> RunChange {
        let change = self.halt();
        self.reset_counters();
        self.mode = self.mode.next();
        change
    }

    /// Left click: start or stop the run of the current mode
    pub fn primary_click(&mut self) -> RunChange {
        if !self.mode.is_runnable() {
            return RunChange::Unchanged;
        }

        if self.running {
            return self.halt();
        }

        if self.mode == Mode::Timer && self.remaining == 0 {
            self.remaining = TIMER_DEFAULT_SECONDS;
        }
        self.finished = false;
        self.running = true;
        self.run_epoch = self.run_epoch.wrapping_add(1);

        RunChange::Started {
            mode: self.mode,
            epoch: self.run_epoch,
        }
    }

    /// Right click: advance from clock mode, otherwise stop and reset in place
    pub fn secondary_click(&mut self) -> RunChange {
        if self.mode == Mode::Clock {
            return self.advance();
        }

        let change = self.halt();
        self.reset_counters();
        change
    }

    /// One 0.1s stopwatch step
    pub fn stopwatch_tick(&mut self, epoch: u64) -> TickOutcome {
        if !self.is_current(epoch, Mode::Stopwatch) {
            return TickOutcome::Stale;
        }

        self.elapsed_tenths += 1;
        TickOutcome::Applied
    }

    /// One 1s countdown step; finishes the run when zero is reached
    pub fn countdown_tick(&mut self, epoch: u64) -> TickOutcome {
        if !self.is_current(epoch, Mode::Timer) {
            return TickOutcome::Stale;
        }

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.halt();
            self.finished = true;
            return TickOutcome::Finished;
        }

        TickOutcome::Applied
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}
