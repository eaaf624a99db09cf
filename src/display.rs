//! Display frames and text formatting
//!
//! Everything the host paints is computed here from the state; the host only
//! copies strings and colors onto its surface.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::state::{Mode, Theme, TimerState, WindowState};

/// Primary text shown when the countdown reaches zero
pub const FINISHED_MARKER: &str = "⏰ FINISH!";

pub const STOPWATCH_CAPTION: &str = "Stopwatch";
pub const TIMER_CAPTION: &str = "Timer • 5 min";

pub const CLOCK_HINT: &str = "Double-click = Theme • Right-click = Next mode";
pub const RUN_HINT: &str = "Left-click = Start / Stop • Right-click = Reset";

/// One paintable state of the widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayFrame {
    pub primary: String,
    pub secondary: String,
    pub hint: String,
    pub theme: Theme,
    pub visible: bool,
}

impl DisplayFrame {
    /// Build the frame for the given state. `now` is only read in clock mode.
    pub fn compose(timer: &TimerState, window: &WindowState, now: &NaiveDateTime) -> Self {
        let (primary, secondary) = match timer.mode {
            Mode::Clock => (format_clock_time(now), format_date(now)),
            Mode::Stopwatch => (
                format_stopwatch(timer.elapsed_tenths),
                STOPWATCH_CAPTION.to_string(),
            ),
            Mode::Timer => {
                let primary = if timer.finished {
                    FINISHED_MARKER.to_string()
                } else {
                    format_countdown(timer.remaining)
                };
                (primary, TIMER_CAPTION.to_string())
            }
        };

        Self {
            primary,
            secondary,
            hint: control_hint(timer.mode).to_string(),
            theme: window.theme,
            visible: window.visible,
        }
    }
}

/// `MM:SS.d` from tenths of a second
pub fn format_stopwatch(tenths: u64) -> String {
    let minutes = tenths / 600;
    let seconds = (tenths % 600) / 10;
    let fraction = tenths % 10;
    format!("{:02}:{:02}.{}", minutes, seconds, fraction)
}

/// `MM:SS` of the countdown. A zero or empty countdown shows the full default
/// duration, which is what the next start will arm.
pub fn format_countdown(remaining: u32) -> String {
    let total = if remaining == 0 {
        crate::state::TIMER_DEFAULT_SECONDS
    } else {
        remaining
    };
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// 24-hour `HH:MM`
pub fn format_clock_time(now: &NaiveDateTime) -> String {
    now.format("%H:%M").to_string()
}

/// Caption such as `Mon, 05 Feb 2024`
pub fn format_date(now: &NaiveDateTime) -> String {
    now.format("%a, %d %b %Y").to_string()
}

pub fn control_hint(mode: Mode) -> &'static str {
    match mode {
        Mode::Clock => CLOCK_HINT,
        Mode::Stopwatch | Mode::Timer => RUN_HINT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 2, 5)
            .unwrap()
            .and_hms_opt(h, m, 42)
            .unwrap()
    }

    #[test]
    fn stopwatch_format() {
        assert_eq!(format_stopwatch(0), "00:00.0");
        assert_eq!(format_stopwatch(15), "00:01.5");
        assert_eq!(format_stopwatch(599), "00:59.9");
        assert_eq!(format_stopwatch(600), "01:00.0");
        assert_eq!(format_stopwatch(6_123), "10:12.3");
    }

    #[test]
    fn countdown_format() {
        assert_eq!(format_countdown(300), "05:00");
        assert_eq!(format_countdown(299), "04:59");
        assert_eq!(format_countdown(61), "01:01");
        assert_eq!(format_countdown(1), "00:01");
        assert_eq!(format_countdown(0), "05:00");
    }

    #[test]
    fn clock_format_is_24_hour() {
        assert_eq!(format_clock_time(&at(7, 3)), "07:03");
        assert_eq!(format_clock_time(&at(23, 59)), "23:59");
        assert_eq!(format_date(&at(7, 3)), "Mon, 05 Feb 2024");
    }

    #[test]
    fn frames_per_mode() {
        let window = WindowState::default();
        let now = at(9, 30);
        let mut timer = TimerState::new();

        let frame = DisplayFrame::compose(&timer, &window, &now);
        assert_eq!(frame.primary, "09:30");
        assert_eq!(frame.secondary, "Mon, 05 Feb 2024");
        assert_eq!(frame.hint, CLOCK_HINT);
        assert!(frame.visible);

        timer.advance();
        let frame = DisplayFrame::compose(&timer, &window, &now);
        assert_eq!(frame.primary, "00:00.0");
        assert_eq!(frame.secondary, STOPWATCH_CAPTION);
        assert_eq!(frame.hint, RUN_HINT);

        timer.advance();
        let frame = DisplayFrame::compose(&timer, &window, &now);
        assert_eq!(frame.primary, "05:00");
        assert_eq!(frame.secondary, TIMER_CAPTION);

        timer.finished = true;
        let frame = DisplayFrame::compose(&timer, &window, &now);
        assert_eq!(frame.primary, FINISHED_MARKER);
    }

    #[test]
    fn frame_carries_window_state() {
        let mut window = WindowState::new(Theme::Light);
        window.minimize();
        let frame = DisplayFrame::compose(&TimerState::new(), &window, &at(0, 0));
        assert_eq!(frame.theme, Theme::Light);
        assert!(!frame.visible);
    }
}
