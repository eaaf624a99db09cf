//! Headless host that paints display frames into the log

use std::sync::Arc;
use tracing::{debug, info};

use crate::{display::DisplayFrame, state::AppState};

/// One-line rendering of a frame, as a text host would show it
pub fn render_line(frame: &DisplayFrame) -> String {
    if !frame.visible {
        return "[in tray]".to_string();
    }

    let palette = frame.theme.palette();
    format!(
        "[{} on {}] {} | {} | {}",
        palette.main, palette.background, frame.primary, frame.secondary, frame.hint
    )
}

/// Background task that logs every frame change until the app quits
pub async fn console_renderer_task(state: Arc<AppState>) {
    info!("Starting console renderer");

    let mut frames = state.subscribe();
    info!("{}", render_line(&frames.borrow_and_update()));

    loop {
        tokio::select! {
            changed = frames.changed() => {
                if changed.is_err() {
                    debug!("Display channel closed");
                    break;
                }
                let line = render_line(&frames.borrow_and_update());
                info!("{}", line);
            }
            _ = state.wait_for_quit() => {
                debug!("Console renderer stopping");
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Theme, TimerState, WindowState};
    use chrono::NaiveDate;

    fn frame(window: &WindowState) -> DisplayFrame {
        let now = NaiveDate::from_ymd_opt(2024, 2, 5)
            .unwrap()
            .and_hms_opt(8, 15, 0)
            .unwrap();
        DisplayFrame::compose(&TimerState::new(), window, &now)
    }

    #[test]
    fn renders_visible_frame_with_palette() {
        let line = render_line(&frame(&WindowState::new(Theme::Light)));
        assert!(line.starts_with("[#1A1A1A on #F5F5F5] 08:15 | Mon, 05 Feb 2024"));
    }

    #[test]
    fn hidden_frame_renders_tray_marker() {
        let mut window = WindowState::default();
        window.minimize();
        assert_eq!(render_line(&frame(&window)), "[in tray]");
    }

    #[tokio::test]
    async fn renderer_exits_on_quit() {
        let state = Arc::new(AppState::new(Theme::Dark));
        let task = tokio::spawn(console_renderer_task(Arc::clone(&state)));

        state.advance().unwrap();
        state.quit().unwrap();
        task.await.unwrap();
    }
}
