//! Window-level state: theme, tray visibility and drag position
//!
//! None of this feeds back into the mode state machine. It exists so the host
//! knows how to paint and where to place the widget.

use serde::{Deserialize, Serialize};

/// Opacity the widget is shown with whenever it is visible
pub const WINDOW_OPACITY: f32 = 0.92;

/// Two-tone color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Colors for this theme
    pub fn palette(self) -> Palette {
        match self {
            Theme::Dark => Palette {
                background: "#0F0F0F",
                main: "#E0E0E0",
                sub: "#AAAAAA",
            },
            Theme::Light => Palette {
                background: "#F5F5F5",
                main: "#1A1A1A",
                sub: "#666666",
            },
        }
    }
}

/// Background, primary text and secondary text colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub background: &'static str,
    pub main: &'static str,
    pub sub: &'static str,
}

/// Window position in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowState {
    pub theme: Theme,
    pub visible: bool,
    pub position: Point,
    pub drag_anchor: Option<Point>,
    pub opacity: f32,
}

impl WindowState {
    /// Create a visible window at the origin with the given theme
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            visible: true,
            position: Point::default(),
            drag_anchor: None,
            opacity: WINDOW_OPACITY,
        }
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    /// Hide the window to the tray
    pub fn minimize(&mut self) {
        self.visible = false;
        self.drag_anchor = None;
    }

    /// Show the window again at full widget opacity
    pub fn restore(&mut self) {
        self.visible = true;
        self.opacity = WINDOW_OPACITY;
    }

    /// Remember where the pointer went down, relative to the window
    pub fn begin_drag(&mut self, pointer: Point) {
        self.drag_anchor = Some(pointer);
    }

    /// Move the window so the anchored point follows the pointer.
    ///
    /// `pointer` is relative to the window, like the anchor, so the window
    /// moves by the difference between the two. Coordinates saturate at the
    /// `i32` range. Returns the new position, or `None` when no drag is in
    /// progress.
    pub fn drag_to(&mut self, pointer: Point) -> Option<Point> {
        let anchor = self.drag_anchor?;
        self.position = Point::new(
            self.position.x.saturating_add(pointer.x.saturating_sub(anchor.x)),
            self.position.y.saturating_add(pointer.y.saturating_sub(anchor.y)),
        );
        Some(self.position)
    }

    pub fn end_drag(&mut self) {
        self.drag_anchor = None;
    }
}

impl Default for WindowState {
    fn default() -> Self {
        Self::new(Theme::Dark)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_toggle_flips_palette() {
        let mut window = WindowState::default();
        assert_eq!(window.theme.palette().background, "#0F0F0F");

        assert_eq!(window.toggle_theme(), Theme::Light);
        assert_eq!(window.theme.palette().main, "#1A1A1A");

        assert_eq!(window.toggle_theme(), Theme::Dark);
    }

    #[test]
    fn drag_moves_by_pointer_delta() {
        let mut window = WindowState::default();
        assert_eq!(window.drag_to(Point::new(50, 50)), None);

        window.begin_drag(Point::new(10, 20));
        assert_eq!(window.drag_to(Point::new(15, 18)), Some(Point::new(5, -2)));
        // Window moved, so the pointer is back at the anchor relative to it.
        assert_eq!(window.drag_to(Point::new(10, 20)), Some(Point::new(5, -2)));
        assert_eq!(window.drag_to(Point::new(40, 20)), Some(Point::new(35, -2)));

        window.end_drag();
        assert_eq!(window.drag_to(Point::new(0, 0)), None);
        assert_eq!(window.position, Point::new(35, -2));
    }

    #[test]
    fn drag_with_extreme_pointers_saturates() {
        let mut window = WindowState::default();
        window.begin_drag(Point::new(i32::MIN, i32::MAX));
        assert_eq!(
            window.drag_to(Point::new(i32::MAX, i32::MIN)),
            Some(Point::new(i32::MAX, i32::MIN))
        );

        // Already at the edge; pushing further stays there.
        window.begin_drag(Point::new(0, 0));
        assert_eq!(
            window.drag_to(Point::new(10, -10)),
            Some(Point::new(i32::MAX, i32::MIN))
        );
        assert_eq!(
            window.drag_to(Point::new(-5, 5)),
            Some(Point::new(i32::MAX - 5, i32::MIN + 5))
        );
    }

    #[test]
    fn minimize_and_restore() {
        let mut window = WindowState::default();
        window.begin_drag(Point::new(1, 1));
        window.minimize();
        assert!(!window.visible);
        assert_eq!(window.drag_anchor, None);

        window.restore();
        assert!(window.visible);
        assert_eq!(window.opacity, WINDOW_OPACITY);
    }
}
