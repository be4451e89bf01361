//! Layout calculations for the story TUI

use ratatui::layout::{Constraint, Direction, Layout, Margin, Rect};

/// Rows used by one stop on the map: header, two description rows, control row
pub const STOP_HEIGHT: u16 = 4;

/// Column where stop text starts, after the cursor marker and badge
pub const STOP_TEXT_INDENT: u16 = 6;

/// Main layout areas shared by both layers
pub struct ScreenLayout {
    pub title_area: Rect,
    pub body_area: Rect,
    pub status_bar: Rect,
    pub hotkey_bar: Rect,
}

impl ScreenLayout {
    /// Calculate layout based on terminal size
    pub fn calculate(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title bar
                Constraint::Min(6),    // Map or scene
                Constraint::Length(1), // Status bar
                Constraint::Length(1), // Hotkey bar
            ])
            .split(area);

        Self {
            title_area: chunks[0],
            body_area: chunks[1],
            status_bar: chunks[2],
            hotkey_bar: chunks[3],
        }
    }

    /// Body area inside its border
    pub fn body_inner(&self) -> Rect {
        self.body_area.inner(Margin {
            horizontal: 1,
            vertical: 1,
        })
    }
}

/// Placement of one visible stop on the map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StopArea {
    pub index: usize,
    pub area: Rect,
    /// Control row, present only for stops that expose a control
    pub button: Option<Rect>,
}

/// Place the visible stops, scrolled so the cursor stays on screen.
pub fn map_stops(
    inner: Rect,
    count: usize,
    cursor: usize,
    button_width: u16,
    has_button: impl Fn(usize) -> bool,
) -> Vec<StopArea> {
    if inner.height == 0 || inner.width == 0 {
        return Vec::new();
    }

    let visible = usize::from((inner.height / STOP_HEIGHT).max(1));
    let first = cursor.saturating_sub(visible - 1);
    let last = count.min(first + visible);

    (first..last)
        .filter_map(|index| {
            let y = inner.y + ((index - first) as u16) * STOP_HEIGHT;
            if y >= inner.bottom() {
                return None;
            }
            let height = STOP_HEIGHT.min(inner.bottom() - y);
            let area = Rect::new(inner.x, y, inner.width, height);

            let button = if has_button(index) && height == STOP_HEIGHT {
                let x = inner.x + STOP_TEXT_INDENT.min(inner.width);
                let width = button_width.min(inner.right().saturating_sub(x));
                Some(Rect::new(x, y + STOP_HEIGHT - 1, width, 1))
            } else {
                None
            };

            Some(StopArea {
                index,
                area,
                button,
            })
        })
        .collect()
}

/// Scene reader areas
pub struct SceneLayout {
    pub heading_area: Rect,
    pub text_area: Rect,
    pub flavor_area: Rect,
    pub return_button: Rect,
    pub continue_button: Rect,
}

impl SceneLayout {
    /// Split the scene body; buttons sit on the last row, left and right aligned
    pub fn calculate(inner: Rect, return_width: u16, continue_width: u16) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Heading
                Constraint::Min(2),    // Description
                Constraint::Length(3), // Flavor text
                Constraint::Length(1), // Buttons
            ])
            .split(inner);

        let row = chunks[3];
        let return_button = Rect::new(row.x, row.y, return_width.min(row.width), row.height);
        let continue_width = continue_width.min(row.width);
        let continue_button = Rect::new(
            row.right().saturating_sub(continue_width),
            row.y,
            continue_width,
            row.height,
        );

        Self {
            heading_area: chunks[0],
            text_area: chunks[1],
            flavor_area: chunks[2],
            return_button,
            continue_button,
        }
    }
}

/// Calculate fixed-size centered popup
pub fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_stops_fit() {
        let inner = Rect::new(1, 2, 60, 20);
        let stops = map_stops(inner, 4, 0, 12, |i| i == 0);
        assert_eq!(stops.len(), 4);
        assert_eq!(stops[0].area.y, 2);
        assert_eq!(stops[1].area.y, 2 + STOP_HEIGHT);
        assert_eq!(stops[0].button, Some(Rect::new(7, 5, 12, 1)));
        assert!(stops[1..].iter().all(|s| s.button.is_none()));
    }

    #[test]
    fn test_scrolls_to_keep_cursor_visible() {
        let inner = Rect::new(0, 0, 40, 8);
        let stops = map_stops(inner, 4, 3, 10, |i| i == 0);
        let indices: Vec<usize> = stops.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![2, 3]);
    }

    #[test]
    fn test_tiny_area_still_shows_cursor() {
        let inner = Rect::new(0, 0, 40, 2);
        let stops = map_stops(inner, 4, 2, 10, |_| true);
        assert_eq!(stops.len(), 1);
        assert_eq!(stops[0].index, 2);
        assert_eq!(stops[0].button, None);
    }

    #[test]
    fn test_scene_buttons_on_last_row() {
        let layout = SceneLayout::calculate(Rect::new(0, 0, 50, 12), 17, 14);
        assert_eq!(layout.return_button, Rect::new(0, 11, 17, 1));
        assert_eq!(layout.continue_button, Rect::new(36, 11, 14, 1));
    }

    #[test]
    fn test_centered_rect_fixed() {
        let popup = centered_rect_fixed(20, 10, Rect::new(0, 0, 100, 50));
        assert_eq!(popup, Rect::new(40, 20, 20, 10));
    }
}
