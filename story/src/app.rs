//! Main application state and logic

use ratatui::layout::Rect;
use story_core::{Action, Layer, StoryScreen};
use tracing::{debug, info};

use crate::ui::theme::StoryTheme;
use crate::ui::Overlay;

/// Which button has focus in the scene layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusedControl {
    ReturnToMap,
    #[default]
    Continue,
}

impl FocusedControl {
    /// The other button
    pub fn toggled(self) -> Self {
        match self {
            FocusedControl::ReturnToMap => FocusedControl::Continue,
            FocusedControl::Continue => FocusedControl::ReturnToMap,
        }
    }

    /// Action performed when this button is pressed
    pub fn action(self) -> Action {
        match self {
            FocusedControl::ReturnToMap => Action::ReturnToMap,
            FocusedControl::Continue => Action::Advance,
        }
    }
}

/// Main application state
pub struct App {
    pub screen: StoryScreen,

    // UI state
    pub theme: StoryTheme,
    pub focused_control: FocusedControl,
    /// Highlighted stop on the map
    pub map_cursor: usize,
    /// Area of the last drawn frame
    pub viewport: Rect,
    overlay: Option<Overlay>,

    // Status
    status_message: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new(screen: StoryScreen) -> Self {
        Self {
            screen,
            theme: StoryTheme::default(),
            focused_control: FocusedControl::default(),
            map_cursor: 0,
            viewport: Rect::default(),
            overlay: None,
            status_message: None,
            should_quit: false,
        }
    }

    pub fn layer(&self) -> Layer {
        self.screen.layer()
    }

    /// Press a control on the screen
    pub fn press(&mut self, action: Action) {
        let was_last = self.screen.is_last();
        let before = self.screen.layer();
        self.screen.dispatch(action);

        match action {
            Action::EnterScene => {
                self.focused_control = FocusedControl::Continue;
                self.clear_status();
            }
            Action::ReturnToMap => {
                self.map_cursor = self.screen.current_index();
                self.clear_status();
            }
            Action::Advance if before == Layer::Scene && was_last => {
                info!("story complete");
                self.map_cursor = self.screen.current_index();
                self.set_status("Story complete");
            }
            Action::Advance => {
                let (position, total) = self.screen.progress();
                self.set_status(format!("Stop {position} of {total}"));
            }
            Action::Close => {}
        }
    }

    /// Activate the control on the highlighted map stop
    pub fn activate_map_cursor(&mut self) {
        if self.screen.can_enter_from(self.map_cursor) {
            self.press(Action::EnterScene);
        } else {
            debug!(stop = self.map_cursor, "stop has no control");
            self.set_status(format!("Stop {} is not available yet", self.map_cursor + 1));
        }
    }

    /// Press the focused scene button
    pub fn press_focused(&mut self) {
        self.press(self.focused_control.action());
    }

    pub fn toggle_focus(&mut self) {
        self.focused_control = self.focused_control.toggled();
    }

    /// Ask the host to dismiss the screen and stop the loop
    pub fn close(&mut self) {
        self.screen.close();
        self.should_quit = true;
    }

    // ========================================================================
    // Map cursor
    // ========================================================================

    pub fn cursor_down(&mut self) {
        let last = self.screen.nodes().len() - 1;
        self.map_cursor = (self.map_cursor + 1).min(last);
    }

    pub fn cursor_up(&mut self) {
        self.map_cursor = self.map_cursor.saturating_sub(1);
    }

    pub fn cursor_first(&mut self) {
        self.map_cursor = 0;
    }

    pub fn cursor_last(&mut self) {
        self.map_cursor = self.screen.nodes().len() - 1;
    }

    // ========================================================================
    // Overlay
    // ========================================================================

    pub fn has_overlay(&self) -> bool {
        self.overlay.is_some()
    }

    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    pub fn toggle_help(&mut self) {
        self.overlay = match self.overlay {
            Some(Overlay::Help) => None,
            None => Some(Overlay::Help),
        };
    }

    pub fn close_overlay(&mut self) {
        self.overlay = None;
    }

    // ========================================================================
    // Status
    // ========================================================================

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }
}
