//! Color theme and styling for the story TUI

use ratatui::style::{Color, Modifier, Style};

/// Story UI color theme
#[derive(Debug, Clone)]
pub struct StoryTheme {
    // Base colors
    pub foreground: Color,
    pub border: Color,
    pub border_focused: Color,

    // Map
    pub badge_completed: Color,
    pub badge_pending: Color,
    pub path: Color,
    pub cursor: Color,

    // Text colors
    pub title_text: Color,
    pub description_text: Color,
    pub flavor_text: Color,
    pub system_text: Color,

    // Buttons
    pub button: Color,
    pub button_focused: Color,
}

impl Default for StoryTheme {
    fn default() -> Self {
        Self {
            foreground: Color::White,
            border: Color::DarkGray,
            border_focused: Color::Cyan,

            badge_completed: Color::Green,
            badge_pending: Color::Yellow,
            path: Color::DarkGray,
            cursor: Color::Cyan,

            title_text: Color::White,
            description_text: Color::Gray,
            flavor_text: Color::DarkGray,
            system_text: Color::DarkGray,

            button: Color::LightBlue,
            button_focused: Color::Cyan,
        }
    }
}

impl StoryTheme {
    /// Badge style for a stop
    pub fn badge_style(&self, completed: bool) -> Style {
        let color = if completed {
            self.badge_completed
        } else {
            self.badge_pending
        };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }

    /// Title style, highlighted when under the map cursor
    pub fn title_style(&self, highlighted: bool) -> Style {
        let style = Style::default()
            .fg(if highlighted { self.cursor } else { self.title_text })
            .add_modifier(Modifier::BOLD);

        if highlighted {
            style.add_modifier(Modifier::UNDERLINED)
        } else {
            style
        }
    }

    pub fn description_style(&self) -> Style {
        Style::default().fg(self.description_text)
    }

    pub fn flavor_style(&self) -> Style {
        Style::default()
            .fg(self.flavor_text)
            .add_modifier(Modifier::ITALIC)
    }

    pub fn system_style(&self) -> Style {
        Style::default()
            .fg(self.system_text)
            .add_modifier(Modifier::DIM)
    }

    pub fn path_style(&self) -> Style {
        Style::default().fg(self.path)
    }

    /// Button style; focused buttons are reversed
    pub fn button_style(&self, focused: bool) -> Style {
        if focused {
            Style::default()
                .fg(self.button_focused)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(self.button)
        }
    }

    pub fn border_style(&self, focused: bool) -> Style {
        Style::default().fg(if focused {
            self.border_focused
        } else {
            self.border
        })
    }
}
