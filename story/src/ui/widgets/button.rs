//! Button and icon primitives

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::ui::theme::StoryTheme;

/// Glyphs drawn inside buttons and headings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Book,
    ForwardArrow,
}

impl Icon {
    pub fn glyph(self) -> &'static str {
        match self {
            Icon::Book => "▤",
            Icon::ForwardArrow => "→",
        }
    }
}

/// A single-row clickable button: `[ ▤ Label ]`
pub struct ButtonWidget<'a> {
    label: &'a str,
    icon: Option<Icon>,
    focused: bool,
    theme: &'a StoryTheme,
}

impl<'a> ButtonWidget<'a> {
    pub fn new(label: &'a str, theme: &'a StoryTheme) -> Self {
        Self {
            label,
            icon: None,
            focused: false,
            theme,
        }
    }

    pub fn icon(mut self, icon: Icon) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Columns needed to draw the button
    pub fn width(&self) -> u16 {
        self.line().width() as u16
    }

    fn line(&self) -> Line<'a> {
        let style = self.theme.button_style(self.focused);
        let text = match self.icon {
            Some(icon) => format!("[ {} {} ]", icon.glyph(), self.label),
            None => format!("[ {} ]", self.label),
        };
        Line::from(Span::styled(text, style))
    }
}

impl Widget for ButtonWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.line()).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_counts_icon_and_brackets() {
        let theme = StoryTheme::default();
        assert_eq!(ButtonWidget::new("Begin", &theme).width(), 9);
        assert_eq!(ButtonWidget::new("Begin", &theme).icon(Icon::Book).width(), 11);
    }

    #[test]
    fn test_renders_label() {
        let theme = StoryTheme::default();
        let area = Rect::new(0, 0, 20, 1);
        let mut buf = Buffer::empty(area);
        ButtonWidget::new("Continue", &theme)
            .icon(Icon::ForwardArrow)
            .render(area, &mut buf);

        let row: String = (0..area.width).map(|x| buf[(x, 0)].symbol()).collect();
        assert!(row.starts_with("[ → Continue ]"));
    }
}
