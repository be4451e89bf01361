//! Story map widget: the ordered list of stops

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use story_core::StoryNode;

use crate::ui::layout::{StopArea, STOP_TEXT_INDENT};
use crate::ui::theme::StoryTheme;
use crate::ui::widgets::button::{ButtonWidget, Icon};

/// Label of the control on the first stop
pub const BEGIN_LABEL: &str = "Begin";

/// The begin button as drawn on the map
pub fn begin_button(theme: &StoryTheme) -> ButtonWidget<'_> {
    ButtonWidget::new(BEGIN_LABEL, theme).icon(Icon::Book)
}

/// Widget drawing the visible stops
pub struct MapWidget<'a> {
    title: &'a str,
    nodes: &'a [StoryNode],
    stops: &'a [StopArea],
    cursor: usize,
    theme: &'a StoryTheme,
}

impl<'a> MapWidget<'a> {
    pub fn new(title: &'a str, nodes: &'a [StoryNode], stops: &'a [StopArea], theme: &'a StoryTheme) -> Self {
        Self {
            title,
            nodes,
            stops,
            cursor: 0,
            theme,
        }
    }

    pub fn cursor(mut self, cursor: usize) -> Self {
        self.cursor = cursor;
        self
    }

    fn render_stop(&self, stop: &StopArea, buf: &mut Buffer) {
        let Some(node) = self.nodes.get(stop.index) else {
            return;
        };
        let area = stop.area;
        let highlighted = stop.index == self.cursor;
        let is_last = stop.index + 1 == self.nodes.len();

        // Header: cursor marker, badge, position and title
        let header = Line::from(vec![
            Span::styled(if highlighted { "▸ " } else { "  " }, self.theme.title_style(true)),
            Span::styled("●", self.theme.badge_style(node.completed)),
            Span::raw(" "),
            Span::styled(format!("{:<2} ", node.position()), self.theme.system_style()),
            Span::styled(node.title.as_str(), self.theme.title_style(highlighted)),
        ]);
        Paragraph::new(header).render(Rect { height: 1, ..area }, buf);

        // Path connector down the badge column
        if !is_last {
            for y in (area.y + 1)..area.bottom() {
                if area.width > 2 {
                    buf[(area.x + 2, y)]
                        .set_symbol("│")
                        .set_style(self.theme.path_style());
                }
            }
        }

        // Description
        let text_x = area.x + STOP_TEXT_INDENT.min(area.width);
        let text_area = Rect::new(
            text_x,
            area.y + 1,
            area.right().saturating_sub(text_x),
            area.height.saturating_sub(2).min(2),
        );
        Paragraph::new(Span::styled(node.description.as_str(), self.theme.description_style()))
            .wrap(Wrap { trim: true })
            .render(text_area, buf);

        if let Some(button_area) = stop.button {
            begin_button(self.theme)
                .focused(highlighted)
                .render(button_area, buf);
        }
    }
}

impl Widget for MapWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(format!(" {} {} ", Icon::Book.glyph(), self.title))
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(true));
        block.render(area, buf);

        for stop in self.stops {
            self.render_stop(stop, buf);
        }
    }
}
