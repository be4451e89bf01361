//! Scene reader widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use story_core::StoryNode;

use crate::app::FocusedControl;
use crate::ui::layout::SceneLayout;
use crate::ui::theme::StoryTheme;
use crate::ui::widgets::button::{ButtonWidget, Icon};

pub const RETURN_LABEL: &str = "Return to Map";
pub const CONTINUE_LABEL: &str = "Continue";

pub fn return_button(theme: &StoryTheme) -> ButtonWidget<'_> {
    ButtonWidget::new(RETURN_LABEL, theme)
}

pub fn continue_button(theme: &StoryTheme) -> ButtonWidget<'_> {
    ButtonWidget::new(CONTINUE_LABEL, theme).icon(Icon::ForwardArrow)
}

/// Widget drawing the current node with its two controls
pub struct SceneWidget<'a> {
    node: &'a StoryNode,
    progress: (usize, usize),
    flavor_text: &'a str,
    layout: &'a SceneLayout,
    focused: FocusedControl,
    theme: &'a StoryTheme,
}

impl<'a> SceneWidget<'a> {
    pub fn new(node: &'a StoryNode, layout: &'a SceneLayout, theme: &'a StoryTheme) -> Self {
        Self {
            node,
            progress: (node.position(), node.position()),
            flavor_text: "",
            layout,
            focused: FocusedControl::default(),
            theme,
        }
    }

    pub fn progress(mut self, progress: (usize, usize)) -> Self {
        self.progress = progress;
        self
    }

    pub fn flavor_text(mut self, text: &'a str) -> Self {
        self.flavor_text = text;
        self
    }

    pub fn focused(mut self, focused: FocusedControl) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for SceneWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (position, total) = self.progress;
        let block = Block::default()
            .title(format!(" Stop {position} of {total} "))
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(true));
        block.render(area, buf);

        let heading = Line::from(Span::styled(
            self.node.title.as_str(),
            self.theme.title_style(false),
        ));
        Paragraph::new(heading).render(self.layout.heading_area, buf);

        Paragraph::new(Span::styled(
            self.node.description.as_str(),
            self.theme.description_style(),
        ))
        .wrap(Wrap { trim: true })
        .render(self.layout.text_area, buf);

        Paragraph::new(Span::styled(self.flavor_text, self.theme.flavor_style()))
            .wrap(Wrap { trim: true })
            .render(self.layout.flavor_area, buf);

        return_button(self.theme)
            .focused(self.focused == FocusedControl::ReturnToMap)
            .render(self.layout.return_button, buf);
        continue_button(self.theme)
            .focused(self.focused == FocusedControl::Continue)
            .render(self.layout.continue_button, buf);
    }
}
