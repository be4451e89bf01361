//! Status bar widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use story_core::Layer;

use crate::ui::theme::StoryTheme;

/// Status bar showing the layer, progress and the last message
pub struct StatusBarWidget<'a> {
    layer: Layer,
    progress: (usize, usize),
    theme: &'a StoryTheme,
    message: Option<&'a str>,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(layer: Layer, progress: (usize, usize), theme: &'a StoryTheme) -> Self {
        Self {
            layer,
            progress,
            theme,
            message: None,
        }
    }

    pub fn message(mut self, message: Option<&'a str>) -> Self {
        self.message = message;
        self
    }
}

impl Widget for StatusBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (layer_text, layer_style) = match self.layer {
            Layer::Map => ("MAP", Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD)),
            Layer::Scene => ("SCENE", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
        };
        let (position, total) = self.progress;

        let mut spans = vec![
            Span::styled(format!("-- {layer_text} --"), layer_style),
            Span::raw(" | "),
            Span::styled(format!("Stop {position}/{total}"), Style::default().fg(self.theme.foreground)),
        ];

        if let Some(msg) = self.message {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(msg, Style::default().add_modifier(Modifier::DIM)));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

/// Hotkey bar widget
pub struct HotkeyBarWidget {
    layer: Layer,
}

impl HotkeyBarWidget {
    pub fn new(layer: Layer) -> Self {
        Self { layer }
    }
}

impl Widget for HotkeyBarWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let hotkeys = match self.layer {
            Layer::Map => vec![
                ("j/k:select", true),
                ("Enter:activate", true),
                ("b:begin", true),
                ("q:close", false),
                ("?:help", false),
            ],
            Layer::Scene => vec![
                ("Tab:focus", true),
                ("Enter:press", true),
                ("n:continue", true),
                ("m:map", true),
                ("q:close", false),
                ("?:help", false),
            ],
        };

        let spans: Vec<Span> = hotkeys
            .iter()
            .flat_map(|(text, primary)| {
                let style = if *primary {
                    Style::default()
                } else {
                    Style::default().add_modifier(Modifier::DIM)
                };
                vec![Span::styled(*text, style), Span::raw("  ")]
            })
            .collect();

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
