//! Render orchestration for the story TUI

use ratatui::{
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use story_core::{Action, Layer};

use crate::app::{App, FocusedControl};
use crate::ui::layout::{centered_rect_fixed, map_stops, SceneLayout, ScreenLayout, StopArea};
use crate::ui::widgets::map::begin_button;
use crate::ui::widgets::scene::{continue_button, return_button};
use crate::ui::widgets::{HotkeyBarWidget, Icon, MapWidget, SceneWidget, StatusBarWidget};

/// Overlay types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    Help,
}

/// Main render function
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let layout = ScreenLayout::calculate(area);

    render_title_bar(frame, app, layout.title_area);

    match app.layer() {
        Layer::Map => render_map(frame, app, &layout),
        Layer::Scene => render_scene(frame, app, &layout),
    }

    let status = StatusBarWidget::new(app.layer(), app.screen.progress(), &app.theme)
        .message(app.status_message());
    frame.render_widget(status, layout.status_bar);
    frame.render_widget(HotkeyBarWidget::new(app.layer()), layout.hotkey_bar);

    if let Some(overlay) = app.overlay() {
        render_overlay(frame, app, *overlay, area);
    }
}

/// Visible stops for the map layer
fn visible_stops(app: &App, layout: &ScreenLayout) -> Vec<StopArea> {
    let button_width = begin_button(&app.theme).width();
    map_stops(
        layout.body_inner(),
        app.screen.nodes().len(),
        app.map_cursor,
        button_width,
        |index| app.screen.can_enter_from(index),
    )
}

fn scene_layout(app: &App, layout: &ScreenLayout) -> SceneLayout {
    SceneLayout::calculate(
        layout.body_inner(),
        return_button(&app.theme).width(),
        continue_button(&app.theme).width(),
    )
}

/// Screen areas of the buttons currently on screen, with their actions
pub fn control_areas(app: &App, area: Rect) -> Vec<(Rect, Action)> {
    let layout = ScreenLayout::calculate(area);

    match app.layer() {
        Layer::Map => visible_stops(app, &layout)
            .into_iter()
            .filter_map(|stop| stop.button.map(|rect| (rect, Action::EnterScene)))
            .collect(),
        Layer::Scene => {
            let scene = scene_layout(app, &layout);
            vec![
                (scene.return_button, FocusedControl::ReturnToMap.action()),
                (scene.continue_button, FocusedControl::Continue.action()),
            ]
        }
    }
}

/// Action of the button under a terminal cell, if any
pub fn control_at(app: &App, column: u16, row: u16) -> Option<Action> {
    let position = Position::new(column, row);
    control_areas(app, app.viewport)
        .into_iter()
        .find(|(rect, _)| rect.contains(position))
        .map(|(_, action)| action)
}

fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let title = match app.layer() {
        Layer::Map => format!(" {} {} ", Icon::Book.glyph(), app.screen.title()),
        Layer::Scene => format!(
            " {} {} - {} ",
            Icon::Book.glyph(),
            app.screen.title(),
            app.screen.current_node().title
        ),
    };

    let line = Line::from(Span::styled(
        title,
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(line), area);
}

fn render_map(frame: &mut Frame, app: &App, layout: &ScreenLayout) {
    let stops = visible_stops(app, layout);
    let widget = MapWidget::new(
        app.screen.title(),
        app.screen.nodes().as_slice(),
        &stops,
        &app.theme,
    )
    .cursor(app.map_cursor);
    frame.render_widget(widget, layout.body_area);
}

fn render_scene(frame: &mut Frame, app: &App, layout: &ScreenLayout) {
    let scene = scene_layout(app, layout);
    let widget = SceneWidget::new(app.screen.current_node(), &scene, &app.theme)
        .progress(app.screen.progress())
        .flavor_text(app.screen.flavor_text())
        .focused(app.focused_control);
    frame.render_widget(widget, layout.body_area);
}

fn render_overlay(frame: &mut Frame, app: &App, overlay: Overlay, area: Rect) {
    match overlay {
        Overlay::Help => render_help_overlay(frame, app, area),
    }
}

fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let popup_area = centered_rect_fixed(46, 18, area);

    // Clear the background
    frame.render_widget(Clear, popup_area);

    let heading = Style::default().add_modifier(Modifier::UNDERLINED);
    let help_text = vec![
        Line::from(Span::styled(
            " Story - Help ",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled("Map:", heading)),
        Line::from("  j/k or ↑/↓     Select a stop"),
        Line::from("  Enter/Space    Activate selected stop"),
        Line::from("  b              Begin the story"),
        Line::from(""),
        Line::from(Span::styled("Scene:", heading)),
        Line::from("  Tab or ←/→     Switch button focus"),
        Line::from("  Enter/Space    Press focused button"),
        Line::from("  n/c            Continue"),
        Line::from("  m/Esc          Return to map"),
        Line::from(""),
        Line::from("  q              Close    ?  Toggle help"),
        Line::from(""),
        Line::from(Span::styled(
            "Press Esc or q to close",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(app.theme.border_style(true));

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, popup_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};
    use story_core::StoryScreen;

    fn draw(app: &App) -> String {
        let backend = TestBackend::new(80, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();

        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn app() -> App {
        let mut app = App::new(StoryScreen::builtin());
        app.viewport = Rect::new(0, 0, 80, 30);
        app
    }

    #[test]
    fn test_map_lists_every_stop_with_single_begin() {
        let app = app();
        let screen = draw(&app);
        for node in app.screen.nodes() {
            assert!(screen.contains(&node.title), "missing {}", node.title);
        }
        assert_eq!(screen.matches("Begin ]").count(), 1);
        assert!(screen.contains("-- MAP --"));
    }

    #[test]
    fn test_scene_shows_current_node_and_buttons() {
        let mut app = app();
        app.press(Action::EnterScene);
        app.press(Action::Advance);
        let screen = draw(&app);

        assert!(screen.contains("Market of Whispers"));
        assert!(screen.contains("Stop 2 of 4"));
        assert!(screen.contains("Return to Map"));
        assert!(screen.contains("→ Continue"));
        assert!(!screen.contains("Lantern Hill"));
    }

    #[test]
    fn test_control_areas_match_layer() {
        let mut app = app();
        let map_controls = control_areas(&app, app.viewport);
        assert_eq!(map_controls.len(), 1);
        assert_eq!(map_controls[0].1, Action::EnterScene);

        app.press(Action::EnterScene);
        let actions: Vec<Action> = control_areas(&app, app.viewport)
            .into_iter()
            .map(|(_, action)| action)
            .collect();
        assert_eq!(actions, vec![Action::ReturnToMap, Action::Advance]);
    }

    #[test]
    fn test_control_at_hits_begin_button() {
        let app = app();
        let (rect, _) = control_areas(&app, app.viewport)[0];
        assert_eq!(control_at(&app, rect.x, rect.y), Some(Action::EnterScene));
        assert_eq!(control_at(&app, 0, 0), None);
    }

    #[test]
    fn test_help_overlay() {
        let mut app = app();
        app.toggle_help();
        assert!(draw(&app).contains("Story - Help"));
    }
}
