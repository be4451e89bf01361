//! Event handling for the story TUI

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use story_core::{Action, Layer};

use crate::app::App;
use crate::ui::render::control_at;

/// Result of handling an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    Continue,
    Quit,
    NeedsRedraw,
}

/// Handle a terminal event
pub fn handle_event(app: &mut App, event: Event) -> EventResult {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Mouse(mouse) => handle_mouse_event(app, mouse),
        Event::Resize(_, _) => EventResult::NeedsRedraw,
        _ => EventResult::Continue,
    }
}

/// Handle a mouse event
fn handle_mouse_event(app: &mut App, mouse: MouseEvent) -> EventResult {
    if app.has_overlay() {
        return EventResult::Continue;
    }

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => match control_at(app, mouse.column, mouse.row) {
            Some(action) => {
                app.press(action);
                EventResult::NeedsRedraw
            }
            None => EventResult::Continue,
        },
        MouseEventKind::ScrollUp if app.layer() == Layer::Map => {
            app.cursor_up();
            EventResult::NeedsRedraw
        }
        MouseEventKind::ScrollDown if app.layer() == Layer::Map => {
            app.cursor_down();
            EventResult::NeedsRedraw
        }
        _ => EventResult::Continue,
    }
}

/// Handle a key event
fn handle_key_event(app: &mut App, key: KeyEvent) -> EventResult {
    // Some terminals also report releases
    if key.kind != KeyEventKind::Press {
        return EventResult::Continue;
    }

    // Global shortcuts (always work)
    if let (KeyCode::Char('c'), KeyModifiers::CONTROL) = (key.code, key.modifiers) {
        return EventResult::Quit;
    }

    // Handle overlay keys first
    if app.has_overlay() {
        return handle_overlay_key(app, key);
    }

    match key.code {
        KeyCode::Char('?') | KeyCode::F(1) => {
            app.toggle_help();
            return EventResult::NeedsRedraw;
        }
        KeyCode::Char('q') => {
            app.close();
            return EventResult::Quit;
        }
        _ => {}
    }

    match app.layer() {
        Layer::Map => handle_map_key(app, key),
        Layer::Scene => handle_scene_key(app, key),
    }
}

/// Handle keys on the map layer
fn handle_map_key(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.cursor_down(),
        KeyCode::Char('k') | KeyCode::Up => app.cursor_up(),
        KeyCode::Char('g') | KeyCode::Home => app.cursor_first(),
        KeyCode::Char('G') | KeyCode::End => app.cursor_last(),
        KeyCode::Enter | KeyCode::Char(' ') => app.activate_map_cursor(),
        // Press the begin control regardless of the cursor
        KeyCode::Char('b') => {
            app.cursor_first();
            app.activate_map_cursor();
        }
        _ => return EventResult::Continue,
    }
    EventResult::NeedsRedraw
}

/// Handle keys on the scene layer
fn handle_scene_key(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Left | KeyCode::Right => app.toggle_focus(),
        KeyCode::Enter | KeyCode::Char(' ') => app.press_focused(),
        KeyCode::Char('n') | KeyCode::Char('c') => app.press(Action::Advance),
        KeyCode::Char('m') | KeyCode::Esc => app.press(Action::ReturnToMap),
        _ => return EventResult::Continue,
    }
    EventResult::NeedsRedraw
}

/// Handle key when overlay is open
fn handle_overlay_key(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
            app.close_overlay();
            EventResult::NeedsRedraw
        }
        _ => EventResult::Continue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::layout::Rect;
    use story_core::StoryScreen;

    use crate::ui::render::control_areas;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn click(column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn app() -> App {
        let mut app = App::new(StoryScreen::builtin());
        app.viewport = Rect::new(0, 0, 80, 30);
        app
    }

    #[test]
    fn test_walk_story_with_keys() {
        let mut app = app();
        assert_eq!(handle_event(&mut app, key(KeyCode::Enter)), EventResult::NeedsRedraw);
        assert_eq!(app.layer(), Layer::Scene);

        for expected in 1..=3 {
            handle_event(&mut app, key(KeyCode::Char('n')));
            assert_eq!(app.screen.current_index(), expected);
        }

        handle_event(&mut app, key(KeyCode::Enter));
        assert_eq!(app.layer(), Layer::Map);
        assert_eq!(app.screen.current_index(), 3);
    }

    #[test]
    fn test_locked_stop_does_not_enter() {
        let mut app = app();
        handle_event(&mut app, key(KeyCode::Char('j')));
        handle_event(&mut app, key(KeyCode::Enter));
        assert_eq!(app.layer(), Layer::Map);

        handle_event(&mut app, key(KeyCode::Char('b')));
        assert_eq!(app.layer(), Layer::Scene);
    }

    #[test]
    fn test_tab_then_enter_returns_to_map() {
        let mut app = app();
        handle_event(&mut app, key(KeyCode::Enter));
        handle_event(&mut app, key(KeyCode::Tab));
        handle_event(&mut app, key(KeyCode::Enter));
        assert_eq!(app.layer(), Layer::Map);
        assert_eq!(app.screen.current_index(), 0);
    }

    #[test]
    fn test_q_closes_and_quits() {
        let mut app = app();
        assert_eq!(handle_event(&mut app, key(KeyCode::Char('q'))), EventResult::Quit);
        assert!(app.should_quit);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut app = app();
        let event = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(handle_event(&mut app, event), EventResult::Quit);
    }

    #[test]
    fn test_help_overlay_swallows_keys() {
        let mut app = app();
        handle_event(&mut app, key(KeyCode::Char('?')));
        assert!(app.has_overlay());

        assert_eq!(handle_event(&mut app, key(KeyCode::Enter)), EventResult::Continue);
        assert_eq!(app.layer(), Layer::Map);

        handle_event(&mut app, key(KeyCode::Esc));
        assert!(!app.has_overlay());
    }

    #[test]
    fn test_click_buttons() {
        let mut app = app();
        let (begin, _) = control_areas(&app, app.viewport)[0];
        handle_event(&mut app, click(begin.x + 1, begin.y));
        assert_eq!(app.layer(), Layer::Scene);

        let (cont, _) = control_areas(&app, app.viewport)[1];
        handle_event(&mut app, click(cont.x, cont.y));
        assert_eq!(app.screen.current_index(), 1);

        assert_eq!(handle_event(&mut app, click(0, 0)), EventResult::Continue);
    }

    #[test]
    fn test_key_release_ignored() {
        let mut app = app();
        let mut release = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(handle_event(&mut app, Event::Key(release)), EventResult::Continue);
        assert_eq!(app.layer(), Layer::Map);
    }
}
