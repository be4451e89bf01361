//! Headless interface for driving the screen without a terminal UI.
//!
//! Used for scripted sessions and tests: each input line is parsed into a
//! `HeadlessCommand`, executed against the screen, and answered with plain
//! text.
//!
//! # Example
//!
//! ```
//! use story_core::{HeadlessScreen, StoryConfig};
//!
//! let mut game = HeadlessScreen::new(StoryConfig::default()).unwrap();
//! let reply = game.execute_line("enter").unwrap();
//! assert!(reply.text.contains("The Gate at Dawn"));
//! ```

use std::cell::Cell;
use std::rc::Rc;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::screen::{Layer, ScreenState, StoryScreen};
use crate::session::{StoryConfig, StoryError};

/// A command accepted by the headless driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadlessCommand {
    Enter,
    Map,
    Continue,
    Close,
    Status,
    Show,
    Help,
    Quit,
}

/// Failure to parse a command line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseCommandError {
    #[error("Empty command")]
    Empty,

    #[error("Unknown command: {0}")]
    Unknown(String),
}

impl FromStr for HeadlessCommand {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let word = s.split_whitespace().next().ok_or(ParseCommandError::Empty)?;
        let word = word.strip_prefix('#').unwrap_or(word);

        match word.to_ascii_lowercase().as_str() {
            "enter" | "begin" => Ok(Self::Enter),
            "map" | "back" => Ok(Self::Map),
            "continue" | "next" => Ok(Self::Continue),
            "close" => Ok(Self::Close),
            "status" => Ok(Self::Status),
            "show" | "look" => Ok(Self::Show),
            "help" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            _ => Err(ParseCommandError::Unknown(word.to_string())),
        }
    }
}

/// Output of a single command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    /// The driver should stop reading input.
    pub quit: bool,
}

impl Reply {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            quit: false,
        }
    }

    fn quit(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            quit: true,
        }
    }
}

#[derive(Serialize)]
struct StatusReport<'a> {
    #[serde(flatten)]
    state: ScreenState,
    title: &'a str,
    position: usize,
    total: usize,
}

/// Help text listing every command.
pub const HELP_TEXT: &str = "\
Commands:
  enter     - Open the scene reader (from the first stop)
  map       - Return to the map
  continue  - Advance to the next stop
  close     - Dismiss the screen
  status    - Show the current state as JSON
  show      - Redraw the current layer
  help      - Show this help
  quit      - Exit";

/// A story screen driven by text commands.
pub struct HeadlessScreen {
    screen: StoryScreen,
    close_requested: Rc<Cell<bool>>,
}

impl HeadlessScreen {
    /// Build the screen and wire its close hook to the driver.
    pub fn new(config: StoryConfig) -> Result<Self, StoryError> {
        let close_requested = Rc::new(Cell::new(false));
        let flag = Rc::clone(&close_requested);
        let screen = config.build()?.with_on_close(move || flag.set(true));

        Ok(Self {
            screen,
            close_requested,
        })
    }

    pub fn screen(&self) -> &StoryScreen {
        &self.screen
    }

    /// Whether `close` has been requested.
    pub fn close_requested(&self) -> bool {
        self.close_requested.get()
    }

    /// Parse and execute one input line.
    pub fn execute_line(&mut self, line: &str) -> Result<Reply, StoryError> {
        match line.parse::<HeadlessCommand>() {
            Ok(command) => self.execute(command),
            Err(ParseCommandError::Empty) => Ok(Reply::text("")),
            Err(e) => {
                warn!(line, "rejected headless command");
                Ok(Reply::text(format!("[ERROR] {e}")))
            }
        }
    }

    /// Execute a parsed command.
    pub fn execute(&mut self, command: HeadlessCommand) -> Result<Reply, StoryError> {
        debug!(?command, "headless command");

        let reply = match command {
            HeadlessCommand::Enter => {
                if self.screen.layer() == Layer::Scene {
                    Reply::text("[INFO] Already reading a scene.")
                } else {
                    self.screen.enter_scene();
                    Reply::text(self.render())
                }
            }
            HeadlessCommand::Map => {
                self.screen.return_to_map();
                Reply::text(self.render())
            }
            HeadlessCommand::Continue => {
                if self.screen.layer() == Layer::Map {
                    Reply::text("[INFO] Nothing to continue. Use 'enter' first.")
                } else {
                    let finished = self.screen.is_last();
                    self.screen.advance();
                    if finished {
                        Reply::text(format!("[COMPLETE] Story complete.\n\n{}", self.render()))
                    } else {
                        Reply::text(self.render())
                    }
                }
            }
            HeadlessCommand::Close => {
                self.screen.close();
                Reply::quit("[CLOSED] Screen dismissed.")
            }
            HeadlessCommand::Status => Reply::text(self.status_json()?),
            HeadlessCommand::Show => Reply::text(self.render()),
            HeadlessCommand::Help => Reply::text(HELP_TEXT),
            HeadlessCommand::Quit => Reply::quit("Goodbye!"),
        };

        Ok(reply)
    }

    /// Current state plus the current node title, as JSON.
    pub fn status_json(&self) -> Result<String, StoryError> {
        let (position, total) = self.screen.progress();
        let report = StatusReport {
            state: self.screen.state(),
            title: &self.screen.current_node().title,
            position,
            total,
        };
        Ok(serde_json::to_string(&report)?)
    }

    /// Plain text rendition of the active layer.
    pub fn render(&self) -> String {
        match self.screen.layer() {
            Layer::Map => render_map(&self.screen),
            Layer::Scene => render_scene(&self.screen),
        }
    }
}

/// Plain text map: one line per stop plus its description.
pub fn render_map(screen: &StoryScreen) -> String {
    let mut out = format!("=== {} ===\n", screen.title());

    for node in screen.nodes() {
        let badge = if node.completed { "x" } else { " " };
        out.push_str(&format!("{:>2}. [{badge}] {}\n", node.position(), node.title));
        out.push_str(&format!("       {}\n", node.description));
        if screen.can_enter_from(node.id) {
            out.push_str("       > Begin (enter)\n");
        }
    }

    out
}

/// Plain text scene for the current node.
pub fn render_scene(screen: &StoryScreen) -> String {
    let node = screen.current_node();
    let (position, total) = screen.progress();

    format!(
        "--- {} ({position}/{total}) ---\n{}\n\n{}\n\n[Return to Map (map)]  [Continue (continue)]",
        node.title,
        node.description,
        screen.flavor_text(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game() -> HeadlessScreen {
        HeadlessScreen::new(StoryConfig::default()).unwrap()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!("enter".parse::<HeadlessCommand>(), Ok(HeadlessCommand::Enter));
        assert_eq!("#quit".parse::<HeadlessCommand>(), Ok(HeadlessCommand::Quit));
        assert_eq!("  Next  ".parse::<HeadlessCommand>(), Ok(HeadlessCommand::Continue));
        assert_eq!("".parse::<HeadlessCommand>(), Err(ParseCommandError::Empty));
        assert_eq!(
            "dance".parse::<HeadlessCommand>(),
            Err(ParseCommandError::Unknown("dance".to_string()))
        );
    }

    #[test]
    fn test_unknown_command_is_reported() {
        let mut game = game();
        let reply = game.execute_line("dance").unwrap();
        assert_eq!(reply.text, "[ERROR] Unknown command: dance");
        assert!(!reply.quit);
    }

    #[test]
    fn test_map_lists_all_stops_with_one_begin() {
        let game = game();
        let text = game.render();
        for node in game.screen().nodes() {
            assert!(text.contains(&node.title));
        }
        assert_eq!(text.matches("Begin").count(), 1);
    }

    #[test]
    fn test_status_json() {
        let mut game = game();
        game.execute(HeadlessCommand::Enter).unwrap();
        game.execute(HeadlessCommand::Continue).unwrap();

        let json: serde_json::Value = serde_json::from_str(&game.status_json().unwrap()).unwrap();
        assert_eq!(json["layer"], "scene");
        assert_eq!(json["current_index"], 1);
        assert_eq!(json["position"], 2);
        assert_eq!(json["total"], 4);
        assert_eq!(json["title"], "Market of Whispers");
    }

    #[test]
    fn test_continue_on_map_does_nothing() {
        let mut game = game();
        let reply = game.execute(HeadlessCommand::Continue).unwrap();
        assert!(reply.text.starts_with("[INFO]"));
        assert_eq!(game.screen().state(), ScreenState::new());
    }

    #[test]
    fn test_story_completion_message() {
        let mut game = game();
        game.execute(HeadlessCommand::Enter).unwrap();
        for _ in 0..3 {
            game.execute(HeadlessCommand::Continue).unwrap();
        }
        let reply = game.execute(HeadlessCommand::Continue).unwrap();
        assert!(reply.text.starts_with("[COMPLETE]"));
        assert_eq!(game.screen().layer(), Layer::Map);
        assert_eq!(game.screen().current_index(), 3);
    }

    #[test]
    fn test_close_sets_flag_and_quits() {
        let mut game = game();
        assert!(!game.close_requested());
        let reply = game.execute(HeadlessCommand::Close).unwrap();
        assert!(reply.quit);
        assert!(game.close_requested());
    }
}
