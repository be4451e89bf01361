//! Headless mode for the story screen.
//!
//! A line-oriented interface for running the screen without a TUI, meant for
//! scripted testing.

use std::io::{self, BufRead, Write};

use story_core::headless::HELP_TEXT;
use story_core::{HeadlessScreen, StoryConfig, StoryError};
use tracing::info;

/// Run the screen in headless mode.
///
/// Each input line is one command (`enter`, `map`, `continue`, `close`,
/// `status`, `show`, `help`, `quit`). Replies are printed to stdout.
pub fn run_headless(config: StoryConfig) -> Result<(), StoryError> {
    let mut game = HeadlessScreen::new(config)?;

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    writeln!(stdout, "=== Story Headless Mode ===")?;
    writeln!(stdout, "{HELP_TEXT}")?;
    writeln!(stdout)?;
    writeln!(stdout, "{}", game.render())?;
    stdout.flush()?;

    for line in stdin.lock().lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let reply = game.execute_line(line)?;
        writeln!(stdout, "{}", reply.text)?;
        writeln!(stdout)?;
        stdout.flush()?;

        if reply.quit {
            break;
        }
    }

    info!(
        closed = game.close_requested(),
        state = ?game.screen().state(),
        "headless session ended"
    );
    Ok(())
}
