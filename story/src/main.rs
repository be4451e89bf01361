//! Story map and scene reader TUI.
//!
//! Shows a map of story stops and a reader for the current stop.
//!
//! # Headless Mode
//!
//! Run with `--headless` for a line-oriented interface suitable for scripted testing:
//!
//! ```bash
//! printf 'enter\ncontinue\nstatus\nquit\n' | cargo run -p story -- --headless
//! ```

mod app;
mod events;
mod headless;
mod ui;

use std::cell::Cell;
use std::fs::OpenOptions;
use std::io::{self, stdout};
use std::rc::Rc;
use std::sync::Mutex;
use std::time::Duration;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use story_core::StoryConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

use app::App;
use events::{handle_event, EventResult};
use ui::render::render;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(());
    }

    let headless_mode = args.iter().any(|a| a == "--headless");
    init_logging(headless_mode)?;

    if headless_mode {
        return headless::run_headless(StoryConfig::default()).map_err(|e| e.into());
    }

    // Build before touching the terminal so config errors print normally
    let closed = Rc::new(Cell::new(false));
    let flag = Rc::clone(&closed);
    let screen = StoryConfig::default()
        .build()?
        .with_on_close(move || flag.set(true));

    info!(title = screen.title(), nodes = screen.nodes().len(), "starting story screen");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, App::new(screen));

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
    }

    info!(closed = closed.get(), "story screen exited");
    Ok(())
}

/// Install the tracing subscriber.
///
/// The TUI owns stdout, so it only logs when `STORY_LOG_FILE` is set.
/// Headless mode falls back to stderr.
fn init_logging(headless: bool) -> io::Result<()> {
    let filter = EnvFilter::try_from_env("STORY_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    if let Ok(path) = std::env::var("STORY_LOG_FILE") {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
    } else if headless {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut app: App) -> io::Result<()> {
    loop {
        // Render and remember the frame area for mouse hit testing
        let frame = terminal.draw(|f| render(f, &app))?;
        app.viewport = frame.area;

        if event::poll(Duration::from_millis(100))? {
            let ev = event::read()?;

            match handle_event(&mut app, ev) {
                EventResult::Quit => return Ok(()),
                EventResult::NeedsRedraw | EventResult::Continue => {}
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn print_help() {
    println!("Story - map and scene reader");
    println!();
    println!("USAGE:");
    println!("  story [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("  -h, --help       Show this help message");
    println!("  --headless       Run in headless mode (text-only, no TUI)");
    println!();
    println!("ENVIRONMENT:");
    println!("  STORY_LOG        Log filter (e.g. debug, story_core=trace)");
    println!("  STORY_LOG_FILE   Write logs to this file");
    println!();
    println!("EXAMPLES:");
    println!("  story                                  # Interactive TUI mode");
    println!("  story --headless                       # Line-oriented mode");
    println!("  STORY_LOG=debug STORY_LOG_FILE=story.log story");
}
