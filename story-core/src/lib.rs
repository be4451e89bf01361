//! Story map and scene reader.
//!
//! This crate provides:
//! - The static story content (`StoryNode`, `NodeList`)
//! - The two-layer view controller (`StoryScreen`) and its pure transitions
//! - A headless, line-oriented driver for scripted sessions
//!
//! # Quick Start
//!
//! ```
//! use story_core::{Layer, StoryConfig};
//!
//! let mut screen = StoryConfig::new("The Long Road").build().unwrap();
//! assert_eq!(screen.layer(), Layer::Map);
//!
//! screen.enter_scene();
//! screen.advance();
//! assert_eq!(screen.current_index(), 1);
//! ```

pub mod headless;
pub mod node;
pub mod screen;
pub mod session;
pub mod testing;

// Primary public API
pub use headless::{HeadlessCommand, HeadlessScreen, ParseCommandError};
pub use node::{NodeList, StoryNode};
pub use screen::{Action, Layer, ScreenState, StoryScreen};
pub use session::{StoryConfig, StoryError};
pub use testing::TestHarness;
