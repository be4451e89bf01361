//! TUI widgets for the story screen

pub mod button;
pub mod map;
pub mod scene;
pub mod status_bar;

pub use button::Icon;
pub use map::MapWidget;
pub use scene::SceneWidget;
pub use status_bar::{HotkeyBarWidget, StatusBarWidget};
