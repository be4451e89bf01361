//! Screen configuration and errors.
//!
//! `StoryConfig` is the builder hosts use to assemble a `StoryScreen`. Only
//! the node list can be invalid, so `build` is the single fallible step.

use thiserror::Error;

use crate::node::{NodeList, StoryNode};
use crate::screen::{StoryScreen, DEFAULT_FLAVOR_TEXT};

/// Errors from building or driving a story screen.
#[derive(Debug, Error)]
pub enum StoryError {
    #[error("Story has no nodes")]
    EmptyStory,

    #[error("Node at position {position} has id {id}")]
    IdMismatch { position: usize, id: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Configuration for a story screen.
#[derive(Debug, Clone)]
pub struct StoryConfig {
    /// Title shown above the map.
    pub title: String,

    /// Custom node list. `None` uses the built-in story.
    pub nodes: Option<Vec<StoryNode>>,

    /// Text shown under every scene.
    pub flavor_text: String,
}

impl StoryConfig {
    /// Create a config with the given title and built-in content.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            nodes: None,
            flavor_text: DEFAULT_FLAVOR_TEXT.to_string(),
        }
    }

    /// Use a custom node list.
    pub fn with_nodes(mut self, nodes: Vec<StoryNode>) -> Self {
        self.nodes = Some(nodes);
        self
    }

    /// Set the scene flavor text.
    pub fn with_flavor_text(mut self, text: impl Into<String>) -> Self {
        self.flavor_text = text.into();
        self
    }

    /// Validate the nodes and build the screen.
    pub fn build(self) -> Result<StoryScreen, StoryError> {
        let nodes = match self.nodes {
            Some(nodes) => NodeList::new(nodes)?,
            None => NodeList::builtin(),
        };

        Ok(StoryScreen::new(self.title, nodes).with_flavor_text(self.flavor_text))
    }
}

impl Default for StoryConfig {
    fn default() -> Self {
        Self::new("The Long Road")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen::Layer;

    #[test]
    fn test_default_build() {
        let screen = StoryConfig::default().build().unwrap();
        assert_eq!(screen.title(), "The Long Road");
        assert_eq!(screen.nodes().len(), 4);
        assert_eq!(screen.layer(), Layer::Map);
        assert_eq!(screen.flavor_text(), DEFAULT_FLAVOR_TEXT);
    }

    #[test]
    fn test_custom_nodes() {
        let screen = StoryConfig::new("Short")
            .with_nodes(vec![StoryNode::new(0, "Only", "the one stop")])
            .with_flavor_text("quiet")
            .build()
            .unwrap();
        assert_eq!(screen.nodes().len(), 1);
        assert_eq!(screen.flavor_text(), "quiet");
    }

    #[test]
    fn test_empty_nodes_error() {
        let err = StoryConfig::new("Empty").with_nodes(vec![]).build().unwrap_err();
        assert!(matches!(err, StoryError::EmptyStory));
        assert_eq!(err.to_string(), "Story has no nodes");
    }
}
