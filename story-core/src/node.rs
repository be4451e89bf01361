//! Story nodes and the validated node sequence.

use serde::{Deserialize, Serialize};

use crate::session::StoryError;

/// Built-in story content: (title, description, completed).
const BUILTIN_STOPS: [(&str, &str, bool); 4] = [
    (
        "The Gate at Dawn",
        "A traveller waits outside the walled town, ledger in hand, as the bells ring the hour.",
        true,
    ),
    (
        "Market of Whispers",
        "Stalls trade in rumours as much as grain. Someone has been asking after you by name.",
        false,
    ),
    (
        "The Flooded Archive",
        "Half the shelves stand in black water. The map you need is on the lowest one.",
        false,
    ),
    (
        "Lantern Hill",
        "From the summit the whole road is visible, and so is whoever has been following.",
        false,
    ),
];

/// One stop on the story map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryNode {
    /// Position in the sequence.
    pub id: usize,
    pub title: String,
    pub description: String,
    /// Only affects the badge color.
    pub completed: bool,
}

impl StoryNode {
    pub fn new(id: usize, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            completed: false,
        }
    }

    /// Mark the node as completed (or not).
    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    /// 1-based position shown on the map.
    pub fn position(&self) -> usize {
        self.id + 1
    }
}

/// A non-empty sequence of nodes whose ids match their positions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeList {
    nodes: Vec<StoryNode>,
}

impl NodeList {
    /// Validate and wrap a node sequence.
    pub fn new(nodes: Vec<StoryNode>) -> Result<Self, StoryError> {
        if nodes.is_empty() {
            return Err(StoryError::EmptyStory);
        }

        if let Some((position, node)) = nodes.iter().enumerate().find(|(i, n)| n.id != *i) {
            return Err(StoryError::IdMismatch {
                position,
                id: node.id,
            });
        }

        Ok(Self { nodes })
    }

    /// The built-in four-stop story.
    pub fn builtin() -> Self {
        let nodes = BUILTIN_STOPS
            .iter()
            .enumerate()
            .map(|(id, (title, description, completed))| {
                StoryNode::new(id, *title, *description).completed(*completed)
            })
            .collect();

        Self { nodes }
    }

    /// Number of nodes. Always at least one.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn get(&self, index: usize) -> Option<&StoryNode> {
        self.nodes.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StoryNode> {
        self.nodes.iter()
    }

    pub fn as_slice(&self) -> &[StoryNode] {
        &self.nodes
    }

    pub fn last_index(&self) -> usize {
        self.nodes.len() - 1
    }
}

impl std::ops::Index<usize> for NodeList {
    type Output = StoryNode;

    fn index(&self, index: usize) -> &StoryNode {
        &self.nodes[index]
    }
}

impl<'a> IntoIterator for &'a NodeList {
    type Item = &'a StoryNode;
    type IntoIter = std::slice::Iter<'a, StoryNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_is_valid() {
        let nodes = NodeList::builtin();
        assert_eq!(nodes.len(), 4);
        assert!(NodeList::new(nodes.as_slice().to_vec()).is_ok());
        for (i, node) in nodes.iter().enumerate() {
            assert_eq!(node.id, i);
            assert_eq!(node.position(), i + 1);
        }
    }

    #[test]
    fn test_empty_rejected() {
        assert!(matches!(NodeList::new(vec![]), Err(StoryError::EmptyStory)));
    }

    #[test]
    fn test_id_mismatch_rejected() {
        let nodes = vec![
            StoryNode::new(0, "A", "first"),
            StoryNode::new(2, "B", "second"),
        ];
        match NodeList::new(nodes) {
            Err(StoryError::IdMismatch { position, id }) => {
                assert_eq!(position, 1);
                assert_eq!(id, 2);
            }
            other => panic!("expected IdMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_completed_builder() {
        let node = StoryNode::new(0, "A", "a").completed(true);
        assert!(node.completed);
        assert!(!StoryNode::new(0, "A", "a").completed);
    }
}
