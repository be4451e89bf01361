//! The map/scene view controller.
//!
//! `ScreenState` holds the two pieces of view state and exposes pure
//! transitions. `StoryScreen` owns the node list, the current state and the
//! optional close hook, and is what a host drives from its input handlers.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::node::{NodeList, StoryNode};

/// Which layout is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    /// Overview of every stop.
    #[default]
    Map,
    /// Reader for the current stop.
    Scene,
}

impl std::fmt::Display for Layer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Layer::Map => write!(f, "map"),
            Layer::Scene => write!(f, "scene"),
        }
    }
}

/// A user-triggered operation on the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    EnterScene,
    ReturnToMap,
    Advance,
    /// Ask the host to dismiss the screen. Does not change state.
    Close,
}

/// View state: the active layer and the index of the current node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScreenState {
    pub layer: Layer,
    pub current_index: usize,
}

impl ScreenState {
    /// Starting state: map layer, first node.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enter_scene(self) -> Self {
        Self {
            layer: Layer::Scene,
            ..self
        }
    }

    pub fn return_to_map(self) -> Self {
        Self {
            layer: Layer::Map,
            ..self
        }
    }

    /// Move to the next node, or back to the map when already on the last one.
    ///
    /// `node_count` must be at least one.
    pub fn advance(self, node_count: usize) -> Self {
        if self.current_index + 1 < node_count {
            Self {
                current_index: self.current_index + 1,
                ..self
            }
        } else {
            self.return_to_map()
        }
    }

    /// Apply an action and return the next state.
    pub fn apply(self, action: Action, node_count: usize) -> Self {
        match action {
            Action::EnterScene => self.enter_scene(),
            Action::ReturnToMap => self.return_to_map(),
            Action::Advance => self.advance(node_count),
            Action::Close => self,
        }
    }
}

/// Callback invoked when the screen asks to be dismissed.
pub type CloseHook = Box<dyn FnMut()>;

/// The story screen controller.
pub struct StoryScreen {
    title: String,
    nodes: NodeList,
    flavor_text: String,
    state: ScreenState,
    on_close: Option<CloseHook>,
}

impl std::fmt::Debug for StoryScreen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoryScreen")
            .field("title", &self.title)
            .field("nodes", &self.nodes.len())
            .field("state", &self.state)
            .field("on_close", &self.on_close.is_some())
            .finish()
    }
}

/// Flavor text shown under every scene.
pub const DEFAULT_FLAVOR_TEXT: &str =
    "The road goes on. Whatever you decide here will follow you to the next stop.";

impl StoryScreen {
    /// Create a screen over a validated node list.
    pub fn new(title: impl Into<String>, nodes: NodeList) -> Self {
        Self {
            title: title.into(),
            nodes,
            flavor_text: DEFAULT_FLAVOR_TEXT.to_string(),
            state: ScreenState::new(),
            on_close: None,
        }
    }

    /// Screen over the built-in story.
    pub fn builtin() -> Self {
        Self::new("The Long Road", NodeList::builtin())
    }

    /// Install the close hook.
    pub fn with_on_close(mut self, hook: impl FnMut() + 'static) -> Self {
        self.on_close = Some(Box::new(hook));
        self
    }

    pub fn with_flavor_text(mut self, text: impl Into<String>) -> Self {
        self.flavor_text = text.into();
        self
    }

    // ========================================================================
    // Operations
    // ========================================================================

    pub fn enter_scene(&mut self) {
        self.transition(Action::EnterScene);
    }

    pub fn return_to_map(&mut self) {
        self.transition(Action::ReturnToMap);
    }

    pub fn advance(&mut self) {
        self.transition(Action::Advance);
    }

    /// Invoke the close hook. Returns whether a hook was installed.
    pub fn close(&mut self) -> bool {
        match self.on_close.as_mut() {
            Some(hook) => {
                debug!("close requested, invoking hook");
                hook();
                true
            }
            None => {
                debug!("close requested, no hook installed");
                false
            }
        }
    }

    /// Route an action to the matching operation.
    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Close => {
                self.close();
            }
            _ => self.transition(action),
        }
    }

    fn transition(&mut self, action: Action) {
        let before = self.state;
        self.state = before.apply(action, self.nodes.len());
        debug!(
            ?action,
            from_layer = %before.layer,
            from_index = before.current_index,
            to_layer = %self.state.layer,
            to_index = self.state.current_index,
            "screen transition"
        );
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn flavor_text(&self) -> &str {
        &self.flavor_text
    }

    pub fn state(&self) -> ScreenState {
        self.state
    }

    pub fn layer(&self) -> Layer {
        self.state.layer
    }

    pub fn current_index(&self) -> usize {
        self.state.current_index
    }

    pub fn nodes(&self) -> &NodeList {
        &self.nodes
    }

    pub fn current_node(&self) -> &StoryNode {
        &self.nodes[self.state.current_index]
    }

    /// Whether the current node is the last one.
    pub fn is_last(&self) -> bool {
        self.state.current_index == self.nodes.last_index()
    }

    /// 1-based position of the current node and the node count.
    pub fn progress(&self) -> (usize, usize) {
        (self.state.current_index + 1, self.nodes.len())
    }

    /// Whether the map shows an "enter scene" control on the stop at `index`.
    ///
    /// Only the first stop has one, regardless of completion.
    pub fn can_enter_from(&self, index: usize) -> bool {
        index == 0
    }

    pub fn has_close_hook(&self) -> bool {
        self.on_close.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_initial_state() {
        let screen = StoryScreen::builtin();
        assert_eq!(
            screen.state(),
            ScreenState {
                layer: Layer::Map,
                current_index: 0
            }
        );
    }

    #[test]
    fn test_enter_and_return_keep_index() {
        let state = ScreenState {
            layer: Layer::Map,
            current_index: 2,
        };
        let scene = state.enter_scene();
        assert_eq!(scene.layer, Layer::Scene);
        assert_eq!(scene.current_index, 2);

        let map = scene.return_to_map();
        assert_eq!(map.layer, Layer::Map);
        assert_eq!(map.current_index, 2);
    }

    #[test]
    fn test_advance_at_last_returns_to_map() {
        let state = ScreenState {
            layer: Layer::Scene,
            current_index: 3,
        };
        let next = state.advance(4);
        assert_eq!(next.layer, Layer::Map);
        assert_eq!(next.current_index, 3);
    }

    #[test]
    fn test_single_node_advance() {
        let state = ScreenState::new().enter_scene().advance(1);
        assert_eq!(state, ScreenState::new());
    }

    #[test]
    fn test_close_action_is_noop_on_state() {
        let state = ScreenState::new().enter_scene();
        assert_eq!(state.apply(Action::Close, 4), state);
    }

    #[test]
    fn test_close_hook_invoked() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let mut screen = StoryScreen::builtin().with_on_close(move || counter.set(counter.get() + 1));

        assert!(screen.has_close_hook());
        assert!(screen.close());
        screen.dispatch(Action::Close);
        assert_eq!(calls.get(), 2);
        assert_eq!(screen.state(), ScreenState::new());
    }

    #[test]
    fn test_close_without_hook() {
        let mut screen = StoryScreen::builtin();
        assert!(!screen.close());
    }

    #[test]
    fn test_only_first_stop_can_enter() {
        let screen = StoryScreen::builtin();
        assert!(screen.can_enter_from(0));
        for i in 1..screen.nodes().len() {
            assert!(!screen.can_enter_from(i));
        }
    }

    #[test]
    fn test_progress_and_current_node() {
        let mut screen = StoryScreen::builtin();
        screen.enter_scene();
        screen.advance();
        assert_eq!(screen.progress(), (2, 4));
        assert_eq!(screen.current_node().id, 1);
        assert!(!screen.is_last());
    }

    #[test]
    fn test_layer_display() {
        assert_eq!(Layer::Map.to_string(), "map");
        assert_eq!(Layer::Scene.to_string(), "scene");
    }
}
