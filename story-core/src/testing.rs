//! Testing utilities for the story screen.
//!
//! `TestHarness` runs scripted action sequences against a screen and records
//! every intermediate state so tests can assert on whole trajectories.

use std::cell::Cell;
use std::rc::Rc;

use crate::node::{NodeList, StoryNode};
use crate::screen::{Action, Layer, ScreenState, StoryScreen};

/// Scripted driver around a `StoryScreen`.
pub struct TestHarness {
    screen: StoryScreen,
    history: Vec<ScreenState>,
    close_calls: Rc<Cell<usize>>,
}

impl TestHarness {
    /// Harness over the built-in story.
    pub fn new() -> Self {
        Self::with_screen(StoryScreen::builtin())
    }

    /// Harness over a generated story with `count` nodes.
    ///
    /// # Panics
    ///
    /// Panics if `count` is zero.
    pub fn with_node_count(count: usize) -> Self {
        let nodes = (0..count)
            .map(|id| StoryNode::new(id, format!("Stop {}", id + 1), format!("Description {id}")))
            .collect();
        let nodes = NodeList::new(nodes).expect("node count must be positive");
        Self::with_screen(StoryScreen::new("Generated", nodes))
    }

    fn with_screen(screen: StoryScreen) -> Self {
        let close_calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&close_calls);
        let screen = screen.with_on_close(move || counter.set(counter.get() + 1));
        let history = vec![screen.state()];

        Self {
            screen,
            history,
            close_calls,
        }
    }

    /// Apply one action and record the resulting state.
    pub fn act(&mut self, action: Action) -> ScreenState {
        self.screen.dispatch(action);
        let state = self.screen.state();
        self.history.push(state);
        state
    }

    /// Apply a sequence of actions, returning the final state.
    pub fn run(&mut self, actions: &[Action]) -> ScreenState {
        for action in actions {
            self.act(*action);
        }
        self.screen.state()
    }

    pub fn screen(&self) -> &StoryScreen {
        &self.screen
    }

    /// Every state seen, starting with the initial one.
    pub fn history(&self) -> &[ScreenState] {
        &self.history
    }

    /// How many times the close hook has fired.
    pub fn close_calls(&self) -> usize {
        self.close_calls.get()
    }

    // ========================================================================
    // Assertions
    // ========================================================================

    pub fn assert_state(&self, layer: Layer, current_index: usize) {
        assert_eq!(
            self.screen.state(),
            ScreenState {
                layer,
                current_index
            },
            "unexpected screen state after {} actions",
            self.history.len() - 1
        );
    }

    /// Assert the current index never went down across the recorded history.
    pub fn assert_index_monotonic(&self) {
        for pair in self.history.windows(2) {
            assert!(
                pair[1].current_index >= pair[0].current_index,
                "index decreased: {:?} -> {:?}",
                pair[0],
                pair[1]
            );
        }
    }

    /// Assert every recorded index was valid for the node list.
    pub fn assert_index_in_range(&self) {
        let len = self.screen.nodes().len();
        for state in &self.history {
            assert!(state.current_index < len, "index out of range: {state:?}");
        }
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
