//! View controller keeping the grid in sync with the controls.

use super::filter::is_visible;
use super::grid::{CardGrid, Counter, render_optional};
use crate::models::{Card, CardId, ControlState, Controls, SortMode};
use tracing::{debug, instrument};

/// Recomputes card order and visibility from the current controls.
///
/// Every change recomputes from scratch; there is no incremental diffing and
/// no debouncing, so a burst of control changes simply reruns [`update`]
/// once per change.
///
/// [`update`]: ViewController::update
#[derive(Debug, Clone)]
pub struct ViewController {
    grid: CardGrid,
    result_counter: Option<Counter>,
    state: ControlState,
}

impl ViewController {
    /// Mounts the controller on a set of cards.
    ///
    /// Returns `None` when there are no cards: the controller has nothing to
    /// do and stays inert.
    #[must_use]
    pub fn mount(cards: Vec<Card>, result_counter: Option<Counter>) -> Option<Self> {
        if cards.is_empty() {
            debug!("no cards on page, view controller inert");
            return None;
        }
        Some(Self {
            grid: CardGrid::new(cards),
            result_counter,
            state: ControlState::default(),
        })
    }

    /// Shows or hides every card and refreshes the visible-result counter.
    ///
    /// Returns the number of visible cards.
    #[instrument(skip(self, state), fields(query = %state.query, github_only = state.github_only))]
    pub fn apply_filters(&mut self, state: &ControlState) -> usize {
        for slot in self.grid.slots_mut() {
            slot.visible = is_visible(state, &slot.card);
        }
        let visible = self.grid.visible_count();
        render_optional(self.result_counter.as_mut(), visible);
        debug!(visible, "filters applied");
        visible
    }

    /// Reorders all cards, shown and hidden alike, by score.
    ///
    /// The sort is stable, so running it twice with the same mode leaves the
    /// order unchanged.
    pub fn apply_sort(&mut self, mode: SortMode) {
        self.grid.reattach_sorted(mode);
        debug!(mode = %mode, "cards reattached");
    }

    /// Derives control state, sorts, then filters.
    ///
    /// Returns the number of visible cards.
    pub fn update(&mut self, controls: &Controls) -> usize {
        let state = ControlState::from_controls(controls);
        self.apply_sort(state.sort);
        let visible = self.apply_filters(&state);
        self.state = state;
        visible
    }

    /// Returns the grid.
    #[must_use]
    pub const fn grid(&self) -> &CardGrid {
        &self.grid
    }

    /// Returns the state applied by the last [`update`](Self::update).
    #[must_use]
    pub const fn state(&self) -> &ControlState {
        &self.state
    }

    /// Returns the visible-result counter, if the page has one.
    #[must_use]
    pub const fn result_counter(&self) -> Option<&Counter> {
        self.result_counter.as_ref()
    }

    /// Returns the number of shown cards.
    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.grid.visible_count()
    }

    /// Returns card IDs in current order.
    #[must_use]
    pub fn order(&self) -> Vec<&CardId> {
        self.grid.order()
    }

    /// Looks up a card by ID.
    #[must_use]
    pub fn card(&self, id: &CardId) -> Option<&Card> {
        self.grid.find(id)
    }
}
