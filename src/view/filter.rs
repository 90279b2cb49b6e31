//! Card visibility predicates.
//!
//! A card is visible exactly when it passes all three predicates. Each
//! predicate treats its neutral control value (empty query, unchecked
//! toggle, `all` tier) as "no filter".

use crate::models::{Card, ControlState};

/// Returns true if `query` is empty or occurs in the card text, ignoring case.
///
/// `query` must already be lowercased; [`ControlState`] guarantees this.
#[must_use]
pub fn matches_query(query: &str, card: &Card) -> bool {
    query.is_empty() || card.text.to_lowercase().contains(query)
}

/// Returns true if the toggle is off or the card references a repository.
#[must_use]
pub const fn matches_github(github_only: bool, card: &Card) -> bool {
    !github_only || card.has_github
}

/// Returns true if the card passes every predicate in `state`.
#[must_use]
pub fn is_visible(state: &ControlState, card: &Card) -> bool {
    matches_query(&state.query, card)
        && matches_github(state.github_only, card)
        && state.tier.matches(card)
}
