//! Card container and counter displays.

use super::sort::sort_by_score;
use crate::models::{Card, CardId, SortMode};

/// A card placed in the grid along with its display state.
#[derive(Debug, Clone)]
pub struct CardSlot {
    /// The card.
    pub card: Card,
    /// Whether the card is currently shown.
    pub visible: bool,
}

/// Ordered container of cards.
///
/// Hiding a card only flips its display state; cards are never removed, so
/// a later recompute can show them again in their sorted position.
#[derive(Debug, Clone, Default)]
pub struct CardGrid {
    slots: Vec<CardSlot>,
}

impl CardGrid {
    /// Creates a grid with every card visible, in document order.
    #[must_use]
    pub fn new(cards: Vec<Card>) -> Self {
        Self {
            slots: cards
                .into_iter()
                .map(|card| CardSlot {
                    card,
                    visible: true,
                })
                .collect(),
        }
    }

    /// Returns the number of cards, shown or hidden.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if the grid holds no cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Iterates slots in current order.
    pub fn slots(&self) -> impl Iterator<Item = &CardSlot> {
        self.slots.iter()
    }

    /// Iterates slots mutably in current order.
    pub fn slots_mut(&mut self) -> impl Iterator<Item = &mut CardSlot> {
        self.slots.iter_mut()
    }

    /// Returns card IDs in current order.
    #[must_use]
    pub fn order(&self) -> Vec<&CardId> {
        self.slots.iter().map(|slot| &slot.card.id).collect()
    }

    /// Returns the shown cards in current order.
    #[must_use]
    pub fn visible_cards(&self) -> Vec<&Card> {
        self.slots
            .iter()
            .filter(|slot| slot.visible)
            .map(|slot| &slot.card)
            .collect()
    }

    /// Returns the number of shown cards.
    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.visible).count()
    }

    /// Looks up a card by ID.
    #[must_use]
    pub fn find(&self, id: &CardId) -> Option<&Card> {
        self.slots
            .iter()
            .find(|slot| slot.card.id == *id)
            .map(|slot| &slot.card)
    }

    /// Reorders every card, hidden ones included, by score under `mode`.
    pub fn reattach_sorted(&mut self, mode: SortMode) {
        sort_by_score(&mut self.slots, mode, |slot| slot.card.score);
    }
}

/// A text display element showing a count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Counter {
    text: String,
}

impl Counter {
    /// Creates an empty display.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            text: String::new(),
        }
    }

    /// Writes `value` into the display.
    pub fn render(&mut self, value: usize) {
        self.text = value.to_string();
    }

    /// Returns the displayed text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Writes `value` into `counter` if the element exists on the page.
pub fn render_optional(counter: Option<&mut Counter>, value: usize) {
    if let Some(counter) = counter {
        counter.render(value);
    }
}
