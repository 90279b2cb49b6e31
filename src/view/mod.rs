//! Filtering and ordering of the card grid.
//!
//! The controller owns the cards as an explicit ordered sequence. Sorting
//! reorders that sequence with a stable sort; filtering only toggles each
//! card's visibility.

mod controller;
pub mod filter;
mod grid;
pub mod sort;

pub use controller::ViewController;
pub use grid::{CardGrid, CardSlot, Counter, render_optional};
