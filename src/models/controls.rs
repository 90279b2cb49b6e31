//! Filter and sort control state.

use super::{Card, Tier};
use std::fmt;

/// Order applied to the card grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Highest score first (default).
    #[default]
    ScoreDesc,
    /// Lowest score first.
    ScoreAsc,
}

impl SortMode {
    /// Returns the mode as a control value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ScoreDesc => "score_desc",
            Self::ScoreAsc => "score_asc",
        }
    }

    /// Parses a control value. Anything other than `score_asc` sorts descending.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "score_asc" => Self::ScoreAsc,
            _ => Self::ScoreDesc,
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tier selector value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TierFilter {
    /// Wildcard: every tier matches.
    #[default]
    All,
    /// Only cards in the given tier match.
    Only(Tier),
}

impl TierFilter {
    /// Parses a selector value; `all` and blank values are the wildcard.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() || s == "all" {
            Self::All
        } else {
            Self::Only(Tier::new(s))
        }
    }

    /// Returns true if the card's tier passes this selector.
    #[must_use]
    pub fn matches(&self, card: &Card) -> bool {
        match self {
            Self::All => true,
            Self::Only(tier) => card.tier == *tier,
        }
    }
}

/// Raw values read off the page controls.
///
/// A `None` field means the control is not present on the page; it is
/// treated as "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Controls {
    /// Search input text.
    pub query: Option<String>,
    /// Github-only checkbox state.
    pub github_only: Option<bool>,
    /// Tier select value.
    pub tier: Option<String>,
    /// Sort select value.
    pub sort: Option<String>,
}

impl Controls {
    /// Creates controls with every element absent.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            query: None,
            github_only: None,
            tier: None,
            sort: None,
        }
    }

    /// Sets the search input text.
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Sets the github-only checkbox.
    #[must_use]
    pub const fn with_github_only(mut self, checked: bool) -> Self {
        self.github_only = Some(checked);
        self
    }

    /// Sets the tier select value.
    #[must_use]
    pub fn with_tier(mut self, tier: impl Into<String>) -> Self {
        self.tier = Some(tier.into());
        self
    }

    /// Sets the sort select value.
    #[must_use]
    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }
}

/// Normalized control state, derived fresh on every recompute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlState {
    /// Lowercased, trimmed query. Empty matches everything.
    pub query: String,
    /// Whether only repository-referencing cards are shown.
    pub github_only: bool,
    /// Tier selector.
    pub tier: TierFilter,
    /// Sort order.
    pub sort: SortMode,
}

impl ControlState {
    /// Derives state from raw controls, defaulting absent controls.
    #[must_use]
    pub fn from_controls(controls: &Controls) -> Self {
        Self {
            query: controls
                .query
                .as_deref()
                .unwrap_or_default()
                .trim()
                .to_lowercase(),
            github_only: controls.github_only.unwrap_or(false),
            tier: controls
                .tier
                .as_deref()
                .map_or(TierFilter::All, TierFilter::parse),
            sort: controls
                .sort
                .as_deref()
                .map_or(SortMode::ScoreDesc, SortMode::parse),
        }
    }
}

impl From<&Controls> for ControlState {
    fn from(controls: &Controls) -> Self {
        Self::from_controls(controls)
    }
}
