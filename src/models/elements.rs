//! Interactive page elements that fire tracking events.

use super::CardId;

/// A link inside a card that the reader opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkClick {
    /// Card enclosing the link.
    pub card_id: CardId,
    /// The anchor's literal destination.
    pub href: String,
}

impl LinkClick {
    /// Creates a click on `href` inside the card `card_id`.
    #[must_use]
    pub fn new(card_id: impl Into<CardId>, href: impl Into<String>) -> Self {
        Self {
            card_id: card_id.into(),
            href: href.into(),
        }
    }
}

/// A feedback button inside a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackButton {
    /// Card enclosing the button.
    pub card_id: CardId,
    /// The button's vote label attribute, if it carries one.
    pub vote_label: Option<String>,
}

impl FeedbackButton {
    /// Creates a button carrying `vote_label`.
    #[must_use]
    pub fn new(card_id: impl Into<CardId>, vote_label: impl Into<String>) -> Self {
        Self {
            card_id: card_id.into(),
            vote_label: Some(vote_label.into()),
        }
    }

    /// Creates a button with no vote label attribute.
    #[must_use]
    pub fn unlabeled(card_id: impl Into<CardId>) -> Self {
        Self {
            card_id: card_id.into(),
            vote_label: None,
        }
    }

    /// Returns the trimmed vote label, or `None` if it is missing or blank.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.vote_label
            .as_deref()
            .map(str::trim)
            .filter(|label| !label.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_trimmed() {
        assert_eq!(FeedbackButton::new("a", " like ").label(), Some("like"));
    }

    #[test]
    fn test_blank_label_is_none() {
        assert_eq!(FeedbackButton::new("a", "   ").label(), None);
        assert_eq!(FeedbackButton::unlabeled("a").label(), None);
    }
}
