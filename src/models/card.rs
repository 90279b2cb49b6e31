//! Card types and identifiers.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Tier assigned to cards that do not carry one.
pub const DEFAULT_TIER: &str = "primary";

/// Prefix the page template puts in front of a card's source label.
const SOURCE_PREFIX: &str = "Source:";

/// Stable identifier of a card for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    /// Creates a new card ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for CardId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for CardId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Categorical grouping label used for coarse filtering.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tier(String);

impl Tier {
    /// Creates a tier, falling back to [`DEFAULT_TIER`] when the label is blank.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into();
        if label.trim().is_empty() {
            Self::default()
        } else {
            Self(label)
        }
    }

    /// Returns the tier label.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Tier {
    fn default() -> Self {
        Self(DEFAULT_TIER.to_string())
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw data attributes as emitted by the page template.
///
/// Every value is optional text, the way it arrives from markup. Conversion
/// into a [`Card`] applies the defaults: score 0, tier `primary`, no
/// repository reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardAttributes {
    /// Item identifier.
    #[serde(default, deserialize_with = "attr_text")]
    pub id: Option<String>,
    /// Headline.
    #[serde(default, deserialize_with = "attr_text")]
    pub title: Option<String>,
    /// Source label, possibly prefixed with `Source:`.
    #[serde(default, deserialize_with = "attr_text")]
    pub source: Option<String>,
    /// Canonical link.
    #[serde(default, alias = "href", alias = "url", deserialize_with = "attr_text")]
    pub link: Option<String>,
    /// Relevance score as text.
    #[serde(default, deserialize_with = "attr_text")]
    pub score: Option<String>,
    /// `"true"` when the item references an external repository.
    #[serde(
        default,
        alias = "has-github",
        alias = "hasGithub",
        deserialize_with = "attr_text"
    )]
    pub has_github: Option<String>,
    /// Tier label.
    #[serde(default, deserialize_with = "attr_text")]
    pub tier: Option<String>,
    /// Rendered text content of the card, used for search matching.
    #[serde(default, deserialize_with = "attr_text")]
    pub text: Option<String>,
}

/// A pre-rendered digest card.
///
/// Cards are immutable inputs; the view only reorders and hides them.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    /// Stable identifier.
    pub id: CardId,
    /// Headline.
    pub title: String,
    /// Normalized source label.
    pub source: String,
    /// Canonical link, if the card carries one.
    pub link: Option<String>,
    /// Relevance score (finite).
    pub score: f64,
    /// Whether the card references an external repository.
    pub has_github: bool,
    /// Tier label.
    pub tier: Tier,
    /// Free text used for search matching.
    pub text: String,
}

impl Card {
    /// Creates a card with the given identifier and score and empty metadata.
    #[must_use]
    pub fn new(id: impl Into<CardId>, score: f64) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            source: String::new(),
            link: None,
            score: if score.is_finite() { score } else { 0.0 },
            has_github: false,
            tier: Tier::default(),
            text: String::new(),
        }
    }

    /// Builds a card from raw data attributes.
    ///
    /// `position` is used to derive an identifier for cards that lack one.
    /// When the attributes carry no text, the title and source stand in for it.
    #[must_use]
    pub fn from_attributes(attrs: CardAttributes, position: usize) -> Self {
        let id = attrs
            .id
            .filter(|id| !id.trim().is_empty())
            .map_or_else(|| CardId::new(format!("card-{position}")), CardId::new);
        let title = attrs.title.unwrap_or_default().trim().to_string();
        let source = normalize_source(attrs.source.as_deref().unwrap_or_default());
        let text = attrs
            .text
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| format!("{title} {source}"));

        Self {
            id,
            title,
            source,
            link: attrs.link.filter(|l| !l.trim().is_empty()),
            score: parse_score(attrs.score.as_deref()),
            has_github: attrs.has_github.as_deref() == Some("true"),
            tier: Tier::new(attrs.tier.unwrap_or_default()),
            text,
        }
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the source label.
    #[must_use]
    pub fn with_source(mut self, source: &str) -> Self {
        self.source = normalize_source(source);
        self
    }

    /// Sets the canonical link.
    #[must_use]
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    /// Marks the card as referencing an external repository.
    #[must_use]
    pub const fn with_github(mut self, has_github: bool) -> Self {
        self.has_github = has_github;
        self
    }

    /// Sets the tier.
    #[must_use]
    pub fn with_tier(mut self, tier: impl Into<String>) -> Self {
        self.tier = Tier::new(tier);
        self
    }

    /// Sets the searchable text.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }
}

/// Parses a score attribute; absent, non-numeric or non-finite values are 0.
#[must_use]
pub fn parse_score(raw: Option<&str>) -> f64 {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

/// Reads an attribute value as text.
///
/// Markup attributes are always strings, but deck files written by hand or
/// by tooling often carry numbers and booleans; those keep their JSON text.
pub(crate) fn attr_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }))
}

/// Strips the template's `Source:` prefix and surrounding whitespace.
#[must_use]
pub fn normalize_source(raw: &str) -> String {
    let trimmed = raw.trim();
    trimmed
        .strip_prefix(SOURCE_PREFIX)
        .unwrap_or(trimmed)
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(Some("42"), 42.0 ; "integer")]
    #[test_case(Some(" 7.5 "), 7.5 ; "padded decimal")]
    #[test_case(Some("-3"), -3.0 ; "negative")]
    #[test_case(Some("abc"), 0.0 ; "non numeric")]
    #[test_case(Some(""), 0.0 ; "empty")]
    #[test_case(Some("NaN"), 0.0 ; "nan")]
    #[test_case(Some("inf"), 0.0 ; "infinite")]
    #[test_case(None, 0.0 ; "absent")]
    fn test_parse_score(raw: Option<&str>, expected: f64) {
        assert!((parse_score(raw) - expected).abs() < f64::EPSILON);
    }

    #[test_case("Source: Hacker News", "Hacker News")]
    #[test_case("  GitHub Search ", "GitHub Search")]
    #[test_case("Source:", "")]
    fn test_normalize_source(raw: &str, expected: &str) {
        assert_eq!(normalize_source(raw), expected);
    }

    #[test]
    fn test_from_attributes_defaults() {
        let card = Card::from_attributes(CardAttributes::default(), 3);

        assert_eq!(card.id.as_str(), "card-3");
        assert_eq!(card.tier.as_str(), DEFAULT_TIER);
        assert!(card.score.abs() < f64::EPSILON);
        assert!(!card.has_github);
        assert!(card.link.is_none());
    }

    #[test]
    fn test_from_attributes_full() {
        let attrs = CardAttributes {
            id: Some("rss::openai::1".to_string()),
            title: Some(" New model release ".to_string()),
            source: Some("Source: OpenAI Blog".to_string()),
            link: Some("https://openai.com/blog/x".to_string()),
            score: Some("88.5".to_string()),
            has_github: Some("true".to_string()),
            tier: Some("backfill".to_string()),
            text: None,
        };
        let card = Card::from_attributes(attrs, 0);

        assert_eq!(card.id.as_str(), "rss::openai::1");
        assert_eq!(card.title, "New model release");
        assert_eq!(card.source, "OpenAI Blog");
        assert_eq!(card.link.as_deref(), Some("https://openai.com/blog/x"));
        assert!((card.score - 88.5).abs() < f64::EPSILON);
        assert!(card.has_github);
        assert_eq!(card.tier.as_str(), "backfill");
        assert_eq!(card.text, "New model release OpenAI Blog");
    }

    #[test]
    fn test_github_flag_requires_literal_true() {
        let attrs = CardAttributes {
            has_github: Some("TRUE".to_string()),
            ..CardAttributes::default()
        };
        assert!(!Card::from_attributes(attrs, 0).has_github);
    }

    #[test]
    fn test_blank_tier_defaults_to_primary() {
        assert_eq!(Tier::new("  ").as_str(), "primary");
        assert_eq!(Tier::new("watchlist").as_str(), "watchlist");
    }

    #[test]
    fn test_attributes_accept_json_scalars() {
        let json = r#"{"id":"x","score":91.5,"has_github":true}"#;
        let card = Card::from_attributes(serde_json::from_str(json).unwrap(), 0);

        assert!((card.score - 91.5).abs() < f64::EPSILON);
        assert!(card.has_github);
    }

    #[test]
    fn test_attributes_accept_markup_aliases() {
        let json = r#"{"id":"x","href":"https://example.com","has-github":"true"}"#;
        let attrs: CardAttributes = serde_json::from_str(json).unwrap();

        assert_eq!(attrs.link.as_deref(), Some("https://example.com"));
        assert_eq!(attrs.has_github.as_deref(), Some("true"));
    }
}
