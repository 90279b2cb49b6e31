//! Loading card decks from JSON.
//!
//! Two shapes are accepted:
//!
//! - an array of card attribute objects, as the page template emits them
//! - a digest document `{ "items": [...] }` as produced by the publishing
//!   pipeline, using its scoring and tiering fields

use crate::models::{Card, CardAttributes, attr_text, parse_score};
use crate::{Error, Result};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::num::FpCategory;
use std::path::Path;
use tracing::debug;

/// Origin type of items that come from a code repository.
const GITHUB_ORIGIN: &str = "github";

/// An item of a published digest.
///
/// Fields are read leniently: numbers, numeric strings and booleans all
/// come through as text, and a non-numeric score counts as zero.
#[derive(Debug, Deserialize)]
struct DigestItem {
    #[serde(default, deserialize_with = "attr_text")]
    id: Option<String>,
    #[serde(default, deserialize_with = "attr_text")]
    title: Option<String>,
    #[serde(default, deserialize_with = "attr_text")]
    source: Option<String>,
    #[serde(default, deserialize_with = "attr_text")]
    link: Option<String>,
    #[serde(default, deserialize_with = "attr_text")]
    origin_type: Option<String>,
    #[serde(default, deserialize_with = "attr_text")]
    total_score: Option<String>,
    #[serde(default, deserialize_with = "attr_text")]
    personalized_total_score: Option<String>,
    #[serde(default, deserialize_with = "attr_text")]
    output_tier: Option<String>,
    #[serde(default, deserialize_with = "attr_text")]
    summary_cn: Option<String>,
    #[serde(default, deserialize_with = "text_list")]
    key_points: Vec<String>,
}

impl DigestItem {
    fn into_card(self) -> Option<Card> {
        let id = self.id.filter(|id| !id.trim().is_empty())?;
        let personalized = parse_score(self.personalized_total_score.as_deref());
        let score = if personalized.classify() == FpCategory::Zero {
            parse_score(self.total_score.as_deref())
        } else {
            personalized
        };
        let title = self.title.unwrap_or_default();
        let source = self.source.unwrap_or_default();

        let mut text = vec![title.as_str(), source.as_str()];
        if let Some(summary) = self.summary_cn.as_deref() {
            text.push(summary);
        }
        text.extend(self.key_points.iter().map(String::as_str));
        let text = text.join(" ");

        let mut card = Card::new(id, score)
            .with_title(title.trim())
            .with_source(&source)
            .with_github(self.origin_type.as_deref() == Some(GITHUB_ORIGIN))
            .with_tier(self.output_tier.unwrap_or_default())
            .with_text(text);
        if let Some(link) = self.link.filter(|l| !l.trim().is_empty()) {
            card = card.with_link(link);
        }
        Some(card)
    }
}

/// Reads a list of strings; `null` or a lone value are tolerated and
/// non-text entries are skipped.
fn text_list<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect(),
        Some(Value::String(s)) => vec![s],
        _ => Vec::new(),
    })
}

/// Parses a deck from JSON text.
///
/// Entries that are not objects, and digest items without an identifier,
/// are skipped.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] if the text is not JSON or is neither an
/// array nor a digest document.
pub fn parse_deck(text: &str) -> Result<Vec<Card>> {
    let document: Value = serde_json::from_str(text)
        .map_err(|e| Error::InvalidInput(format!("deck is not valid JSON: {e}")))?;

    match document {
        Value::Array(entries) => Ok(parse_attribute_cards(entries)),
        Value::Object(mut digest) => match digest.remove("items") {
            Some(Value::Array(items)) => Ok(parse_digest_items(items)),
            _ => Err(Error::InvalidInput(
                "digest document has no items array".to_string(),
            )),
        },
        _ => Err(Error::InvalidInput(
            "deck must be an array of cards or a digest document".to_string(),
        )),
    }
}

/// Loads a deck from a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_deck(path: &Path) -> Result<Vec<Card>> {
    let text = std::fs::read_to_string(path).map_err(|e| Error::failed("read_deck", e))?;
    let cards = parse_deck(&text)?;
    debug!(path = %path.display(), cards = cards.len(), "deck loaded");
    Ok(cards)
}

fn parse_attribute_cards(entries: Vec<Value>) -> Vec<Card> {
    entries
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|entry| match serde_json::from_value::<CardAttributes>(entry) {
            Ok(attrs) => Some(attrs),
            Err(e) => {
                debug!(error = %e, "skipping malformed card");
                None
            },
        })
        .enumerate()
        .map(|(position, attrs)| Card::from_attributes(attrs, position))
        .collect()
}

fn parse_digest_items(items: Vec<Value>) -> Vec<Card> {
    items
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|item| match serde_json::from_value::<DigestItem>(item) {
            Ok(item) => item.into_card(),
            Err(e) => {
                debug!(error = %e, "skipping malformed digest item");
                None
            },
        })
        .collect()
}
