use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::domain::{Arcana, CardDefinition, Element, MinorValue, Rank, Suit};

/// Unvalidated card entry as supplied by an external loader.
///
/// Every field is optional here so that a missing value surfaces as
/// [`CatalogueError::MalformedCardDefinition`] rather than a parse failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub arcana: Option<String>,
    #[serde(default)]
    pub suit: Option<String>,
    #[serde(default)]
    pub number: Option<i64>,
    #[serde(default)]
    pub rank: Option<String>,
    #[serde(default)]
    pub element: Option<String>,
    #[serde(default, alias = "baseline_polarity")]
    pub polarity_baseline: Option<f64>,
    #[serde(default, alias = "baseline_intensity")]
    pub intensity_baseline: Option<f64>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub upright_text: Option<String>,
    #[serde(default)]
    pub reversed_text: Option<String>,
    #[serde(default)]
    pub themes: BTreeMap<String, f64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogueDocument {
    Cards(Vec<CardRecord>),
    Wrapped {
        #[serde(alias = "deck")]
        cards: Vec<CardRecord>,
    },
}

/// Why a card record was rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MalformedReason {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    #[error("invalid arcana `{0}` (expected major or minor)")]
    InvalidArcana(String),
    #[error("invalid suit `{0}`")]
    InvalidSuit(String),
    #[error("invalid rank `{0}`")]
    InvalidRank(String),
    #[error("invalid element `{0}`")]
    InvalidElement(String),
    #[error("minor arcana card has no suit")]
    MinorMissingSuit,
    #[error("minor arcana card has neither number nor rank")]
    MinorMissingNumberOrRank,
    #[error("minor arcana card has both number and rank")]
    MinorHasNumberAndRank,
    #[error("major arcana card must not carry suit, number, or rank")]
    MajorWithMinorFields,
    #[error("number {0} outside 1-10")]
    NumberOutOfRange(i64),
    #[error("`{field}` value {value} outside {min}..={max}")]
    OutOfRange {
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogueError {
    #[error("card definition #{index} ({card_id}) is malformed: {reason}")]
    MalformedCardDefinition {
        index: usize,
        card_id: String,
        reason: MalformedReason,
    },
    #[error("card `{0}` is defined more than once")]
    DuplicateDefinition(String),
    #[error("catalogue document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to read catalogue: {0}")]
    Io(#[from] std::io::Error),
}

/// Read-only lookup from card id to validated definition.
///
/// Immutable once built; share it behind an `Arc` for concurrent readers.
#[derive(Debug, Clone, Default)]
pub struct CardCatalogue {
    cards: HashMap<String, CardDefinition>,
}

impl CardCatalogue {
    pub fn from_records(records: Vec<CardRecord>) -> Result<Self, CatalogueError> {
        let mut cards = HashMap::with_capacity(records.len());

        for (index, record) in records.into_iter().enumerate() {
            let definition = validate_record(index, record)?;
            if cards.contains_key(&definition.id) {
                return Err(CatalogueError::DuplicateDefinition(definition.id));
            }
            cards.insert(definition.id.clone(), definition);
        }

        info!(cards = cards.len(), "card catalogue loaded");
        Ok(Self { cards })
    }

    /// Accepts a bare array of records or an object with a `cards`/`deck` array.
    pub fn from_json_str(raw: &str) -> Result<Self, CatalogueError> {
        let records = match serde_json::from_str::<CatalogueDocument>(raw)? {
            CatalogueDocument::Cards(cards) | CatalogueDocument::Wrapped { cards } => cards,
        };
        Self::from_records(records)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogueError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn get(&self, card_id: &str) -> Option<&CardDefinition> {
        self.cards.get(card_id)
    }

    pub fn contains(&self, card_id: &str) -> bool {
        self.cards.contains_key(card_id)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Card ids in sorted order.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.cards.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

fn validate_record(index: usize, record: CardRecord) -> Result<CardDefinition, CatalogueError> {
    let card_id = record.id.clone().unwrap_or_else(|| "<unknown>".to_string());
    let malformed = |reason: MalformedReason| CatalogueError::MalformedCardDefinition {
        index,
        card_id: card_id.clone(),
        reason,
    };

    let id = required(record.id, "id").map_err(&malformed)?;
    let name = required(record.name, "name").map_err(&malformed)?;
    let raw_arcana = required(record.arcana, "arcana").map_err(&malformed)?;
    let raw_element = required(record.element, "element").map_err(&malformed)?;
    let polarity = record
        .polarity_baseline
        .ok_or(MalformedReason::MissingField("polarity_baseline"))
        .map_err(&malformed)?;
    let intensity = record
        .intensity_baseline
        .ok_or(MalformedReason::MissingField("intensity_baseline"))
        .map_err(&malformed)?;
    let upright_text = required(record.upright_text, "upright_text").map_err(&malformed)?;
    let reversed_text = required(record.reversed_text, "reversed_text").map_err(&malformed)?;

    let element =
        Element::parse(&raw_element).ok_or_else(|| malformed(MalformedReason::InvalidElement(raw_element)))?;

    let arcana = match raw_arcana.trim().to_ascii_lowercase().as_str() {
        "major" => {
            if record.suit.is_some() || record.number.is_some() || record.rank.is_some() {
                return Err(malformed(MalformedReason::MajorWithMinorFields));
            }
            Arcana::Major
        }
        "minor" => {
            let raw_suit = record
                .suit
                .ok_or(MalformedReason::MinorMissingSuit)
                .map_err(&malformed)?;
            let suit = Suit::parse(&raw_suit)
                .ok_or_else(|| malformed(MalformedReason::InvalidSuit(raw_suit)))?;
            let value = match (record.number, record.rank) {
                (Some(_), Some(_)) => return Err(malformed(MalformedReason::MinorHasNumberAndRank)),
                (None, None) => return Err(malformed(MalformedReason::MinorMissingNumberOrRank)),
                (Some(number), None) => {
                    if !(1..=10).contains(&number) {
                        return Err(malformed(MalformedReason::NumberOutOfRange(number)));
                    }
                    MinorValue::Number(number as u8)
                }
                (None, Some(raw_rank)) => MinorValue::Rank(
                    Rank::parse(&raw_rank)
                        .ok_or_else(|| malformed(MalformedReason::InvalidRank(raw_rank)))?,
                ),
            };
            Arcana::Minor { suit, value }
        }
        _ => return Err(malformed(MalformedReason::InvalidArcana(raw_arcana))),
    };

    within("polarity_baseline", polarity, -1.0, 1.0).map_err(&malformed)?;
    within("intensity_baseline", intensity, 0.0, 1.0).map_err(&malformed)?;
    for (theme, weight) in &record.themes {
        within(&format!("themes.{theme}"), *weight, 0.0, 1.0).map_err(&malformed)?;
    }

    Ok(CardDefinition {
        id,
        name,
        arcana,
        element,
        baseline_polarity: polarity,
        baseline_intensity: intensity,
        keywords: record.keywords,
        upright_text,
        reversed_text,
        themes: record.themes,
    })
}

fn required(value: Option<String>, field: &'static str) -> Result<String, MalformedReason> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(MalformedReason::MissingField(field)),
    }
}

fn within(field: &str, value: f64, min: f64, max: f64) -> Result<(), MalformedReason> {
    if value.is_finite() && value >= min && value <= max {
        Ok(())
    } else {
        Err(MalformedReason::OutOfRange {
            field: field.to_string(),
            value,
            min,
            max,
        })
    }
}
