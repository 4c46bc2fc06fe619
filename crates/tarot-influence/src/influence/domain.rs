use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Classical element associated with a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Element {
    Fire,
    Water,
    Air,
    Earth,
}

impl Element {
    pub fn label(&self) -> &'static str {
        match self {
            Element::Fire => "fire",
            Element::Water => "water",
            Element::Air => "air",
            Element::Earth => "earth",
        }
    }

    pub(crate) fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "fire" => Some(Self::Fire),
            "water" => Some(Self::Water),
            "air" => Some(Self::Air),
            "earth" => Some(Self::Earth),
            _ => None,
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Minor Arcana suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Suit {
    Wands,
    Cups,
    Swords,
    Pentacles,
}

impl Suit {
    pub fn label(&self) -> &'static str {
        match self {
            Suit::Wands => "wands",
            Suit::Cups => "cups",
            Suit::Swords => "swords",
            Suit::Pentacles => "pentacles",
        }
    }

    pub(crate) fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "wands" => Some(Self::Wands),
            "cups" => Some(Self::Cups),
            "swords" => Some(Self::Swords),
            "pentacles" => Some(Self::Pentacles),
            _ => None,
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Court rank of a Minor Arcana card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rank {
    Page,
    Knight,
    Queen,
    King,
}

impl Rank {
    pub(crate) fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "page" => Some(Self::Page),
            "knight" => Some(Self::Knight),
            "queen" => Some(Self::Queen),
            "king" => Some(Self::King),
            _ => None,
        }
    }
}

/// Pip number or court rank; a Minor card carries exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MinorValue {
    Number(u8),
    Rank(Rank),
}

/// Arcana membership. Major cards carry no suit, number, or rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Arcana {
    Major,
    Minor { suit: Suit, value: MinorValue },
}

impl Arcana {
    pub fn is_major(&self) -> bool {
        matches!(self, Arcana::Major)
    }
}

/// Placement of a card within the spread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Upright,
    Reversed,
}

impl Orientation {
    pub fn label(&self) -> &'static str {
        match self {
            Orientation::Upright => "upright",
            Orientation::Reversed => "reversed",
        }
    }

    pub fn is_reversed(&self) -> bool {
        matches!(self, Orientation::Reversed)
    }
}

/// Validated static metadata for one card. Only [`super::CardCatalogue`] builds these.
#[derive(Debug, Clone, PartialEq)]
pub struct CardDefinition {
    pub id: String,
    pub name: String,
    pub arcana: Arcana,
    pub element: Element,
    pub baseline_polarity: f64,
    pub baseline_intensity: f64,
    pub keywords: Vec<String>,
    pub upright_text: String,
    pub reversed_text: String,
    pub themes: BTreeMap<String, f64>,
}

impl CardDefinition {
    pub fn suit(&self) -> Option<Suit> {
        match self.arcana {
            Arcana::Minor { suit, .. } => Some(suit),
            Arcana::Major => None,
        }
    }

    pub fn number(&self) -> Option<u8> {
        match self.arcana {
            Arcana::Minor {
                value: MinorValue::Number(number),
                ..
            } => Some(number),
            _ => None,
        }
    }

    pub fn rank(&self) -> Option<Rank> {
        match self.arcana {
            Arcana::Minor {
                value: MinorValue::Rank(rank),
                ..
            } => Some(rank),
            _ => None,
        }
    }

    pub fn text_for(&self, orientation: Orientation) -> &str {
        match orientation {
            Orientation::Upright => &self.upright_text,
            Orientation::Reversed => &self.reversed_text,
        }
    }
}

/// One card laid into a reading position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedCard {
    pub position_id: String,
    pub card_id: String,
    pub orientation: Orientation,
    #[serde(rename = "x_coordinate", default)]
    pub x: f64,
    #[serde(rename = "y_coordinate", default)]
    pub y: f64,
}

impl PlacedCard {
    pub fn distance_to(&self, other: &PlacedCard) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Input to a single influence computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingRequest {
    pub reading_id: String,
    pub spread_type: String,
    pub positions: Vec<PlacedCard>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_context: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    pub fn label(&self) -> &'static str {
        match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
        }
    }
}

/// Signed, explained contribution from one card (or a reading-wide pattern) to another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfluenceFactor {
    pub source_position: String,
    pub source_card_id: String,
    pub effect: f64,
    pub explain: String,
    pub confidence: Confidence,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfluencedCard {
    pub position: String,
    pub card_id: String,
    pub card_name: String,
    pub orientation: Orientation,
    pub base_text: String,
    pub influenced_text: String,
    pub polarity_score: f64,
    pub intensity_score: f64,
    pub themes: BTreeMap<String, f64>,
    pub influence_factors: Vec<InfluenceFactor>,
    pub journal_prompt: String,
}

/// Reading-level output handed to downstream text generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingResult {
    pub reading_id: String,
    pub summary: String,
    pub cards: Vec<InfluencedCard>,
    pub advice: Vec<String>,
    pub follow_up_questions: Vec<String>,
}

/// Placed card paired with its resolved definition.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedCard<'a> {
    pub placed: &'a PlacedCard,
    pub definition: &'a CardDefinition,
}
