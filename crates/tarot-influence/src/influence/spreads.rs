//! Canonical spread geometries laid out on the engine grid.
//!
//! One grid unit is the distance between directly adjacent cards, so the
//! adjacency bands in [`super::AdjacencyConfig`] read naturally against these
//! coordinates.

use serde::{Deserialize, Serialize};

use super::domain::{Orientation, PlacedCard};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpreadKind {
    Single,
    ThreeCard,
    CelticCross,
    Relationship,
}

impl SpreadKind {
    pub fn ordered() -> [SpreadKind; 4] {
        [
            SpreadKind::Single,
            SpreadKind::ThreeCard,
            SpreadKind::CelticCross,
            SpreadKind::Relationship,
        ]
    }

    pub fn key(&self) -> &'static str {
        match self {
            SpreadKind::Single => "single",
            SpreadKind::ThreeCard => "three_card",
            SpreadKind::CelticCross => "celtic_cross",
            SpreadKind::Relationship => "relationship",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, SpreadError> {
        match raw.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "single" | "single_card" => Ok(SpreadKind::Single),
            "three_card" => Ok(SpreadKind::ThreeCard),
            "celtic_cross" => Ok(SpreadKind::CelticCross),
            "relationship" => Ok(SpreadKind::Relationship),
            _ => Err(SpreadError::UnknownSpread(raw.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SpreadError {
    #[error("unknown spread type `{0}`")]
    UnknownSpread(String),
    #[error("{spread} holds at most {max} cards, received {received}")]
    TooManyCards {
        spread: &'static str,
        max: usize,
        received: usize,
    },
    #[error("{spread} needs at least {min} cards, received {received}")]
    TooFewCards {
        spread: &'static str,
        min: usize,
        received: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpreadPosition {
    pub position_id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpreadLayout {
    pub kind: SpreadKind,
    pub name: &'static str,
    pub description: &'static str,
    pub positions: Vec<SpreadPosition>,
    pub min_cards: usize,
}

/// A card drawn for a spread, before it has a position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawnCard {
    pub card_id: String,
    #[serde(default = "upright")]
    pub orientation: Orientation,
}

fn upright() -> Orientation {
    Orientation::Upright
}

fn position(
    position_id: &'static str,
    name: &'static str,
    description: &'static str,
    x: f64,
    y: f64,
) -> SpreadPosition {
    SpreadPosition {
        position_id,
        name,
        description,
        x,
        y,
    }
}

impl SpreadLayout {
    pub fn standard(kind: SpreadKind) -> Self {
        match kind {
            SpreadKind::Single => Self {
                kind,
                name: "Single Card",
                description: "A one-card reading for quick insight or daily guidance",
                positions: vec![position(
                    "center",
                    "The Answer",
                    "The card that answers the question or mirrors the present",
                    0.0,
                    0.0,
                )],
                min_cards: 1,
            },
            SpreadKind::ThreeCard => Self {
                kind,
                name: "Three Card Spread",
                description: "Past, present, and future laid in a row",
                positions: vec![
                    position("past", "Past", "What has led to the current situation", 0.0, 0.0),
                    position("present", "Present", "The current situation", 1.0, 0.0),
                    position("future", "Future", "Where things are heading", 2.0, 0.0),
                ],
                min_cards: 3,
            },
            SpreadKind::CelticCross => Self {
                kind,
                name: "Celtic Cross",
                description: "Ten-card spread exploring a situation in depth",
                positions: vec![
                    position("current_situation", "Current Situation", "The heart of the matter", 1.5, 2.0),
                    position("challenge", "Challenge", "What crosses the situation", 1.5, 3.0),
                    position("distant_past", "Distant Past", "Foundations beneath the situation", 0.5, 1.5),
                    position("recent_past", "Recent Past", "What is passing away", 0.5, 2.5),
                    position("possible_outcome", "Possible Outcome", "What may come to pass", 0.5, 3.5),
                    position("near_future", "Near Future", "What approaches", 2.5, 1.5),
                    position("your_approach", "Your Approach", "How the querent meets the situation", 2.5, 2.5),
                    position("external_influences", "External Influences", "People and forces around the querent", 2.5, 3.5),
                    position("hopes_fears", "Hopes & Fears", "Inner expectations", 3.5, 1.5),
                    position("final_outcome", "Final Outcome", "Where the path leads", 3.5, 2.5),
                ],
                min_cards: 10,
            },
            SpreadKind::Relationship => Self {
                kind,
                name: "Relationship Spread",
                description: "Four cards examining two people and the bond between them",
                positions: vec![
                    position("you", "You", "Your role in the relationship", 1.25, 2.5),
                    position("partner", "Partner", "Your partner's role", 3.75, 2.5),
                    position("relationship", "Relationship", "The bond itself", 2.5, 1.5),
                    position("advice", "Advice", "Guidance for the relationship", 2.5, 3.5),
                ],
                min_cards: 4,
            },
        }
    }

    pub fn all() -> Vec<Self> {
        SpreadKind::ordered()
            .into_iter()
            .map(Self::standard)
            .collect()
    }

    pub fn max_cards(&self) -> usize {
        self.positions.len()
    }

    /// Lays draws onto positions in declaration order.
    pub fn place(&self, draws: &[DrawnCard]) -> Result<Vec<PlacedCard>, SpreadError> {
        if draws.len() > self.max_cards() {
            return Err(SpreadError::TooManyCards {
                spread: self.kind.key(),
                max: self.max_cards(),
                received: draws.len(),
            });
        }
        if draws.len() < self.min_cards {
            return Err(SpreadError::TooFewCards {
                spread: self.kind.key(),
                min: self.min_cards,
                received: draws.len(),
            });
        }

        Ok(self
            .positions
            .iter()
            .zip(draws)
            .map(|(slot, draw)| PlacedCard {
                position_id: slot.position_id.to_string(),
                card_id: draw.card_id.clone(),
                orientation: draw.orientation,
                x: slot.x,
                y: slot.y,
            })
            .collect())
    }
}
