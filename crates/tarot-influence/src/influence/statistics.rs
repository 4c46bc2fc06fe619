use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{Element, ResolvedCard, Suit};

/// Arcana, orientation, suit, and element distribution of a reading.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingStatistics {
    pub total_cards: usize,
    pub major_arcana: usize,
    pub minor_arcana: usize,
    pub upright_cards: usize,
    pub reversed_cards: usize,
    pub suit_distribution: BTreeMap<Suit, usize>,
    pub element_distribution: BTreeMap<Element, usize>,
}

impl ReadingStatistics {
    pub fn from_cards(cards: &[ResolvedCard<'_>]) -> Self {
        let mut stats = Self {
            total_cards: cards.len(),
            ..Self::default()
        };

        for card in cards {
            if card.definition.arcana.is_major() {
                stats.major_arcana += 1;
            } else {
                stats.minor_arcana += 1;
            }

            if card.placed.orientation.is_reversed() {
                stats.reversed_cards += 1;
            } else {
                stats.upright_cards += 1;
            }

            if let Some(suit) = card.definition.suit() {
                *stats.suit_distribution.entry(suit).or_default() += 1;
            }
            *stats
                .element_distribution
                .entry(card.definition.element)
                .or_default() += 1;
        }

        stats
    }

    /// Most frequent suit; ties resolve to the suit declared first.
    pub fn dominant_suit(&self) -> Option<Suit> {
        self.suit_distribution
            .iter()
            .fold(None, |best: Option<(Suit, usize)>, (suit, count)| match best {
                Some((_, best_count)) if best_count >= *count => best,
                _ => Some((*suit, *count)),
            })
            .map(|(suit, _)| suit)
    }
}
