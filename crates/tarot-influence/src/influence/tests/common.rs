use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::influence::{
    CardCatalogue, CardRecord, InfluenceConfig, InfluenceEngine, InfluencedCard, Orientation,
    PlacedCard, ReadingRequest, ReadingResult, RuleKind,
};

fn major(id: &str, name: &str, element: &str, polarity: f64, intensity: f64) -> CardRecord {
    CardRecord {
        id: Some(id.to_string()),
        name: Some(name.to_string()),
        arcana: Some("major".to_string()),
        element: Some(element.to_string()),
        polarity_baseline: Some(polarity),
        intensity_baseline: Some(intensity),
        keywords: vec![id.replace('_', " ")],
        upright_text: Some(format!("{name} upright.")),
        reversed_text: Some(format!("{name} reversed.")),
        themes: [(format!("{id}_theme"), 0.8), ("change".to_string(), 0.5)]
            .into_iter()
            .collect(),
        ..CardRecord::default()
    }
}

fn minor(
    id: &str,
    name: &str,
    suit: &str,
    value: Result<i64, &str>,
    element: &str,
    polarity: f64,
    intensity: f64,
) -> CardRecord {
    let (number, rank) = match value {
        Ok(number) => (Some(number), None),
        Err(rank) => (None, Some(rank.to_string())),
    };
    CardRecord {
        id: Some(id.to_string()),
        name: Some(name.to_string()),
        arcana: Some("minor".to_string()),
        suit: Some(suit.to_string()),
        number,
        rank,
        element: Some(element.to_string()),
        polarity_baseline: Some(polarity),
        intensity_baseline: Some(intensity),
        keywords: Vec::new(),
        upright_text: Some(format!("{name} upright.")),
        reversed_text: Some(format!("{name} reversed.")),
        themes: [("daily".to_string(), 0.6)].into_iter().collect(),
    }
}

pub(super) fn catalogue() -> Arc<CardCatalogue> {
    let records = vec![
        major("fool", "The Fool", "air", 0.5, 0.7),
        major("empress", "The Empress", "earth", 0.7, 0.6),
        major("moon", "The Moon", "water", -0.3, 0.7),
        major("tower", "The Tower", "fire", -0.5, 0.9),
        major("star", "The Star", "air", 0.8, 0.6),
        major("sun", "The Sun", "fire", 0.9, 0.8),
        minor("ace_wands", "Ace of Wands", "wands", Ok(1), "fire", 0.8, 0.8),
        minor("two_wands", "Two of Wands", "wands", Ok(2), "fire", 0.6, 0.7),
        minor("three_wands", "Three of Wands", "wands", Ok(3), "fire", 0.6, 0.6),
        minor("knight_wands", "Knight of Wands", "wands", Err("knight"), "fire", 0.4, 0.8),
        minor("ace_cups", "Ace of Cups", "cups", Ok(1), "water", 0.8, 0.7),
        minor("two_cups", "Two of Cups", "cups", Ok(2), "water", 0.7, 0.6),
        minor("five_pentacles", "Five of Pentacles", "pentacles", Ok(5), "earth", -0.6, 0.7),
        minor("two_swords", "Two of Swords", "swords", Ok(2), "air", -0.1, 0.5),
    ];
    Arc::new(CardCatalogue::from_records(records).expect("fixture catalogue is valid"))
}

pub(super) fn engine() -> InfluenceEngine {
    InfluenceEngine::with_defaults(catalogue())
}

pub(super) fn engine_with(config: InfluenceConfig) -> InfluenceEngine {
    InfluenceEngine::new(catalogue(), config)
}

/// Configuration with every rule but `rule` switched off.
pub(super) fn only(rule: RuleKind) -> InfluenceConfig {
    let mut config = InfluenceConfig::default();
    config.major_dominance.enabled = rule == RuleKind::MajorDominance;
    config.adjacency_weighting.enabled = rule == RuleKind::Adjacency;
    config.elemental_dignities.enabled = rule == RuleKind::ElementalDignities;
    config.numerical_sequences.enabled = rule == RuleKind::NumericalSequences;
    config.suit_predominance.enabled = rule == RuleKind::SuitPredominance;
    config.reversal_propagation.enabled = rule == RuleKind::ReversalPropagation;
    config
}

pub(super) fn placed(position: &str, card_id: &str, x: f64, y: f64) -> PlacedCard {
    PlacedCard {
        position_id: position.to_string(),
        card_id: card_id.to_string(),
        orientation: Orientation::Upright,
        x,
        y,
    }
}

pub(super) fn reversed(position: &str, card_id: &str, x: f64, y: f64) -> PlacedCard {
    PlacedCard {
        orientation: Orientation::Reversed,
        ..placed(position, card_id, x, y)
    }
}

pub(super) fn request(positions: Vec<PlacedCard>) -> ReadingRequest {
    ReadingRequest {
        reading_id: "reading-001".to_string(),
        spread_type: "custom".to_string(),
        positions,
        user_context: None,
    }
}

pub(super) fn tower_sun_star() -> ReadingRequest {
    ReadingRequest {
        spread_type: "three_card".to_string(),
        ..request(vec![
            placed("past", "tower", 0.0, 0.0),
            placed("present", "sun", 1.0, 0.0),
            placed("future", "star", 2.0, 0.0),
        ])
    }
}

pub(super) fn card<'a>(result: &'a ReadingResult, card_id: &str) -> &'a InfluencedCard {
    result
        .cards
        .iter()
        .find(|card| card.card_id == card_id)
        .unwrap_or_else(|| panic!("{card_id} missing from result"))
}

pub(super) fn effects(card: &InfluencedCard) -> Vec<f64> {
    card.influence_factors
        .iter()
        .map(|factor| factor.effect)
        .collect()
}

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

pub(super) fn assert_all_close(actual: &[f64], expected: &[f64]) {
    assert_eq!(actual.len(), expected.len(), "{actual:?} vs {expected:?}");
    for (actual, expected) in actual.iter().zip(expected) {
        assert_close(*actual, *expected);
    }
}

pub(super) async fn json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1 << 20)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
