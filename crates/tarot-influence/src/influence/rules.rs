use super::config::InfluenceConfig;
use super::domain::{Confidence, Element, InfluenceFactor, ResolvedCard};
use tracing::trace;

pub(crate) const SEQUENCE_SOURCE: &str = "sequence";
pub(crate) const SUIT_PREDOMINANCE_SOURCE: &str = "suit_predominance";
pub(crate) const SUIT_GROUP_CARD: &str = "suit_group";

/// The closed set of influence rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    MajorDominance,
    Adjacency,
    ElementalDignities,
    NumericalSequences,
    SuitPredominance,
    ReversalPropagation,
}

impl RuleKind {
    /// Evaluation order; factor lists follow it.
    pub const ORDER: [RuleKind; 6] = [
        RuleKind::MajorDominance,
        RuleKind::Adjacency,
        RuleKind::ElementalDignities,
        RuleKind::NumericalSequences,
        RuleKind::SuitPredominance,
        RuleKind::ReversalPropagation,
    ];

    /// Key of the rule's block in an [`InfluenceConfig`] document.
    pub fn label(&self) -> &'static str {
        match self {
            RuleKind::MajorDominance => "major_dominance",
            RuleKind::Adjacency => "adjacency_weighting",
            RuleKind::ElementalDignities => "elemental_dignities",
            RuleKind::NumericalSequences => "numerical_sequences",
            RuleKind::SuitPredominance => "suit_predominance",
            RuleKind::ReversalPropagation => "reversal_propagation",
        }
    }

    pub fn is_enabled(&self, config: &InfluenceConfig) -> bool {
        match self {
            RuleKind::MajorDominance => config.major_dominance.enabled,
            RuleKind::Adjacency => config.adjacency_weighting.enabled,
            RuleKind::ElementalDignities => config.elemental_dignities.enabled,
            RuleKind::NumericalSequences => config.numerical_sequences.enabled,
            RuleKind::SuitPredominance => config.suit_predominance.enabled,
            RuleKind::ReversalPropagation => config.reversal_propagation.enabled,
        }
    }

    /// Factors this rule contributes to `target`; empty when disabled.
    pub fn evaluate(
        &self,
        target: &ResolvedCard<'_>,
        all: &[ResolvedCard<'_>],
        config: &InfluenceConfig,
    ) -> Vec<InfluenceFactor> {
        if !self.is_enabled(config) {
            return Vec::new();
        }

        let factors = match self {
            RuleKind::MajorDominance => major_dominance(target, all, config),
            RuleKind::Adjacency => adjacency(target, all, config),
            RuleKind::ElementalDignities => elemental_dignities(target, all, config),
            RuleKind::NumericalSequences => numerical_sequences(target, all, config),
            RuleKind::SuitPredominance => suit_predominance(target, all, config),
            RuleKind::ReversalPropagation => reversal_propagation(target, config),
        };

        trace!(
            rule = self.label(),
            position = %target.placed.position_id,
            factors = factors.len(),
            "rule evaluated"
        );
        factors
    }
}

/// Runs every rule in [`RuleKind::ORDER`] against one target.
pub(crate) fn evaluate_all(
    target: &ResolvedCard<'_>,
    all: &[ResolvedCard<'_>],
    config: &InfluenceConfig,
) -> Vec<InfluenceFactor> {
    RuleKind::ORDER
        .iter()
        .flat_map(|rule| rule.evaluate(target, all, config))
        .collect()
}

/// NaN distances compare false, so they never fall within reach.
fn within_reach(distance: f64, max_distance: f64) -> bool {
    distance <= max_distance
}

fn others<'a, 'b>(
    target: &'b ResolvedCard<'a>,
    all: &'b [ResolvedCard<'a>],
) -> impl Iterator<Item = &'b ResolvedCard<'a>> + 'b {
    all.iter()
        .filter(move |other| other.placed.position_id != target.placed.position_id)
}

fn major_dominance(
    target: &ResolvedCard<'_>,
    all: &[ResolvedCard<'_>],
    config: &InfluenceConfig,
) -> Vec<InfluenceFactor> {
    let rule = &config.major_dominance;
    let mut factors = Vec::new();

    for source in others(target, all) {
        if !source.definition.arcana.is_major() {
            continue;
        }

        let distance = target.placed.distance_to(source.placed);
        if !within_reach(distance, rule.max_distance) {
            continue;
        }

        factors.push(InfluenceFactor {
            source_position: source.placed.position_id.clone(),
            source_card_id: source.definition.id.clone(),
            effect: rule.multiplier * source.definition.baseline_polarity * rule.polarity_scale,
            explain: format!(
                "{} (Major Arcana) exerts dominant influence on {}",
                source.definition.name, target.definition.name
            ),
            confidence: Confidence::High,
        });
    }

    factors
}

fn adjacency(
    target: &ResolvedCard<'_>,
    all: &[ResolvedCard<'_>],
    config: &InfluenceConfig,
) -> Vec<InfluenceFactor> {
    let rule = &config.adjacency_weighting;
    let mut factors = Vec::new();

    for source in others(target, all) {
        let distance = target.placed.distance_to(source.placed);
        if !within_reach(distance, rule.max_distance) {
            continue;
        }

        let weight = rule.weight_for(distance);
        let confidence = if weight > rule.high_confidence_above {
            Confidence::High
        } else {
            Confidence::Medium
        };

        factors.push(InfluenceFactor {
            source_position: source.placed.position_id.clone(),
            source_card_id: source.definition.id.clone(),
            effect: weight * source.definition.baseline_polarity,
            explain: format!(
                "{} influences {} through adjacency (distance: {:.2})",
                source.definition.name, target.definition.name, distance
            ),
            confidence,
        });
    }

    factors
}

enum Dignity {
    Same,
    Complementary,
    Opposing,
    Neutral,
}

fn dignity(a: Element, b: Element) -> Dignity {
    use Element::*;

    match (a, b) {
        _ if a == b => Dignity::Same,
        (Fire, Earth) | (Earth, Fire) | (Water, Air) | (Air, Water) => Dignity::Complementary,
        (Fire, Water) | (Water, Fire) | (Earth, Air) | (Air, Earth) => Dignity::Opposing,
        _ => Dignity::Neutral,
    }
}

fn elemental_dignities(
    target: &ResolvedCard<'_>,
    all: &[ResolvedCard<'_>],
    config: &InfluenceConfig,
) -> Vec<InfluenceFactor> {
    let rule = &config.elemental_dignities;
    let element = target.definition.element;
    let mut factors = Vec::new();

    for source in others(target, all) {
        let other = source.definition.element;
        let (effect, explain, confidence) = match dignity(element, other) {
            Dignity::Same => (
                rule.same_element_boost,
                format!(
                    "{} and {} share the {} element, reinforcing themes",
                    target.definition.name, source.definition.name, element
                ),
                Confidence::High,
            ),
            Dignity::Complementary => (
                rule.complementary_boost,
                format!("{element} and {other} are complementary elements"),
                Confidence::Medium,
            ),
            Dignity::Opposing => (
                -rule.opposing_reduction,
                format!("{element} and {other} are opposing elements, creating tension"),
                Confidence::Medium,
            ),
            Dignity::Neutral => continue,
        };

        factors.push(InfluenceFactor {
            source_position: source.placed.position_id.clone(),
            source_card_id: source.definition.id.clone(),
            effect,
            explain,
            confidence,
        });
    }

    factors
}

fn numerical_sequences(
    target: &ResolvedCard<'_>,
    all: &[ResolvedCard<'_>],
    config: &InfluenceConfig,
) -> Vec<InfluenceFactor> {
    let rule = &config.numerical_sequences;
    let Some(number) = target.definition.number() else {
        return Vec::new();
    };
    let mut factors = Vec::new();

    for source in others(target, all) {
        let Some(other) = source.definition.number() else {
            continue;
        };

        let (effect, explain) = if number.abs_diff(other) == 1 {
            if number < other {
                (
                    rule.ascending_boost,
                    format!("Numerical sequence: {number} -> {other} (ascending)"),
                )
            } else {
                (
                    rule.descending_boost,
                    format!("Numerical sequence: {number} -> {other} (descending)"),
                )
            }
        } else if number == other {
            (
                rule.same_number_boost,
                format!("Same number ({number}) across different suits"),
            )
        } else {
            continue;
        };

        factors.push(InfluenceFactor {
            source_position: SEQUENCE_SOURCE.to_string(),
            source_card_id: source.definition.id.clone(),
            effect,
            explain,
            confidence: Confidence::Medium,
        });
    }

    factors
}

fn suit_predominance(
    target: &ResolvedCard<'_>,
    all: &[ResolvedCard<'_>],
    config: &InfluenceConfig,
) -> Vec<InfluenceFactor> {
    let rule = &config.suit_predominance;
    let Some(suit) = target.definition.suit() else {
        return Vec::new();
    };

    let count = all
        .iter()
        .filter(|card| card.definition.suit() == Some(suit))
        .count();

    let effect = match count {
        0..=2 => return Vec::new(),
        3 => rule.three_card_boost,
        _ => rule.four_card_boost,
    };

    vec![InfluenceFactor {
        source_position: SUIT_PREDOMINANCE_SOURCE.to_string(),
        source_card_id: SUIT_GROUP_CARD.to_string(),
        effect,
        explain: format!("Suit predominance: {count} {suit} cards"),
        confidence: Confidence::High,
    }]
}

fn reversal_propagation(target: &ResolvedCard<'_>, config: &InfluenceConfig) -> Vec<InfluenceFactor> {
    let rule = &config.reversal_propagation;
    if !target.placed.orientation.is_reversed() {
        return Vec::new();
    }

    let multiplier = if target.definition.arcana.is_major() {
        rule.major_multiplier
    } else {
        1.0
    };

    vec![InfluenceFactor {
        source_position: target.placed.position_id.clone(),
        source_card_id: target.definition.id.clone(),
        effect: -(rule.stability_reduction * multiplier),
        explain: format!(
            "Reversed {} reduces stability in the reading",
            target.definition.name
        ),
        confidence: Confidence::High,
    }]
}
