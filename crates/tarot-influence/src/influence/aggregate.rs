use std::collections::BTreeMap;

use super::config::AggregationConfig;
use super::domain::{CardDefinition, InfluenceFactor};

pub const POLARITY_BOUNDS: (f64, f64) = (-2.0, 2.0);
pub const UNIT_BOUNDS: (f64, f64) = (0.0, 1.0);

/// Final bounded scores for one card.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct AggregatedScores {
    pub polarity: f64,
    pub intensity: f64,
    pub themes: BTreeMap<String, f64>,
}

/// Saturating clamp; never wraps or rejects.
pub(crate) fn clamp(value: f64, (min, max): (f64, f64)) -> f64 {
    value.max(min).min(max)
}

pub(crate) fn aggregate(
    definition: &CardDefinition,
    factors: &[InfluenceFactor],
    config: &AggregationConfig,
) -> AggregatedScores {
    let polarity = factors
        .iter()
        .fold(definition.baseline_polarity, |acc, factor| acc + factor.effect);

    let intensity = factors.iter().fold(definition.baseline_intensity, |acc, factor| {
        acc + factor.effect.abs() * config.intensity_scale
    });

    // Every factor shifts every theme on the card; there is no per-theme targeting.
    let theme_shift = factors.iter().fold(0.0, |acc, factor| {
        if factor.effect > 0.0 {
            acc + factor.effect * config.theme_boost_scale
        } else {
            acc + factor.effect * config.theme_reduction_scale
        }
    });

    let themes = definition
        .themes
        .iter()
        .map(|(theme, weight)| (theme.clone(), clamp(weight + theme_shift, UNIT_BOUNDS)))
        .collect();

    AggregatedScores {
        polarity: clamp(polarity, POLARITY_BOUNDS),
        intensity: clamp(intensity, UNIT_BOUNDS),
        themes,
    }
}
