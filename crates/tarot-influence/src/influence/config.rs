use serde::{Deserialize, Serialize};

/// Every numeric knob used by the rule set, the aggregator, and the narrative renderer.
///
/// Each block deserializes with defaults, so an override document only needs the
/// fields it changes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InfluenceConfig {
    pub major_dominance: MajorDominanceConfig,
    pub adjacency_weighting: AdjacencyConfig,
    pub elemental_dignities: ElementalConfig,
    pub numerical_sequences: SequenceConfig,
    pub suit_predominance: SuitPredominanceConfig,
    pub reversal_propagation: ReversalConfig,
    pub aggregation: AggregationConfig,
    pub narrative: NarrativeConfig,
}

impl InfluenceConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MajorDominanceConfig {
    pub enabled: bool,
    pub multiplier: f64,
    pub max_distance: f64,
    pub polarity_scale: f64,
}

impl Default for MajorDominanceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            multiplier: 1.5,
            max_distance: 4.0,
            polarity_scale: 0.1,
        }
    }
}

/// Upper distance bound (inclusive) and the weight applied inside it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdjacencyBand {
    pub within: f64,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdjacencyConfig {
    pub enabled: bool,
    pub max_distance: f64,
    /// Checked in order; the first band whose `within` covers the distance wins.
    pub bands: Vec<AdjacencyBand>,
    pub fallback_weight: f64,
    pub high_confidence_above: f64,
}

impl AdjacencyConfig {
    pub fn weight_for(&self, distance: f64) -> f64 {
        self.bands
            .iter()
            .find(|band| distance <= band.within)
            .map(|band| band.weight)
            .unwrap_or(self.fallback_weight)
    }
}

impl Default for AdjacencyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_distance: 4.0,
            bands: vec![
                AdjacencyBand {
                    within: 1.0,
                    weight: 1.0,
                },
                AdjacencyBand {
                    within: 1.5,
                    weight: 0.7,
                },
                AdjacencyBand {
                    within: 2.5,
                    weight: 0.5,
                },
                AdjacencyBand {
                    within: 4.0,
                    weight: 0.3,
                },
            ],
            fallback_weight: 0.1,
            high_confidence_above: 0.7,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementalConfig {
    pub enabled: bool,
    pub same_element_boost: f64,
    pub complementary_boost: f64,
    pub opposing_reduction: f64,
}

impl Default for ElementalConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            same_element_boost: 0.2,
            complementary_boost: 0.1,
            opposing_reduction: 0.15,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequenceConfig {
    pub enabled: bool,
    pub ascending_boost: f64,
    pub descending_boost: f64,
    pub same_number_boost: f64,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ascending_boost: 0.15,
            descending_boost: 0.15,
            same_number_boost: 0.2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuitPredominanceConfig {
    pub enabled: bool,
    pub three_card_boost: f64,
    pub four_card_boost: f64,
}

impl Default for SuitPredominanceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            three_card_boost: 0.25,
            four_card_boost: 0.35,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReversalConfig {
    pub enabled: bool,
    pub stability_reduction: f64,
    pub major_multiplier: f64,
}

impl Default for ReversalConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            stability_reduction: 0.3,
            major_multiplier: 1.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationConfig {
    pub intensity_scale: f64,
    pub theme_boost_scale: f64,
    pub theme_reduction_scale: f64,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            intensity_scale: 0.1,
            theme_boost_scale: 0.1,
            theme_reduction_scale: 0.05,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NarrativeConfig {
    /// Factors with `|effect|` above this are named in the influenced text.
    pub emphasis_threshold: f64,
    pub max_advice: usize,
    pub max_follow_up_questions: usize,
    pub summary_excerpt_chars: usize,
}

impl Default for NarrativeConfig {
    fn default() -> Self {
        Self {
            emphasis_threshold: 0.1,
            max_advice: 3,
            max_follow_up_questions: 3,
            summary_excerpt_chars: 100,
        }
    }
}
