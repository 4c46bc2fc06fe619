use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, warn};

use super::aggregate::aggregate;
use super::catalogue::CardCatalogue;
use super::config::InfluenceConfig;
use super::domain::{InfluencedCard, PlacedCard, ReadingRequest, ReadingResult, ResolvedCard};
use super::narrative;
use super::rules;
use super::statistics::ReadingStatistics;

/// Validation failures; raised before any influence is computed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReadingError {
    #[error("reading contains no placed cards")]
    EmptyReading,
    #[error("card `{0}` is not present in the catalogue")]
    UnknownCard(String),
    #[error("position `{0}` appears more than once in the reading")]
    DuplicatePosition(String),
    #[error("card `{0}` appears more than once in the reading")]
    DuplicateCard(String),
}

/// Stateless facade tying the catalogue, rule set, aggregator, and renderer together.
#[derive(Debug, Clone)]
pub struct InfluenceEngine {
    catalogue: Arc<CardCatalogue>,
    config: InfluenceConfig,
}

impl InfluenceEngine {
    pub fn new(catalogue: Arc<CardCatalogue>, config: InfluenceConfig) -> Self {
        Self { catalogue, config }
    }

    pub fn with_defaults(catalogue: Arc<CardCatalogue>) -> Self {
        Self::new(catalogue, InfluenceConfig::default())
    }

    pub fn catalogue(&self) -> &CardCatalogue {
        &self.catalogue
    }

    pub fn config(&self) -> &InfluenceConfig {
        &self.config
    }

    pub fn compute_influences(&self, request: &ReadingRequest) -> Result<ReadingResult, ReadingError> {
        let resolved = self.resolve(&request.positions).map_err(|err| {
            warn!(reading_id = %request.reading_id, error = %err, "reading rejected");
            err
        })?;

        let cards: Vec<InfluencedCard> = resolved
            .iter()
            .map(|target| self.influence_card(target, &resolved))
            .collect();

        let narrative_config = &self.config.narrative;
        let summary = narrative::summary(&cards, request.user_context.as_deref(), narrative_config);
        let advice = narrative::advice(&cards, narrative_config);
        let follow_up_questions = narrative::follow_up_questions(&cards, narrative_config);

        Ok(ReadingResult {
            reading_id: request.reading_id.clone(),
            summary,
            cards,
            advice,
            follow_up_questions,
        })
    }

    /// Distribution counts for a reading, validated the same way as a computation.
    pub fn statistics(&self, positions: &[PlacedCard]) -> Result<ReadingStatistics, ReadingError> {
        let resolved = self.resolve(positions)?;
        Ok(ReadingStatistics::from_cards(&resolved))
    }

    fn resolve<'a>(&'a self, positions: &'a [PlacedCard]) -> Result<Vec<ResolvedCard<'a>>, ReadingError> {
        if positions.is_empty() {
            return Err(ReadingError::EmptyReading);
        }

        let mut seen_positions = HashSet::with_capacity(positions.len());
        let mut seen_cards = HashSet::with_capacity(positions.len());
        let mut resolved = Vec::with_capacity(positions.len());

        for placed in positions {
            if !seen_positions.insert(placed.position_id.as_str()) {
                return Err(ReadingError::DuplicatePosition(placed.position_id.clone()));
            }
            let definition = self
                .catalogue
                .get(&placed.card_id)
                .ok_or_else(|| ReadingError::UnknownCard(placed.card_id.clone()))?;
            if !seen_cards.insert(placed.card_id.as_str()) {
                return Err(ReadingError::DuplicateCard(placed.card_id.clone()));
            }
            resolved.push(ResolvedCard { placed, definition });
        }

        Ok(resolved)
    }

    fn influence_card(&self, target: &ResolvedCard<'_>, all: &[ResolvedCard<'_>]) -> InfluencedCard {
        let factors = rules::evaluate_all(target, all, &self.config);
        let scores = aggregate(target.definition, &factors, &self.config.aggregation);

        debug!(
            position = %target.placed.position_id,
            card = %target.definition.id,
            factors = factors.len(),
            polarity = scores.polarity,
            "card influences evaluated"
        );

        let base_text = target.definition.text_for(target.placed.orientation).to_string();
        let influenced_text = narrative::influenced_text(&base_text, &factors, &self.config.narrative);
        let journal_prompt = narrative::journal_prompt(target.definition, &factors);

        InfluencedCard {
            position: target.placed.position_id.clone(),
            card_id: target.definition.id.clone(),
            card_name: target.definition.name.clone(),
            orientation: target.placed.orientation,
            base_text,
            influenced_text,
            polarity_score: scores.polarity,
            intensity_score: scores.intensity,
            themes: scores.themes,
            influence_factors: factors,
            journal_prompt,
        }
    }
}
