//! Deterministic tarot influence engine.
//!
//! A reading is validated against the [`CardCatalogue`], every card is run through the
//! six rules of [`RuleKind::ORDER`], the resulting factors are aggregated into bounded
//! scores, and templated narrative is rendered. The same request always yields the
//! same [`ReadingResult`].

mod aggregate;
pub mod catalogue;
mod config;
pub mod domain;
mod engine;
mod narrative;
pub mod router;
mod rules;
pub mod spreads;
mod statistics;

#[cfg(test)]
mod tests;

pub use aggregate::{POLARITY_BOUNDS, UNIT_BOUNDS};
pub use catalogue::{CardCatalogue, CardRecord, CatalogueError, MalformedReason};
pub use config::{
    AdjacencyBand, AdjacencyConfig, AggregationConfig, ElementalConfig, InfluenceConfig,
    MajorDominanceConfig, NarrativeConfig, ReversalConfig, SequenceConfig, SuitPredominanceConfig,
};
pub use domain::{
    Arcana, CardDefinition, Confidence, Element, InfluenceFactor, InfluencedCard, MinorValue,
    Orientation, PlacedCard, Rank, ReadingRequest, ReadingResult, ResolvedCard, Suit,
};
pub use engine::{InfluenceEngine, ReadingError};
pub use router::{influence_router, SpreadReadingRequest};
pub use rules::RuleKind;
pub use spreads::{DrawnCard, SpreadError, SpreadKind, SpreadLayout, SpreadPosition};
pub use statistics::ReadingStatistics;
