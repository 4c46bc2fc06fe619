use crate::infra::{build_engine, load_catalogue};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use tarot_influence::config::AppConfig;
use tarot_influence::error::AppError;
use tarot_influence::influence::{
    DrawnCard, InfluenceEngine, InfluencedCard, Orientation, ReadingRequest,
    ReadingResult, ReadingStatistics, SpreadKind, SpreadLayout,
};
use tarot_influence::telemetry;

const DEMO_QUESTION: &str = "What should I focus on this season?";

#[derive(Args, Debug)]
pub(crate) struct ReadingArgs {
    /// JSON file holding a reading request
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Card catalogue to load instead of the configured or bundled one
    #[arg(long)]
    pub(crate) catalogue: Option<PathBuf>,
    /// Rule override file (JSON) applied on top of the defaults
    #[arg(long)]
    pub(crate) rules: Option<PathBuf>,
    /// Include arcana, orientation, suit, and element counts in the output
    #[arg(long)]
    pub(crate) stats: bool,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Spread to lay out (single, three_card, celtic_cross, relationship)
    #[arg(long, default_value = "three_card", value_parser = SpreadKind::parse)]
    pub(crate) spread: SpreadKind,
    /// Print spread statistics after the reading
    #[arg(long)]
    pub(crate) stats: bool,
}

#[derive(Debug, Serialize)]
struct ReadingReport {
    #[serde(flatten)]
    result: ReadingResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    statistics: Option<ReadingStatistics>,
}

pub(crate) fn run_reading(args: ReadingArgs) -> Result<(), AppError> {
    let ReadingArgs {
        input,
        catalogue,
        rules,
        stats,
    } = args;

    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let mut settings = config.engine;
    if catalogue.is_some() {
        settings.catalogue_path = catalogue;
    }
    if rules.is_some() {
        settings.rules_path = rules;
    }
    let engine = build_engine(&settings)?;

    let raw = std::fs::read_to_string(&input)?;
    let request: ReadingRequest = serde_json::from_str(&raw)?;
    let report = reading_report(&engine, &request, stats)?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn reading_report(
    engine: &InfluenceEngine,
    request: &ReadingRequest,
    stats: bool,
) -> Result<ReadingReport, AppError> {
    let result = engine.compute_influences(request)?;
    let statistics = if stats {
        Some(engine.statistics(&request.positions)?)
    } else {
        None
    };
    Ok(ReadingReport { result, statistics })
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let engine = InfluenceEngine::with_defaults(load_catalogue(None)?);
    let layout = SpreadLayout::standard(args.spread);
    let request = demo_request(&layout)?;
    let result = engine.compute_influences(&request)?;

    println!("{}", render_reading(&layout, &result));

    if args.stats {
        let statistics = engine.statistics(&request.positions)?;
        println!("\n{}", render_statistics(&statistics));
    }

    Ok(())
}

fn demo_draws(kind: SpreadKind) -> Vec<DrawnCard> {
    let cards: &[(&str, Orientation)] = match kind {
        SpreadKind::Single => &[("star", Orientation::Upright)],
        SpreadKind::ThreeCard => &[
            ("tower", Orientation::Reversed),
            ("sun", Orientation::Upright),
            ("star", Orientation::Upright),
        ],
        SpreadKind::CelticCross => &[
            ("fool", Orientation::Upright),
            ("high_priestess", Orientation::Upright),
            ("three_swords", Orientation::Reversed),
            ("ace_cups", Orientation::Upright),
            ("moon", Orientation::Upright),
            ("knight_wands", Orientation::Upright),
            ("emperor", Orientation::Upright),
            ("two_cups", Orientation::Upright),
            ("death", Orientation::Reversed),
            ("ten_pentacles", Orientation::Upright),
        ],
        SpreadKind::Relationship => &[
            ("lovers", Orientation::Upright),
            ("queen_cups", Orientation::Upright),
            ("two_cups", Orientation::Upright),
            ("hermit", Orientation::Reversed),
        ],
    };

    cards
        .iter()
        .map(|(card_id, orientation)| DrawnCard {
            card_id: (*card_id).to_string(),
            orientation: *orientation,
        })
        .collect()
}

fn demo_request(layout: &SpreadLayout) -> Result<ReadingRequest, AppError> {
    let positions = layout.place(&demo_draws(layout.kind))?;
    Ok(ReadingRequest {
        reading_id: format!("demo-{}", layout.kind.key()),
        spread_type: layout.kind.key().to_string(),
        positions,
        user_context: Some(DEMO_QUESTION.to_string()),
    })
}

fn render_card(layout: &SpreadLayout, card: &InfluencedCard) -> Vec<String> {
    let position_name = layout
        .positions
        .iter()
        .find(|slot| slot.position_id == card.position)
        .map(|slot| slot.name)
        .unwrap_or(card.position.as_str());

    let mut lines = vec![
        format!(
            "[{position_name}] {} ({})",
            card.card_name,
            card.orientation.label()
        ),
        format!(
            "  polarity {:+.3}  intensity {:.3}",
            card.polarity_score, card.intensity_score
        ),
        format!("  {}", card.influenced_text),
    ];
    lines.extend(card.influence_factors.iter().map(|factor| {
        format!(
            "    {:+.3} ({}) {}",
            factor.effect,
            factor.confidence.label(),
            factor.explain
        )
    }));
    lines.push(format!("  Journal: {}", card.journal_prompt));
    lines
}

fn render_reading(layout: &SpreadLayout, result: &ReadingResult) -> String {
    let mut lines = vec![
        format!("Tarot influence demo: {}", layout.name),
        result.summary.clone(),
        String::new(),
    ];

    for card in &result.cards {
        lines.extend(render_card(layout, card));
        lines.push(String::new());
    }

    lines.push("Advice".to_string());
    lines.extend(result.advice.iter().map(|advice| format!("  - {advice}")));
    lines.push("Questions to explore".to_string());
    lines.extend(
        result
            .follow_up_questions
            .iter()
            .map(|question| format!("  - {question}")),
    );
    lines.join("\n")
}

fn render_statistics(statistics: &ReadingStatistics) -> String {
    let mut lines = vec![
        "Spread statistics".to_string(),
        format!(
            "  cards {} (major {}, minor {})",
            statistics.total_cards, statistics.major_arcana, statistics.minor_arcana
        ),
        format!(
            "  upright {}, reversed {}",
            statistics.upright_cards, statistics.reversed_cards
        ),
    ];
    lines.extend(
        statistics
            .suit_distribution
            .iter()
            .map(|(suit, count)| format!("  suit {suit}: {count}")),
    );
    lines.extend(
        statistics
            .element_distribution
            .iter()
            .map(|(element, count)| format!("  element {element}: {count}")),
    );
    if let Some(suit) = statistics.dominant_suit() {
        lines.push(format!("  dominant suit: {suit}"));
    }
    lines.join("\n")
}
