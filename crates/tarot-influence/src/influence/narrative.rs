use super::config::NarrativeConfig;
use super::domain::{CardDefinition, InfluenceFactor, InfluencedCard};

const CROSS_CARD_PROMPT: &str =
    "Pay attention to how other cards in your reading modify this card's meaning.";

/// Base text followed by one sentence naming every factor above the emphasis threshold.
pub(crate) fn influenced_text(
    base_text: &str,
    factors: &[InfluenceFactor],
    config: &NarrativeConfig,
) -> String {
    let clauses: Vec<String> = factors
        .iter()
        .filter(|factor| factor.effect.abs() > config.emphasis_threshold)
        .map(|factor| {
            if factor.effect > 0.0 {
                format!("enhanced by {}", factor.source_card_id)
            } else {
                format!("tempered by {}", factor.source_card_id)
            }
        })
        .collect();

    if clauses.is_empty() {
        base_text.to_string()
    } else {
        format!("{base_text} This meaning is {}.", clauses.join(", "))
    }
}

pub(crate) fn journal_prompt(definition: &CardDefinition, factors: &[InfluenceFactor]) -> String {
    let base = if definition.arcana.is_major() {
        format!(
            "Reflect on the deeper meaning of {} in your current situation.",
            definition.name
        )
    } else {
        format!(
            "Consider how {} relates to your daily experiences.",
            definition.name
        )
    };

    if factors.is_empty() {
        base
    } else {
        format!("{base} {CROSS_CARD_PROMPT}")
    }
}

pub(crate) fn summary(
    cards: &[InfluencedCard],
    user_context: Option<&str>,
    config: &NarrativeConfig,
) -> String {
    let mut summary = match cards {
        [single] => format!(
            "This reading centers on {}, suggesting {}",
            single.card_name,
            excerpt(&single.influenced_text, config.summary_excerpt_chars)
        ),
        _ => {
            let names: Vec<&str> = cards.iter().map(|card| card.card_name.as_str()).collect();
            format!(
                "This reading involves {}, creating a complex narrative of influences and interactions.",
                names.join(", ")
            )
        }
    };

    if let Some(context) = user_context.map(str::trim).filter(|context| !context.is_empty()) {
        summary.push_str(&format!(" Considered in light of: \"{context}\"."));
    }

    summary
}

fn excerpt(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}...", cut.trim_end())
}

pub(crate) fn advice(cards: &[InfluencedCard], config: &NarrativeConfig) -> Vec<String> {
    cards
        .iter()
        .take(config.max_advice)
        .map(|card| {
            if card.polarity_score > 0.5 {
                format!("Embrace the positive energy of {}", card.card_name)
            } else if card.polarity_score < -0.5 {
                format!("Address the challenges indicated by {}", card.card_name)
            } else {
                format!("Consider the balanced message of {}", card.card_name)
            }
        })
        .collect()
}

pub(crate) fn follow_up_questions(cards: &[InfluencedCard], config: &NarrativeConfig) -> Vec<String> {
    cards
        .iter()
        .flat_map(|card| {
            [
                format!(
                    "What does {} mean to you in your current situation?",
                    card.card_name
                ),
                format!("How do you feel about the message of {}?", card.card_name),
            ]
        })
        .take(config.max_follow_up_questions)
        .collect()
}
