use super::common::*;
use crate::influence::{
    Element, InfluenceEngine, Orientation, ReadingError, ReadingRequest, ReadingResult, Suit,
    POLARITY_BOUNDS, UNIT_BOUNDS,
};

#[test]
fn rejects_empty_reading() {
    let err = engine()
        .compute_influences(&request(Vec::new()))
        .expect_err("empty reading rejected");
    assert_eq!(err, ReadingError::EmptyReading);
}

#[test]
fn rejects_unknown_card() {
    let err = engine()
        .compute_influences(&request(vec![
            placed("past", "sun", 0.0, 0.0),
            placed("present", "hanged_man", 1.0, 0.0),
        ]))
        .expect_err("unknown card rejected");
    assert_eq!(err, ReadingError::UnknownCard("hanged_man".to_string()));
}

#[test]
fn rejects_duplicate_position_and_card() {
    let engine = engine();

    let err = engine
        .compute_influences(&request(vec![
            placed("past", "sun", 0.0, 0.0),
            placed("past", "moon", 1.0, 0.0),
        ]))
        .expect_err("duplicate position rejected");
    assert_eq!(err, ReadingError::DuplicatePosition("past".to_string()));

    let err = engine
        .compute_influences(&request(vec![
            placed("past", "sun", 0.0, 0.0),
            reversed("present", "sun", 1.0, 0.0),
        ]))
        .expect_err("duplicate card rejected");
    assert_eq!(err, ReadingError::DuplicateCard("sun".to_string()));
}

#[test]
fn validation_reports_first_problem_in_position_order() {
    let err = engine()
        .compute_influences(&request(vec![
            placed("past", "unknown_card", 0.0, 0.0),
            placed("past", "sun", 1.0, 0.0),
        ]))
        .expect_err("reading rejected");
    assert_eq!(err, ReadingError::UnknownCard("unknown_card".to_string()));
}

#[test]
fn single_upright_card_keeps_its_baseline() {
    let result = engine()
        .compute_influences(&request(vec![placed("center", "star", 0.0, 0.0)]))
        .expect("reading computes");

    let star = card(&result, "star");
    assert!(star.influence_factors.is_empty());
    assert_eq!(star.polarity_score, 0.8);
    assert_eq!(star.intensity_score, 0.6);
    assert_eq!(star.themes.get("star_theme"), Some(&0.8));
    assert_eq!(star.themes.get("change"), Some(&0.5));
    assert_eq!(star.base_text, "The Star upright.");
    assert_eq!(star.influenced_text, star.base_text);
    assert_eq!(
        star.journal_prompt,
        "Reflect on the deeper meaning of The Star in your current situation."
    );
    assert_eq!(
        result.summary,
        "This reading centers on The Star, suggesting The Star upright."
    );
    assert_eq!(
        result.advice,
        vec!["Embrace the positive energy of The Star".to_string()]
    );
    assert_eq!(result.follow_up_questions.len(), 2);
}

#[test]
fn single_reversed_card_only_carries_its_reversal() {
    let result = engine()
        .compute_influences(&request(vec![reversed("center", "tower", 0.0, 0.0)]))
        .expect("reading computes");

    let tower = card(&result, "tower");
    assert_eq!(tower.orientation, Orientation::Reversed);
    assert_eq!(tower.base_text, "The Tower reversed.");
    assert_eq!(tower.influence_factors.len(), 1);
    assert_close(tower.influence_factors[0].effect, -0.45);
    assert_close(tower.polarity_score, -0.95);
    assert_close(tower.intensity_score, 0.945);
    assert_eq!(
        tower.influenced_text,
        "The Tower reversed. This meaning is tempered by tower."
    );
    assert_eq!(
        result.advice,
        vec!["Address the challenges indicated by The Tower".to_string()]
    );
}

#[test]
fn three_card_reading_scores_each_position() {
    let result = engine()
        .compute_influences(&tower_sun_star())
        .expect("reading computes");

    assert_eq!(result.reading_id, "reading-001");
    let positions: Vec<&str> = result.cards.iter().map(|card| card.position.as_str()).collect();
    assert_eq!(positions, vec!["past", "present", "future"]);

    let tower = card(&result, "tower");
    assert_all_close(&effects(tower), &[0.135, 0.12, 0.9, 0.4, 0.2]);
    assert_close(tower.polarity_score, 1.255);
    assert_eq!(tower.intensity_score, 1.0);

    let sun = card(&result, "sun");
    assert_all_close(&effects(sun), &[-0.075, 0.12, -0.5, 0.8, 0.2]);
    assert_close(sun.polarity_score, 1.445);
    assert!(sun.influenced_text.starts_with("The Sun upright. This meaning is "));
    assert!(sun.influenced_text.contains("tempered by tower"));
    assert!(sun.influenced_text.contains("enhanced by star"));
    assert!(sun
        .journal_prompt
        .ends_with("Pay attention to how other cards in your reading modify this card's meaning."));

    let star = card(&result, "star");
    assert_all_close(&effects(star), &[-0.075, 0.135, -0.25, 0.9]);
    assert_close(star.polarity_score, 1.51);

    assert_eq!(
        result.summary,
        "This reading involves The Tower, The Sun, The Star, creating a complex narrative of influences and interactions."
    );
    assert_eq!(
        result.advice,
        vec![
            "Embrace the positive energy of The Tower".to_string(),
            "Embrace the positive energy of The Sun".to_string(),
            "Embrace the positive energy of The Star".to_string(),
        ]
    );
    assert_eq!(
        result.follow_up_questions,
        vec![
            "What does The Tower mean to you in your current situation?".to_string(),
            "How do you feel about the message of The Tower?".to_string(),
            "What does The Sun mean to you in your current situation?".to_string(),
        ]
    );
}

#[test]
fn identical_requests_produce_identical_results() {
    let engine = engine();
    let request = ReadingRequest {
        user_context: Some("new job".to_string()),
        ..request(vec![
            reversed("a", "moon", 0.0, 0.0),
            placed("b", "two_cups", 1.0, 0.0),
            placed("c", "ace_cups", 1.0, 1.0),
            reversed("d", "five_pentacles", 2.0, 0.0),
        ])
    };

    let first = engine.compute_influences(&request).expect("reading computes");
    let second = engine.compute_influences(&request).expect("reading computes");
    assert_eq!(first, second);

    let first_json = serde_json::to_string(&first).expect("serialize");
    let second_json = serde_json::to_string(&second).expect("serialize");
    assert_eq!(first_json, second_json);
}

#[test]
fn scores_stay_within_bounds() {
    let result = engine()
        .compute_influences(&request(vec![
            placed("a", "sun", 0.0, 0.0),
            placed("b", "ace_wands", 0.5, 0.0),
            placed("c", "two_wands", 1.0, 0.0),
            placed("d", "three_wands", 0.0, 0.5),
            placed("e", "knight_wands", 0.5, 0.5),
            reversed("f", "tower", 10.0, 10.0),
            reversed("g", "five_pentacles", 10.5, 10.0),
            reversed("h", "moon", 10.0, 10.5),
        ]))
        .expect("reading computes");

    for card in &result.cards {
        assert!(
            (POLARITY_BOUNDS.0..=POLARITY_BOUNDS.1).contains(&card.polarity_score),
            "{} polarity {}",
            card.card_id,
            card.polarity_score
        );
        assert!(
            (UNIT_BOUNDS.0..=UNIT_BOUNDS.1).contains(&card.intensity_score),
            "{} intensity {}",
            card.card_id,
            card.intensity_score
        );
        for (theme, weight) in &card.themes {
            assert!(
                (UNIT_BOUNDS.0..=UNIT_BOUNDS.1).contains(weight),
                "{} theme {theme} {weight}",
                card.card_id
            );
        }
    }

    let ace = card(&result, "ace_wands");
    assert_eq!(ace.polarity_score, POLARITY_BOUNDS.1);
    assert_eq!(ace.themes.get("daily"), Some(&1.0));
}

#[test]
fn user_context_is_appended_to_summary() {
    let result = engine()
        .compute_influences(&ReadingRequest {
            user_context: Some("Should I move abroad?".to_string()),
            ..request(vec![
                placed("a", "empress", 0.0, 0.0),
                placed("b", "two_cups", 1.0, 0.0),
            ])
        })
        .expect("reading computes");

    assert!(result.summary.starts_with("This reading involves The Empress, Two of Cups"));
    assert!(result
        .summary
        .ends_with(" Considered in light of: \"Should I move abroad?\"."));
}

#[test]
fn result_serializes_with_documented_field_names() {
    let result = engine()
        .compute_influences(&tower_sun_star())
        .expect("reading computes");
    let value = serde_json::to_value(&result).expect("serialize");

    for field in ["reading_id", "summary", "cards", "advice", "follow_up_questions"] {
        assert!(value.get(field).is_some(), "missing {field}");
    }
    let first = &value["cards"][0];
    for field in [
        "position",
        "card_id",
        "card_name",
        "orientation",
        "base_text",
        "influenced_text",
        "polarity_score",
        "intensity_score",
        "themes",
        "influence_factors",
        "journal_prompt",
    ] {
        assert!(first.get(field).is_some(), "missing card field {field}");
    }
    assert_eq!(first["orientation"], "upright");
    let factor = &first["influence_factors"][0];
    assert_eq!(factor["source_position"], "present");
    assert_eq!(factor["source_card_id"], "sun");
    assert_eq!(factor["confidence"], "high");

    let restored: ReadingResult =
        serde_json::from_str(&serde_json::to_string(&result).expect("serialize")).expect("parse");
    assert_eq!(restored, result);
}

#[test]
fn request_parses_coordinate_field_names() {
    let raw = r#"{
        "reading_id": "r-42",
        "spread_type": "three_card",
        "positions": [
            { "position_id": "past", "card_id": "tower", "orientation": "reversed", "x_coordinate": 0.0, "y_coordinate": 0.0 },
            { "position_id": "present", "card_id": "sun", "orientation": "upright", "x_coordinate": 1.0 }
        ]
    }"#;
    let request: ReadingRequest = serde_json::from_str(raw).expect("request parses");
    assert_eq!(request.positions[0].orientation, Orientation::Reversed);
    assert_eq!(request.positions[1].y, 0.0);
    assert!(request.user_context.is_none());

    let result = engine().compute_influences(&request).expect("reading computes");
    assert_eq!(result.reading_id, "r-42");
    assert_eq!(result.cards.len(), 2);
}

#[test]
fn statistics_count_arcana_orientation_suits_and_elements() {
    let stats = engine()
        .statistics(&request(vec![
            placed("a", "sun", 0.0, 0.0),
            reversed("b", "ace_wands", 1.0, 0.0),
            placed("c", "two_wands", 2.0, 0.0),
            reversed("d", "two_cups", 3.0, 0.0),
            placed("e", "star", 4.0, 0.0),
        ])
        .positions)
        .expect("statistics computed");

    assert_eq!(stats.total_cards, 5);
    assert_eq!(stats.major_arcana, 2);
    assert_eq!(stats.minor_arcana, 3);
    assert_eq!(stats.upright_cards, 3);
    assert_eq!(stats.reversed_cards, 2);
    assert_eq!(stats.suit_distribution.get(&Suit::Wands), Some(&2));
    assert_eq!(stats.suit_distribution.get(&Suit::Cups), Some(&1));
    assert_eq!(stats.suit_distribution.get(&Suit::Swords), None);
    assert_eq!(stats.element_distribution.get(&Element::Fire), Some(&3));
    assert_eq!(stats.element_distribution.get(&Element::Air), Some(&1));
    assert_eq!(stats.dominant_suit(), Some(Suit::Wands));
}

#[test]
fn statistics_validate_like_computation() {
    let err = engine()
        .statistics(&[])
        .expect_err("empty reading rejected");
    assert_eq!(err, ReadingError::EmptyReading);
}

#[test]
fn dominant_suit_ties_resolve_to_first_suit() {
    let stats = engine()
        .statistics(&[
            placed("a", "two_cups", 0.0, 0.0),
            placed("b", "ace_wands", 1.0, 0.0),
        ])
        .expect("statistics computed");
    assert_eq!(stats.dominant_suit(), Some(Suit::Wands));

    let stats = engine()
        .statistics(&[placed("a", "sun", 0.0, 0.0)])
        .expect("statistics computed");
    assert_eq!(stats.dominant_suit(), None);
}

#[test]
fn engine_exposes_catalogue_and_config() {
    let engine: InfluenceEngine = engine();
    assert_eq!(engine.catalogue().len(), 14);
    assert!(engine.catalogue().contains("knight_wands"));
    assert!(engine.config().major_dominance.enabled);
}
