use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::domain::{ReadingRequest, ReadingResult};
use super::engine::InfluenceEngine;
use super::spreads::{DrawnCard, SpreadKind, SpreadLayout};
use crate::error::AppError;

/// Draws to lay onto a named spread before computing influences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpreadReadingRequest {
    pub reading_id: String,
    pub cards: Vec<DrawnCard>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_context: Option<String>,
}

/// Router exposing the influence engine over JSON.
pub fn influence_router(engine: Arc<InfluenceEngine>) -> Router {
    Router::new()
        .route("/api/v1/readings/influences", post(influences_handler))
        .route("/api/v1/spreads", get(spreads_handler))
        .route(
            "/api/v1/spreads/:spread_type/readings",
            post(spread_reading_handler),
        )
        .with_state(engine)
}

pub(crate) async fn influences_handler(
    State(engine): State<Arc<InfluenceEngine>>,
    Json(request): Json<ReadingRequest>,
) -> Result<Json<ReadingResult>, AppError> {
    Ok(Json(engine.compute_influences(&request)?))
}

pub(crate) async fn spreads_handler() -> Json<Vec<SpreadLayout>> {
    Json(SpreadLayout::all())
}

pub(crate) async fn spread_reading_handler(
    State(engine): State<Arc<InfluenceEngine>>,
    Path(spread_type): Path<String>,
    Json(request): Json<SpreadReadingRequest>,
) -> Result<Json<ReadingResult>, AppError> {
    let kind = SpreadKind::parse(&spread_type)?;
    let positions = SpreadLayout::standard(kind).place(&request.cards)?;

    let reading = ReadingRequest {
        reading_id: request.reading_id,
        spread_type: kind.key().to_string(),
        positions,
        user_context: request.user_context,
    };

    Ok(Json(engine.compute_influences(&reading)?))
}
