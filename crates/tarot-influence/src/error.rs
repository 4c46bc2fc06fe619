use crate::config::ConfigError;
use crate::influence::{CatalogueError, ReadingError, SpreadError};
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Json(serde_json::Error),
    Catalogue(CatalogueError),
    Reading(ReadingError),
    Spread(SpreadError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Json(err) => write!(f, "json error: {}", err),
            AppError::Catalogue(err) => write!(f, "catalogue error: {}", err),
            AppError::Reading(err) => write!(f, "reading rejected: {}", err),
            AppError::Spread(err) => write!(f, "spread error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Json(err) => Some(err),
            AppError::Catalogue(err) => Some(err),
            AppError::Reading(err) => Some(err),
            AppError::Spread(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Spread(SpreadError::UnknownSpread(_)) => StatusCode::NOT_FOUND,
            AppError::Reading(_) | AppError::Spread(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Json(_) => StatusCode::BAD_REQUEST,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Catalogue(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<CatalogueError> for AppError {
    fn from(value: CatalogueError) -> Self {
        Self::Catalogue(value)
    }
}

impl From<ReadingError> for AppError {
    fn from(value: ReadingError) -> Self {
        Self::Reading(value)
    }
}

impl From<SpreadError> for AppError {
    fn from(value: SpreadError) -> Self {
        Self::Spread(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reading_errors_map_to_unprocessable() {
        let response = AppError::from(ReadingError::EmptyReading).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let response = AppError::from(CatalogueError::DuplicateDefinition("sun".to_string()))
            .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response =
            AppError::from(SpreadError::UnknownSpread("horseshoe".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
