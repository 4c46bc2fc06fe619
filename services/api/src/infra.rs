use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tarot_influence::config::EngineSettings;
use tarot_influence::error::AppError;
use tarot_influence::influence::{CardCatalogue, InfluenceEngine};
use tracing::info;

/// Demo deck compiled into the binary for when no catalogue path is configured.
pub(crate) const BUNDLED_CATALOGUE: &str = include_str!("../data/sample_catalogue.json");

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn load_catalogue(path: Option<&Path>) -> Result<Arc<CardCatalogue>, AppError> {
    let catalogue = match path {
        Some(path) => {
            info!(path = %path.display(), "loading card catalogue");
            CardCatalogue::from_path(path)?
        }
        None => CardCatalogue::from_json_str(BUNDLED_CATALOGUE)?,
    };
    Ok(Arc::new(catalogue))
}

pub(crate) fn build_engine(settings: &EngineSettings) -> Result<InfluenceEngine, AppError> {
    let catalogue = load_catalogue(settings.catalogue_path.as_deref())?;
    let config = settings.influence_config()?;
    Ok(InfluenceEngine::new(catalogue, config))
}
