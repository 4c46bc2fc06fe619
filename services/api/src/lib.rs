//! Command-line entry point and HTTP service for the tarot influence engine.

mod cli;
mod demo;
mod infra;
mod routes;
mod server;

use tarot_influence::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
