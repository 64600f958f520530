//! Claimdesk Server
//!
//! HTTP front end for the claim pipeline. Accepts a claim's PDF files as a
//! multipart upload, extracts page text, and returns the pipeline's report
//! as JSON.

#![warn(missing_docs)]

pub mod config;
pub mod handlers;
pub mod intake;
pub mod pdf;

use claimdesk_extractor::ClaimPipeline;
use claimdesk_llm::LlmError;
use config::ServerConfig;
use handlers::{create_router, AppState};
use pdf::PdfTextSource;
use tokio::net::TcpListener;
use tracing::info;

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Inference backend could not be set up
    #[error("LLM setup error: {0}")]
    Llm(#[from] LlmError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Start the claim HTTP server
///
/// Builds the inference provider and pipeline from configuration and
/// serves until the process is stopped.
pub async fn start_server(config: ServerConfig) -> Result<(), ServerError> {
    info!("Starting Claimdesk server");
    info!("Bind address: {}", config.bind_addr());
    info!("Model: {} at {}", config.llm.model, config.llm.endpoint);
    info!(
        "Classification delay: {} ms, max documents: {}",
        config.pipeline.classification_delay_ms, config.pipeline.max_documents
    );

    // The provider owns a blocking HTTP client; build it off the async workers
    let settings = config.llm.clone();
    let llm = tokio::task::spawn_blocking(move || settings.build_provider())
        .await
        .map_err(|e| ServerError::Server(e.to_string()))??;

    let pipeline = ClaimPipeline::new(llm, config.pipeline.clone(), config.validation.clone());
    let state = AppState::new(pipeline, PdfTextSource, config.intake_policy());

    let app = create_router(state);

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Server listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    Ok(())
}
