//! HTTP request handlers for the claim service.
//!
//! Implements claim submission, a usage message and a health check using
//! axum.

use crate::intake::{IntakeError, IntakePolicy, Upload};
use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router as AxumRouter,
};
use claimdesk_domain::traits::{LlmProvider, PageTextSource};
use claimdesk_extractor::{ClaimPipeline, ClaimReport, ExtractorError, SubmittedDocument};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Usage message served at `/`
pub const USAGE: &str =
    "POST the claim's PDF files as multipart form data to /process-claim to get a claim decision";

/// Shared application state
pub struct AppState<L, T>
where
    L: LlmProvider,
{
    /// The claim pipeline
    pub pipeline: Arc<ClaimPipeline<L>>,
    /// Page text extraction for uploads
    pub text_source: Arc<T>,
    /// Upload limits
    pub intake: IntakePolicy,
}

impl<L, T> AppState<L, T>
where
    L: LlmProvider,
{
    /// Create application state
    pub fn new(pipeline: ClaimPipeline<L>, text_source: T, intake: IntakePolicy) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            text_source: Arc::new(text_source),
            intake,
        }
    }
}

impl<L, T> Clone for AppState<L, T>
where
    L: LlmProvider,
{
    fn clone(&self) -> Self {
        Self {
            pipeline: Arc::clone(&self.pipeline),
            text_source: Arc::clone(&self.text_source),
            intake: self.intake.clone(),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Always "healthy" while the process serves requests
    pub status: String,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// Submission rejected at intake
    Intake(IntakeError),
    /// Submission rejected by the pipeline's own count check
    Rejected(ExtractorError),
    /// Internal server error
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Intake(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            AppError::Rejected(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

impl From<IntakeError> for AppError {
    fn from(e: IntakeError) -> Self {
        AppError::Intake(e)
    }
}

impl From<ExtractorError> for AppError {
    fn from(e: ExtractorError) -> Self {
        match e {
            ExtractorError::NoDocuments | ExtractorError::TooManyDocuments { .. } => {
                AppError::Rejected(e)
            }
            other => AppError::Internal(other.to_string()),
        }
    }
}

/// POST /process-claim - Classify, extract and decide on uploaded PDFs
///
/// Every file part of the multipart body is one document; plain form
/// fields are ignored. Count and content type are checked before any file
/// is parsed.
async fn process_claim<L, T>(
    State(state): State<AppState<L, T>>,
    multipart: Multipart,
) -> Result<Json<ClaimReport>, AppError>
where
    L: LlmProvider + Send + Sync + 'static,
    L::Error: Display,
    T: PageTextSource + Send + Sync + 'static,
    T::Error: Display,
{
    let uploads = read_uploads(multipart).await?;
    state.intake.check(&uploads)?;

    let mut documents = Vec::with_capacity(uploads.len());
    for upload in uploads {
        documents.push(load_document(Arc::clone(&state.text_source), upload).await?);
    }

    let report = state.pipeline.process(documents).await?;
    Ok(Json(report))
}

async fn read_uploads(mut multipart: Multipart) -> Result<Vec<Upload>, IntakeError> {
    let mut uploads = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| IntakeError::Malformed(e.to_string()))?
    {
        // Plain form fields carry no file name and are not documents
        let Some(file_name) = field.file_name().map(str::to_string) else {
            debug!(field = ?field.name(), "Skipping non-file form field");
            continue;
        };
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| IntakeError::Malformed(e.to_string()))?;

        uploads.push(Upload {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        });
    }

    Ok(uploads)
}

/// Extract page texts off the async workers
async fn load_document<T>(text_source: Arc<T>, upload: Upload) -> Result<SubmittedDocument, IntakeError>
where
    T: PageTextSource + Send + Sync + 'static,
    T::Error: Display,
{
    let Upload {
        file_name, bytes, ..
    } = upload;

    let extracted = tokio::task::spawn_blocking(move || {
        text_source.page_texts(&bytes).map_err(|e| e.to_string())
    })
    .await;

    let pages = match extracted {
        Ok(Ok(pages)) => pages,
        Ok(Err(reason)) => {
            warn!("Unreadable upload {}: {}", file_name, reason);
            return Err(IntakeError::Unreadable { file_name, reason });
        }
        // pdf parsing can panic on hostile input; the join error carries it
        Err(e) => {
            warn!("Text extraction task failed for {}: {}", file_name, e);
            return Err(IntakeError::Unreadable {
                file_name,
                reason: e.to_string(),
            });
        }
    };

    if pages.is_empty() {
        return Err(IntakeError::NoPages(file_name));
    }

    info!("Loaded {} ({} pages)", file_name, pages.len());
    Ok(SubmittedDocument::new(file_name, pages))
}

/// GET / - Usage message
async fn introduction() -> &'static str {
    USAGE
}

/// GET /health - Liveness check
async fn health_check() -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "healthy".to_string(),
    })
}

/// Create the axum router with all routes
pub fn create_router<L, T>(state: AppState<L, T>) -> AxumRouter
where
    L: LlmProvider + Send + Sync + 'static,
    L::Error: Display,
    T: PageTextSource + Send + Sync + 'static,
    T::Error: Display,
{
    let body_limit = state.intake.max_upload_bytes;
    AxumRouter::new()
        .route("/", get(introduction))
        .route("/health", get(health_check))
        .route("/process-claim", post(process_claim::<L, T>))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use claimdesk_extractor::PipelineConfig;
    use claimdesk_gatekeeper::ValidationConfig;
    use claimdesk_llm::MockProvider;
    use tower::ServiceExt; // for oneshot

    struct Utf8Pages;

    impl PageTextSource for Utf8Pages {
        type Error = std::str::Utf8Error;

        fn page_texts(&self, document: &[u8]) -> Result<Vec<String>, Self::Error> {
            Ok(std::str::from_utf8(document)?
                .split('\u{000C}')
                .map(str::to_string)
                .collect())
        }
    }

    fn create_test_state(llm: MockProvider) -> AppState<MockProvider, Utf8Pages> {
        let pipeline = ClaimPipeline::new(
            llm,
            PipelineConfig::unthrottled(),
            ValidationConfig::default(),
        );
        AppState::new(
            pipeline,
            Utf8Pages,
            IntakePolicy {
                max_documents: 5,
                accepted_content_type: "application/pdf".to_string(),
                max_upload_bytes: 1024 * 1024,
            },
        )
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = create_router(create_test_state(MockProvider::default()));

        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_introduction() {
        let app = create_router(create_test_state(MockProvider::default()));

        let request = Request::builder().uri("/").body(Body::empty()).unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], USAGE.as_bytes());
    }

    #[test]
    fn test_pipeline_count_errors_are_client_errors() {
        let response = AppError::from(ExtractorError::NoDocuments).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = AppError::from(ExtractorError::Config("x".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
