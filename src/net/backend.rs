//! Async seam between the workspace and the contract-analysis service.

use async_trait::async_trait;

use super::error::ApiError;
use super::types::{Answer, DocId, FileUpload, RiskFinding};

/// Operations the backend exposes, one per endpoint.
///
/// [`crate::HttpBackend`] is the production implementation; tests supply
/// scripted mocks.
#[async_trait]
pub trait ContractBackend: Send + Sync {
    /// Ingest pasted contract text (`POST /upload_text`).
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure, non-2xx status, or a
    /// response without `doc_id`.
    async fn upload_text(&self, text: &str) -> Result<DocId, ApiError>;

    /// Ingest an uploaded file (`POST /upload`, multipart).
    ///
    /// # Errors
    ///
    /// Same as [`ContractBackend::upload_text`].
    async fn upload_file(&self, file: FileUpload) -> Result<DocId, ApiError>;

    /// Fetch the executive summary (`POST /summarize`).
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure or non-2xx status.
    async fn summarize(&self, doc_id: &DocId) -> Result<String, ApiError>;

    /// Fetch risk findings (`POST /risk`).
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure or non-2xx status.
    async fn analyze_risks(&self, doc_id: &DocId) -> Result<Vec<RiskFinding>, ApiError>;

    /// Fetch suggested questions (`POST /auto_queries`).
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure or non-2xx status.
    async fn suggest_questions(&self, doc_id: &DocId) -> Result<Vec<String>, ApiError>;

    /// Answer a free-form question about a document (`POST /qa`).
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure or non-2xx status.
    async fn answer(&self, question: &str, doc_id: &DocId) -> Result<Vec<Answer>, ApiError>;
}
