//! reqwest implementation of [`ContractBackend`].
//!
//! All calls are `POST`. Bodies are form-encoded except `/upload`, which is
//! `multipart/form-data` with a single `file` part.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::backend::ContractBackend;
use super::error::ApiError;
use super::types::{
    Answer, AnswersResponse, DocId, FileUpload, IngestResponse, QueriesResponse, RiskFinding, RiskResponse,
    SummaryResponse,
};
use crate::config::ClientConfig;

pub struct HttpBackend {
    http: reqwest::Client,
    config: ClientConfig,
}

impl HttpBackend {
    /// Build a backend client with the configured timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ClientBuild`] if the HTTP client fails to build.
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| ApiError::ClientBuild(e.to_string()))?;
        Ok(Self { http, config })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    async fn post_form<T: DeserializeOwned>(&self, path: &str, fields: &[(&str, &str)]) -> Result<T, ApiError> {
        let request = self.http.post(self.config.endpoint(path)).form(fields);
        let text = send(request, path).await?;
        parse_body(&text)
    }
}

#[async_trait]
impl ContractBackend for HttpBackend {
    async fn upload_text(&self, text: &str) -> Result<DocId, ApiError> {
        let body: IngestResponse = self.post_form("/upload_text", &[("text", text)]).await?;
        Ok(body.doc_id)
    }

    async fn upload_file(&self, file: FileUpload) -> Result<DocId, ApiError> {
        let part = multipart::Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(file.content_type)
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let form = multipart::Form::new().part("file", part);
        let request = self.http.post(self.config.endpoint("/upload")).multipart(form);
        let text = send(request, "/upload").await?;
        let body: IngestResponse = parse_body(&text)?;
        Ok(body.doc_id)
    }

    async fn summarize(&self, doc_id: &DocId) -> Result<String, ApiError> {
        let body: SummaryResponse = self.post_form("/summarize", &[("doc_id", doc_id.as_str())]).await?;
        Ok(body.summary)
    }

    async fn analyze_risks(&self, doc_id: &DocId) -> Result<Vec<RiskFinding>, ApiError> {
        let body: RiskResponse = self.post_form("/risk", &[("doc_id", doc_id.as_str())]).await?;
        Ok(body.risks)
    }

    async fn suggest_questions(&self, doc_id: &DocId) -> Result<Vec<String>, ApiError> {
        let body: QueriesResponse = self.post_form("/auto_queries", &[("doc_id", doc_id.as_str())]).await?;
        Ok(body.queries)
    }

    async fn answer(&self, question: &str, doc_id: &DocId) -> Result<Vec<Answer>, ApiError> {
        let body: AnswersResponse = self
            .post_form("/qa", &[("question", question), ("doc_id", doc_id.as_str())])
            .await?;
        Ok(body.answers)
    }
}

async fn send(request: reqwest::RequestBuilder, path: &str) -> Result<String, ApiError> {
    let response = request
        .send()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;

    let status = response.status().as_u16();
    let text = response
        .text()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    debug!(path, status, bytes = text.len(), "backend response");
    check_status(status, text)
}

fn check_status(status: u16, body: String) -> Result<String, ApiError> {
    if (200..300).contains(&status) {
        Ok(body)
    } else {
        Err(ApiError::from_status(status, body))
    }
}

fn parse_body<T: DeserializeOwned>(text: &str) -> Result<T, ApiError> {
    serde_json::from_str(text).map_err(|e| ApiError::Parse(e.to_string()))
}
