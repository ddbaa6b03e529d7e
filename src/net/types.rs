//! Wire DTOs for the backend's JSON responses.
//!
//! DESIGN
//! ======
//! Every list field defaults to empty and every text field to `""` so a
//! sparse backend response still decodes. Answers accept both the
//! structured record and the bare string the backend sometimes returns.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Backend-issued identifier for an ingested contract.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocId(String);

impl DocId {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A backend-classified clause with its severity weight and excerpt.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskFinding {
    /// Clause category, e.g. `"termination"`.
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Severity label as sent by the backend (`"High"`, `"Medium"`, ...).
    #[serde(default)]
    pub weight: Option<String>,
    /// Surrounding contract text.
    #[serde(default)]
    pub context: String,
}

/// A single answer to a free-form question.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Answer {
    pub answer: String,
    pub score: Option<f64>,
    pub context: Option<String>,
}

impl Answer {
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self { answer: text.into(), score: None, context: None }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AnswerWire {
    Plain(String),
    Structured {
        #[serde(default)]
        answer: String,
        #[serde(default)]
        score: Option<f64>,
        #[serde(default)]
        context: Option<String>,
    },
}

impl<'de> Deserialize<'de> for Answer {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match AnswerWire::deserialize(deserializer)? {
            AnswerWire::Plain(text) => Self::plain(text),
            AnswerWire::Structured { answer, score, context } => Self { answer, score, context },
        })
    }
}

// =============================================================================
// RESPONSE ENVELOPES
// =============================================================================

/// Response of `/upload_text` and `/upload`.
#[derive(Debug, Deserialize)]
pub struct IngestResponse {
    pub doc_id: DocId,
}

/// Response of `/summarize`.
#[derive(Debug, Default, Deserialize)]
pub struct SummaryResponse {
    #[serde(default)]
    pub summary: String,
}

/// Response of `/risk`.
#[derive(Debug, Default, Deserialize)]
pub struct RiskResponse {
    #[serde(default)]
    pub risks: Vec<RiskFinding>,
}

/// Response of `/auto_queries`.
#[derive(Debug, Default, Deserialize)]
pub struct QueriesResponse {
    #[serde(default)]
    pub queries: Vec<String>,
}

/// Response of `/qa`.
#[derive(Debug, Default, Deserialize)]
pub struct AnswersResponse {
    #[serde(default)]
    pub answers: Vec<Answer>,
}

/// Error body the backend may attach to a non-2xx response.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<String>,
}

/// A file selected for upload, already read into memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileUpload {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}
