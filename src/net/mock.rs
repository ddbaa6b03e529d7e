//! Scripted in-memory backend for unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use super::backend::ContractBackend;
use super::error::ApiError;
use super::types::{Answer, DocId, FileUpload, RiskFinding};

/// One recorded backend call.
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    UploadText(String),
    UploadFile { file_name: String, content_type: &'static str, len: usize },
    Summarize(DocId),
    AnalyzeRisks(DocId),
    SuggestQuestions(DocId),
    Answer { question: String, doc_id: DocId },
}

/// Blocks a `summarize` call until released, so tests can interleave flows.
#[derive(Default)]
pub struct Gate {
    pub entered: Notify,
    pub release: Notify,
}

#[derive(Default)]
pub struct MockBackend {
    ingest: Mutex<VecDeque<Result<DocId, ApiError>>>,
    summaries: Mutex<HashMap<String, Result<String, ApiError>>>,
    risks: Mutex<HashMap<String, Result<Vec<RiskFinding>, ApiError>>>,
    queries: Mutex<HashMap<String, Result<Vec<String>, ApiError>>>,
    answers: Mutex<HashMap<String, Result<Vec<Answer>, ApiError>>>,
    gates: Mutex<HashMap<String, Arc<Gate>>>,
    calls: Mutex<Vec<Call>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the result of the next ingestion call. Unscripted ingestions
    /// return `D1`.
    pub fn push_ingest(&self, result: Result<&str, ApiError>) {
        self.ingest.lock().unwrap().push_back(result.map(DocId::new));
    }

    pub fn set_summary(&self, doc_id: &str, result: Result<&str, ApiError>) {
        self.summaries
            .lock()
            .unwrap()
            .insert(doc_id.to_owned(), result.map(ToOwned::to_owned));
    }

    pub fn set_risks(&self, doc_id: &str, result: Result<Vec<RiskFinding>, ApiError>) {
        self.risks.lock().unwrap().insert(doc_id.to_owned(), result);
    }

    pub fn set_queries(&self, doc_id: &str, result: Result<Vec<&str>, ApiError>) {
        let result = result.map(|qs| qs.into_iter().map(ToOwned::to_owned).collect());
        self.queries.lock().unwrap().insert(doc_id.to_owned(), result);
    }

    pub fn set_answers(&self, question: &str, result: Result<Vec<Answer>, ApiError>) {
        self.answers.lock().unwrap().insert(question.to_owned(), result);
    }

    /// Make `summarize(doc_id)` wait on the returned gate.
    pub fn gate_summary(&self, doc_id: &str) -> Arc<Gate> {
        let gate = Arc::new(Gate::default());
        self.gates.lock().unwrap().insert(doc_id.to_owned(), Arc::clone(&gate));
        gate
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn next_ingest(&self) -> Result<DocId, ApiError> {
        self.ingest
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(DocId::new("D1")))
    }
}

#[async_trait]
impl ContractBackend for MockBackend {
    async fn upload_text(&self, text: &str) -> Result<DocId, ApiError> {
        self.record(Call::UploadText(text.to_owned()));
        self.next_ingest()
    }

    async fn upload_file(&self, file: FileUpload) -> Result<DocId, ApiError> {
        self.record(Call::UploadFile {
            file_name: file.file_name,
            content_type: file.content_type,
            len: file.bytes.len(),
        });
        self.next_ingest()
    }

    async fn summarize(&self, doc_id: &DocId) -> Result<String, ApiError> {
        self.record(Call::Summarize(doc_id.clone()));
        let gate = self.gates.lock().unwrap().get(doc_id.as_str()).cloned();
        if let Some(gate) = gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }
        let scripted = self.summaries.lock().unwrap().get(doc_id.as_str()).cloned();
        scripted.unwrap_or_else(|| Ok(format!("summary of {doc_id}")))
    }

    async fn analyze_risks(&self, doc_id: &DocId) -> Result<Vec<RiskFinding>, ApiError> {
        self.record(Call::AnalyzeRisks(doc_id.clone()));
        let scripted = self.risks.lock().unwrap().get(doc_id.as_str()).cloned();
        scripted.unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn suggest_questions(&self, doc_id: &DocId) -> Result<Vec<String>, ApiError> {
        self.record(Call::SuggestQuestions(doc_id.clone()));
        let scripted = self.queries.lock().unwrap().get(doc_id.as_str()).cloned();
        scripted.unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn answer(&self, question: &str, doc_id: &DocId) -> Result<Vec<Answer>, ApiError> {
        self.record(Call::Answer { question: question.to_owned(), doc_id: doc_id.clone() });
        let scripted = self.answers.lock().unwrap().get(question).cloned();
        scripted.unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// Risk finding shorthand for tests.
pub fn risk(kind: &str, weight: Option<&str>, context: &str) -> RiskFinding {
    RiskFinding { kind: kind.to_owned(), weight: weight.map(ToOwned::to_owned), context: context.to_owned() }
}
