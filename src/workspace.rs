//! Workspace controller — user actions → backend calls → state.
//!
//! DESIGN
//! ======
//! `Workspace` pairs a [`ContractBackend`] with a shared
//! [`WorkspaceState`]. Each user action validates its input, holds the
//! loading flag for its whole duration, issues requests and feeds results
//! back through the reducer tagged with the ticket taken when the action
//! started. The state lock is only ever held for a single `apply`, never
//! across an `.await`, so clones of a workspace can run actions
//! concurrently; stale results are discarded by the reducer.
//!
//! ERROR HANDLING
//! ==============
//! Failures never propagate out of an action. They become [`Alert`]s in the
//! state plus a returned [`Outcome`], and the loading flag is released by a
//! drop guard on every path.

#[cfg(test)]
#[path = "workspace_test.rs"]
mod workspace_test;

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use crate::net::backend::ContractBackend;
use crate::net::types::{DocId, FileUpload};
use crate::pipeline;
use crate::state::{Action, Alert, Tab, Ticket, WorkspaceState};

pub const MSG_EMPTY_TEXT: &str = "Paste some text first";
pub const MSG_NO_FILE: &str = "Choose a file (.txt or .pdf)";
pub const MSG_NO_DOCUMENT: &str = "Upload or paste a document first.";

/// How a user action ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing to do (empty question); no alert raised.
    Skipped,
    /// Input failed validation; no request sent.
    Rejected,
    /// A request failed and an alert was raised.
    Failed,
    /// A newer action superseded this one; its results were dropped.
    Stale,
    Done,
}

pub struct Workspace<B: ?Sized> {
    backend: Arc<B>,
    state: Arc<Mutex<WorkspaceState>>,
}

impl<B: ?Sized> Clone for Workspace<B> {
    fn clone(&self) -> Self {
        Self { backend: Arc::clone(&self.backend), state: Arc::clone(&self.state) }
    }
}

impl<B: ContractBackend + ?Sized> Workspace<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self { backend, state: Arc::new(Mutex::new(WorkspaceState::new())) }
    }

    // =========================================================================
    // STATE ACCESS
    // =========================================================================

    /// Apply an action to the shared state.
    pub fn dispatch(&self, action: Action) -> bool {
        lock(&self.state).apply(action)
    }

    /// Read from the state without cloning it.
    pub fn with_state<R>(&self, read: impl FnOnce(&WorkspaceState) -> R) -> R {
        read(&lock(&self.state))
    }

    #[must_use]
    pub fn snapshot(&self) -> WorkspaceState {
        self.with_state(WorkspaceState::clone)
    }

    pub fn take_alerts(&self) -> Vec<Alert> {
        lock(&self.state).take_alerts()
    }

    pub fn set_paste_text(&self, text: impl Into<String>) {
        self.dispatch(Action::SetPasteText(text.into()));
    }

    pub fn select_file(&self, path: Option<PathBuf>) {
        self.dispatch(Action::SelectFile(path));
    }

    pub fn set_question(&self, question: impl Into<String>) {
        self.dispatch(Action::SetQuestion(question.into()));
    }

    pub fn select_tab(&self, tab: Tab) {
        self.dispatch(Action::SelectTab(tab));
    }

    /// Adopt an existing document reference without fetching its analysis.
    pub fn attach_document(&self, doc_id: DocId) {
        let mut state = lock(&self.state);
        state.apply(Action::IngestStarted);
        let ticket = state.ingest_ticket();
        state.apply(Action::DocumentReady { ticket, doc_id });
    }

    // =========================================================================
    // INGESTION
    // =========================================================================

    /// Submit the pasted text, then load summary, risks and suggestions.
    pub async fn submit_text(&self) -> Outcome {
        let text = self.with_state(|s| s.paste_text().to_owned());
        if text.trim().is_empty() {
            self.dispatch(Action::Alert(Alert::validation(MSG_EMPTY_TEXT)));
            return Outcome::Rejected;
        }

        let _busy = BusyGuard::hold(&self.state);
        let ticket = self.start_ingest();
        info!(bytes = text.len(), "submitting pasted text");
        match self.backend.upload_text(&text).await {
            Ok(doc_id) => self.after_ingest(ticket, doc_id).await,
            Err(error) => {
                warn!(error = %error, "upload_text failed");
                self.fail(ticket, Alert::request(format!("Upload text failed: {}", error.alert_detail())))
            }
        }
    }

    /// Upload the selected file, then load summary, risks and suggestions.
    pub async fn upload_file(&self) -> Outcome {
        let Some(path) = self.with_state(|s| s.selected_file().map(Path::to_path_buf)) else {
            self.dispatch(Action::Alert(Alert::validation(MSG_NO_FILE)));
            return Outcome::Rejected;
        };
        let content_type = content_type_for(&path);

        let _busy = BusyGuard::hold(&self.state);
        let ticket = self.start_ingest();
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(error) => {
                warn!(path = %path.display(), error = %error, "reading upload failed");
                return self.fail(ticket, Alert::request(format!("File upload failed: {error}")));
            }
        };
        let file_name = path
            .file_name()
            .map_or_else(|| "upload".to_owned(), |name| name.to_string_lossy().into_owned());

        info!(file = %file_name, bytes = bytes.len(), "uploading file");
        let upload = FileUpload { file_name, content_type, bytes };
        match self.backend.upload_file(upload).await {
            Ok(doc_id) => self.after_ingest(ticket, doc_id).await,
            Err(error) => {
                warn!(error = %error, "upload failed");
                self.fail(ticket, Alert::request(format!("File upload failed: {}", error.alert_detail())))
            }
        }
    }

    fn start_ingest(&self) -> Ticket {
        let mut state = lock(&self.state);
        state.apply(Action::IngestStarted);
        state.ingest_ticket()
    }

    async fn after_ingest(&self, ticket: Ticket, doc_id: DocId) -> Outcome {
        if !self.dispatch(Action::DocumentReady { ticket, doc_id: doc_id.clone() }) {
            debug!(%doc_id, "dropping superseded document");
            return Outcome::Stale;
        }
        info!(%doc_id, "document indexed");
        self.load_document(ticket, &doc_id).await
    }

    async fn load_document(&self, ticket: Ticket, doc_id: &DocId) -> Outcome {
        let _busy = BusyGuard::hold(&self.state);
        let report = pipeline::run(&*self.backend, doc_id, |output| {
            if !self.dispatch(output.into_action(ticket)) {
                debug!(%doc_id, "dropping stale post-index result");
            }
        })
        .await;

        match report.failure {
            Some(failure) => {
                warn!(%doc_id, step = %failure.step, completed = report.completed.len(), "post-index sequence stopped");
                self.fail(ticket, Alert::pipeline(format!("Post-index fetch failed: {}", failure.error)))
            }
            None if self.with_state(|s| s.is_current(ticket)) => Outcome::Done,
            None => Outcome::Stale,
        }
    }

    // =========================================================================
    // QUESTION ANSWERING
    // =========================================================================

    /// Ask the current question about the current document.
    pub async fn ask(&self) -> Outcome {
        let (question, doc_id) = self.with_state(|s| (s.question().to_owned(), s.doc_id().cloned()));
        if question.trim().is_empty() {
            return Outcome::Skipped;
        }
        let Some(doc_id) = doc_id else {
            self.dispatch(Action::Alert(Alert::validation(MSG_NO_DOCUMENT)));
            return Outcome::Rejected;
        };

        let _busy = BusyGuard::hold(&self.state);
        let ticket = {
            let mut state = lock(&self.state);
            state.apply(Action::AskStarted);
            state.qa_ticket()
        };
        info!(%doc_id, "asking question");
        match self.backend.answer(&question, &doc_id).await {
            Ok(answers) => {
                if self.dispatch(Action::AnswersLoaded { ticket, answers }) {
                    Outcome::Done
                } else {
                    debug!(%doc_id, "dropping stale answers");
                    Outcome::Stale
                }
            }
            Err(error) => {
                warn!(error = %error, "qa failed");
                self.fail(ticket, Alert::request(format!("QA failed: {}", error.alert_detail())))
            }
        }
    }

    /// Choose the suggested question at `index` and ask it.
    pub async fn ask_suggested(&self, index: usize) -> Outcome {
        let Some(question) = self.with_state(|s| s.suggestions().get(index).cloned()) else {
            self.dispatch(Action::Alert(Alert::validation(format!("No suggested question #{}", index + 1))));
            return Outcome::Rejected;
        };
        self.set_question(question);
        self.ask().await
    }

    fn fail(&self, ticket: Ticket, alert: Alert) -> Outcome {
        if self.dispatch(Action::Failed { ticket, alert }) {
            Outcome::Failed
        } else {
            debug!("dropping alert of superseded request");
            Outcome::Stale
        }
    }
}

/// Content type sent with an upload, by extension. Files other than
/// `.txt` and `.pdf` go out as `application/octet-stream` and the backend
/// decides whether to accept them.
#[must_use]
pub fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("txt") => "text/plain",
        Some(ext) if ext.eq_ignore_ascii_case("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}

fn lock(state: &Mutex<WorkspaceState>) -> MutexGuard<'_, WorkspaceState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Holds the loading flag until dropped.
struct BusyGuard {
    state: Arc<Mutex<WorkspaceState>>,
}

impl BusyGuard {
    fn hold(state: &Arc<Mutex<WorkspaceState>>) -> Self {
        lock(state).apply(Action::BeginBusy);
        Self { state: Arc::clone(state) }
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        lock(&self.state).apply(Action::EndBusy);
    }
}
