//! Contract workspace view model and its reducer.
//!
//! DESIGN
//! ======
//! Every mutation goes through [`WorkspaceState::apply`]. Results of remote
//! calls carry the [`Ticket`] they were issued under; the reducer drops any
//! result whose ticket is no longer current, so when submissions overlap
//! the most recently started one wins regardless of completion order.
//!
//! Two independent counters exist: ingestion (bumped per submission) and
//! QA (bumped per question and per newly assigned document).

#[cfg(test)]
#[path = "workspace_test.rs"]
mod workspace_test;

use std::path::{Path, PathBuf};

use super::ui::Tab;
use crate::net::types::{Answer, DocId, RiskFinding};

// =============================================================================
// TICKETS
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TicketKind {
    Ingest,
    Qa,
}

/// Identifies the request generation a result belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket {
    pub kind: TicketKind,
    pub generation: u64,
}

// =============================================================================
// ALERTS
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlertKind {
    /// Input rejected before any request was sent.
    Validation,
    /// An ingestion or QA request failed.
    Request,
    /// A post-ingestion step failed; earlier results stay in place.
    Pipeline,
}

/// A blocking user-facing message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
}

impl Alert {
    pub fn validation(message: impl Into<String>) -> Self {
        Self { kind: AlertKind::Validation, message: message.into() }
    }

    pub fn request(message: impl Into<String>) -> Self {
        Self { kind: AlertKind::Request, message: message.into() }
    }

    pub fn pipeline(message: impl Into<String>) -> Self {
        Self { kind: AlertKind::Pipeline, message: message.into() }
    }
}

// =============================================================================
// ACTIONS
// =============================================================================

#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    SetPasteText(String),
    SelectFile(Option<PathBuf>),
    SetQuestion(String),
    SelectTab(Tab),
    BeginBusy,
    EndBusy,
    /// A new submission starts; supersedes any ingestion in flight.
    IngestStarted,
    DocumentReady { ticket: Ticket, doc_id: DocId },
    SummaryLoaded { ticket: Ticket, summary: String },
    RisksLoaded { ticket: Ticket, risks: Vec<RiskFinding> },
    SuggestionsLoaded { ticket: Ticket, queries: Vec<String> },
    /// A question is sent; supersedes any question in flight.
    AskStarted,
    AnswersLoaded { ticket: Ticket, answers: Vec<Answer> },
    /// Alert tied to a request; dropped if the request is stale.
    Failed { ticket: Ticket, alert: Alert },
    /// Alert not tied to any request.
    Alert(Alert),
}

// =============================================================================
// STATE
// =============================================================================

#[derive(Clone, Debug, Default)]
pub struct WorkspaceState {
    paste_text: String,
    selected_file: Option<PathBuf>,
    doc_id: Option<DocId>,
    summary: String,
    risks: Vec<RiskFinding>,
    suggestions: Vec<String>,
    question: String,
    answers: Vec<Answer>,
    tab: Tab,
    busy: u32,
    alerts: Vec<Alert>,
    ingest_generation: u64,
    qa_generation: u64,
}

impl WorkspaceState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one action. Returns `false` when the action carried a stale
    /// ticket and was dropped.
    pub fn apply(&mut self, action: Action) -> bool {
        match action {
            Action::SetPasteText(text) => self.paste_text = text,
            Action::SelectFile(path) => self.selected_file = path,
            Action::SetQuestion(question) => self.question = question,
            Action::SelectTab(tab) => self.tab = tab,
            Action::BeginBusy => self.busy = self.busy.saturating_add(1),
            Action::EndBusy => self.busy = self.busy.saturating_sub(1),
            Action::IngestStarted => self.ingest_generation += 1,
            Action::AskStarted => self.qa_generation += 1,
            Action::DocumentReady { ticket, doc_id } => {
                if !self.is_current(ticket) {
                    return false;
                }
                self.doc_id = Some(doc_id);
                self.summary.clear();
                self.risks.clear();
                self.suggestions.clear();
                self.answers.clear();
                self.qa_generation += 1;
            }
            Action::SummaryLoaded { ticket, summary } => {
                if !self.is_current(ticket) {
                    return false;
                }
                self.summary = summary;
            }
            Action::RisksLoaded { ticket, risks } => {
                if !self.is_current(ticket) {
                    return false;
                }
                self.risks = risks;
            }
            Action::SuggestionsLoaded { ticket, queries } => {
                if !self.is_current(ticket) {
                    return false;
                }
                self.suggestions = queries;
            }
            Action::AnswersLoaded { ticket, answers } => {
                if !self.is_current(ticket) {
                    return false;
                }
                self.answers = answers;
            }
            Action::Failed { ticket, alert } => {
                if !self.is_current(ticket) {
                    return false;
                }
                self.alerts.push(alert);
            }
            Action::Alert(alert) => self.alerts.push(alert),
        }
        true
    }

    /// Ticket for the ingestion generation currently in effect.
    #[must_use]
    pub fn ingest_ticket(&self) -> Ticket {
        Ticket { kind: TicketKind::Ingest, generation: self.ingest_generation }
    }

    /// Ticket for the QA generation currently in effect.
    #[must_use]
    pub fn qa_ticket(&self) -> Ticket {
        Ticket { kind: TicketKind::Qa, generation: self.qa_generation }
    }

    #[must_use]
    pub fn is_current(&self, ticket: Ticket) -> bool {
        let current = match ticket.kind {
            TicketKind::Ingest => self.ingest_generation,
            TicketKind::Qa => self.qa_generation,
        };
        ticket.generation == current
    }

    /// Remove and return pending alerts in the order raised.
    pub fn take_alerts(&mut self) -> Vec<Alert> {
        std::mem::take(&mut self.alerts)
    }

    #[must_use]
    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    #[must_use]
    pub fn loading(&self) -> bool {
        self.busy > 0
    }

    #[must_use]
    pub fn paste_text(&self) -> &str {
        &self.paste_text
    }

    #[must_use]
    pub fn selected_file(&self) -> Option<&Path> {
        self.selected_file.as_deref()
    }

    #[must_use]
    pub fn doc_id(&self) -> Option<&DocId> {
        self.doc_id.as_ref()
    }

    #[must_use]
    pub fn summary(&self) -> &str {
        &self.summary
    }

    #[must_use]
    pub fn risks(&self) -> &[RiskFinding] {
        &self.risks
    }

    #[must_use]
    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    #[must_use]
    pub fn tab(&self) -> Tab {
        self.tab
    }
}
