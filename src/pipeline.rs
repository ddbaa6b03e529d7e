//! Post-ingestion fetch sequence.
//!
//! DESIGN
//! ======
//! Once a document reference exists, three named steps run one after
//! another: summarize, analyze risks, suggest questions. Each step's output
//! is handed to the caller's sink as soon as it arrives, so a later failure
//! leaves earlier results in place. The first failing step ends the run.

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod pipeline_test;

use std::fmt;

use tracing::{info, warn};

use crate::net::backend::ContractBackend;
use crate::net::error::ApiError;
use crate::net::types::{DocId, RiskFinding};
use crate::state::{Action, Ticket};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Summarize,
    AnalyzeRisks,
    SuggestQuestions,
}

impl Step {
    /// Execution order.
    pub const ALL: [Self; 3] = [Self::Summarize, Self::AnalyzeRisks, Self::SuggestQuestions];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Summarize => "summarize",
            Self::AnalyzeRisks => "analyze_risks",
            Self::SuggestQuestions => "suggest_questions",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result payload of one completed step.
#[derive(Clone, Debug, PartialEq)]
pub enum StepOutput {
    Summary(String),
    Risks(Vec<RiskFinding>),
    Queries(Vec<String>),
}

impl StepOutput {
    /// Reducer action that stores this output under `ticket`.
    #[must_use]
    pub fn into_action(self, ticket: Ticket) -> Action {
        match self {
            Self::Summary(summary) => Action::SummaryLoaded { ticket, summary },
            Self::Risks(risks) => Action::RisksLoaded { ticket, risks },
            Self::Queries(queries) => Action::SuggestionsLoaded { ticket, queries },
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct StepFailure {
    pub step: Step,
    pub error: ApiError,
}

/// Outcome of a pipeline run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PipelineReport {
    pub completed: Vec<Step>,
    pub failure: Option<StepFailure>,
}

impl PipelineReport {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }
}

/// Execute a single step against the backend.
///
/// # Errors
///
/// Propagates the backend's [`ApiError`].
pub async fn run_step<B>(backend: &B, step: Step, doc_id: &DocId) -> Result<StepOutput, ApiError>
where
    B: ContractBackend + ?Sized,
{
    match step {
        Step::Summarize => backend.summarize(doc_id).await.map(StepOutput::Summary),
        Step::AnalyzeRisks => backend.analyze_risks(doc_id).await.map(StepOutput::Risks),
        Step::SuggestQuestions => backend.suggest_questions(doc_id).await.map(StepOutput::Queries),
    }
}

/// Run every step in order, feeding each output to `sink` as it completes.
pub async fn run<B, F>(backend: &B, doc_id: &DocId, mut sink: F) -> PipelineReport
where
    B: ContractBackend + ?Sized,
    F: FnMut(StepOutput),
{
    let mut report = PipelineReport::default();
    for step in Step::ALL {
        match run_step(backend, step, doc_id).await {
            Ok(output) => {
                info!(%doc_id, %step, "post-index step complete");
                sink(output);
                report.completed.push(step);
            }
            Err(error) => {
                warn!(%doc_id, %step, error = %error, "post-index step failed");
                report.failure = Some(StepFailure { step, error });
                break;
            }
        }
    }
    report
}
