//! Terminal rendering of the workspace panels.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::fmt::Write;

use crossterm::style::{Color, Stylize};
use legal_lens::net::types::{Answer, RiskFinding};
use legal_lens::presentation::{Severity, format_score, summary_bullets};
use legal_lens::state::{Tab, WorkspaceState};

/// Which panels to draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    /// Every panel (one-shot commands).
    All,
    /// Only the panel of the active tab, plus suggestions and answers.
    Tabbed,
}

#[derive(Clone, Copy, Debug)]
pub struct RenderOptions {
    pub view: View,
    pub color: bool,
}

#[must_use]
pub fn render_workspace(state: &WorkspaceState, opts: RenderOptions) -> String {
    let mut out = String::new();
    let doc = state.doc_id().map_or("—", |id| id.as_str());
    let _ = writeln!(out, "Document ID: {doc}");
    if state.loading() {
        let _ = writeln!(out, "Working… (indexing may take a few seconds)");
    }

    let (summary, risks) = match opts.view {
        View::All => (true, true),
        View::Tabbed => (state.tab() == Tab::Summary, state.tab() == Tab::Risks),
    };
    if opts.view == View::Tabbed {
        let _ = writeln!(out, "{}", tab_bar(state.tab()));
    }
    if summary {
        render_summary(&mut out, state.summary());
    }
    if risks {
        render_risks(&mut out, state.risks(), opts.color);
    }
    render_suggestions(&mut out, state.suggestions());
    render_answers(&mut out, state.answers());
    out
}

fn tab_bar(active: Tab) -> String {
    [Tab::Summary, Tab::Risks]
        .into_iter()
        .map(|tab| if tab == active { format!("[{}]", tab.label()) } else { format!(" {} ", tab.label()) })
        .collect::<Vec<_>>()
        .join(" | ")
}

fn heading(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n== {title} ==");
}

fn render_summary(out: &mut String, summary: &str) {
    heading(out, Tab::Summary.label());
    let bullets = summary_bullets(summary);
    if bullets.is_empty() {
        let _ = writeln!(out, "Summary will appear here after upload.");
        return;
    }
    for bullet in bullets {
        let _ = writeln!(out, "  • {bullet}");
    }
}

fn render_risks(out: &mut String, risks: &[RiskFinding], color: bool) {
    heading(out, Tab::Risks.label());
    if risks.is_empty() {
        let _ = writeln!(out, "No risks detected yet. Submit a document to analyze.");
        return;
    }
    for risk in risks {
        let severity = Severity::from_weight(risk.weight.as_deref());
        let label = format!(" {} [{}] ", risk.kind, risk.weight.as_deref().unwrap_or("unrated"));
        if color {
            let (r, g, b) = severity.rgb();
            let _ = writeln!(out, "{}", label.with(Color::Black).on(Color::Rgb { r, g, b }));
        } else {
            let _ = writeln!(out, "{label}");
        }
        if !risk.context.is_empty() {
            let _ = writeln!(out, "    {}", risk.context.trim());
        }
    }
}

fn render_suggestions(out: &mut String, suggestions: &[String]) {
    heading(out, "Suggested Questions");
    if suggestions.is_empty() {
        let _ = writeln!(out, "No suggestions yet.");
        return;
    }
    for (i, question) in suggestions.iter().enumerate() {
        let _ = writeln!(out, "  {}. {question}", i + 1);
    }
}

fn render_answers(out: &mut String, answers: &[Answer]) {
    heading(out, "Answers");
    if answers.is_empty() {
        let _ = writeln!(out, "No answers yet.");
        return;
    }
    for answer in answers {
        let _ = writeln!(out, "  Answer: {}", answer.answer);
        if let Some(score) = format_score(answer) {
            let _ = writeln!(out, "  Score: {score}");
        }
        if let Some(context) = answer.context.as_deref().filter(|c| !c.is_empty()) {
            let _ = writeln!(out, "    {context}");
        }
    }
}
