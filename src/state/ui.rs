#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

use super::workspace::WorkspaceState;

/// Which results panel is visible.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Summary,
    Risks,
}

impl Tab {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Summary => "Executive Summary",
            Self::Risks => "Risk Detection",
        }
    }

    /// Parse a tab name as typed in the shell (`summary`, `risks`).
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "summary" | "s" => Some(Self::Summary),
            "risks" | "risk" | "r" => Some(Self::Risks),
            _ => None,
        }
    }
}

/// Enablement of the controls that trigger network calls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Controls {
    pub submit_text: bool,
    pub upload_file: bool,
    pub ask: bool,
}

impl Controls {
    #[must_use]
    pub fn from_state(state: &WorkspaceState) -> Self {
        let idle = !state.loading();
        Self {
            submit_text: idle,
            upload_file: idle,
            ask: idle && !state.question().is_empty(),
        }
    }
}
