use super::*;
use crate::state::workspace::Action;

// =============================================================
// Tab
// =============================================================

#[test]
fn tab_default_is_summary() {
    assert_eq!(Tab::default(), Tab::Summary);
    assert_eq!(WorkspaceState::new().tab(), Tab::Summary);
}

#[test]
fn tab_parse_accepts_names_and_initials() {
    assert_eq!(Tab::parse("summary"), Some(Tab::Summary));
    assert_eq!(Tab::parse(" Risks "), Some(Tab::Risks));
    assert_eq!(Tab::parse("r"), Some(Tab::Risks));
    assert_eq!(Tab::parse("answers"), None);
}

// =============================================================
// Controls
// =============================================================

#[test]
fn controls_idle_without_question() {
    let controls = Controls::from_state(&WorkspaceState::new());
    assert!(controls.submit_text);
    assert!(controls.upload_file);
    assert!(!controls.ask);
}

#[test]
fn controls_ask_enabled_with_question() {
    let mut state = WorkspaceState::new();
    state.apply(Action::SetQuestion("What is the notice period?".into()));
    assert!(Controls::from_state(&state).ask);
}

#[test]
fn controls_all_disabled_while_loading() {
    let mut state = WorkspaceState::new();
    state.apply(Action::SetQuestion("Who pays?".into()));
    state.apply(Action::BeginBusy);
    let controls = Controls::from_state(&state);
    assert_eq!(controls, Controls { submit_text: false, upload_file: false, ask: false });
}
