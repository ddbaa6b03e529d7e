//! Client-side view state.
//!
//! DESIGN
//! ======
//! `workspace` owns the document, results, alerts and generation counters
//! and is mutated only through [`workspace::Action`]. `ui` holds the small
//! presentational enums (tabs, control enablement) derived from it.

pub mod ui;
pub mod workspace;

pub use ui::{Controls, Tab};
pub use workspace::{Action, Alert, AlertKind, Ticket, WorkspaceState};
