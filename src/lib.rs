//! # legal-lens
//!
//! Client for the Legal Lens contract-analysis service. A contract is pasted
//! or uploaded, the backend returns a document reference, and the client
//! fetches a summary, risk findings and suggested questions for it, then
//! answers free-form questions about the document.
//!
//! The crate is UI-agnostic: `state` holds the view model and its reducer,
//! `workspace` drives backend calls into that state, and `presentation`
//! derives what a renderer shows. The `cli` crate is one such renderer.

pub mod config;
pub mod net;
pub mod pipeline;
pub mod presentation;
pub mod state;
pub mod workspace;

pub use config::ClientConfig;
pub use net::backend::ContractBackend;
pub use net::error::ApiError;
pub use net::http::HttpBackend;
pub use workspace::Workspace;
