//! Networking modules for the contract-analysis backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `types` defines the wire schema, `backend` the async seam the workspace
//! calls through, `http` the reqwest implementation of that seam, and
//! `error` the failure taxonomy shared by all of them.

pub mod backend;
pub mod error;
pub mod http;
pub mod types;

#[cfg(test)]
pub(crate) mod mock;
