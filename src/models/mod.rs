//! Data exchanged with the analysis service.
//!
//! # Core Concepts
//!
//! ## Client-side Entities
//!
//! - [`Task`]: A work item authored through the form, never persisted.
//! - [`TaskList`]: Insertion-ordered tasks accumulated during a session.
//! - [`Strategy`]: Named scoring selector sent along with every request.
//!
//! ## Service-produced Entities
//!
//! These are decoded leniently; the service owns their shape:
//!
//! - [`ScoredTask`]: A task with its score and annotation notes.
//! - [`Suggestion`]: One of the top picks returned by the suggest endpoint.

mod scored;
mod strategy;
mod task;

pub use scored::*;
pub use strategy::*;
pub use task::*;
