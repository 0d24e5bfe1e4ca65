//! Collect tasks, send them to a scoring service, and review the results.

pub mod client;
pub mod config;
pub mod form;
pub mod models;
pub mod render;
pub mod terminal;
