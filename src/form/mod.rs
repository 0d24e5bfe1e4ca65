//! The task form component.
//!
//! [`TaskFormClient`] owns the session's task list and drives the injected
//! handles: it turns form fields into tasks, mirrors the list into the JSON
//! buffer, submits the buffer for scoring and renders the results.
//!
//! Every failure is reported through the [`Notifier`] where it is detected
//! and also returned to the caller. Nothing is retried.
//!
//! Overlapping submissions are resolved by a generation counter: each request
//! takes a new generation when it is issued, and a response only touches the
//! results pane if its generation is still the latest.

mod handles;

pub use handles::*;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;
use thiserror::Error;

use crate::client::{AnalysisBackend, ClientError};
use crate::models::{
    scored_tasks_from_response, suggestions_from_response, AnalyzeRequest, ScoredTask,
    Task, TaskList,
};
use crate::render::{self, TaskCard};

/// Errors surfaced by form operations.
#[derive(Debug, Error)]
pub enum FormError {
    #[error("Task title is required")]
    MissingTitle,

    #[error("Invalid JSON format in bulk input: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("Backend returned an error or invalid format")]
    InvalidResponse { body: Value },

    #[error("Failed to connect to backend: {0}")]
    Transport(#[from] ClientError),

    #[error("Failed to serialize task list: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl FormError {
    /// Message shown to the user.
    pub fn alert_message(&self) -> &'static str {
        match self {
            Self::MissingTitle => "Task title is required",
            Self::InvalidJson(_) => "Invalid JSON format in bulk input",
            Self::InvalidResponse { .. } => "Backend returned an error or invalid format",
            Self::Transport(_) => "Failed to connect to backend",
            Self::Serialize(_) => "Could not update the task list",
        }
    }
}

/// How an analyze or suggest submission ended when it did not fail.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalyzeOutcome {
    /// Results were rendered; holds the number of cards.
    Rendered(usize),
    /// A newer submission was issued before this one resolved.
    Superseded,
}

/// Handles the component is wired to.
#[derive(Clone)]
pub struct Handles {
    pub form: Arc<dyn TaskForm>,
    pub buffer: Arc<dyn TaskBuffer>,
    pub results: Arc<dyn ResultsPane>,
    pub notifier: Arc<dyn Notifier>,
}

pub struct TaskFormClient<B> {
    backend: B,
    handles: Handles,
    tasks: Mutex<TaskList>,
    generation: AtomicU64,
}

impl<B: AnalysisBackend> TaskFormClient<B> {
    pub fn new(backend: B, handles: Handles) -> Self {
        Self {
            backend,
            handles,
            tasks: Mutex::new(TaskList::new()),
            generation: AtomicU64::new(0),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Snapshot of the tasks added through the form.
    pub fn tasks(&self) -> TaskList {
        self.tasks.lock().clone()
    }

    /// Add the task currently in the form fields.
    pub fn add_task(&self) -> Result<Task, FormError> {
        let input = self.handles.form.read();
        let Some(task) = input.to_task() else {
            return Err(self.report(FormError::MissingTitle));
        };

        let json = {
            let mut tasks = self.tasks.lock();
            tasks.push(task.clone());
            tasks.to_pretty_json()
        };
        let json = json.map_err(|e| self.report(FormError::Serialize(e)))?;

        self.handles.buffer.set_text(json);
        self.handles.form.reset();
        tracing::debug!(title = %task.title, "Task added");
        Ok(task)
    }

    /// Submit the buffer for scoring and render the results.
    pub async fn analyze(&self, strategy: &str) -> Result<AnalyzeOutcome, FormError> {
        let request = self.read_request(strategy)?;
        let generation = self.next_generation();

        let response = self.backend.analyze(&request).await;
        if !self.is_current(generation) {
            tracing::debug!(generation, "Discarding superseded analyze response");
            return Ok(AnalyzeOutcome::Superseded);
        }

        let body = response.map_err(|e| self.report(FormError::Transport(e)))?;
        let tasks = scored_tasks_from_response(&body)
            .ok_or_else(|| self.report(FormError::InvalidResponse { body }))?;

        self.render(&tasks);
        Ok(AnalyzeOutcome::Rendered(tasks.len()))
    }

    /// Ask the service for its top picks from the buffer and render them.
    pub async fn suggest(&self, strategy: &str) -> Result<AnalyzeOutcome, FormError> {
        let request = self.read_request(strategy)?;
        let generation = self.next_generation();

        let response = self.backend.suggest(&request).await;
        if !self.is_current(generation) {
            tracing::debug!(generation, "Discarding superseded suggest response");
            return Ok(AnalyzeOutcome::Superseded);
        }

        let body = response.map_err(|e| self.report(FormError::Transport(e)))?;
        let suggestions = suggestions_from_response(&body)
            .ok_or_else(|| self.report(FormError::InvalidResponse { body }))?;

        self.handles.results.clear();
        for suggestion in &suggestions {
            self.handles.results.push_card(TaskCard::from(suggestion));
        }
        Ok(AnalyzeOutcome::Rendered(suggestions.len()))
    }

    /// Replace the results pane with one card per scored task.
    pub fn render(&self, tasks: &[ScoredTask]) {
        self.handles.results.clear();
        for card in render::cards(tasks) {
            self.handles.results.push_card(card);
        }
    }

    /// Drop all session state. Pending submissions will not render.
    pub fn clear_all(&self) {
        self.tasks.lock().clear();
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.handles.form.reset();
        self.handles.buffer.set_text(String::new());
        self.handles.results.clear();
        tracing::debug!("Cleared all tasks");
    }

    fn read_request(&self, strategy: &str) -> Result<AnalyzeRequest, FormError> {
        let text = self.handles.buffer.text();
        let tasks: Value =
            serde_json::from_str(&text).map_err(|e| self.report(FormError::InvalidJson(e)))?;

        Ok(AnalyzeRequest {
            strategy: strategy.to_string(),
            tasks,
        })
    }

    fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    /// Alert the user and log what the developer needs to see.
    fn report(&self, error: FormError) -> FormError {
        match &error {
            FormError::InvalidResponse { body } => {
                tracing::error!(response = %body, "Invalid response");
            }
            FormError::Transport(e) => tracing::error!(error = %e, "Fetch error"),
            FormError::Serialize(e) => tracing::error!(error = %e, "Task list serialization failed"),
            FormError::MissingTitle | FormError::InvalidJson(_) => {
                tracing::debug!(error = %error, "Rejected input");
            }
        }
        self.handles.notifier.alert(error.alert_message());
        error
    }
}
