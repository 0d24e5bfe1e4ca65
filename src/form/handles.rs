//! Handles the form component writes to and reads from.
//!
//! The component never looks anything up by name: it receives these handles
//! at construction. The in-memory implementations back the terminal front
//! end and double as test fakes.

use parking_lot::Mutex;

use crate::models::FormInput;
use crate::render::TaskCard;

/// Input fields for a single task.
pub trait TaskForm: Send + Sync {
    fn read(&self) -> FormInput;
    /// Return every field to its default (empty) value.
    fn reset(&self);
}

/// Editable text holding the JSON task batch.
pub trait TaskBuffer: Send + Sync {
    fn text(&self) -> String;
    fn set_text(&self, text: String);
}

/// Area where result cards are shown.
pub trait ResultsPane: Send + Sync {
    fn clear(&self);
    fn push_card(&self, card: TaskCard);
}

/// Blocking user notification.
pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
}

#[derive(Debug, Default)]
pub struct MemoryForm {
    input: Mutex<FormInput>,
}

impl MemoryForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the field contents, as a user typing into the form would.
    pub fn fill(&self, input: FormInput) {
        *self.input.lock() = input;
    }
}

impl TaskForm for MemoryForm {
    fn read(&self) -> FormInput {
        self.input.lock().clone()
    }

    fn reset(&self) {
        *self.input.lock() = FormInput::default();
    }
}

#[derive(Debug, Default)]
pub struct MemoryBuffer {
    text: Mutex<String>,
}

impl MemoryBuffer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TaskBuffer for MemoryBuffer {
    fn text(&self) -> String {
        self.text.lock().clone()
    }

    fn set_text(&self, text: String) {
        *self.text.lock() = text;
    }
}

#[derive(Debug, Default)]
pub struct MemoryResults {
    cards: Mutex<Vec<TaskCard>>,
}

impl MemoryResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cards(&self) -> Vec<TaskCard> {
        self.cards.lock().clone()
    }
}

impl ResultsPane for MemoryResults {
    fn clear(&self) {
        self.cards.lock().clear();
    }

    fn push_card(&self, card: TaskCard) {
        self.cards.lock().push(card);
    }
}

/// Records alerts instead of showing them.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    alerts: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        self.alerts.lock().push(message.to_string());
    }
}
