//! Result cards: the display form of scored tasks and suggestions.

use crate::models::{ScoredTask, Suggestion};

const NOT_AVAILABLE: &str = "N/A";
const NO_NOTES: &str = "None";

/// Display-ready text for one result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskCard {
    pub title: String,
    pub score: String,
    pub due_date: String,
    pub importance: String,
    pub estimated_hours: String,
    pub notes: String,
}

impl From<&ScoredTask> for TaskCard {
    fn from(task: &ScoredTask) -> Self {
        let notes = if task.notes().is_empty() {
            NO_NOTES.to_string()
        } else {
            task.notes().join(", ")
        };

        Self {
            title: task.title.clone().unwrap_or_default(),
            score: task.score.clone().unwrap_or_default(),
            due_date: text_or_na(task.due_date.as_deref()),
            importance: text_or_na(task.importance.as_deref()),
            estimated_hours: text_or_na(task.estimated_hours.as_deref()),
            notes,
        }
    }
}

impl From<&Suggestion> for TaskCard {
    fn from(suggestion: &Suggestion) -> Self {
        Self {
            title: suggestion.title.clone().unwrap_or_default(),
            score: suggestion.score.clone().unwrap_or_default(),
            due_date: text_or_na(suggestion.due_date.as_deref()),
            importance: text_or_na(suggestion.importance.as_deref()),
            estimated_hours: text_or_na(suggestion.estimated_hours.as_deref()),
            notes: suggestion
                .explanation
                .clone()
                .filter(|e| !e.is_empty())
                .unwrap_or_else(|| NO_NOTES.to_string()),
        }
    }
}

/// Map scored tasks to cards, one per task, in order.
pub fn cards(tasks: &[ScoredTask]) -> Vec<TaskCard> {
    tasks.iter().map(TaskCard::from).collect()
}

// Empty strings read as "not provided"; zero counts are dropped at decode.
fn text_or_na(value: Option<&str>) -> String {
    match value {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Render a card as plain text.
///
/// Example output:
/// ```text
/// Write report
///   Score:           60.25
///   Due Date:        2025-01-31
///   Importance:      8
///   Estimated Hours: 2
///   Notes:           Due soon: urgency weighted, Quick win: low effort bonus
/// ```
pub fn render_card(card: &TaskCard) -> String {
    let mut output = String::new();
    output.push_str(&card.title);
    output.push('\n');
    for (label, value) in [
        ("Score:", &card.score),
        ("Due Date:", &card.due_date),
        ("Importance:", &card.importance),
        ("Estimated Hours:", &card.estimated_hours),
        ("Notes:", &card.notes),
    ] {
        output.push_str(&format!("  {:<17}{}\n", label, value));
    }
    output
}
