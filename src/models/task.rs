use serde::{Deserialize, Serialize};

/// A unit of work entered through the task form.
///
/// Absent optional values serialize as `null` so the buffer shows every
/// field the form collects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub title: String,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub importance: Option<i64>,
    #[serde(default)]
    pub estimated_hours: Option<i64>,
    /// Titles of tasks that must finish first.
    #[serde(default)]
    pub dependencies: Vec<String>,
}

/// Raw text of the form fields, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    pub title: String,
    pub due_date: String,
    pub importance: String,
    pub estimated_hours: String,
    /// Comma-separated dependency titles.
    pub dependencies: String,
}

impl FormInput {
    /// Convert field text into a task. Returns `None` when the title is empty.
    ///
    /// The title is taken verbatim; whitespace-only titles are accepted.
    pub fn to_task(&self) -> Option<Task> {
        if self.title.is_empty() {
            return None;
        }

        Some(Task {
            title: self.title.clone(),
            due_date: if self.due_date.is_empty() {
                None
            } else {
                Some(self.due_date.clone())
            },
            importance: parse_optional_int(&self.importance),
            estimated_hours: parse_optional_int(&self.estimated_hours),
            dependencies: split_dependencies(&self.dependencies),
        })
    }
}

/// Parse the leading integer of a field, treating empty, non-numeric and
/// zero values as absent.
///
/// Only the leading digits count, so `"3.7"` and `"12h"` parse as 3 and 12.
pub fn parse_optional_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (sign, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1, &trimmed[1..]),
        Some(b'+') => (1, &trimmed[1..]),
        _ => (1, trimmed),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let value = digits[..end].parse::<i64>().ok()? * sign;

    (value != 0).then_some(value)
}

/// Split a comma-separated dependency field, trimming each entry.
pub fn split_dependencies(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(',').map(|d| d.trim().to_string()).collect()
}

/// Tasks collected during a session, in the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, task: Task) {
        self.tasks.push(task);
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Two-space indented JSON array of every task.
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.tasks)
    }
}
