use serde::Serialize;
use serde_json::Value;

/// Body of an analyze request.
///
/// `tasks` is whatever the buffer parsed to. It is forwarded without
/// checking that it is an array of well-formed tasks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyzeRequest {
    pub strategy: String,
    pub tasks: Value,
}

/// Score breakdown and annotations attached by the service.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreMeta {
    pub urgency: Option<f64>,
    pub importance: Option<f64>,
    pub effort: Option<f64>,
    pub days_until_due: Option<i64>,
    pub notes: Vec<String>,
}

/// A task as returned by the analyze endpoint.
///
/// Every field is optional: entries are decoded field by field and anything
/// missing or of the wrong type is left absent instead of failing the batch.
/// Displayed values are kept as the text the service sent, so numbers are
/// never rounded and non-numeric strings survive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoredTask {
    pub title: Option<String>,
    pub score: Option<String>,
    pub due_date: Option<String>,
    pub importance: Option<String>,
    pub estimated_hours: Option<String>,
    pub dependencies: Vec<String>,
    pub meta: Option<ScoreMeta>,
}

impl ScoredTask {
    pub fn from_value(value: &Value) -> Self {
        Self {
            title: string_field(value.get("title")),
            score: string_field(value.get("score")),
            due_date: string_field(value.get("due_date")),
            importance: count_field(value.get("importance")),
            estimated_hours: count_field(value.get("estimated_hours")),
            dependencies: string_list(value.get("dependencies")),
            meta: value.get("meta").filter(|m| m.is_object()).map(|meta| ScoreMeta {
                urgency: float_field(meta.get("urgency")),
                importance: float_field(meta.get("importance")),
                effort: float_field(meta.get("effort")),
                days_until_due: int_field(meta.get("days_until_due")),
                notes: string_list(meta.get("notes")),
            }),
        }
    }

    /// Annotation notes, empty when the service sent none.
    pub fn notes(&self) -> &[String] {
        self.meta.as_ref().map(|m| m.notes.as_slice()).unwrap_or(&[])
    }
}

/// One of the top picks returned by the suggest endpoint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Suggestion {
    pub title: Option<String>,
    pub score: Option<String>,
    pub due_date: Option<String>,
    pub importance: Option<String>,
    pub estimated_hours: Option<String>,
    pub explanation: Option<String>,
}

impl Suggestion {
    pub fn from_value(value: &Value) -> Self {
        Self {
            title: string_field(value.get("title")),
            score: string_field(value.get("score")),
            due_date: string_field(value.get("due_date")),
            importance: count_field(value.get("importance")),
            estimated_hours: count_field(value.get("estimated_hours")),
            explanation: string_field(value.get("explanation")),
        }
    }
}

/// Extract the scored tasks from an analyze response.
///
/// Returns `None` unless the body is an object whose `tasks` field is an array.
pub fn scored_tasks_from_response(body: &Value) -> Option<Vec<ScoredTask>> {
    body.get("tasks")?
        .as_array()
        .map(|tasks| tasks.iter().map(ScoredTask::from_value).collect())
}

/// Extract suggestions from a suggest response.
pub fn suggestions_from_response(body: &Value) -> Option<Vec<Suggestion>> {
    body.get("suggestions")?
        .as_array()
        .map(|items| items.iter().map(Suggestion::from_value).collect())
}

fn string_field(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn float_field(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Like [`string_field`], but a numeric zero counts as not provided.
fn count_field(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => string_field(Some(other)),
    }
}

fn int_field(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(|v| string_field(Some(v))).collect())
        .unwrap_or_default()
}
