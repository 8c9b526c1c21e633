use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::{due_date, Priority, TodoTask, ValidationError};

/// Body of a create request.
///
/// Fields stay loosely typed so that [`CreateTodoTask::validate`] can report
/// the first bad field with its own message instead of a generic decode error.
/// `id` and `isComplete` are not part of the payload and are ignored if sent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoTask {
    #[serde(default)]
    pub description: Option<Value>,
    #[serde(default)]
    pub priority: Option<Value>,
    #[serde(default)]
    pub due_date: Option<Value>,
}

/// A create payload that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodoTask {
    pub description: String,
    pub priority: Priority,
    pub due_date: DateTime<Utc>,
}

impl CreateTodoTask {
    /// Checks description, priority, then dueDate, stopping at the first
    /// failure.
    pub fn validate(self) -> Result<NewTodoTask, ValidationError> {
        let description = match self.description {
            Some(Value::String(description)) if !description.is_empty() => description,
            _ => return Err(ValidationError::InvalidDescription),
        };

        let priority = match self.priority {
            Some(value) if is_present(&value) => value
                .as_str()
                .ok_or(ValidationError::InvalidPriority)?
                .parse::<Priority>()?,
            _ => return Err(ValidationError::InvalidPriority),
        };

        let due_date = match self.due_date {
            Some(value) if is_present(&value) => {
                due_date::parse(&value).ok_or(ValidationError::InvalidDueDate)?
            }
            _ => return Err(ValidationError::InvalidDueDate),
        };

        Ok(NewTodoTask {
            description,
            priority,
            due_date,
        })
    }
}

// null, false, 0 and "" all count as "not provided".
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Body of a partial edit. Any subset of the editable fields may be sent;
/// keys outside the allow-list (including `id`) are dropped during decoding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditTodoTask {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_complete: Option<bool>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default, deserialize_with = "due_date::deserialize_optional")]
    pub due_date: Option<DateTime<Utc>>,
}

impl EditTodoTask {
    /// Lays this edit over `existing`, field by field.
    ///
    /// With an existing record every field of the result is set; without one
    /// only the fields carried by the edit are.
    pub fn merge(self, existing: Option<&TodoTask>) -> TodoChanges {
        let base = existing.map(TodoChanges::from).unwrap_or_default();

        TodoChanges {
            description: self.description.or(base.description),
            is_complete: self.is_complete.or(base.is_complete),
            priority: self.priority.or(base.priority),
            due_date: self.due_date.or(base.due_date),
        }
    }
}

/// The allow-listed field set written back to the store by an edit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoChanges {
    pub description: Option<String>,
    pub is_complete: Option<bool>,
    pub priority: Option<Priority>,
    pub due_date: Option<DateTime<Utc>>,
}

impl TodoChanges {
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.is_complete.is_none()
            && self.priority.is_none()
            && self.due_date.is_none()
    }
}

impl From<&TodoTask> for TodoChanges {
    fn from(task: &TodoTask) -> Self {
        Self {
            description: Some(task.description.clone()),
            is_complete: Some(task.is_complete),
            priority: Some(task.priority),
            due_date: Some(task.due_date),
        }
    }
}
