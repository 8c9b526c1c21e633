use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{NewTodoTask, TodoChanges, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub const fn as_str(self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

impl FromStr for Priority {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "High" => Ok(Priority::High),
            "Medium" => Ok(Priority::Medium),
            "Low" => Ok(Priority::Low),
            _ => Err(ValidationError::InvalidPriority),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored todo item.
///
/// `id` is assigned once by [`TodoTask::create`] and never rewritten; edits go
/// through [`TodoChanges`], which has no id field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoTask {
    pub id: String,
    pub description: String,
    pub is_complete: bool,
    pub priority: Priority,
    pub due_date: DateTime<Utc>,
}

impl TodoTask {
    /// Builds a fresh record with a new v4 id and `is_complete = false`.
    pub fn create(new: NewTodoTask) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            description: new.description,
            is_complete: false,
            priority: new.priority,
            due_date: new.due_date,
        }
    }

    /// Writes every field present in `changes` onto this record.
    pub fn apply(&mut self, changes: TodoChanges) {
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(is_complete) = changes.is_complete {
            self.is_complete = is_complete;
        }
        if let Some(priority) = changes.priority {
            self.priority = priority;
        }
        if let Some(due_date) = changes.due_date {
            self.due_date = due_date;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;
    use serde_json::json;

    fn sample() -> TodoTask {
        TodoTask {
            id: "00000000-0000-0000-0000-000000000000".to_string(),
            description: "Water the plants".to_string(),
            is_complete: false,
            priority: Priority::Medium,
            due_date: Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap(),
        }
    }

    #[rstest]
    #[case("High", Priority::High)]
    #[case("Medium", Priority::Medium)]
    #[case("Low", Priority::Low)]
    fn priority_parses_known_names(#[case] input: &str, #[case] expected: Priority) {
        assert_eq!(input.parse::<Priority>(), Ok(expected));
        assert_eq!(expected.to_string(), input);
    }

    #[rstest]
    #[case("Urgent")]
    #[case("high")]
    #[case("")]
    fn priority_rejects_everything_else(#[case] input: &str) {
        assert_eq!(
            input.parse::<Priority>(),
            Err(ValidationError::InvalidPriority)
        );
    }

    #[test]
    fn task_serializes_with_camel_case_fields() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "00000000-0000-0000-0000-000000000000",
                "description": "Water the plants",
                "isComplete": false,
                "priority": "Medium",
                "dueDate": "2024-05-01T09:30:00Z",
            })
        );
    }

    #[test]
    fn create_assigns_id_and_clears_completion() {
        let task = TodoTask::create(NewTodoTask {
            description: "File taxes".to_string(),
            priority: Priority::High,
            due_date: Utc.with_ymd_and_hms(2024, 4, 15, 0, 0, 0).unwrap(),
        });

        assert!(Uuid::parse_str(&task.id).is_ok());
        assert!(!task.is_complete);
        assert_eq!(task.description, "File taxes");
        assert_eq!(task.priority, Priority::High);
    }

    #[test]
    fn create_never_reuses_an_id() {
        let new = NewTodoTask {
            description: "a".to_string(),
            priority: Priority::Low,
            due_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        };
        let first = TodoTask::create(new.clone());
        let second = TodoTask::create(new);
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn apply_only_touches_present_fields() {
        let mut task = sample();
        task.apply(TodoChanges {
            is_complete: Some(true),
            ..TodoChanges::default()
        });

        let expected = TodoTask {
            is_complete: true,
            ..sample()
        };
        assert_eq!(task, expected);
    }
}
