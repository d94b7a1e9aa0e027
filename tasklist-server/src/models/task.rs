//! Task entity and creation payload

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::ValidationError;

/// Maximum length for task titles
const MAX_TITLE_LEN: usize = 256;

/// Maximum length for task descriptions
const MAX_DESCRIPTION_LEN: usize = 4096;

/// A persisted task row.
///
/// `id` is assigned by the database on insert and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: i32,
    pub title: String,
    pub description: String,
    #[serde(rename = "isCompleted")]
    #[sqlx(rename = "isCompleted")]
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
}

/// Client payload for creating a task. Carries no id.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskCreate {
    pub title: String,
    pub description: String,
}

/// Validated task title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Create a new task title.
    ///
    /// # Rules
    /// - Non-empty (after trimming whitespace)
    /// - Max 256 characters
    ///
    /// # Example
    /// ```
    /// use tasklist_server::models::TaskTitle;
    ///
    /// assert!(TaskTitle::new("Buy milk").is_ok());
    /// assert!(TaskTitle::new("   ").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: "title" });
        }

        if trimmed.chars().count() > MAX_TITLE_LEN {
            return Err(ValidationError::TooLong {
                field: "title",
                max: MAX_TITLE_LEN,
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validated task description. Empty is allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDescription(String);

impl TaskDescription {
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(ValidationError::TooLong {
                field: "description",
                max: MAX_DESCRIPTION_LEN,
            });
        }

        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A creation payload that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: TaskTitle,
    pub description: TaskDescription,
}

impl TryFrom<TaskCreate> for NewTask {
    type Error = ValidationError;

    fn try_from(req: TaskCreate) -> Result<Self, Self::Error> {
        Ok(Self {
            title: TaskTitle::new(&req.title)?,
            description: TaskDescription::new(&req.description)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn title_is_trimmed() {
        let title = TaskTitle::new("  Buy milk ").unwrap();
        assert_eq!(title.as_str(), "Buy milk");
    }

    #[test]
    fn rejects_empty_title() {
        let err = TaskTitle::new("").unwrap_err();
        assert!(matches!(err, ValidationError::Empty { field: "title" }));
    }

    #[test]
    fn title_max_length() {
        assert!(TaskTitle::new(&"a".repeat(256)).is_ok());

        let err = TaskTitle::new(&"a".repeat(257)).unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { max: 256, .. }));
    }

    #[test]
    fn description_may_be_empty() {
        assert!(TaskDescription::new("").is_ok());
        assert!(TaskDescription::new(&"d".repeat(4097)).is_err());
    }

    #[test]
    fn create_payload_rejects_id() {
        let result: Result<TaskCreate, _> =
            serde_json::from_str(r#"{"id": 7, "title": "x", "description": "y"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn create_payload_requires_description() {
        let result: Result<TaskCreate, _> = serde_json::from_str(r#"{"title": "x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn task_serializes_with_camel_case_flag() {
        let task = Task {
            id: 1,
            title: "Buy milk".into(),
            description: "2L".into(),
            is_completed: false,
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        };

        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["id"], 1);
        assert_eq!(value["isCompleted"], false);
        assert_eq!(value["created_at"], "2024-05-01T12:00:00Z");
        assert!(value.get("is_completed").is_none());
    }
}
