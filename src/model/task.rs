use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which of the three buckets a task sits in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    /// Display order used by every grouped view
    pub const ALL: [TaskStatus; 3] = [
        TaskStatus::InProgress,
        TaskStatus::Pending,
        TaskStatus::Completed,
    ];

    /// The persisted name (`pending`, `in-progress`, `completed`)
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Completed => "completed",
        }
    }

    /// Section heading shown to users
    pub fn label(self) -> &'static str {
        match self {
            TaskStatus::Pending => "Pending",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Completed => "Completed",
        }
    }

    /// Next status in the pending → in-progress → completed → pending cycle
    pub fn cycle(self) -> TaskStatus {
        match self {
            TaskStatus::Pending => TaskStatus::InProgress,
            TaskStatus::InProgress => TaskStatus::Completed,
            TaskStatus::Completed => TaskStatus::Pending,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown status '{0}' (expected pending, in-progress or completed)")]
pub struct ParseStatusError(pub String);

impl FromStr for TaskStatus {
    type Err = ParseStatusError;

    /// Accepts the persisted names plus a few shorthand aliases, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" | "todo" => Ok(TaskStatus::Pending),
            "in-progress" | "in_progress" | "inprogress" | "progress" | "active" => {
                Ok(TaskStatus::InProgress)
            }
            "completed" | "done" => Ok(TaskStatus::Completed),
            _ => Err(ParseStatusError(s.to_string())),
        }
    }
}

/// A single to-do item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Assigned by the store; never changes
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Free-form date label, not parsed
    pub date: String,
    pub status: TaskStatus,
    /// Epoch milliseconds, stamped by the store
    pub created_at: i64,
}

impl Task {
    /// Description text, or the empty string when absent
    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    /// Return a copy of this task with `patch` applied (patch fields win).
    pub fn merged(&self, patch: &TaskPatch) -> Task {
        Task {
            id: self.id.clone(),
            title: patch.title.clone().unwrap_or_else(|| self.title.clone()),
            description: match &patch.description {
                Some(d) => d.clone(),
                None => self.description.clone(),
            },
            date: patch.date.clone().unwrap_or_else(|| self.date.clone()),
            status: patch.status.unwrap_or(self.status),
            created_at: self.created_at,
        }
    }
}

/// Fields the caller supplies when creating a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTask {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub date: String,
    pub status: TaskStatus,
}

impl NewTask {
    pub fn new(title: impl Into<String>, date: impl Into<String>, status: TaskStatus) -> Self {
        NewTask {
            title: title.into(),
            description: None,
            date: date.into(),
            status,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A partial update. `None` leaves a field alone.
///
/// `description` is tri-state: `None` keeps it, `Some(None)` clears it,
/// `Some(Some(text))` replaces it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub date: Option<String>,
    pub status: Option<TaskStatus>,
}

impl TaskPatch {
    pub fn status(status: TaskStatus) -> Self {
        TaskPatch {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.date.is_none()
            && self.status.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Task {
        Task {
            id: "t1".into(),
            title: "Lorem Ipsum".into(),
            description: Some("dummy text".into()),
            date: "2024-07-31".into(),
            status: TaskStatus::InProgress,
            created_at: 1_700_000_000_000,
        }
    }

    #[test]
    fn status_serializes_kebab_case() {
        let json = serde_json::to_string(&TaskStatus::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");
        let back: TaskStatus = serde_json::from_str("\"completed\"").unwrap();
        assert_eq!(back, TaskStatus::Completed);
    }

    #[test]
    fn status_from_str_accepts_aliases() {
        assert_eq!("done".parse::<TaskStatus>().unwrap(), TaskStatus::Completed);
        assert_eq!("Active".parse::<TaskStatus>().unwrap(), TaskStatus::InProgress);
        assert_eq!("todo".parse::<TaskStatus>().unwrap(), TaskStatus::Pending);
        assert_eq!(
            "in-progress".parse::<TaskStatus>().unwrap(),
            TaskStatus::InProgress
        );
        assert!("later".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn status_cycle_wraps() {
        assert_eq!(TaskStatus::Pending.cycle(), TaskStatus::InProgress);
        assert_eq!(TaskStatus::Completed.cycle(), TaskStatus::Pending);
    }

    #[test]
    fn task_uses_camel_case_created_at() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["createdAt"], 1_700_000_000_000i64);
        assert_eq!(json["status"], "in-progress");
    }

    #[test]
    fn task_without_description_round_trips() {
        let json = r#"{"id":"x","title":"T","date":"d","status":"pending","createdAt":5}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.description, None);
        assert_eq!(serde_json::to_string(&task).unwrap(), json);
    }

    #[test]
    fn merged_only_touches_patched_fields() {
        let task = sample();
        let merged = task.merged(&TaskPatch::status(TaskStatus::Completed));
        assert_eq!(
            merged,
            Task {
                status: TaskStatus::Completed,
                ..task
            }
        );
    }

    #[test]
    fn merged_can_clear_description() {
        let patch = TaskPatch {
            description: Some(None),
            ..Default::default()
        };
        assert_eq!(sample().merged(&patch).description, None);
    }
}
