use chrono::Local;
use uuid::Uuid;

use crate::model::task::{NewTask, Task, TaskPatch};

/// Error type for task lookups that must succeed (CLI `show`, TUI edit)
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    #[error("task not found: {0}")]
    NotFound(String),
}

/// Today's date as `YYYY-MM-DD`, the default date label for new tasks
pub fn today_str() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

/// A fresh task id: the creation time in millis followed by 8 random hex
/// digits. Two ids created in the same millisecond differ in the suffix.
pub fn generate_id(now_ms: i64) -> String {
    let random = Uuid::new_v4().simple().to_string();
    format!("{}{}", now_ms, &random[..8])
}

/// Build a task from a payload, stamping id and creation time.
pub fn build_task(payload: NewTask, id: String, now_ms: i64) -> Task {
    Task {
        id,
        title: payload.title,
        description: payload.description,
        date: payload.date,
        status: payload.status,
        created_at: now_ms,
    }
}

pub fn find_task<'a>(tasks: &'a [Task], id: &str) -> Option<&'a Task> {
    tasks.iter().find(|t| t.id == id)
}

pub fn find_task_or_err<'a>(tasks: &'a [Task], id: &str) -> Result<&'a Task, TaskError> {
    find_task(tasks, id).ok_or_else(|| TaskError::NotFound(id.to_string()))
}

/// Insert `task` at the front, newest first.
pub fn prepend_task(tasks: &mut Vec<Task>, task: Task) {
    tasks.insert(0, task);
}

/// Replace the task with `id` by its merge with `patch`.
/// Returns false (and changes nothing) when no task has that id.
pub fn patch_task(tasks: &mut [Task], id: &str, patch: &TaskPatch) -> bool {
    match tasks.iter_mut().find(|t| t.id == id) {
        Some(slot) => {
            *slot = slot.merged(patch);
            true
        }
        None => false,
    }
}

/// Remove the task with `id`, keeping the order of the rest.
pub fn remove_task(tasks: &mut Vec<Task>, id: &str) -> Option<Task> {
    let idx = tasks.iter().position(|t| t.id == id)?;
    Some(tasks.remove(idx))
}
