use serde::Serialize;

use crate::model::task::{Task, TaskStatus};
use crate::ops::group::StatusGroups;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

/// Grouped listing, keyed by status in display order
#[derive(Serialize)]
pub struct GroupsJson<'a> {
    #[serde(rename = "in-progress")]
    pub in_progress: &'a [&'a Task],
    pub pending: &'a [&'a Task],
    pub completed: &'a [&'a Task],
}

#[derive(Serialize)]
pub struct StatsJson {
    #[serde(rename = "in-progress")]
    pub in_progress: usize,
    pub pending: usize,
    pub completed: usize,
    pub total: usize,
}

pub fn groups_to_json<'a>(groups: &'a StatusGroups<'a>) -> GroupsJson<'a> {
    GroupsJson {
        in_progress: &groups.in_progress,
        pending: &groups.pending,
        completed: &groups.completed,
    }
}

pub fn stats_to_json(groups: &StatusGroups) -> StatsJson {
    StatsJson {
        in_progress: groups.in_progress.len(),
        pending: groups.pending.len(),
        completed: groups.completed.len(),
        total: groups.total(),
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

fn status_char(status: TaskStatus) -> char {
    match status {
        TaskStatus::Pending => ' ',
        TaskStatus::InProgress => '>',
        TaskStatus::Completed => 'x',
    }
}

/// Format a single task as a one-line summary
pub fn format_task_line(task: &Task) -> String {
    format!(
        "[{}] {}  {}  ({})",
        status_char(task.status),
        task.id,
        task.title,
        task.date
    )
}

/// Format detailed task view
pub fn format_task_detail(task: &Task) -> Vec<String> {
    let mut lines = vec![
        format!("[{}] {}", status_char(task.status), task.title),
        format!("id: {}", task.id),
        format!("status: {}", task.status),
        format!("date: {}", task.date),
    ];
    if let Some(created) = chrono::DateTime::from_timestamp_millis(task.created_at) {
        lines.push(format!(
            "created: {}",
            created.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
        ));
    }
    if let Some(description) = &task.description {
        lines.push("description:".to_string());
        for line in description.lines() {
            lines.push(format!("  {}", line));
        }
    }
    lines
}

/// Section header with count, e.g. `== In Progress (2) ==`
pub fn format_section_header(status: TaskStatus, count: usize) -> String {
    format!("== {} ({}) ==", status.label(), count)
}

/// Format the grouped listing. `only` restricts output to one section.
pub fn format_groups(groups: &StatusGroups, only: Option<TaskStatus>) -> Vec<String> {
    let mut lines = Vec::new();
    for (status, tasks) in groups.iter() {
        if only.is_some_and(|s| s != status) {
            continue;
        }
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push(format_section_header(status, tasks.len()));
        if tasks.is_empty() {
            lines.push("  No tasks".to_string());
        }
        for task in tasks {
            lines.push(format!("  {}", format_task_line(task)));
        }
    }
    lines
}

pub fn format_stats(groups: &StatusGroups) -> Vec<String> {
    let mut lines: Vec<String> = groups
        .iter()
        .map(|(status, tasks)| format!("{:<12} {}", status.label(), tasks.len()))
        .collect();
    lines.push(format!("{:<12} {}", "Total", groups.total()));
    lines
}
