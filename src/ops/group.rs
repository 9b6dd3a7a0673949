use crate::model::task::{Task, TaskStatus};
use crate::ops::search::filter_by_query;

/// Tasks partitioned by status. Each bucket keeps input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusGroups<'a> {
    pub in_progress: Vec<&'a Task>,
    pub pending: Vec<&'a Task>,
    pub completed: Vec<&'a Task>,
}

impl<'a> StatusGroups<'a> {
    pub fn get(&self, status: TaskStatus) -> &[&'a Task] {
        match status {
            TaskStatus::InProgress => &self.in_progress,
            TaskStatus::Pending => &self.pending,
            TaskStatus::Completed => &self.completed,
        }
    }

    fn bucket_mut(&mut self, status: TaskStatus) -> &mut Vec<&'a Task> {
        match status {
            TaskStatus::InProgress => &mut self.in_progress,
            TaskStatus::Pending => &mut self.pending,
            TaskStatus::Completed => &mut self.completed,
        }
    }

    /// Buckets in display order: in progress, pending, completed.
    pub fn iter(&self) -> impl Iterator<Item = (TaskStatus, &[&'a Task])> + '_ {
        TaskStatus::ALL.into_iter().map(move |s| (s, self.get(s)))
    }

    pub fn count(&self, status: TaskStatus) -> usize {
        self.get(status).len()
    }

    pub fn total(&self) -> usize {
        self.in_progress.len() + self.pending.len() + self.completed.len()
    }
}

/// Partition `tasks` into the three status buckets.
pub fn group_by_status<'a, I>(tasks: I) -> StatusGroups<'a>
where
    I: IntoIterator<Item = &'a Task>,
{
    let mut groups = StatusGroups::default();
    for task in tasks {
        groups.bucket_mut(task.status).push(task);
    }
    groups
}

/// Filter by `query`, then group: what a view renders.
pub fn project<'a>(tasks: &'a [Task], query: &str) -> StatusGroups<'a> {
    group_by_status(filter_by_query(tasks, query))
}
