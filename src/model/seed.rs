use super::task::{Task, TaskStatus};

const DAY_MS: i64 = 1000 * 60 * 60 * 24;

/// Signature of a default-data provider: given "now" in epoch millis,
/// return the list a fresh store starts with.
pub type SeedFn = fn(i64) -> Vec<Task>;

/// The built-in example list used when nothing has been saved yet.
///
/// Four tasks: two in progress, one pending, one completed.
pub fn seed_tasks(now_ms: i64) -> Vec<Task> {
    vec![
        Task {
            id: "t1".into(),
            title: "Lorem Ipsum".into(),
            description: Some(
                "Lorem Ipsum is simply dummy text of the printing and typesetting industry."
                    .into(),
            ),
            date: "2024-07-31".into(),
            status: TaskStatus::InProgress,
            created_at: now_ms - DAY_MS,
        },
        Task {
            id: "t2".into(),
            title: "Lorem Ipsum 2".into(),
            description: Some("Second In-progress example item.".into()),
            date: "2024-07-30".into(),
            status: TaskStatus::InProgress,
            created_at: now_ms - 2 * DAY_MS,
        },
        Task {
            id: "t3".into(),
            title: "Pending item".into(),
            description: Some("Waiting for review".into()),
            date: "2024-08-05".into(),
            status: TaskStatus::Pending,
            created_at: now_ms - 3 * DAY_MS,
        },
        Task {
            id: "t4".into(),
            title: "Completed task".into(),
            description: Some("Already finished".into()),
            date: "2024-06-11".into(),
            status: TaskStatus::Completed,
            created_at: now_ms - 10 * DAY_MS,
        },
    ]
}

/// A provider that starts from an empty list.
pub fn no_seed(_now_ms: i64) -> Vec<Task> {
    Vec::new()
}
