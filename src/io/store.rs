use std::collections::HashSet;

use chrono::Utc;

use crate::io::diagnostics::{Diagnostic, DiagnosticCategory, DiagnosticSink};
use crate::io::storage::Storage;
use crate::model::seed::{SeedFn, seed_tasks};
use crate::model::task::{NewTask, Task, TaskPatch, TaskStatus};
use crate::ops::task_ops;

/// Source of "now" in epoch milliseconds
pub type Clock = Box<dyn Fn() -> i64>;

fn system_clock() -> i64 {
    Utc::now().timestamp_millis()
}

/// Sole owner of the task list.
///
/// Every mutation updates the in-memory list first, then writes the whole
/// list to `storage` under `key`. Storage failures never reach the caller;
/// they go to the attached [`DiagnosticSink`], if any.
pub struct TaskStore<S: Storage> {
    storage: S,
    key: String,
    tasks: Vec<Task>,
    seed: SeedFn,
    clock: Clock,
    sink: Option<Box<dyn DiagnosticSink>>,
}

impl<S: Storage> TaskStore<S> {
    /// An empty, un-hydrated store. Call [`TaskStore::hydrate`] after
    /// configuring it, or use [`TaskStore::open`].
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        TaskStore {
            storage,
            key: key.into(),
            tasks: Vec::new(),
            seed: seed_tasks,
            clock: Box::new(system_clock),
            sink: None,
        }
    }

    /// Create a store and hydrate it from `storage`.
    pub fn open(storage: S, key: impl Into<String>) -> Self {
        Self::new(storage, key).hydrate()
    }

    pub fn with_seed(mut self, seed: SeedFn) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_sink(mut self, sink: impl DiagnosticSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    pub fn with_clock(mut self, clock: impl Fn() -> i64 + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Replace the in-memory list with whatever [`TaskStore::load`] returns.
    pub fn hydrate(mut self) -> Self {
        self.tasks = self.load();
        self
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        task_ops::find_task(&self.tasks, id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    /// Read the saved list. Falls back to the seed list when nothing is
    /// saved or the saved value cannot be read or parsed; the latter two
    /// are reported to the sink.
    pub fn load(&mut self) -> Vec<Task> {
        let now = (self.clock)();
        let raw = match self.storage.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return (self.seed)(now),
            Err(e) => {
                self.report(
                    Diagnostic::new(DiagnosticCategory::Hydrate, "saved tasks could not be read")
                        .field("Key", self.key.clone())
                        .field("Error", e.to_string()),
                );
                return (self.seed)(now);
            }
        };

        let tasks: Vec<Task> = match serde_json::from_str(&raw) {
            Ok(tasks) => tasks,
            Err(e) => {
                self.report(
                    Diagnostic::new(DiagnosticCategory::Hydrate, "saved tasks are not valid")
                        .field("Key", self.key.clone())
                        .field("Error", e.to_string())
                        .body(raw),
                );
                return (self.seed)(now);
            }
        };

        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        let tasks: Vec<Task> = tasks
            .into_iter()
            .filter(|t| {
                let fresh = seen.insert(t.id.clone());
                if !fresh {
                    duplicates.push(t.id.clone());
                }
                fresh
            })
            .collect();
        if !duplicates.is_empty() {
            self.report(
                Diagnostic::new(DiagnosticCategory::Hydrate, "dropped tasks with duplicate ids")
                    .field("Key", self.key.clone())
                    .field("Ids", duplicates.join(", ")),
            );
        }
        tasks
    }

    /// Serialize `list` and overwrite the storage slot with it.
    /// Failures are reported, never returned.
    pub fn persist(&mut self, list: &[Task]) {
        Self::write_snapshot(&mut self.storage, &self.key, list, &mut self.sink);
    }

    /// Final write at teardown. Hands the storage back.
    pub fn close(mut self) -> S {
        Self::write_snapshot(&mut self.storage, &self.key, &self.tasks, &mut self.sink);
        self.storage
    }

    fn persist_current(&mut self) {
        Self::write_snapshot(&mut self.storage, &self.key, &self.tasks, &mut self.sink);
    }

    fn write_snapshot(
        storage: &mut S,
        key: &str,
        list: &[Task],
        sink: &mut Option<Box<dyn DiagnosticSink>>,
    ) {
        let content = match serde_json::to_string(list) {
            Ok(c) => c,
            Err(e) => {
                if let Some(sink) = sink {
                    sink.report(
                        Diagnostic::new(DiagnosticCategory::Write, "tasks could not be serialized")
                            .field("Key", key)
                            .field("Error", e.to_string()),
                    );
                }
                return;
            }
        };
        if let Err(e) = storage.set(key, &content)
            && let Some(sink) = sink
        {
            sink.report(
                Diagnostic::new(DiagnosticCategory::Write, "tasks could not be saved")
                    .field("Key", key)
                    .field("Error", e.to_string())
                    .body(content),
            );
        }
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        if let Some(sink) = &mut self.sink {
            sink.report(diagnostic);
        }
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Create a task from `payload`, put it first, save, and return it.
    pub fn add(&mut self, payload: NewTask) -> Task {
        let now = (self.clock)();
        let mut id = task_ops::generate_id(now);
        while self.get(&id).is_some() {
            id = task_ops::generate_id(now);
        }
        let task = task_ops::build_task(payload, id, now);
        task_ops::prepend_task(&mut self.tasks, task.clone());
        self.persist_current();
        task
    }

    /// Merge `patch` into the task with `id`. Unknown ids are a no-op, but
    /// the list is saved either way. Returns whether a task matched.
    pub fn update(&mut self, id: &str, patch: &TaskPatch) -> bool {
        let matched = task_ops::patch_task(&mut self.tasks, id, patch);
        self.persist_current();
        matched
    }

    /// Shorthand for an update that only changes the status.
    pub fn set_status(&mut self, id: &str, status: TaskStatus) -> bool {
        self.update(id, &TaskPatch::status(status))
    }

    /// Remove the task with `id` if present, then save.
    pub fn delete(&mut self, id: &str) -> Option<Task> {
        let removed = task_ops::remove_task(&mut self.tasks, id);
        self.persist_current();
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::storage::MemoryStorage;
    use crate::model::seed::no_seed;
    use crate::ops::group::group_by_status;
    use pretty_assertions::assert_eq;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    const KEY: &str = "tasks";

    fn memory_store() -> TaskStore<MemoryStorage> {
        TaskStore::open(MemoryStorage::new(), KEY).with_clock(|| 1_000_000)
    }

    fn collecting_sink() -> (Rc<RefCell<Vec<Diagnostic>>>, impl FnMut(Diagnostic)) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let handle = Rc::clone(&seen);
        (seen, move |d: Diagnostic| handle.borrow_mut().push(d))
    }

    fn pending(title: &str) -> NewTask {
        NewTask::new(title, "2024-09-01", TaskStatus::Pending)
    }

    fn ids<S: Storage>(store: &TaskStore<S>) -> Vec<String> {
        store.tasks().iter().map(|t| t.id.clone()).collect()
    }

    #[test]
    fn test_open_empty_storage_uses_seed() {
        let store = memory_store();
        assert_eq!(store.len(), 4);
        assert_eq!(ids(&store), vec!["t1", "t2", "t3", "t4"]);
    }

    #[test]
    fn test_open_does_not_write() {
        let store = memory_store();
        assert_eq!(store.storage().writes(), 0);
    }

    #[test]
    fn test_corrupt_storage_falls_back_and_reports() {
        let (seen, sink) = collecting_sink();
        let storage = MemoryStorage::new().with_value(KEY, "not json {{{");
        let store = TaskStore::new(storage, KEY).with_sink(sink).hydrate();

        assert_eq!(store.len(), 4);
        let seen = seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].category, DiagnosticCategory::Hydrate);
        assert_eq!(seen[0].body, "not json {{{");
    }

    #[test]
    fn test_wrong_shape_falls_back() {
        let storage = MemoryStorage::new().with_value(KEY, r#"{"tasks": []}"#);
        let store = TaskStore::open(storage, KEY);
        assert_eq!(ids(&store), vec!["t1", "t2", "t3", "t4"]);
    }

    #[test]
    fn test_missing_key_reports_nothing() {
        let (seen, sink) = collecting_sink();
        let _store = TaskStore::new(MemoryStorage::new(), KEY)
            .with_sink(sink)
            .hydrate();
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_saved_empty_list_is_not_reseeded() {
        let storage = MemoryStorage::new().with_value(KEY, "[]");
        let store = TaskStore::open(storage, KEY);
        assert!(store.is_empty());
    }

    #[test]
    fn test_custom_seed_provider() {
        let store = TaskStore::new(MemoryStorage::new(), KEY)
            .with_seed(no_seed)
            .hydrate();
        assert!(store.is_empty());
    }

    #[test]
    fn test_duplicate_ids_dropped_on_load() {
        let (seen, sink) = collecting_sink();
        let raw = r#"[
            {"id":"a","title":"one","date":"","status":"pending","createdAt":1},
            {"id":"a","title":"two","date":"","status":"pending","createdAt":2},
            {"id":"b","title":"three","date":"","status":"completed","createdAt":3}
        ]"#;
        let storage = MemoryStorage::new().with_value(KEY, raw);
        let store = TaskStore::new(storage, KEY).with_sink(sink).hydrate();
        assert_eq!(ids(&store), vec!["a", "b"]);
        assert_eq!(store.get("a").unwrap().title, "one");
        assert_eq!(seen.borrow()[0].get_field("Ids"), Some("a"));
    }

    #[test]
    fn test_add_prepends_and_stamps() {
        let mut store = memory_store();
        let before = ids(&store);
        let task = store.add(pending("New"));

        assert_eq!(store.tasks()[0], task);
        assert_eq!(task.created_at, 1_000_000);
        assert!(task.id.starts_with("1000000"));
        assert_eq!(ids(&store)[1..], before[..]);
    }

    #[test]
    fn test_add_ids_pairwise_distinct() {
        let mut store = TaskStore::new(MemoryStorage::new(), KEY)
            .with_seed(no_seed)
            .with_clock(|| 5)
            .hydrate();
        for i in 0..200 {
            store.add(pending(&format!("task {}", i)));
        }
        let unique: HashSet<String> = ids(&store).into_iter().collect();
        assert_eq!(unique.len(), 200);
    }

    #[test]
    fn test_every_mutation_persists() {
        let mut store = memory_store();
        let task = store.add(pending("New"));
        assert_eq!(store.storage().writes(), 1);
        store.update(&task.id, &TaskPatch::status(TaskStatus::Completed));
        assert_eq!(store.storage().writes(), 2);
        store.update("missing", &TaskPatch::status(TaskStatus::Completed));
        assert_eq!(store.storage().writes(), 3);
        store.delete("missing");
        assert_eq!(store.storage().writes(), 4);
    }

    #[test]
    fn test_update_changes_only_patched_field() {
        let mut store = memory_store();
        let before = store.get("t3").unwrap().clone();
        assert!(store.update("t3", &TaskPatch::status(TaskStatus::Completed)));
        assert_eq!(
            store.get("t3").unwrap(),
            &Task {
                status: TaskStatus::Completed,
                ..before
            }
        );
    }

    #[test]
    fn test_update_preserves_order() {
        let mut store = memory_store();
        let patch = TaskPatch {
            title: Some("Renamed".into()),
            ..Default::default()
        };
        store.update("t2", &patch);
        assert_eq!(ids(&store), vec!["t1", "t2", "t3", "t4"]);
        assert_eq!(store.tasks()[1].title, "Renamed");
    }

    #[test]
    fn test_unknown_id_is_noop() {
        let mut store = memory_store();
        let before = store.tasks().to_vec();
        assert!(!store.set_status("nope", TaskStatus::Completed));
        assert!(store.delete("nope").is_none());
        assert_eq!(store.tasks(), &before[..]);
    }

    #[test]
    fn test_delete_removes_exactly_one() {
        let mut store = memory_store();
        let removed = store.delete("t2").unwrap();
        assert_eq!(removed.id, "t2");
        assert_eq!(store.len(), 3);
        assert!(store.get("t2").is_none());
        assert_eq!(ids(&store), vec!["t1", "t3", "t4"]);
    }

    #[test]
    fn test_persist_then_load_round_trip() {
        let mut store = memory_store();
        store.add(pending("Round trip").with_description("kept"));
        store.set_status("t1", TaskStatus::Completed);
        let snapshot = store.tasks().to_vec();

        store.persist(&snapshot);
        assert_eq!(store.load(), snapshot);
    }

    #[test]
    fn test_reopen_sees_saved_list() {
        let mut store = memory_store();
        store.add(pending("Survives"));
        let expected = store.tasks().to_vec();
        let storage = store.close();

        let reopened = TaskStore::open(storage, KEY);
        assert_eq!(reopened.tasks(), &expected[..]);
    }

    #[test]
    fn test_write_failure_reported_session_continues() {
        let (seen, sink) = collecting_sink();
        let mut storage = MemoryStorage::new();
        storage.fail_writes(true);
        let mut store = TaskStore::new(storage, KEY).with_sink(sink).hydrate();

        let task = store.add(pending("Unsaved"));
        assert_eq!(store.tasks()[0], task);
        assert_eq!(store.len(), 5);

        let seen = seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].category, DiagnosticCategory::Write);
        assert!(seen[0].body.contains("Unsaved"));
        assert!(seen[0].get_field("Error").unwrap().contains("quota"));
    }

    #[test]
    fn test_write_recovers_after_failure() {
        let mut store = memory_store();
        store.storage_mut().fail_writes(true);
        store.add(pending("first"));
        store.storage_mut().fail_writes(false);
        store.add(pending("second"));

        let saved: Vec<Task> =
            serde_json::from_str(store.storage().raw(KEY).unwrap()).unwrap();
        assert_eq!(saved, store.tasks());
    }

    #[test]
    fn test_clock_is_consulted_per_add() {
        let tick = Rc::new(Cell::new(0i64));
        let t = Rc::clone(&tick);
        let mut store = TaskStore::new(MemoryStorage::new(), KEY)
            .with_seed(no_seed)
            .with_clock(move || {
                t.set(t.get() + 10);
                t.get()
            })
            .hydrate();
        let a = store.add(pending("a"));
        let b = store.add(pending("b"));
        assert!(b.created_at > a.created_at);
    }

    #[test]
    fn test_seed_then_add_scenario() {
        let mut store = memory_store();
        let new = store.add(pending("New"));
        let groups = group_by_status(store.tasks());

        assert_eq!(groups.in_progress.len(), 2);
        assert_eq!(groups.pending.len(), 2);
        assert_eq!(groups.completed.len(), 1);
        assert_eq!(groups.pending[0].id, new.id);
    }
}
