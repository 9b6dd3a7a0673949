use std::ops::Range;

use regex::{Regex, RegexBuilder};

use crate::model::task::Task;

/// Tasks whose title or description contains `query`, ignoring case.
///
/// A query that is empty after trimming matches everything. Order is kept.
pub fn filter_by_query<'a, I>(tasks: I, query: &str) -> Vec<&'a Task>
where
    I: IntoIterator<Item = &'a Task>,
{
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return tasks.into_iter().collect();
    }
    tasks
        .into_iter()
        .filter(|t| matches_query(t, &needle))
        .collect()
}

/// `needle` must already be trimmed and lowercased.
fn matches_query(task: &Task, needle: &str) -> bool {
    task.title.to_lowercase().contains(needle)
        || task.description_text().to_lowercase().contains(needle)
}

/// Compile the query into a literal, case-insensitive pattern for
/// highlighting. `None` when the query is blank.
pub fn query_regex(query: &str) -> Option<Regex> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return None;
    }
    RegexBuilder::new(&regex::escape(trimmed))
        .case_insensitive(true)
        .build()
        .ok()
}

/// Byte ranges in `text` where `query` occurs, ignoring case.
pub fn match_ranges(text: &str, query: &str) -> Vec<Range<usize>> {
    match query_regex(query) {
        Some(re) => re.find_iter(text).map(|m| m.start()..m.end()).collect(),
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::seed::seed_tasks;
    use crate::model::task::TaskStatus;

    fn task(id: &str, title: &str, description: Option<&str>) -> Task {
        Task {
            id: id.into(),
            title: title.into(),
            description: description.map(String::from),
            date: "2024-07-31".into(),
            status: TaskStatus::Pending,
            created_at: 0,
        }
    }

    fn ids(tasks: &[&Task]) -> Vec<String> {
        tasks.iter().map(|t| t.id.clone()).collect()
    }

    #[test]
    fn test_empty_query_returns_everything() {
        let tasks = seed_tasks(0);
        let all = filter_by_query(&tasks, "");
        assert_eq!(ids(&all), vec!["t1", "t2", "t3", "t4"]);
    }

    #[test]
    fn test_whitespace_query_returns_everything() {
        let tasks = seed_tasks(0);
        assert_eq!(filter_by_query(&tasks, "   \t").len(), 4);
    }

    #[test]
    fn test_case_insensitive_title() {
        let tasks = vec![task("a", "Lorem Ipsum", None)];
        assert_eq!(ids(&filter_by_query(&tasks, "LOREM")), vec!["a"]);
    }

    #[test]
    fn test_matches_description() {
        let tasks = seed_tasks(0);
        assert_eq!(ids(&filter_by_query(&tasks, "review")), vec!["t3"]);
    }

    #[test]
    fn test_query_is_trimmed() {
        let tasks = seed_tasks(0);
        assert_eq!(ids(&filter_by_query(&tasks, "  finished ")), vec!["t4"]);
    }

    #[test]
    fn test_substring_not_tokens() {
        let tasks = vec![
            task("a", "Buy milk", None),
            task("b", "milk buy", None),
        ];
        assert_eq!(ids(&filter_by_query(&tasks, "buy milk")), vec!["a"]);
    }

    #[test]
    fn test_missing_description_does_not_match() {
        let tasks = vec![task("a", "Title", None)];
        assert!(filter_by_query(&tasks, "desc").is_empty());
    }

    #[test]
    fn test_preserves_order() {
        let tasks = seed_tasks(0);
        let hits = filter_by_query(&tasks, "lorem");
        assert_eq!(ids(&hits), vec!["t1", "t2"]);
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        let tasks = vec![task("a", "fix (urgent)", None), task("b", "fix urgent", None)];
        assert_eq!(ids(&filter_by_query(&tasks, "(urgent)")), vec!["a"]);
        assert_eq!(match_ranges("fix (urgent)", "(URGENT)"), vec![4..12]);
    }

    #[test]
    fn test_match_ranges_multiple() {
        assert_eq!(match_ranges("Lorem lorem", "LOREM"), vec![0..5, 6..11]);
        assert!(match_ranges("Lorem", "").is_empty());
        assert!(match_ranges("Lorem", "xyz").is_empty());
    }
}
