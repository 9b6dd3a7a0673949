use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

/// Entries older than this are dropped by a default `prune`.
pub const PRUNE_AGE_DAYS: i64 = 30;

/// Past this size the next append trims the oldest entries first.
const MAX_LOG_SIZE: u64 = 1_048_576;

const LOG_FILE: &str = "diagnostics.log";

const FILE_HEADER: &str = "\
<!-- todo diagnostics log: storage failures that were recovered from.
     The task list itself was kept in memory; anything that could not be
     saved or loaded is copied into the entry body below.
     View with: todo diagnostics
     Prune old entries: todo diagnostics prune -->

---
";

// ---------------------------------------------------------------------------
// Data types
// ---------------------------------------------------------------------------

/// What kind of storage operation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticCategory {
    /// Reading or parsing the saved list at startup
    Hydrate,
    /// Writing a snapshot
    Write,
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCategory::Hydrate => write!(f, "hydrate"),
            DiagnosticCategory::Write => write!(f, "write"),
        }
    }
}

impl DiagnosticCategory {
    pub fn parse_category(s: &str) -> Option<Self> {
        match s {
            "hydrate" => Some(DiagnosticCategory::Hydrate),
            "write" => Some(DiagnosticCategory::Write),
            _ => None,
        }
    }
}

/// A recovered failure, reported by the store instead of being raised.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub timestamp: DateTime<Utc>,
    pub category: DiagnosticCategory,
    pub description: String,
    pub fields: Vec<(String, String)>,
    /// Raw data involved (the unparsable text, or the snapshot that was not saved)
    pub body: String,
}

impl Diagnostic {
    pub fn new(category: DiagnosticCategory, description: impl Into<String>) -> Self {
        Diagnostic {
            timestamp: Utc::now(),
            category,
            description: description.into(),
            fields: Vec::new(),
            body: String::new(),
        }
    }

    pub fn field(mut self, key: &str, value: impl Into<String>) -> Self {
        self.fields.push((key.to_string(), value.into()));
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Look up a field value by key.
    pub fn get_field(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn to_markdown(&self) -> String {
        let mut out = format!(
            "## {} [{}] {}\n\n",
            self.timestamp
                .to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            self.category,
            self.description,
        );

        for (key, value) in &self.fields {
            out.push_str(&format!("{}: {}\n", key, value));
        }

        if !self.body.is_empty() {
            let fence = body_fence(&self.body);
            out.push_str(&format!("\n{}text\n", fence));
            out.push_str(&self.body);
            if !self.body.ends_with('\n') {
                out.push('\n');
            }
            out.push_str(&fence);
            out.push('\n');
        }

        out.push_str("\n---\n");
        out
    }

    /// Same failure as `other`, ignoring when it happened. The log does not
    /// keep a body's final newline, so that is ignored too.
    fn repeats(&self, other: &Diagnostic) -> bool {
        self.category == other.category
            && self.description == other.description
            && self.body.trim_end_matches('\n') == other.body.trim_end_matches('\n')
    }

    /// Serialize for `todo diagnostics --json`.
    pub fn to_json(&self) -> serde_json::Value {
        let fields: serde_json::Map<String, serde_json::Value> = self
            .fields
            .iter()
            .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
            .collect();

        serde_json::json!({
            "timestamp": self.timestamp.to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            "category": self.category.to_string(),
            "description": self.description,
            "fields": fields,
            "body": self.body,
        })
    }
}

// ---------------------------------------------------------------------------
// Sinks
// ---------------------------------------------------------------------------

/// Receives failures the store recovered from.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

impl<F> DiagnosticSink for F
where
    F: FnMut(Diagnostic),
{
    fn report(&mut self, diagnostic: Diagnostic) {
        self(diagnostic)
    }
}

/// Prints a one-line `warning:` per diagnostic, then hands it to `inner`.
#[derive(Debug)]
pub struct StderrSink<S> {
    inner: S,
}

impl<S: DiagnosticSink> StderrSink<S> {
    pub fn new(inner: S) -> Self {
        StderrSink { inner }
    }
}

impl<S: DiagnosticSink> DiagnosticSink for StderrSink<S> {
    fn report(&mut self, diagnostic: Diagnostic) {
        eprintln!("{}", warning_line(&diagnostic));
        self.inner.report(diagnostic);
    }
}

fn warning_line(diagnostic: &Diagnostic) -> String {
    match diagnostic.get_field("Error") {
        Some(err) => format!("warning: {}: {}", diagnostic.description, err),
        None => format!("warning: {}", diagnostic.description),
    }
}

/// Append-only markdown log inside the data directory.
#[derive(Debug, Clone)]
pub struct DiagnosticLog {
    path: PathBuf,
}

impl DiagnosticLog {
    pub fn new(data_dir: &Path) -> Self {
        DiagnosticLog {
            path: data_dir.join(LOG_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one entry. Errors go to stderr; logging never fails the caller.
    /// An entry that repeats the newest one is skipped.
    pub fn append(&self, diagnostic: &Diagnostic) {
        if let Err(e) = self.append_inner(diagnostic) {
            eprintln!("warning: could not write to diagnostics log: {}", e);
        }
    }

    fn append_inner(&self, diagnostic: &Diagnostic) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        if let Some(newest) = self.read_entries(Some(1)).first()
            && newest.repeats(diagnostic)
        {
            return Ok(());
        }

        if let Ok(meta) = std::fs::metadata(&self.path)
            && meta.len() > MAX_LOG_SIZE
        {
            self.trim()?;
        }

        let needs_header = std::fs::metadata(&self.path).map_or(true, |m| m.len() == 0);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        if needs_header {
            file.write_all(FILE_HEADER.as_bytes())?;
        }
        file.write_all(diagnostic.to_markdown().as_bytes())
    }

    /// Drop stale entries, then the oldest ones, until the log is at most
    /// half of [`MAX_LOG_SIZE`].
    fn trim(&self) -> io::Result<()> {
        let content = std::fs::read_to_string(&self.path)?;
        let cutoff = Utc::now() - chrono::Duration::days(PRUNE_AGE_DAYS);
        let rendered: Vec<String> = parse_entries(&content)
            .into_iter()
            .filter(|e| e.timestamp >= cutoff)
            .map(|e| e.to_markdown())
            .collect();

        let budget = (MAX_LOG_SIZE / 2) as usize;
        let mut size = FILE_HEADER.len();
        let mut keep_from = rendered.len();
        for (i, entry) in rendered.iter().enumerate().rev() {
            if size + entry.len() > budget {
                break;
            }
            size += entry.len();
            keep_from = i;
        }

        let mut out = String::from(FILE_HEADER);
        for entry in &rendered[keep_from..] {
            out.push_str(entry);
        }
        crate::io::storage::atomic_write(&self.path, out.as_bytes())
    }

    /// Read entries, most recent first. `limit` keeps only the newest `n`.
    pub fn read_entries(&self, limit: Option<usize>) -> Vec<Diagnostic> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(_) => return Vec::new(),
        };
        let mut entries = parse_entries(&content);
        if let Some(n) = limit {
            let skip = entries.len().saturating_sub(n);
            entries.drain(..skip);
        }
        entries.reverse();
        entries
    }

    /// Drop entries older than `before` (default: [`PRUNE_AGE_DAYS`] ago),
    /// or every entry when `all` is set. Returns how many were removed.
    pub fn prune(&self, before: Option<DateTime<Utc>>, all: bool) -> io::Result<usize> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e),
        };
        let entries = parse_entries(&content);
        let cutoff = before.unwrap_or_else(|| Utc::now() - chrono::Duration::days(PRUNE_AGE_DAYS));

        let (kept, removed): (Vec<_>, Vec<_>) = entries
            .into_iter()
            .partition(|e| !all && e.timestamp >= cutoff);

        let mut out = String::from(FILE_HEADER);
        for entry in &kept {
            out.push_str(&entry.to_markdown());
        }
        crate::io::storage::atomic_write(&self.path, out.as_bytes())?;
        Ok(removed.len())
    }
}

impl DiagnosticSink for DiagnosticLog {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.append(&diagnostic);
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

fn parse_entries(content: &str) -> Vec<Diagnostic> {
    let mut entries = Vec::new();
    let mut lines = content.lines().peekable();

    while let Some(line) = lines.next() {
        let Some(header) = line.strip_prefix("## ") else {
            continue;
        };
        let Some((timestamp, category, description)) = parse_entry_header(header) else {
            continue;
        };

        let mut fields = Vec::new();
        let mut body_lines = Vec::new();
        let mut fence: Option<&str> = None;

        while let Some(line) = lines.peek() {
            if fence.is_none() && line.starts_with("## ") {
                break;
            }
            let line = lines.next().unwrap_or_default();
            if let Some(open) = fence {
                if line == open {
                    fence = None;
                } else {
                    body_lines.push(line);
                }
                continue;
            }
            if line == "---" {
                break;
            }
            if line.starts_with("```") {
                let ticks = line.len() - line.trim_start_matches('`').len();
                fence = Some(&line[..ticks]);
                continue;
            }
            if let Some((key, value)) = line.trim().split_once(": ") {
                fields.push((key.to_string(), value.to_string()));
            }
        }

        entries.push(Diagnostic {
            timestamp,
            category,
            description,
            fields,
            body: body_lines.join("\n"),
        });
    }

    entries
}

/// A backtick fence longer than any backtick run inside `body`.
fn body_fence(body: &str) -> String {
    let longest = body
        .split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    "`".repeat(longest.max(2) + 1)
}

/// `<rfc3339> [<category>] <description>`
fn parse_entry_header(header: &str) -> Option<(DateTime<Utc>, DiagnosticCategory, String)> {
    let (timestamp_str, rest) = header.split_once(" [")?;
    let (category_str, description) = rest.split_once("] ")?;
    let timestamp = DateTime::parse_from_rfc3339(timestamp_str)
        .ok()?
        .with_timezone(&Utc);
    let category = DiagnosticCategory::parse_category(category_str)?;
    Some((timestamp, category, description.to_string()))
}
