use std::path::{Path, PathBuf};

use crate::io::config_io::{self, ConfigError};
use crate::io::diagnostics::{DiagnosticLog, StderrSink};
use crate::io::storage::FileStorage;
use crate::io::store::TaskStore;
use crate::model::config::AppConfig;

/// A resolved data directory and the config read from it.
#[derive(Debug, Clone)]
pub struct DataDir {
    pub root: PathBuf,
    pub config: AppConfig,
}

impl DataDir {
    /// Resolve `override_dir` (the `-C` flag) or the default location and
    /// read its config. The directory does not need to exist yet.
    pub fn open(override_dir: Option<&Path>) -> Result<Self, ConfigError> {
        let root = match override_dir {
            Some(dir) => dir.to_path_buf(),
            None => config_io::default_data_dir(),
        };
        let config = config_io::read_config(&root)?;
        Ok(DataDir { root, config })
    }

    pub fn diagnostics(&self) -> DiagnosticLog {
        DiagnosticLog::new(&self.root)
    }

    /// Open the file-backed task store, reporting storage failures to the
    /// diagnostics log.
    pub fn open_store(&self) -> TaskStore<FileStorage> {
        TaskStore::new(FileStorage::new(&self.root), self.config.storage.key.clone())
            .with_sink(self.diagnostics())
            .hydrate()
    }

    /// Like [`open_store`](Self::open_store), but failures are also printed
    /// as `warning:` lines so a save that did not happen is visible.
    pub fn open_store_for_edit(&self) -> TaskStore<FileStorage> {
        TaskStore::new(FileStorage::new(&self.root), self.config.storage.key.clone())
            .with_sink(StderrSink::new(self.diagnostics()))
            .hydrate()
    }
}
