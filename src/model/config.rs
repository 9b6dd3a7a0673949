use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::task::TaskStatus;

/// Storage key the task list is saved under unless overridden
pub const DEFAULT_STORAGE_KEY: &str = "mui_todo_tasks_v1";

/// Configuration from config.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_storage_key")]
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            key: default_storage_key(),
        }
    }
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_true() -> bool {
    true
}

fn default_expanded() -> Vec<TaskStatus> {
    vec![TaskStatus::InProgress]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_true")]
    pub show_key_hints: bool,
    /// Sections open when the TUI starts
    #[serde(default = "default_expanded")]
    pub expanded: Vec<TaskStatus>,
    /// Color overrides, e.g. `highlight = "#1976D2"`
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            show_key_hints: true,
            expanded: default_expanded(),
            colors: HashMap::new(),
        }
    }
}
