//! Working-directory context for learnsync workflows.
//!
//! Every workflow receives a `Store` explicitly instead of reading the process
//! working directory, so the same code runs against temp directories in tests.

use std::path::PathBuf;

/// Directory holding all learnsync state inside a project.
pub const STATE_DIR: &str = ".learnsync";
pub const CONFIG_FILE: &str = "config.json";
pub const SETTINGS_FILE: &str = "settings.toml";
/// Pending learning records, one JSON file per record.
pub const PENDING_DIR: &str = "learnings";

/// Handle on one project working directory.
#[derive(Debug, Clone)]
pub struct Store {
    /// Absolute path to the project working directory
    pub root: PathBuf,
}

impl Store {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn state_dir(&self) -> PathBuf {
        self.root.join(STATE_DIR)
    }

    pub fn config_path(&self) -> PathBuf {
        self.state_dir().join(CONFIG_FILE)
    }

    pub fn settings_path(&self) -> PathBuf {
        self.state_dir().join(SETTINGS_FILE)
    }

    pub fn pending_dir(&self) -> PathBuf {
        self.state_dir().join(PENDING_DIR)
    }

    pub fn git_dir(&self) -> PathBuf {
        self.root.join(".git")
    }

    /// True when the root is the top of a git working tree with a `.git` directory.
    pub fn is_git_work_tree(&self) -> bool {
        self.git_dir().is_dir()
    }
}
