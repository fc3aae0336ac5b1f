use crate::backend::FileBackend;
use crate::error::StoreError;
use crate::lockfile::Lockfile;
use crate::persistence::Persistence;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const TALLY_DIR: &str = ".tally";
const CONFIG_FILE: &str = "config.json";
const DATA_DIR: &str = "data";

/// Highest config version this build understands.
pub const CONFIG_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkspaceConfig {
    pub version: u32,
    pub created_at: DateTime<Utc>,
}

/// A `.tally/` directory holding config and stored data.
///
/// Layout:
/// - `config.json`: [`WorkspaceConfig`]
/// - `data/`: one JSON file per storage key
pub struct Workspace {
    root: PathBuf,
    config: WorkspaceConfig,
}

impl Workspace {
    /// Create `.tally/` under `path`. Fails if one is already there.
    pub fn init(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let root = path.as_ref().to_path_buf();
        let tally_dir = root.join(TALLY_DIR);

        if tally_dir.exists() {
            return Err(StoreError::WorkspaceExists(
                tally_dir.display().to_string(),
            ));
        }

        fs::create_dir_all(tally_dir.join(DATA_DIR))?;

        let config = WorkspaceConfig {
            version: CONFIG_VERSION,
            created_at: Utc::now(),
        };
        let json = serde_json::to_string_pretty(&config)?;
        Lockfile::replace(tally_dir.join(CONFIG_FILE), json.as_bytes())?;
        debug!(path = %tally_dir.display(), "workspace initialized");

        Ok(Self { root, config })
    }

    /// Open the workspace directly under `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let root = path.as_ref().to_path_buf();
        let tally_dir = root.join(TALLY_DIR);

        if !tally_dir.exists() {
            return Err(StoreError::WorkspaceNotFound(root.display().to_string()));
        }

        let data = fs::read_to_string(tally_dir.join(CONFIG_FILE))?;
        let config: WorkspaceConfig = serde_json::from_str(&data)?;
        if config.version > CONFIG_VERSION {
            return Err(StoreError::UnsupportedVersion {
                found: config.version,
                supported: CONFIG_VERSION,
            });
        }

        Ok(Self { root, config })
    }

    /// Search upward from `start` for a `.tally/` directory and open it.
    pub fn discover(start: impl AsRef<Path>) -> Result<Self, StoreError> {
        let mut current = start.as_ref().to_path_buf();
        loop {
            if current.join(TALLY_DIR).exists() {
                return Self::open(&current);
            }
            if !current.pop() {
                return Err(StoreError::WorkspaceNotFound(
                    start.as_ref().display().to_string(),
                ));
            }
        }
    }

    /// Directory containing `.tally/`.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn tally_dir(&self) -> PathBuf {
        self.root.join(TALLY_DIR)
    }

    pub fn config(&self) -> &WorkspaceConfig {
        &self.config
    }

    /// File-backed persistence over `.tally/data/`.
    pub fn persistence(&self) -> Persistence<FileBackend> {
        Persistence::new(FileBackend::new(self.tally_dir().join(DATA_DIR)))
    }
}
