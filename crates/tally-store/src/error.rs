use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("core error: {0}")]
    Core(#[from] tally_core::error::CoreError),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("workspace not found (searched upward from {0})")]
    WorkspaceNotFound(String),

    #[error("workspace already exists at {0}")]
    WorkspaceExists(String),

    #[error("unsupported workspace version {found} (this build reads up to {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("lock file conflict: {0}")]
    LockConflict(String),

    #[error("task not found: {0}")]
    TaskNotFound(String),

    #[error("ambiguous task prefix '{prefix}': matches {count} tasks")]
    AmbiguousPrefix { prefix: String, count: usize },

    #[error("no edit in progress")]
    NotEditing,

    #[error("task under edit no longer exists: {0}")]
    EditTargetMissing(String),
}
