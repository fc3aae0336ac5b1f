//! Persistence and the task store engine for tally.

pub mod backend;
pub mod error;
pub mod lockfile;
pub mod persistence;
pub mod task_store;
pub mod workspace;

pub use backend::{Backend, FileBackend, MemoryBackend};
pub use error::StoreError;
pub use persistence::{Loaded, Persistence};
pub use task_store::{EditState, TaskStore};
pub use workspace::Workspace;
