use crate::backend::Backend;
use crate::error::StoreError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tally_core::task::Task;
use tracing::{debug, warn};

/// Storage key for the ordered task collection.
pub const TASKS_KEY: &str = "tasks_v1";
/// Storage key for the dark-mode flag.
pub const THEME_KEY: &str = "dark_mode_v1";

/// Outcome of reading a stored value. Loads never fail outright.
#[derive(Debug, Clone, PartialEq)]
pub enum Loaded<T> {
    Present(T),
    /// Nothing stored under the key (or an empty value).
    Absent,
    /// Something is stored but could not be read or decoded.
    Corrupt(String),
}

impl<T> Loaded<T> {
    /// The value, treating absent and corrupt alike.
    pub fn present(self) -> Option<T> {
        match self {
            Self::Present(value) => Some(value),
            Self::Absent | Self::Corrupt(_) => None,
        }
    }
}

/// Reads and writes tally's two stored values over any [`Backend`].
#[derive(Debug)]
pub struct Persistence<B> {
    backend: B,
}

impl<B: Backend> Persistence<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn load_tasks(&self) -> Loaded<Vec<Task>> {
        self.load(TASKS_KEY)
    }

    /// Replace the stored collection, keeping its order.
    pub fn save_tasks(&self, tasks: &[Task]) -> Result<(), StoreError> {
        self.save(TASKS_KEY, tasks)
    }

    pub fn load_theme_flag(&self) -> Loaded<bool> {
        self.load(THEME_KEY)
    }

    pub fn save_theme_flag(&self, dark: bool) -> Result<(), StoreError> {
        self.save(THEME_KEY, &dark)
    }

    fn load<T: DeserializeOwned>(&self, key: &str) -> Loaded<T> {
        let raw = match self.backend.read(key) {
            Ok(Some(raw)) if !raw.is_empty() => raw,
            Ok(_) => return Loaded::Absent,
            Err(e) => {
                warn!(key, error = %e, "stored value unreadable");
                return Loaded::Corrupt(e.to_string());
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Loaded::Present(value),
            Err(e) => {
                warn!(key, error = %e, "stored value failed to parse");
                Loaded::Corrupt(e.to_string())
            }
        }
    }

    fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(value)?;
        self.backend.write(key, &json)?;
        debug!(key, bytes = json.len(), "stored value written");
        Ok(())
    }
}
