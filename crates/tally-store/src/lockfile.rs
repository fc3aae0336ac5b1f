use crate::error::StoreError;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tracing::warn;

/// A lock untouched for this long is left over from a writer that died
/// before committing.
pub const STALE_AFTER: Duration = Duration::from_secs(30);

/// Exclusive write guard for a data file.
///
/// Bytes go to `<target>.lock`; [`Lockfile::commit`] renames that file over
/// `<target>`, so readers see either the old contents or the new ones. An
/// uncommitted lock is deleted on drop and the target is left as it was.
pub struct Lockfile {
    target: PathBuf,
    lock_path: PathBuf,
    file: Option<fs::File>,
}

/// `tasks_v1.json` -> `tasks_v1.json.lock`.
fn lock_path_for(target: &Path) -> PathBuf {
    let mut name = target
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".lock");
    target.with_file_name(name)
}

impl Lockfile {
    /// Take the lock for `target`. Fails with `LockConflict` if another
    /// writer holds it. A lock older than [`STALE_AFTER`] is removed and
    /// acquisition retried once.
    pub fn acquire(target: impl AsRef<Path>) -> Result<Self, StoreError> {
        let target = target.as_ref().to_path_buf();
        let lock_path = lock_path_for(&target);

        if let Some(parent) = lock_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = match Self::create(&lock_path) {
            Err(StoreError::LockConflict(_)) if is_stale(&lock_path) => {
                warn!(path = %lock_path.display(), "removing stale lock file");
                fs::remove_file(&lock_path)?;
                Self::create(&lock_path)?
            }
            other => other?,
        };
        Ok(Self {
            target,
            lock_path,
            file: Some(file),
        })
    }

    fn create(lock_path: &Path) -> Result<fs::File, StoreError> {
        match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(lock_path)
        {
            Ok(file) => Ok(file),
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                Err(StoreError::LockConflict(lock_path.display().to_string()))
            }
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    /// Replace `target` with `data` in one lock/write/commit cycle.
    pub fn replace(target: impl AsRef<Path>, data: &[u8]) -> Result<(), StoreError> {
        let mut lock = Self::acquire(target)?;
        lock.write_all(data)?;
        lock.commit()
    }

    pub fn write_all(&mut self, data: &[u8]) -> Result<(), StoreError> {
        match self.file.as_mut() {
            Some(file) => {
                file.write_all(data)?;
                file.sync_all()?;
                Ok(())
            }
            None => Err(StoreError::LockConflict(
                "lock file already committed".into(),
            )),
        }
    }

    /// Rename the lock file over the target.
    pub fn commit(mut self) -> Result<(), StoreError> {
        // Close the handle before renaming.
        self.file.take();
        fs::rename(&self.lock_path, &self.target)?;
        Ok(())
    }
}

fn is_stale(lock_path: &Path) -> bool {
    fs::metadata(lock_path)
        .and_then(|m| m.modified())
        .ok()
        .and_then(|modified| SystemTime::now().duration_since(modified).ok())
        .is_some_and(|age| age >= STALE_AFTER)
}

impl Drop for Lockfile {
    fn drop(&mut self) {
        if self.file.is_some() {
            let _ = fs::remove_file(&self.lock_path);
        }
    }
}
