pub mod add;
pub mod edit;
pub mod init;
pub mod list;
pub mod rm;
pub mod stats;
pub mod theme;
pub mod toggle;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use std::env;
use tally_core::clock::{Clock, FixedClock, SystemClock};
use tally_core::task::{parse_date, Task};
use tally_core::view::Stats;
use tally_store::backend::FileBackend;
use tally_store::task_store::TaskStore;
use tally_store::workspace::Workspace;
use tracing::debug;

pub type Store = TaskStore<FileBackend, Box<dyn Clock>>;

/// `TALLY_TODAY=YYYY-MM-DD` pins the current date; otherwise the local date.
fn clock_from_env() -> Result<Box<dyn Clock>> {
    match env::var("TALLY_TODAY") {
        Ok(day) => {
            let day = parse_date(&day).context("invalid TALLY_TODAY")?;
            Ok(Box::new(FixedClock(day)))
        }
        Err(_) => Ok(Box::new(SystemClock)),
    }
}

/// Discover the workspace from the current directory and load its store.
pub fn open_store() -> Result<Store> {
    let cwd = env::current_dir()?;
    let workspace = Workspace::discover(&cwd).context("not a tally workspace (or any parent)")?;
    debug!(root = %workspace.root().display(), "workspace opened");
    Ok(TaskStore::initialize(workspace.persistence(), clock_from_env()?))
}

/// Fail the command if the last write did not reach disk.
pub fn ensure_saved(store: &Store) -> Result<()> {
    if let Some(reason) = store.write_error() {
        bail!("changes were not saved: {}", reason);
    }
    Ok(())
}

/// One task as two lines: checkbox, short id and text, then details.
pub fn print_task(task: &Task, today: NaiveDate) {
    let check = if task.completed { "x" } else { " " };
    println!("[{}] {}  {}", check, task.id.short(), task.text);
    let overdue = if task.is_overdue(today) { " (overdue)" } else { "" };
    println!(
        "    {} · {} · {}{}",
        task.priority, task.category, task.date, overdue
    );
}

pub fn stats_line(stats: &Stats) -> String {
    format!(
        "{}/{} done ({}%)",
        stats.completed_count,
        stats.total,
        stats.percent.round()
    )
}

pub fn task_json(task: &Task, today: NaiveDate) -> serde_json::Value {
    serde_json::json!({
        "id": task.id.as_str(),
        "object": task,
        "overdue": task.is_overdue(today),
    })
}
