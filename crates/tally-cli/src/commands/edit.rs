use anyhow::{ensure, Context, Result};
use tally_core::task::{parse_date, Priority};

use super::{ensure_saved, open_store, task_json};

pub fn run(
    id: String,
    text: Option<String>,
    priority: Option<String>,
    date: Option<String>,
    category: Option<String>,
    json: bool,
) -> Result<()> {
    let priority = priority
        .as_deref()
        .map(str::parse::<Priority>)
        .transpose()?;
    let date = date.as_deref().map(parse_date).transpose()?;

    let mut store = open_store()?;
    let id = store
        .resolve_id(&id)
        .context(format!("task '{}' not found", id))?;
    ensure!(store.begin_edit(&id), "task '{}' not found", id.short());

    let draft = store.draft_mut();
    if let Some(text) = text {
        draft.text = text;
    }
    if priority.is_some() {
        draft.priority = priority;
    }
    if date.is_some() {
        draft.date = date;
    }
    if category.is_some() {
        draft.category = category;
    }
    store.save_edit().context("failed to save task")?;
    ensure_saved(&store)?;

    let task = store.get(&id).context("edited task missing")?;
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&task_json(task, store.today()))?
        );
    } else {
        println!("Updated {}: {}", id.short(), task.text);
    }
    Ok(())
}
