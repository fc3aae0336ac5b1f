use anyhow::{Context, Result};
use tally_core::draft::Draft;
use tally_core::task::{parse_date, Priority};

use super::{ensure_saved, open_store, task_json};

pub fn run(
    text: String,
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
    store.set_draft(Draft {
        text,
        priority,
        date,
        category,
    });
    let id = store.add_task().context("task text cannot be empty")?;

    ensure_saved(&store)?;

    let task = store.get(&id).context("added task missing")?;
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&task_json(task, store.today()))?
        );
    } else {
        println!("Added {}: {}", id.short(), task.text);
    }
    Ok(())
}
