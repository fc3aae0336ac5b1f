use anyhow::{Context, Result};

use super::{ensure_saved, open_store, task_json};

pub fn run(id: String, json: bool) -> Result<()> {
    let mut store = open_store()?;
    let id = store
        .resolve_id(&id)
        .context(format!("task '{}' not found", id))?;
    store.toggle_complete(&id);

    ensure_saved(&store)?;

    let task = store.get(&id).context("toggled task missing")?;
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&task_json(task, store.today()))?
        );
    } else if task.completed {
        println!("Completed {}: {}", id.short(), task.text);
    } else {
        println!("Reopened {}: {}", id.short(), task.text);
    }
    Ok(())
}
