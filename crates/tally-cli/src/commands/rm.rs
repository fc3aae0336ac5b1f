use anyhow::{Context, Result};

use super::{ensure_saved, open_store};

pub fn run(id: String, json: bool) -> Result<()> {
    let mut store = open_store()?;
    let id = store
        .resolve_id(&id)
        .context(format!("task '{}' not found", id))?;
    store.delete_task(&id);
    ensure_saved(&store)?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "id": id.as_str(),
                "deleted": true,
            }))?
        );
    } else {
        println!("Deleted {}", id.short());
    }
    Ok(())
}
