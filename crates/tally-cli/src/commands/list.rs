use anyhow::Result;
use tally_core::view::{FilterMode, SortMode};

use super::{open_store, print_task, stats_line, task_json};

pub fn run(search: String, filter: String, sort: String, json: bool) -> Result<()> {
    let filter: FilterMode = filter.parse()?;
    let sort: SortMode = sort.parse()?;

    let mut store = open_store()?;
    store.set_view_parameters(Some(search), Some(filter), Some(sort));
    let today = store.today();
    let view = store.derive_view();

    if json {
        let tasks: Vec<_> = view.tasks.iter().map(|t| task_json(t, today)).collect();
        let output = serde_json::json!({
            "tasks": tasks,
            "stats": view.stats,
            "shown": view.shown(),
            "total": view.canonical_len,
            "filter": filter.as_str(),
            "sort": sort.as_str(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if view.tasks.is_empty() {
        println!("No tasks found.");
    }
    for task in &view.tasks {
        print_task(task, today);
    }
    println!();
    println!("{} shown • {} total", view.shown(), view.canonical_len);
    println!("{}", stats_line(&view.stats));
    Ok(())
}
