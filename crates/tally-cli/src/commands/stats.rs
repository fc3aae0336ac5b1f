use anyhow::Result;

use super::{open_store, stats_line};

pub fn run(json: bool) -> Result<()> {
    let store = open_store()?;
    let view = store.derive_view();
    if json {
        println!("{}", serde_json::to_string_pretty(&view.stats)?);
    } else {
        println!("{}", stats_line(&view.stats));
    }
    Ok(())
}
