use anyhow::{bail, Result};

use super::{ensure_saved, open_store};

pub fn run(mode: Option<String>, json: bool) -> Result<()> {
    let mut store = open_store()?;
    if let Some(mode) = mode {
        let dark = match mode.trim().to_lowercase().as_str() {
            "dark" => true,
            "light" => false,
            other => bail!("unknown theme '{}' (expected dark or light)", other),
        };
        store.set_dark_mode(dark);
        ensure_saved(&store)?;
    }

    let name = if store.dark_mode() { "dark" } else { "light" };
    if json {
        println!("{}", serde_json::json!({ "theme": name, "dark": store.dark_mode() }));
    } else {
        println!("Theme: {}", name);
    }
    Ok(())
}
