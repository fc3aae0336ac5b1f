use anyhow::{Context, Result};
use std::env;
use tally_store::workspace::Workspace;

pub fn run() -> Result<()> {
    let cwd = env::current_dir().context("failed to get current directory")?;
    let workspace = Workspace::init(&cwd).context("failed to initialize workspace")?;
    println!(
        "Initialized empty tally workspace in {}",
        workspace.tally_dir().display()
    );
    Ok(())
}
