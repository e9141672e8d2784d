use std::path::Path;

use anyhow::Result;

use crate::common::{open_project, resolve_node};

/// Reveal an entry in the platform file browser.
pub async fn open_command(root: &Path, path: &str) -> Result<()> {
    let project = open_project(root).await?;
    let node = resolve_node(&project, path)?;
    let tree = project.tree();

    let actual = tree.absolute_path(node)?;
    tree.open_in_system_browser(node)?;
    println!("Opened {}", actual.display());
    Ok(())
}
