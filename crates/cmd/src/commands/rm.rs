use std::path::Path;

use anyhow::Result;

use crate::common::{open_project, resolve_node};

pub async fn rm_command(root: &Path, path: &str) -> Result<()> {
    let mut project = open_project(root).await?;
    let node = resolve_node(&project, path)?;
    project.tree_mut().delete(node).await?;

    println!("Deleted {path}");
    Ok(())
}
