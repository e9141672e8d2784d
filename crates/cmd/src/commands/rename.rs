use std::path::Path;

use anyhow::Result;

use crate::common::{open_project, resolve_node};

pub async fn rename_command(root: &Path, path: &str, new_name: &str) -> Result<()> {
    let mut project = open_project(root).await?;
    let node = resolve_node(&project, path)?;
    project.tree_mut().rename(node, new_name).await?;

    println!("Renamed {path} to {new_name}");
    Ok(())
}
