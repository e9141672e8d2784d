use std::path::Path;

use anyhow::Result;

use crate::common::{open_project, resolve_node};

pub async fn mv_command(root: &Path, path: &str, dest: &str) -> Result<()> {
    let mut project = open_project(root).await?;
    let node = resolve_node(&project, path)?;
    project.tree_mut().move_to_path(node, dest).await?;

    println!("Moved {path} into {dest}");
    Ok(())
}
