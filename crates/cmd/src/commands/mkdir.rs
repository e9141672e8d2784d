use std::path::Path;

use anyhow::{Result, anyhow};
use diagnostics::log_debug;

use crate::common::{open_project, resolve_node};

pub async fn mkdir_command(root: &Path, path: &str) -> Result<()> {
    let mut project = open_project(root).await?;
    log_debug!("creating folder {path}", path: path);

    let parent_path = projfs::path::dirname(path);
    let name = projfs::path::basename(path)
        .ok_or_else(|| anyhow!("not a creatable path: {path}"))?;
    let parent = resolve_node(&project, &parent_path.to_string_lossy())?;
    project.tree_mut().create_sub_folder(parent, &name).await?;

    println!("Created folder {path}");
    Ok(())
}
