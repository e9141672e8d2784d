use std::path::Path;

use anyhow::{Result, anyhow};
use diagnostics::log_debug;

use crate::common::{open_project, resolve_node};

pub async fn touch_command(root: &Path, path: &str, content: Option<&str>) -> Result<()> {
    let mut project = open_project(root).await?;
    log_debug!("creating file {path}", path: path);

    let parent_path = projfs::path::dirname(path);
    let name = projfs::path::basename(path)
        .ok_or_else(|| anyhow!("not a creatable path: {path}"))?;
    let parent = resolve_node(&project, &parent_path.to_string_lossy())?;
    project
        .tree_mut()
        .create_file(parent, &name, content.unwrap_or_default().as_bytes())
        .await?;

    println!("Created file {path}");
    Ok(())
}
