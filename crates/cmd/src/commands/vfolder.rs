use std::path::Path;

use anyhow::Result;
use diagnostics::log_info;

use crate::common::open_project;

pub async fn vfolder_command(root: &Path, target: &Path) -> Result<()> {
    let mut project = open_project(root).await?;
    project.add_virtual_folder(target).await?;

    log_info!("added virtual folder for {target}", target: target.display().to_string());
    println!("Added virtual folder for {}", target.display());
    Ok(())
}
