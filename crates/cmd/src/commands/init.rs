use std::path::Path;

use anyhow::{Result, anyhow};
use diagnostics::log_info;
use projfs::{LocalBackend, Project};

use crate::common::DOC_NAME;

pub async fn init_command(root: &Path) -> Result<()> {
    if root.join(DOC_NAME).exists() {
        return Err(anyhow!("project already exists at {}", root.display()));
    }
    std::fs::create_dir_all(root)?;

    let backend = LocalBackend::new(root);
    Project::init(&backend, Path::new(DOC_NAME)).await?;

    log_info!("initialized project at {root}", root: root.display().to_string());
    println!("Initialized empty project at {}", root.display());
    Ok(())
}
