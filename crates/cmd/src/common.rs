use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Result, anyhow};
use projfs::{Backend, LocalBackend, NodeFactory, NodeId, Project};

/// Name of the project document inside the project root.
pub const DOC_NAME: &str = "project.yaml";

/// Resolve the project root: an explicit override wins, otherwise the
/// PROJECT_ROOT environment variable.
pub fn project_root(override_path: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = override_path {
        return Ok(path);
    }
    env::var("PROJECT_ROOT")
        .map(PathBuf::from)
        .map_err(|_| anyhow!("PROJECT_ROOT environment variable not set"))
}

pub async fn open_project(root: &Path) -> Result<Project> {
    let backend: Arc<dyn Backend> = Arc::new(LocalBackend::new(root));
    let project = Project::open(backend, NodeFactory::new(), Path::new(DOC_NAME)).await?;
    Ok(project)
}

/// Look an entry up by its logical path, root included.
pub fn resolve_node(project: &Project, path: &str) -> Result<NodeId> {
    let tree = project.tree();
    if projfs::path::is_root(path) {
        return Ok(tree.root());
    }
    tree.find_by_path(path)
        .ok_or_else(|| anyhow!("no such entry: {path}"))
}
