use std::path::{Path, PathBuf};
use std::sync::Arc;

use diagnostics::log_info;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::factory::NodeFactory;
use crate::io::Backend;
use crate::node::NodeId;
use crate::path;
use crate::tree::Tree;

/// Persisted project settings. Serialized as YAML next to the files it
/// describes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectDoc {
    /// Virtual folder targets in registration order. Each one surfaces
    /// as a root-level folder named after the target's last component.
    #[serde(default)]
    pub virtual_folders: Vec<PathBuf>,
}

/// A [`Tree`] plus its persisted document.
///
/// Opening a project reads the document, loads the tree, then registers
/// the recorded virtual folders so they occupy the front of the root's
/// children in document order.
pub struct Project {
    tree: Tree,
    doc: ProjectDoc,
    doc_name: PathBuf,
}

impl Project {
    /// Writes an empty document so a fresh directory can be opened as a
    /// project.
    pub async fn init(backend: &dyn Backend, doc_name: &Path) -> Result<()> {
        path::check_path(doc_name)?;
        let text = serde_yaml_ng::to_string(&ProjectDoc::default())?;
        backend.create_file(doc_name, text.as_bytes()).await
    }

    pub async fn open(
        backend: Arc<dyn Backend>,
        factory: NodeFactory,
        doc_name: &Path,
    ) -> Result<Self> {
        path::check_path(doc_name)?;
        let doc = match backend.read_text(doc_name).await {
            Ok(text) => serde_yaml_ng::from_str(&text)?,
            Err(Error::NotFound(_)) => ProjectDoc::default(),
            Err(err) => return Err(err),
        };
        let mut tree = Tree::open(backend, factory).await?;
        for (index, target) in doc.virtual_folders.iter().enumerate() {
            let name = virtual_name(target)?;
            tree.backend().add_virtual_folder(target).await?;
            if tree.find_by_path(&name).is_none() {
                tree.add_virtual_root(&name, index).await?;
            }
        }
        log_info!("opened project {doc_name} with {count} virtual folders",
            doc_name: doc_name.display().to_string(),
            count: doc.virtual_folders.len());
        Ok(Project {
            tree,
            doc,
            doc_name: doc_name.to_path_buf(),
        })
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut Tree {
        &mut self.tree
    }

    pub fn doc(&self) -> &ProjectDoc {
        &self.doc
    }

    /// Registers `target` as a virtual folder, surfaces it after the
    /// already-registered ones, and rewrites the document.
    pub async fn add_virtual_folder(&mut self, target: &Path) -> Result<NodeId> {
        let name = virtual_name(target)?;
        if self.doc.virtual_folders.iter().any(|t| t == target) {
            return Err(Error::virtual_folder_conflict(&name));
        }
        self.tree.backend().add_virtual_folder(target).await?;
        let index = self.doc.virtual_folders.len();
        let id = self.tree.add_virtual_root(&name, index).await?;
        self.doc.virtual_folders.push(target.to_path_buf());
        self.save().await?;
        Ok(id)
    }

    /// Rewrites the whole document from the in-memory state.
    pub async fn save(&self) -> Result<()> {
        let text = serde_yaml_ng::to_string(&self.doc)?;
        self.tree
            .backend()
            .write_file(&self.doc_name, text.as_bytes())
            .await
    }

    /// Sweeps the watchers once and folds any external changes into the
    /// tree.
    pub async fn check_filesystem(&mut self) -> Result<()> {
        self.tree.poll().await
    }
}

/// The root-level name a virtual folder target surfaces under.
fn virtual_name(target: &Path) -> Result<String> {
    path::basename(target).ok_or_else(|| Error::virtual_folder_conflict(target.display().to_string()))
}
