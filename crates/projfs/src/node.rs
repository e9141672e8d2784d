use std::path::{Path, PathBuf};

/// Index of a node in the tree's arena. Ids are never reused; a deleted
/// node's slot stays behind as a tombstone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn new(id: usize) -> Self {
        Self(id)
    }

    pub fn as_usize(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Folder-only state: an ordered, name-unique child list.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FolderState {
    pub children: Vec<NodeId>,
}

/// File-only state: the unsaved buffer plus factory-assigned typing.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FileState {
    /// Buffered edits not yet written through the facade.
    pub dirty_text: Option<String>,
    /// Provider tag; `None` for generic files.
    pub type_name: Option<String>,
    /// When non-empty, renames must keep one of these suffixes.
    pub extensions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Folder(FolderState),
    File(FileState),
}

/// One entry in the project tree.
///
/// `path` is always `parent.path` joined with the node's name; the tree
/// maintains that equation through every rename and move. The root's
/// path is the single token `.` and its parent stays `None` forever.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) id: NodeId,
    pub(crate) path: PathBuf,
    pub(crate) parent: Option<NodeId>,
    pub(crate) deleted: bool,
    pub(crate) kind: NodeKind,
}

impl Node {
    pub(crate) fn new(id: NodeId, path: PathBuf, kind: NodeKind) -> Self {
        Node {
            id,
            path,
            parent: None,
            deleted: false,
            kind,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    pub fn is_folder(&self) -> bool {
        matches!(self.kind, NodeKind::Folder(_))
    }

    pub fn is_file(&self) -> bool {
        matches!(self.kind, NodeKind::File(_))
    }

    /// Child ids, empty for files.
    pub fn children(&self) -> &[NodeId] {
        match &self.kind {
            NodeKind::Folder(folder) => &folder.children,
            NodeKind::File(_) => &[],
        }
    }

    pub(crate) fn folder(&self) -> Option<&FolderState> {
        match &self.kind {
            NodeKind::Folder(folder) => Some(folder),
            NodeKind::File(_) => None,
        }
    }

    pub(crate) fn folder_mut(&mut self) -> Option<&mut FolderState> {
        match &mut self.kind {
            NodeKind::Folder(folder) => Some(folder),
            NodeKind::File(_) => None,
        }
    }

    pub(crate) fn file(&self) -> Option<&FileState> {
        match &self.kind {
            NodeKind::File(file) => Some(file),
            NodeKind::Folder(_) => None,
        }
    }

    pub(crate) fn file_mut(&mut self) -> Option<&mut FileState> {
        match &mut self.kind {
            NodeKind::File(file) => Some(file),
            NodeKind::Folder(_) => None,
        }
    }

    /// True when a file node has buffered, unsaved edits.
    pub fn is_dirty(&self) -> bool {
        self.file().is_some_and(|f| f.dirty_text.is_some())
    }

    /// Provider type tag for files, if any.
    pub fn type_name(&self) -> Option<&str> {
        self.file().and_then(|f| f.type_name.as_deref())
    }
}
