use std::path::{Path, PathBuf};

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the project tree and its storage facade.
///
/// Backend I/O and document-parse failures are carried as strings so the
/// whole enum stays `PartialEq` for test assertions.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("path escapes the project root: {0}")]
    PathSecurity(PathBuf),

    #[error("invalid node name: {0:?}")]
    InvalidRename(String),

    #[error("a sibling with this name already exists: {0}")]
    DuplicateName(String),

    #[error("a node with this path already exists: {0}")]
    DuplicatePath(PathBuf),

    #[error("a top-level entry named {0:?} already exists")]
    VirtualFolderConflict(String),

    #[error("inserting {0} into its own subtree")]
    RecursiveFolder(PathBuf),

    #[error("node already deleted: {0}")]
    NodeDeleted(PathBuf),

    #[error("{0}")]
    Vetoed(String),

    #[error("no provider registered for file type: {0}")]
    UnknownFileType(PathBuf),

    #[error("path is already being watched: {0}")]
    WatchConflict(PathBuf),

    #[error("path is not being watched: {0}")]
    NotWatched(PathBuf),

    #[error("unsaved changes: {0}")]
    UnsavedChanges(PathBuf),

    #[error("not a folder: {0}")]
    NotAFolder(PathBuf),

    #[error("not a file: {0}")]
    NotAFile(PathBuf),

    #[error("not found: {0}")]
    NotFound(PathBuf),

    #[error("invalid project document: {0}")]
    InvalidDocument(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl Error {
    pub fn path_security<P: AsRef<Path>>(path: P) -> Self {
        Error::PathSecurity(path.as_ref().to_path_buf())
    }

    pub fn invalid_rename<S: AsRef<str>>(name: S) -> Self {
        Error::InvalidRename(name.as_ref().to_string())
    }

    pub fn duplicate_name<S: AsRef<str>>(name: S) -> Self {
        Error::DuplicateName(name.as_ref().to_string())
    }

    pub fn duplicate_path<P: AsRef<Path>>(path: P) -> Self {
        Error::DuplicatePath(path.as_ref().to_path_buf())
    }

    pub fn virtual_folder_conflict<S: AsRef<str>>(name: S) -> Self {
        Error::VirtualFolderConflict(name.as_ref().to_string())
    }

    pub fn recursive_folder<P: AsRef<Path>>(path: P) -> Self {
        Error::RecursiveFolder(path.as_ref().to_path_buf())
    }

    pub fn node_deleted<P: AsRef<Path>>(path: P) -> Self {
        Error::NodeDeleted(path.as_ref().to_path_buf())
    }

    pub fn vetoed<S: AsRef<str>>(reason: S) -> Self {
        Error::Vetoed(reason.as_ref().to_string())
    }

    pub fn unknown_file_type<P: AsRef<Path>>(path: P) -> Self {
        Error::UnknownFileType(path.as_ref().to_path_buf())
    }

    pub fn watch_conflict<P: AsRef<Path>>(path: P) -> Self {
        Error::WatchConflict(path.as_ref().to_path_buf())
    }

    pub fn not_watched<P: AsRef<Path>>(path: P) -> Self {
        Error::NotWatched(path.as_ref().to_path_buf())
    }

    pub fn unsaved_changes<P: AsRef<Path>>(path: P) -> Self {
        Error::UnsavedChanges(path.as_ref().to_path_buf())
    }

    pub fn not_a_folder<P: AsRef<Path>>(path: P) -> Self {
        Error::NotAFolder(path.as_ref().to_path_buf())
    }

    pub fn not_a_file<P: AsRef<Path>>(path: P) -> Self {
        Error::NotAFile(path.as_ref().to_path_buf())
    }

    pub fn not_found<P: AsRef<Path>>(path: P) -> Self {
        Error::NotFound(path.as_ref().to_path_buf())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Error {
        Error::Io(err.to_string())
    }
}

impl From<serde_yaml_ng::Error> for Error {
    fn from(err: serde_yaml_ng::Error) -> Error {
        Error::InvalidDocument(err.to_string())
    }
}
