use std::path::{Path, PathBuf};
use std::time::SystemTime;

use async_trait::async_trait;

use crate::error::Result;

/// Storage facade the tree mirrors.
///
/// All paths are logical: relative to the project root, with the single
/// token `.` standing for the root itself. Implementations must reject
/// absolute and parent-traversal paths with `Error::PathSecurity` before
/// performing any I/O (see [`crate::path::check_path`]).
///
/// Virtual folders redirect one top-level name to a directory outside
/// the project root; resolution happens inside the implementation, so
/// callers never see the redirection.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Moves a file or directory. A missing origin is skipped silently
    /// (the entry has usually already moved on disk).
    async fn move_entry(&self, old: &Path, new: &Path) -> Result<()>;

    /// Deletes a file, or a directory recursively.
    async fn delete(&self, path: &Path) -> Result<()>;

    /// Reads file content as text, consulting the read cache first.
    async fn read_text(&self, path: &Path) -> Result<String>;

    /// Reads raw file content, bypassing the text cache.
    async fn read_bytes(&self, path: &Path) -> Result<Vec<u8>>;

    /// Writes (or overwrites) a file.
    async fn write_file(&self, path: &Path, content: &[u8]) -> Result<()>;

    /// Creates a file with the given content.
    async fn create_file(&self, path: &Path, content: &[u8]) -> Result<()>;

    async fn create_dir(&self, path: &Path) -> Result<()>;

    /// Immediate files under `dir`, as logical paths, sorted. `None`
    /// lists the project root. A missing directory yields an empty
    /// listing rather than an error.
    async fn list_files(&self, dir: Option<&Path>) -> Result<Vec<PathBuf>>;

    /// Immediate subdirectories under `dir`, as logical paths. At the
    /// root this mixes registered virtual folders with real entries,
    /// ordered by creation/registration time with lexical tiebreak.
    async fn list_dirs(&self, dir: Option<&Path>) -> Result<Vec<PathBuf>>;

    /// True when the path names an existing file or directory.
    async fn exists(&self, path: &Path) -> Result<bool>;

    async fn file_mtime(&self, path: &Path) -> Result<SystemTime>;

    async fn dir_mtime(&self, path: &Path) -> Result<SystemTime>;

    /// Display name of the project root (the base directory's name).
    fn root_name(&self) -> String;

    /// Registers a virtual folder. `path` may be absolute (the normal
    /// case) or relative to the base directory; its final component
    /// becomes a top-level name. Fails with `VirtualFolderConflict` if
    /// that name already exists at the top level.
    async fn add_virtual_folder(&self, path: &Path) -> Result<()>;

    /// Drops any cached content for `path`. Called when change
    /// detection notices the backing entry moved underneath us.
    fn invalidate(&self, _path: &Path) {}

    /// Resolves a logical path to the backing absolute path.
    fn absolute_path(&self, path: &Path) -> Result<PathBuf>;

    /// Reveals the entry in the platform file browser.
    fn open_in_system_browser(&self, path: &Path) -> Result<()>;
}
