use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::error::{Error, Result};
use crate::io::Backend;
use crate::node::NodeId;

/// Last-observed backend state for one watched entry.
#[derive(Debug, Clone)]
enum WatcherState {
    File {
        last_write: SystemTime,
    },
    Dir {
        last_write: SystemTime,
        files: Vec<PathBuf>,
        dirs: Vec<PathBuf>,
    },
}

/// What one sweep observed for a watched entry.
#[derive(Debug, Clone, PartialEq)]
pub enum Change {
    /// The watched entry no longer exists.
    Removed { owner: NodeId, path: PathBuf },
    /// A watched file's timestamp advanced. No payload: callers re-read
    /// content on demand.
    FileModified { owner: NodeId, path: PathBuf },
    /// A watched directory gained entries. Removed entries are not
    /// reported here; each child's own watcher detects its removal.
    DirAdded {
        owner: NodeId,
        path: PathBuf,
        files: Vec<PathBuf>,
        dirs: Vec<PathBuf>,
    },
}

/// Per-(owner, path) polling state.
///
/// Nothing here runs on its own: a caller drives [`WatcherSet::sweep`],
/// which visits entries in key order and reports changes for the tree
/// to reconcile. Double registration and removal of an unknown key are
/// programming errors and fail loudly.
#[derive(Debug, Default)]
pub struct WatcherSet {
    entries: BTreeMap<(NodeId, PathBuf), WatcherState>,
}

impl WatcherSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn watch_file(
        &mut self,
        backend: &dyn Backend,
        owner: NodeId,
        path: &Path,
    ) -> Result<()> {
        let key = (owner, path.to_path_buf());
        if self.entries.contains_key(&key) {
            return Err(Error::watch_conflict(path));
        }
        let last_write = backend.file_mtime(path).await?;
        self.entries.insert(key, WatcherState::File { last_write });
        Ok(())
    }

    pub async fn watch_dir(
        &mut self,
        backend: &dyn Backend,
        owner: NodeId,
        path: &Path,
    ) -> Result<()> {
        let key = (owner, path.to_path_buf());
        if self.entries.contains_key(&key) {
            return Err(Error::watch_conflict(path));
        }
        let last_write = backend.dir_mtime(path).await?;
        let files = backend.list_files(Some(path)).await?;
        let dirs = backend.list_dirs(Some(path)).await?;
        self.entries.insert(
            key,
            WatcherState::Dir {
                last_write,
                files,
                dirs,
            },
        );
        Ok(())
    }

    pub fn unwatch(&mut self, owner: NodeId, path: &Path) -> Result<()> {
        self.entries
            .remove(&(owner, path.to_path_buf()))
            .map(|_| ())
            .ok_or_else(|| Error::not_watched(path))
    }

    pub fn is_watching(&self, owner: NodeId, path: &Path) -> bool {
        self.entries.contains_key(&(owner, path.to_path_buf()))
    }

    /// Polls every watched entry once, in key order, updating the
    /// last-observed state and collecting changes. The sweep itself
    /// never mutates the tree; the caller reconciles.
    pub async fn sweep(&mut self, backend: &dyn Backend) -> Result<Vec<Change>> {
        let snapshot: Vec<((NodeId, PathBuf), WatcherState)> = self
            .entries
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        let mut changes = Vec::new();

        for ((owner, path), state) in snapshot {
            if !backend.exists(&path).await? {
                changes.push(Change::Removed {
                    owner,
                    path: path.clone(),
                });
                continue;
            }
            match state {
                WatcherState::File { last_write } => {
                    let latest = backend.file_mtime(&path).await?;
                    if latest > last_write {
                        self.entries.insert(
                            (owner, path.clone()),
                            WatcherState::File { last_write: latest },
                        );
                        changes.push(Change::FileModified {
                            owner,
                            path: path.clone(),
                        });
                    }
                }
                WatcherState::Dir {
                    last_write,
                    files,
                    dirs,
                } => {
                    let latest = backend.dir_mtime(&path).await?;
                    if latest <= last_write {
                        continue;
                    }
                    let new_files = backend.list_files(Some(&path)).await?;
                    let new_dirs = backend.list_dirs(Some(&path)).await?;
                    let added_files: Vec<PathBuf> = new_files
                        .iter()
                        .filter(|f| !files.contains(f))
                        .cloned()
                        .collect();
                    let added_dirs: Vec<PathBuf> = new_dirs
                        .iter()
                        .filter(|d| !dirs.contains(d))
                        .cloned()
                        .collect();
                    self.entries.insert(
                        (owner, path.clone()),
                        WatcherState::Dir {
                            last_write: latest,
                            files: new_files,
                            dirs: new_dirs,
                        },
                    );
                    if !added_files.is_empty() || !added_dirs.is_empty() {
                        changes.push(Change::DirAdded {
                            owner,
                            path: path.clone(),
                            files: added_files,
                            dirs: added_dirs,
                        });
                    }
                }
            }
        }
        Ok(changes)
    }
}
