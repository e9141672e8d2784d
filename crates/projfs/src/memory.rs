use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, SystemTime};

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::io::Backend;
use crate::path;

#[derive(Clone)]
enum MemEntry {
    File {
        content: Vec<u8>,
        mtime: SystemTime,
        ctime: SystemTime,
    },
    Dir {
        mtime: SystemTime,
        ctime: SystemTime,
    },
}

impl MemEntry {
    fn is_dir(&self) -> bool {
        matches!(self, MemEntry::Dir { .. })
    }

    fn mtime(&self) -> SystemTime {
        match self {
            MemEntry::File { mtime, .. } | MemEntry::Dir { mtime, .. } => *mtime,
        }
    }

    fn ctime(&self) -> SystemTime {
        match self {
            MemEntry::File { ctime, .. } | MemEntry::Dir { ctime, .. } => *ctime,
        }
    }
}

/// In-memory storage facade for tests.
///
/// Entries are keyed by logical path. A fake clock advances one second
/// per mutation so watcher timestamp comparisons are deterministic, and
/// every facade mutation is appended to an operation log that tests can
/// assert against (and that replaces mock call verification). The
/// `ext_*` helpers simulate another process touching the backing store:
/// they change entries and bump parent timestamps without going through
/// the facade contract.
pub struct MemoryBackend {
    root_name: String,
    state: Mutex<State>,
}

struct State {
    entries: BTreeMap<PathBuf, MemEntry>,
    virtuals: Vec<String>,
    clock: u64,
    ops: Vec<String>,
}

fn lock<'a>(m: &'a Mutex<State>) -> std::sync::MutexGuard<'a, State> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl State {
    fn tick(&mut self) -> SystemTime {
        self.clock += 1;
        SystemTime::UNIX_EPOCH + Duration::from_secs(self.clock)
    }

    fn bump_parent(&mut self, child: &Path) {
        let parent = path::dirname(child);
        let now = self.tick();
        if path::is_root(&parent) {
            // The root's own timestamp lives under its "." key.
            self.entries.insert(
                PathBuf::from(path::ROOT_PATH),
                MemEntry::Dir {
                    mtime: now,
                    ctime: SystemTime::UNIX_EPOCH,
                },
            );
            return;
        }
        if let Some(MemEntry::Dir { mtime, .. }) = self.entries.get_mut(&parent) {
            *mtime = now;
        }
    }

    fn insert_file(&mut self, path: &Path, content: &[u8]) {
        let now = self.tick();
        self.entries.insert(
            path.to_path_buf(),
            MemEntry::File {
                content: content.to_vec(),
                mtime: now,
                ctime: now,
            },
        );
        self.bump_parent(path);
    }

    fn insert_dir(&mut self, path: &Path) {
        let now = self.tick();
        self.entries.insert(
            path.to_path_buf(),
            MemEntry::Dir {
                mtime: now,
                ctime: now,
            },
        );
        self.bump_parent(path);
    }

    fn remove_subtree(&mut self, root: &Path) {
        self.entries
            .retain(|p, _| p != root && !p.starts_with(root));
        self.bump_parent(root);
    }

    fn children(&self, dir: Option<&Path>, want_dir: bool) -> Vec<PathBuf> {
        let logical_dir = dir.filter(|d| !path::is_root(d)).map(Path::to_path_buf);
        self.entries
            .iter()
            .filter(|(p, e)| {
                e.is_dir() == want_dir
                    && !path::is_root(p)
                    && path::dirname(p)
                        == logical_dir
                            .clone()
                            .unwrap_or_else(|| PathBuf::from(path::ROOT_PATH))
            })
            .map(|(p, _)| p.clone())
            .collect()
    }
}

impl MemoryBackend {
    pub fn new<S: AsRef<str>>(root_name: S) -> Self {
        let mut entries = BTreeMap::new();
        // The root directory always exists; its timestamp lives under
        // the "." key.
        entries.insert(
            PathBuf::from(path::ROOT_PATH),
            MemEntry::Dir {
                mtime: SystemTime::UNIX_EPOCH,
                ctime: SystemTime::UNIX_EPOCH,
            },
        );
        MemoryBackend {
            root_name: root_name.as_ref().to_string(),
            state: Mutex::new(State {
                entries,
                virtuals: Vec::new(),
                clock: 0,
                ops: Vec::new(),
            }),
        }
    }

    /// Pre-populates a directory without logging an operation.
    pub fn seed_dir<P: AsRef<Path>>(&self, path: P) {
        lock(&self.state).insert_dir(path.as_ref());
    }

    /// Pre-populates a file without logging an operation.
    pub fn seed_file<P: AsRef<Path>>(&self, path: P, content: &[u8]) {
        lock(&self.state).insert_file(path.as_ref(), content);
    }

    /// Simulates another process creating a file.
    pub fn ext_create_file<P: AsRef<Path>>(&self, path: P, content: &[u8]) {
        lock(&self.state).insert_file(path.as_ref(), content);
    }

    /// Simulates another process creating a directory.
    pub fn ext_create_dir<P: AsRef<Path>>(&self, path: P) {
        lock(&self.state).insert_dir(path.as_ref());
    }

    /// Simulates another process rewriting a file in place.
    pub fn ext_write<P: AsRef<Path>>(&self, path: P, content: &[u8]) {
        let mut state = lock(&self.state);
        let now = state.tick();
        if let Some(MemEntry::File { content: c, mtime, .. }) =
            state.entries.get_mut(path.as_ref())
        {
            *c = content.to_vec();
            *mtime = now;
        }
    }

    /// Simulates another process removing a file or directory tree.
    pub fn ext_remove<P: AsRef<Path>>(&self, path: P) {
        lock(&self.state).remove_subtree(path.as_ref());
    }

    /// Mutating facade calls observed so far, in order.
    pub fn ops(&self) -> Vec<String> {
        lock(&self.state).ops.clone()
    }

    pub fn clear_ops(&self) {
        lock(&self.state).ops.clear();
    }

    fn record(&self, op: String) {
        lock(&self.state).ops.push(op);
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    async fn move_entry(&self, old: &Path, new: &Path) -> Result<()> {
        path::check_path(old)?;
        path::check_path(new)?;
        self.record(format!("move:{}:{}", old.display(), new.display()));
        let mut state = lock(&self.state);
        let Some(entry) = state.entries.get(old).cloned() else {
            // Origin already moved; skip like the local backend.
            return Ok(());
        };
        let moved: Vec<(PathBuf, MemEntry)> = state
            .entries
            .iter()
            .filter(|(p, _)| p.starts_with(old) && *p != old)
            .map(|(p, e)| {
                let rebased = new.join(p.strip_prefix(old).unwrap_or(p.as_path()));
                (rebased, e.clone())
            })
            .collect();
        state.remove_subtree(old);
        state.entries.insert(new.to_path_buf(), entry);
        for (p, e) in moved {
            state.entries.insert(p, e);
        }
        state.bump_parent(new);
        Ok(())
    }

    async fn delete(&self, path: &Path) -> Result<()> {
        path::check_path(path)?;
        self.record(format!("delete:{}", path.display()));
        let mut state = lock(&self.state);
        if !state.entries.contains_key(path) {
            return Err(Error::not_found(path));
        }
        state.remove_subtree(path);
        Ok(())
    }

    async fn read_text(&self, path: &Path) -> Result<String> {
        let bytes = self.read_bytes(path).await?;
        String::from_utf8(bytes).map_err(|e| Error::Io(e.to_string()))
    }

    async fn read_bytes(&self, p: &Path) -> Result<Vec<u8>> {
        path::check_path(p)?;
        match lock(&self.state).entries.get(p) {
            Some(MemEntry::File { content, .. }) => Ok(content.clone()),
            Some(MemEntry::Dir { .. }) => Err(Error::not_a_file(p)),
            None => Err(Error::not_found(p)),
        }
    }

    async fn write_file(&self, path: &Path, content: &[u8]) -> Result<()> {
        path::check_path(path)?;
        self.record(format!("write:{}", path.display()));
        lock(&self.state).insert_file(path, content);
        Ok(())
    }

    async fn create_file(&self, path: &Path, content: &[u8]) -> Result<()> {
        path::check_path(path)?;
        self.record(format!("create_file:{}", path.display()));
        lock(&self.state).insert_file(path, content);
        Ok(())
    }

    async fn create_dir(&self, path: &Path) -> Result<()> {
        path::check_path(path)?;
        self.record(format!("create_dir:{}", path.display()));
        lock(&self.state).insert_dir(path);
        Ok(())
    }

    async fn list_files(&self, dir: Option<&Path>) -> Result<Vec<PathBuf>> {
        if let Some(d) = dir {
            path::check_path(d)?;
        }
        let mut files = lock(&self.state).children(dir, false);
        files.sort();
        Ok(files)
    }

    async fn list_dirs(&self, dir: Option<&Path>) -> Result<Vec<PathBuf>> {
        if let Some(d) = dir {
            path::check_path(d)?;
        }
        let state = lock(&self.state);
        let mut dirs = state.children(dir, true);
        if dir.is_none_or(path::is_root) {
            // Root order: creation time, lexical tiebreak.
            dirs.sort_by_key(|d| {
                (
                    state.entries.get(d).map(MemEntry::ctime),
                    d.clone(),
                )
            });
        } else {
            dirs.sort();
        }
        Ok(dirs)
    }

    async fn exists(&self, p: &Path) -> Result<bool> {
        path::check_path(p)?;
        Ok(lock(&self.state).entries.contains_key(p))
    }

    async fn file_mtime(&self, p: &Path) -> Result<SystemTime> {
        path::check_path(p)?;
        lock(&self.state)
            .entries
            .get(p)
            .map(MemEntry::mtime)
            .ok_or_else(|| Error::not_found(p))
    }

    async fn dir_mtime(&self, p: &Path) -> Result<SystemTime> {
        if path::is_root(p) {
            return Ok(lock(&self.state)
                .entries
                .get(Path::new(path::ROOT_PATH))
                .map(MemEntry::mtime)
                .unwrap_or(SystemTime::UNIX_EPOCH));
        }
        self.file_mtime(p).await
    }

    fn root_name(&self) -> String {
        self.root_name.clone()
    }

    async fn add_virtual_folder(&self, target: &Path) -> Result<()> {
        let name = path::basename(target)
            .ok_or_else(|| Error::virtual_folder_conflict(target.to_string_lossy()))?;
        self.record(format!("add_virtual_folder:{}", target.display()));
        let mut state = lock(&self.state);
        let top = PathBuf::from(&name);
        if state.virtuals.iter().any(|v| *v == name) {
            // Re-registration on reopen is fine.
            return Ok(());
        }
        if state.entries.contains_key(&top) {
            return Err(Error::virtual_folder_conflict(&name));
        }
        // Virtual folders surface as ordinary top-level directories; the
        // redirection itself has nothing to point at in memory.
        state.insert_dir(&top);
        state.virtuals.push(name);
        Ok(())
    }

    fn absolute_path(&self, p: &Path) -> Result<PathBuf> {
        path::check_path(p)?;
        Ok(PathBuf::from("/memory").join(&self.root_name).join(p))
    }

    fn open_in_system_browser(&self, p: &Path) -> Result<()> {
        path::check_path(p)?;
        self.record(format!("open:{}", p.display()));
        Ok(())
    }
}
