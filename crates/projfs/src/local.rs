use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::SystemTime;

use async_trait::async_trait;
use diagnostics::log_debug;

use crate::error::{Error, Result};
use crate::io::Backend;
use crate::path;

/// One registered virtual folder: a top-level name redirected to a
/// directory outside the project root.
struct VirtualFolder {
    name: String,
    target: PathBuf,
    registered: SystemTime,
}

/// Storage facade over a real directory.
///
/// Caches are interior-mutable behind plain mutexes: the tree is owned
/// by one caller context at a time, so there is never lock contention.
pub struct LocalBackend {
    base: PathBuf,
    virtual_folders: Mutex<Vec<VirtualFolder>>,
    text_cache: Mutex<HashMap<PathBuf, String>>,
}

fn lock<'a, T>(m: &'a Mutex<T>) -> std::sync::MutexGuard<'a, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl LocalBackend {
    /// `base` is the project root directory on disk.
    pub fn new<P: AsRef<Path>>(base: P) -> Self {
        LocalBackend {
            base: base.as_ref().to_path_buf(),
            virtual_folders: Mutex::new(Vec::new()),
            text_cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Applies virtual-folder redirection, then anchors under the base
    /// directory. The logical root resolves to the base itself.
    fn resolve(&self, logical: &Path) -> PathBuf {
        if path::is_root(logical) {
            return self.base.clone();
        }
        if let Some((first, rest)) = path::split_first(logical) {
            let folders = lock(&self.virtual_folders);
            if let Some(vf) = folders.iter().find(|vf| vf.name == first) {
                return if rest.as_os_str().is_empty() {
                    vf.target.clone()
                } else {
                    vf.target.join(rest)
                };
            }
        }
        self.base.join(logical)
    }

    /// Entries of `dir` matching `want_dir`, as logical paths.
    fn list_entries(&self, dir: Option<&Path>, want_dir: bool) -> Result<Vec<PathBuf>> {
        let logical_dir = dir.filter(|d| !path::is_root(d));
        if let Some(d) = logical_dir {
            path::check_path(d)?;
        }
        let actual = match logical_dir {
            Some(d) => self.resolve(d),
            None => self.base.clone(),
        };

        let mut entries = Vec::new();
        let read = match std::fs::read_dir(&actual) {
            Ok(read) => read,
            Err(err) => {
                log_debug!("unable to list directory: {cause}", cause: err.to_string());
                return Ok(entries);
            }
        };
        for entry in read {
            let entry = entry?;
            if entry.file_type()?.is_dir() != want_dir {
                continue;
            }
            let name = entry.file_name().to_string_lossy().to_string();
            entries.push(match logical_dir {
                Some(d) => d.join(name),
                None => PathBuf::from(name),
            });
        }
        entries.sort();
        Ok(entries)
    }

    fn ctime_of(&self, actual: &Path) -> SystemTime {
        std::fs::metadata(actual)
            .and_then(|m| m.created().or_else(|_| m.modified()))
            .unwrap_or(SystemTime::UNIX_EPOCH)
    }

    /// Evicts `logical` and every cached file beneath it. Folder moves
    /// and deletes invalidate whole subtrees at once.
    fn prune_cache(&self, logical: &Path) {
        lock(&self.text_cache).retain(|k, _| !k.starts_with(logical));
    }

    fn top_level_names(&self) -> Result<Vec<String>> {
        let dirs = self.list_entries(None, true)?;
        let mut names: Vec<String> = dirs
            .iter()
            .filter_map(|d| path::basename(d))
            .collect();
        names.extend(lock(&self.virtual_folders).iter().map(|vf| vf.name.clone()));
        Ok(names)
    }
}

#[async_trait]
impl Backend for LocalBackend {
    async fn move_entry(&self, old: &Path, new: &Path) -> Result<()> {
        path::check_path(old)?;
        path::check_path(new)?;
        let actual_old = self.resolve(old);
        let actual_new = self.resolve(new);
        // Skip when the origin is gone: it usually moved already as part
        // of a parent directory rename.
        if actual_old.exists() {
            tokio::fs::rename(&actual_old, &actual_new).await?;
        }
        self.prune_cache(old);
        Ok(())
    }

    async fn delete(&self, path: &Path) -> Result<()> {
        path::check_path(path)?;
        let actual = self.resolve(path);
        if actual.is_dir() {
            tokio::fs::remove_dir_all(&actual).await?;
        } else {
            tokio::fs::remove_file(&actual).await?;
        }
        self.prune_cache(path);
        Ok(())
    }

    async fn read_text(&self, path: &Path) -> Result<String> {
        path::check_path(path)?;
        if let Some(text) = lock(&self.text_cache).get(path) {
            return Ok(text.clone());
        }
        let text = tokio::fs::read_to_string(self.resolve(path)).await?;
        lock(&self.text_cache).insert(path.to_path_buf(), text.clone());
        Ok(text)
    }

    async fn read_bytes(&self, path: &Path) -> Result<Vec<u8>> {
        path::check_path(path)?;
        Ok(tokio::fs::read(self.resolve(path)).await?)
    }

    async fn write_file(&self, path: &Path, content: &[u8]) -> Result<()> {
        path::check_path(path)?;
        tokio::fs::write(self.resolve(path), content).await?;
        lock(&self.text_cache).remove(path);
        Ok(())
    }

    async fn create_file(&self, path: &Path, content: &[u8]) -> Result<()> {
        self.write_file(path, content).await
    }

    async fn create_dir(&self, path: &Path) -> Result<()> {
        path::check_path(path)?;
        tokio::fs::create_dir_all(self.resolve(path)).await?;
        Ok(())
    }

    async fn list_files(&self, dir: Option<&Path>) -> Result<Vec<PathBuf>> {
        self.list_entries(dir, false)
    }

    async fn list_dirs(&self, dir: Option<&Path>) -> Result<Vec<PathBuf>> {
        let mut dirs = self.list_entries(dir, true)?;
        let at_root = dir.is_none_or(path::is_root);
        if !at_root {
            return Ok(dirs);
        }
        // Root listings mix real entries with registered virtual
        // folders, ordered by creation/registration time.
        let mut keyed: Vec<(SystemTime, PathBuf)> = dirs
            .drain(..)
            .map(|d| (self.ctime_of(&self.base.join(&d)), d))
            .collect();
        keyed.extend(
            lock(&self.virtual_folders)
                .iter()
                .map(|vf| (vf.registered, PathBuf::from(&vf.name))),
        );
        keyed.sort();
        Ok(keyed.into_iter().map(|(_, d)| d).collect())
    }

    async fn exists(&self, path: &Path) -> Result<bool> {
        path::check_path(path)?;
        Ok(self.resolve(path).exists())
    }

    async fn file_mtime(&self, path: &Path) -> Result<SystemTime> {
        path::check_path(path)?;
        Ok(std::fs::metadata(self.resolve(path))?.modified()?)
    }

    async fn dir_mtime(&self, path: &Path) -> Result<SystemTime> {
        self.file_mtime(path).await
    }

    fn root_name(&self) -> String {
        path::basename(&self.base).unwrap_or_default()
    }

    async fn add_virtual_folder(&self, target: &Path) -> Result<()> {
        let target = if target.is_absolute() {
            target.to_path_buf()
        } else {
            self.base.join(target)
        };
        let name = path::basename(&target)
            .ok_or_else(|| Error::virtual_folder_conflict(target.to_string_lossy()))?;
        if self.top_level_names()?.contains(&name) {
            return Err(Error::virtual_folder_conflict(&name));
        }
        log_debug!("registered virtual folder {name}", name: name.clone());
        lock(&self.virtual_folders).push(VirtualFolder {
            name,
            target,
            registered: SystemTime::now(),
        });
        Ok(())
    }

    fn invalidate(&self, path: &Path) {
        lock(&self.text_cache).remove(path);
    }

    fn absolute_path(&self, path: &Path) -> Result<PathBuf> {
        path::check_path(path)?;
        Ok(self.resolve(path))
    }

    fn open_in_system_browser(&self, path: &Path) -> Result<()> {
        path::check_path(path)?;
        let actual = self.resolve(path);
        #[cfg(target_os = "macos")]
        let program = "open";
        #[cfg(target_os = "windows")]
        let program = "explorer";
        #[cfg(not(any(target_os = "macos", target_os = "windows")))]
        let program = "xdg-open";
        std::process::Command::new(program).arg(&actual).spawn()?;
        Ok(())
    }
}
