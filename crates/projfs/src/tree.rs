use std::path::{Path, PathBuf};
use std::sync::Arc;

use diagnostics::{log_debug, log_info};

use crate::error::{Error, Result};
use crate::events::{Hooks, Observer, PreviewAction, PreviewEvent, TreeEvent, Validator};
use crate::factory::NodeFactory;
use crate::io::Backend;
use crate::node::{FileState, Node, NodeId, NodeKind};
use crate::path;
use crate::watch::{Change, WatcherSet};

/// The project tree: an arena of nodes mirroring a region of the
/// storage backend.
///
/// Every mutation follows the same protocol: validators preview the
/// change and may veto it before any I/O; the backend call runs next;
/// the node (and, for folders, its whole subtree) is updated last, and
/// a committed event fires once the new state is in place. A backend
/// failure mid-mutation leaves partial state behind; callers recover
/// with [`Tree::refresh`].
///
/// The tree is single-owner: one caller context holds it and runs each
/// operation to completion. Handlers must not call back into the tree.
pub struct Tree {
    backend: Arc<dyn Backend>,
    factory: NodeFactory,
    hooks: Hooks,
    watchers: WatcherSet,
    nodes: Vec<Node>,
    root: NodeId,
}

impl Tree {
    /// Builds the tree for `backend`'s root and eagerly loads every
    /// directory under it.
    pub async fn open(backend: Arc<dyn Backend>, factory: NodeFactory) -> Result<Self> {
        let root = NodeId::new(0);
        let mut tree = Tree {
            backend,
            factory,
            hooks: Hooks::default(),
            watchers: WatcherSet::new(),
            nodes: Vec::new(),
            root,
        };
        let root_path = PathBuf::from(path::ROOT_PATH);
        tree.nodes.push(Node::new(
            root,
            root_path.clone(),
            tree.factory.classify_folder(),
        ));
        tree.watchers
            .watch_dir(tree.backend.as_ref(), root, &root_path)
            .await?;
        tree.populate(root).await?;
        Ok(tree)
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn backend(&self) -> &Arc<dyn Backend> {
        &self.backend
    }

    pub fn add_validator(&mut self, v: Validator) {
        self.hooks.add_validator(v);
    }

    pub fn add_observer(&mut self, o: Observer) {
        self.hooks.add_observer(o);
    }

    /// Immutable view of a node. Tombstones are still observable here;
    /// use the mutation API to get `NodeDeleted` errors.
    pub fn node(&self, id: NodeId) -> Result<&Node> {
        self.nodes
            .get(id.as_usize())
            .ok_or_else(|| Error::not_found(format!("node {id}")))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes
            .get_mut(id.as_usize())
            .ok_or_else(|| Error::not_found(format!("node {id}")))
    }

    /// Rejects operations on tombstoned nodes.
    fn live(&self, id: NodeId) -> Result<&Node> {
        let node = self.node(id)?;
        if node.deleted {
            return Err(Error::node_deleted(&node.path));
        }
        Ok(node)
    }

    /// Display name: last path segment, or the backend's root name.
    pub fn name(&self, id: NodeId) -> Result<String> {
        let node = self.node(id)?;
        if id == self.root {
            Ok(self.backend.root_name())
        } else {
            Ok(path::basename(&node.path).unwrap_or_default())
        }
    }

    /// Live node currently at `path`, if any.
    pub fn find_by_path<P: AsRef<Path>>(&self, path: P) -> Option<NodeId> {
        let path = path.as_ref();
        self.nodes
            .iter()
            .find(|n| !n.deleted && n.path == path)
            .map(|n| n.id)
    }

    pub fn absolute_path(&self, id: NodeId) -> Result<PathBuf> {
        let node = self.live(id)?;
        self.backend.absolute_path(&node.path)
    }

    pub fn open_in_system_browser(&self, id: NodeId) -> Result<()> {
        let node = self.live(id)?;
        self.backend.open_in_system_browser(&node.path)
    }

    // ---- structural edits ------------------------------------------------

    /// True when `id` is `ancestor` or lies underneath it.
    fn in_subtree(&self, id: NodeId, ancestor: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(c) = current {
            if c == ancestor {
                return true;
            }
            current = self.nodes[c.as_usize()].parent;
        }
        false
    }

    fn check_insertable(&self, folder: NodeId, child: NodeId) -> Result<()> {
        let folder_node = self.live(folder)?;
        let child_node = self.live(child)?;
        if folder_node.folder().is_none() {
            return Err(Error::not_a_folder(&folder_node.path));
        }
        if child == self.root || self.in_subtree(folder, child) {
            return Err(Error::recursive_folder(&child_node.path));
        }
        let child_name = path::basename(&child_node.path).unwrap_or_default();
        for &sibling in folder_node.children() {
            if sibling == child {
                continue;
            }
            let sibling_node = &self.nodes[sibling.as_usize()];
            if sibling_node.path == child_node.path {
                return Err(Error::duplicate_path(&child_node.path));
            }
            if path::basename(&sibling_node.path).unwrap_or_default() == child_name {
                return Err(Error::duplicate_name(child_name));
            }
        }
        Ok(())
    }

    /// Links an already-positioned child into a folder's child list.
    fn insert_child_at(&mut self, folder: NodeId, child: NodeId, index: Option<usize>) -> Result<()> {
        self.check_insertable(folder, child)?;
        let folder_state = self
            .node_mut(folder)?
            .folder_mut()
            .ok_or_else(|| Error::not_found(format!("node {folder}")))?;
        if !folder_state.children.contains(&child) {
            match index {
                Some(i) if i <= folder_state.children.len() => {
                    folder_state.children.insert(i, child)
                }
                _ => folder_state.children.push(child),
            }
        }
        self.node_mut(child)?.parent = Some(folder);
        Ok(())
    }

    /// Makes `child` a member of `folder`'s children.
    ///
    /// If the child's path does not already sit directly under the
    /// folder, attachment implies a real move: preview, backend move,
    /// cascading path rewrite, committed event — the explicit form of
    /// the original design's collection side effect.
    pub async fn attach_child(&mut self, folder: NodeId, child: NodeId) -> Result<()> {
        self.check_insertable(folder, child)?;
        let folder_path = self.live(folder)?.path.clone();
        let child_path = self.live(child)?.path.clone();
        if path::dirname(&child_path) == folder_path {
            if let Some(old_parent) = self.node(child)?.parent {
                if old_parent != folder {
                    let _ = self.detach_child(old_parent, child);
                }
            }
            self.insert_child_at(folder, child, None)
        } else {
            self.move_to(child, folder).await
        }
    }

    /// Unlinks `child` from `folder` without touching the backend.
    pub fn detach_child(&mut self, folder: NodeId, child: NodeId) -> Result<()> {
        let folder_state = self
            .node_mut(folder)?
            .folder_mut()
            .ok_or_else(|| Error::not_found(format!("node {folder}")))?;
        let before = folder_state.children.len();
        folder_state.children.retain(|&c| c != child);
        if folder_state.children.len() == before {
            return Err(Error::not_found(format!("node {child}")));
        }
        self.node_mut(child)?.parent = None;
        Ok(())
    }

    // ---- creation --------------------------------------------------------

    /// Creates a subdirectory on the backend and in the tree.
    ///
    /// Duplicate policy: creating a name that already exists as a child
    /// folder returns the existing node with zero backend calls.
    pub async fn create_sub_folder(&mut self, parent: NodeId, name: &str) -> Result<NodeId> {
        let parent_node = self.live(parent)?;
        if parent_node.folder().is_none() {
            return Err(Error::not_a_folder(&parent_node.path));
        }
        if !path::valid_name(name) {
            return Err(Error::invalid_rename(name));
        }
        if let Some(existing) = self.child_by_name(parent, name) {
            let existing_node = self.node(existing)?;
            if existing_node.is_folder() {
                return Ok(existing);
            }
            return Err(Error::duplicate_name(name));
        }
        let child_path = path::join(&self.node(parent)?.path, name);
        path::check_path(&child_path)?;
        self.backend.create_dir(&child_path).await?;
        log_info!("created folder {path}", path: child_path.display().to_string());
        let id = self.add_folder_node(parent, child_path, None).await?;
        self.populate(id).await?;
        Ok(id)
    }

    /// Creates a file on the backend and in the tree. Same duplicate
    /// policy as [`Tree::create_sub_folder`].
    pub async fn create_file(
        &mut self,
        parent: NodeId,
        name: &str,
        content: &[u8],
    ) -> Result<NodeId> {
        let parent_node = self.live(parent)?;
        if parent_node.folder().is_none() {
            return Err(Error::not_a_folder(&parent_node.path));
        }
        if !path::valid_name(name) {
            return Err(Error::invalid_rename(name));
        }
        if let Some(existing) = self.child_by_name(parent, name) {
            let existing_node = self.node(existing)?;
            if existing_node.is_file() {
                return Ok(existing);
            }
            return Err(Error::duplicate_name(name));
        }
        let child_path = path::join(&self.node(parent)?.path, name);
        path::check_path(&child_path)?;
        // Explicit creation always yields a node: the skip policy only
        // applies to enumeration.
        let kind = match self.factory.classify_file(&child_path)? {
            Some(kind) => kind,
            None => NodeKind::File(FileState::default()),
        };
        self.backend.create_file(&child_path, content).await?;
        log_info!("created file {path}", path: child_path.display().to_string());
        self.insert_node(parent, child_path, kind, None).await
    }

    fn child_by_name(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        let parent_node = self.nodes.get(parent.as_usize())?;
        parent_node
            .children()
            .iter()
            .find(|&&c| {
                let n = &self.nodes[c.as_usize()];
                path::basename(&n.path).as_deref() == Some(name)
            })
            .copied()
    }

    /// Allocates a node, registers its watcher, links it to `parent`.
    async fn insert_node(
        &mut self,
        parent: NodeId,
        node_path: PathBuf,
        kind: NodeKind,
        index: Option<usize>,
    ) -> Result<NodeId> {
        let id = NodeId::new(self.nodes.len());
        let is_folder = matches!(kind, NodeKind::Folder(_));
        self.nodes.push(Node::new(id, node_path.clone(), kind));
        if let Err(err) = self.insert_child_at(parent, id, index) {
            // Roll the allocation back so the arena holds no orphan.
            self.nodes.pop();
            return Err(err);
        }
        let watch = if is_folder {
            self.watchers
                .watch_dir(self.backend.as_ref(), id, &node_path)
                .await
        } else {
            self.watchers
                .watch_file(self.backend.as_ref(), id, &node_path)
                .await
        };
        if let Err(err) = watch {
            let _ = self.detach_child(parent, id);
            self.nodes.pop();
            return Err(err);
        }
        Ok(id)
    }

    async fn add_folder_node(
        &mut self,
        parent: NodeId,
        dir_path: PathBuf,
        index: Option<usize>,
    ) -> Result<NodeId> {
        let kind = self.factory.classify_folder();
        self.insert_node(parent, dir_path, kind, index).await
    }

    /// `Ok(None)` when the factory's skip policy leaves the file out.
    async fn add_file_node(&mut self, parent: NodeId, file_path: PathBuf) -> Result<Option<NodeId>> {
        let Some(kind) = self.factory.classify_file(&file_path)? else {
            return Ok(None);
        };
        Ok(Some(self.insert_node(parent, file_path, kind, None).await?))
    }

    /// Loads backend entries under `folder` (and any newly created
    /// subfolders, breadth-first). Entries already represented by a
    /// live child are left alone; per-entry failures are logged and
    /// skipped so one vanished file cannot abort the load.
    async fn populate(&mut self, folder: NodeId) -> Result<()> {
        let mut pending = vec![folder];
        while let Some(current) = pending.pop() {
            let dir_path = self.node(current)?.path.clone();
            let dirs = self.backend.list_dirs(Some(&dir_path)).await?;
            let files = self.backend.list_files(Some(&dir_path)).await?;
            for dir in dirs {
                if self.represented(current, &dir) {
                    continue;
                }
                match self.add_folder_node(current, dir.clone(), None).await {
                    Ok(id) => pending.push(id),
                    Err(err) => {
                        log_debug!("could not load {dir}: {cause}",
                            dir: dir.display().to_string(), cause: err.to_string());
                    }
                }
            }
            for file in files {
                if self.represented(current, &file) {
                    continue;
                }
                if let Err(err) = self.add_file_node(current, file.clone()).await {
                    log_debug!("could not load {file}: {cause}",
                        file: file.display().to_string(), cause: err.to_string());
                }
            }
        }
        Ok(())
    }

    fn represented(&self, folder: NodeId, entry: &Path) -> bool {
        self.nodes[folder.as_usize()]
            .children()
            .iter()
            .any(|&c| self.nodes[c.as_usize()].path == entry)
    }

    /// Re-reads the backend under a folder and adds anything new.
    /// Refresh never removes children; removals surface through the
    /// watcher sweep or explicit deletion.
    pub async fn refresh(&mut self, id: NodeId) -> Result<()> {
        let node = self.live(id)?;
        if node.folder().is_none() {
            return Err(Error::not_a_folder(&node.path));
        }
        self.populate(id).await?;
        self.hooks.notify(&TreeEvent::Refreshed { node: id });
        Ok(())
    }

    // ---- mutations -------------------------------------------------------

    /// Renames a node in place.
    ///
    /// Renaming to the current name is a no-op: no preview, no backend
    /// call, no committed event. Exactly one backend move is issued for
    /// the node itself; descendants are rewritten in memory only, since
    /// the backend moved them with their parent.
    pub async fn rename(&mut self, id: NodeId, new_name: &str) -> Result<()> {
        let node = self.live(id)?;
        if id == self.root {
            return Err(Error::invalid_rename(new_name));
        }
        if !path::valid_name(new_name) {
            return Err(Error::invalid_rename(new_name));
        }
        if let Some(file) = node.file() {
            check_extension(new_name, &file.extensions)?;
        }
        let old = node.path.clone();
        if path::basename(&old).as_deref() == Some(new_name) {
            return Ok(());
        }
        let new = path::join(&path::dirname(&old), new_name);
        if let Some(parent) = node.parent {
            if self.child_by_name(parent, new_name).is_some() {
                return Err(Error::duplicate_name(new_name));
            }
        }
        self.hooks.validate(&PreviewEvent {
            node: id,
            action: PreviewAction::Rename {
                old: old.clone(),
                new: new.clone(),
            },
        })?;
        self.relocate(id, &old, &new).await?;
        log_info!("renamed {old} -> {new}",
            old: old.display().to_string(), new: new.display().to_string());
        self.hooks.notify(&TreeEvent::Renamed { node: id, old, new });
        Ok(())
    }

    /// Moves a node into another folder of the tree. The destination
    /// path is the target folder's path joined with the node's name.
    pub async fn move_to(&mut self, id: NodeId, new_parent: NodeId) -> Result<()> {
        self.check_insertable(new_parent, id)?;
        let old = self.live(id)?.path.clone();
        let name = path::basename(&old).unwrap_or_default();
        let new = path::join(&self.node(new_parent)?.path, &name);
        if old == new && self.node(id)?.parent == Some(new_parent) {
            return Ok(());
        }
        self.hooks.validate(&PreviewEvent {
            node: id,
            action: PreviewAction::Move {
                old: old.clone(),
                new: new.clone(),
            },
        })?;
        let old_parent = self.node(id)?.parent;
        self.relocate(id, &old, &new).await?;
        if let Some(p) = old_parent {
            let _ = self.detach_child(p, id);
        }
        self.insert_child_at(new_parent, id, None)?;
        log_info!("moved {old} -> {new}",
            old: old.display().to_string(), new: new.display().to_string());
        self.hooks.notify(&TreeEvent::Moved { node: id, old, new });
        Ok(())
    }

    /// Path-addressed variant of [`Tree::move_to`]; the destination
    /// folder must exist in the tree.
    pub async fn move_to_path<P: AsRef<Path>>(&mut self, id: NodeId, parent_path: P) -> Result<()> {
        let parent_path = parent_path.as_ref();
        let parent = if path::is_root(parent_path) {
            self.root
        } else {
            self.find_by_path(parent_path)
                .ok_or_else(|| Error::not_found(parent_path))?
        };
        self.move_to(id, parent).await
    }

    /// Backend move plus bookkeeping shared by rename and move: rewatch
    /// the node, update its path, cascade through the subtree.
    async fn relocate(&mut self, id: NodeId, old: &Path, new: &Path) -> Result<()> {
        self.backend.move_entry(old, new).await?;
        let is_folder = self.node(id)?.is_folder();
        self.rewatch(id, old, new, is_folder).await?;
        self.node_mut(id)?.path = new.to_path_buf();
        self.rebase_descendants(id).await?;
        Ok(())
    }

    async fn rewatch(&mut self, id: NodeId, old: &Path, new: &Path, is_folder: bool) -> Result<()> {
        self.watchers.unwatch(id, old)?;
        if is_folder {
            self.watchers
                .watch_dir(self.backend.as_ref(), id, new)
                .await
        } else {
            self.watchers
                .watch_file(self.backend.as_ref(), id, new)
                .await
        }
    }

    /// Rewrites every descendant's path to follow its parent, keeping
    /// invariant `path == parent.path/name` true through the subtree.
    /// Memory and watcher state only; no backend calls.
    async fn rebase_descendants(&mut self, top: NodeId) -> Result<()> {
        let mut pending: Vec<NodeId> = self.node(top)?.children().to_vec();
        while let Some(id) = pending.pop() {
            let node = self.node(id)?;
            let Some(parent) = node.parent else { continue };
            let old = node.path.clone();
            let name = path::basename(&old).unwrap_or_default();
            let is_folder = node.is_folder();
            let new = path::join(&self.node(parent)?.path, &name);
            if new != old {
                self.rewatch(id, &old, &new, is_folder).await?;
                self.node_mut(id)?.path = new;
            }
            pending.extend_from_slice(self.node(id)?.children());
        }
        Ok(())
    }

    /// Deletes a node: preview, backend delete (recursive for folders),
    /// tombstone, detach from parent, committed event. Descendant nodes
    /// of a deleted folder are reaped by the next watcher sweep.
    pub async fn delete(&mut self, id: NodeId) -> Result<()> {
        let node = self.live(id)?;
        if node.is_dirty() {
            return Err(Error::unsaved_changes(&node.path));
        }
        let node_path = node.path.clone();
        self.hooks.validate(&PreviewEvent {
            node: id,
            action: PreviewAction::Delete,
        })?;
        self.backend.delete(&node_path).await?;
        self.watchers.unwatch(id, &node_path)?;
        self.node_mut(id)?.deleted = true;
        if let Some(parent) = self.node(id)?.parent {
            let _ = self.detach_child(parent, id);
        }
        log_info!("deleted {path}", path: node_path.display().to_string());
        self.hooks.notify(&TreeEvent::Deleted { node: id });
        Ok(())
    }

    // ---- file content ----------------------------------------------------

    pub async fn read_text(&self, id: NodeId) -> Result<String> {
        let node = self.live(id)?;
        if node.file().is_none() {
            return Err(Error::not_a_file(&node.path));
        }
        self.backend.read_text(&node.path).await
    }

    pub async fn read_bytes(&self, id: NodeId) -> Result<Vec<u8>> {
        let node = self.live(id)?;
        if node.file().is_none() {
            return Err(Error::not_a_file(&node.path));
        }
        self.backend.read_bytes(&node.path).await
    }

    /// Persists new content through the preview/commit protocol: old
    /// and new payloads are offered to validators, a veto aborts before
    /// any I/O, and the committed event carries both payloads.
    pub async fn write(&mut self, id: NodeId, content: &[u8]) -> Result<()> {
        let node = self.live(id)?;
        if node.file().is_none() {
            return Err(Error::not_a_file(&node.path));
        }
        let node_path = node.path.clone();
        let old = self.backend.read_bytes(&node_path).await?;
        self.hooks.validate(&PreviewEvent {
            node: id,
            action: PreviewAction::Modify {
                old: old.clone(),
                new: content.to_vec(),
            },
        })?;
        self.backend.write_file(&node_path, content).await?;
        self.hooks.notify(&TreeEvent::Modified {
            node: id,
            old,
            new: content.to_vec(),
        });
        Ok(())
    }

    /// The unsaved buffer, or the persisted text when clean.
    pub async fn dirty_text(&self, id: NodeId) -> Result<String> {
        let node = self.live(id)?;
        let file = node.file().ok_or_else(|| Error::not_a_file(&node.path))?;
        match &file.dirty_text {
            Some(text) => Ok(text.clone()),
            None => self.backend.read_text(&node.path).await,
        }
    }

    pub fn set_dirty_text(&mut self, id: NodeId, text: &str) -> Result<()> {
        let node = self.live(id)?;
        if node.file().is_none() {
            return Err(Error::not_a_file(&node.path));
        }
        if let Some(file) = self.node_mut(id)?.file_mut() {
            file.dirty_text = Some(text.to_string());
        }
        self.hooks.notify(&TreeEvent::DirtyChanged { node: id });
        Ok(())
    }

    /// Writes the dirty buffer to the backend; a clean file is a no-op.
    pub async fn save(&mut self, id: NodeId) -> Result<()> {
        let node = self.live(id)?;
        let file = node.file().ok_or_else(|| Error::not_a_file(&node.path))?;
        let Some(text) = file.dirty_text.clone() else {
            return Ok(());
        };
        let node_path = node.path.clone();
        self.backend.write_file(&node_path, text.as_bytes()).await?;
        if let Some(file) = self.node_mut(id)?.file_mut() {
            file.dirty_text = None;
        }
        self.hooks.notify(&TreeEvent::Saved { node: id });
        Ok(())
    }

    /// Discards the dirty buffer without saving.
    pub fn clean(&mut self, id: NodeId) -> Result<()> {
        let node = self.live(id)?;
        if node.file().is_none() {
            return Err(Error::not_a_file(&node.path));
        }
        if let Some(file) = self.node_mut(id)?.file_mut() {
            file.dirty_text = None;
        }
        self.hooks.notify(&TreeEvent::FileChanged { node: id });
        Ok(())
    }

    // ---- change detection ------------------------------------------------

    /// Inserts a root-level folder node for a freshly registered
    /// virtual folder name. `index` positions it among the root's
    /// children (virtual folders sit at the front).
    pub async fn add_virtual_root(&mut self, name: &str, index: usize) -> Result<NodeId> {
        if !path::valid_name(name) {
            return Err(Error::invalid_rename(name));
        }
        let id = self
            .add_folder_node(self.root, PathBuf::from(name), Some(index))
            .await?;
        self.populate(id).await?;
        Ok(id)
    }

    /// Runs every watcher once and reconciles what they saw: vanished
    /// entries tombstone their nodes, modified files raise
    /// `FileChanged`, new directory entries are constructed through the
    /// factory. Purely pull-based; nothing happens between calls.
    pub async fn poll(&mut self) -> Result<()> {
        let changes = self.watchers.sweep(self.backend.as_ref()).await?;
        log_debug!("watcher sweep found {count} changes", count: changes.len());
        for change in changes {
            match change {
                Change::Removed { owner, path } => {
                    self.watchers.unwatch(owner, &path)?;
                    if self.node(owner)?.deleted {
                        continue;
                    }
                    self.backend.invalidate(&path);
                    self.node_mut(owner)?.deleted = true;
                    if let Some(parent) = self.node(owner)?.parent {
                        let _ = self.detach_child(parent, owner);
                    }
                    self.hooks.notify(&TreeEvent::Deleted { node: owner });
                }
                Change::FileModified { owner, path } => {
                    self.backend.invalidate(&path);
                    if !self.node(owner)?.deleted {
                        self.hooks.notify(&TreeEvent::FileChanged { node: owner });
                    }
                }
                Change::DirAdded {
                    owner,
                    files,
                    dirs,
                    ..
                } => {
                    if self.node(owner)?.deleted {
                        continue;
                    }
                    for dir in dirs {
                        if self.represented(owner, &dir) {
                            continue;
                        }
                        match self.add_folder_node(owner, dir.clone(), None).await {
                            Ok(id) => self.populate(id).await?,
                            Err(err) => {
                                log_debug!("could not adopt {dir}: {cause}",
                                    dir: dir.display().to_string(), cause: err.to_string());
                            }
                        }
                    }
                    for file in files {
                        if self.represented(owner, &file) {
                            continue;
                        }
                        if let Err(err) = self.add_file_node(owner, file.clone()).await {
                            log_debug!("could not adopt {file}: {cause}",
                                file: file.display().to_string(), cause: err.to_string());
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

/// Provider-typed files must keep an acceptable extension through a
/// rename, and a bare extension is not a name.
fn check_extension(new_name: &str, extensions: &[String]) -> Result<()> {
    if extensions.is_empty() {
        return Ok(());
    }
    match extensions.iter().find(|ext| new_name.ends_with(ext.as_str())) {
        Some(ext) if new_name == ext.as_str() => Err(Error::invalid_rename(new_name)),
        Some(_) => Ok(()),
        None => Err(Error::invalid_rename(new_name)),
    }
}

impl std::fmt::Debug for Tree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tree{{nodes: {}}}", self.nodes.len())
    }
}
