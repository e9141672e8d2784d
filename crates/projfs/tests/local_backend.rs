use std::path::Path;
use std::sync::Arc;

use projfs::{Backend, Error, LocalBackend, NodeFactory, Tree};

fn scratch() -> tempfile::TempDir {
    tempfile::tempdir().expect("tempdir")
}

async fn open_tree(base: &Path) -> Tree {
    let backend: Arc<dyn Backend> = Arc::new(LocalBackend::new(base));
    Tree::open(backend, NodeFactory::new()).await.expect("open tree")
}

#[tokio::test]
async fn tree_mirrors_a_real_directory() {
    let dir = scratch();
    std::fs::create_dir(dir.path().join("src")).unwrap();
    std::fs::write(dir.path().join("src/main.rs"), "fn main() {}").unwrap();
    std::fs::write(dir.path().join("README.md"), "# hi").unwrap();

    let tree = open_tree(dir.path()).await;
    let src = tree.find_by_path("src").expect("src");
    let main = tree.find_by_path("src/main.rs").expect("main.rs");

    assert!(tree.node(src).unwrap().is_folder());
    assert_eq!(tree.node(main).unwrap().parent(), Some(src));
    assert_eq!(tree.read_text(main).await.unwrap(), "fn main() {}");
    assert!(tree.find_by_path("README.md").is_some());
}

#[tokio::test]
async fn mutations_reach_the_disk() {
    let dir = scratch();
    std::fs::create_dir(dir.path().join("src")).unwrap();
    std::fs::write(dir.path().join("src/lib.rs"), "").unwrap();

    let mut tree = open_tree(dir.path()).await;
    let src = tree.find_by_path("src").unwrap();
    let lib = tree.find_by_path("src/lib.rs").unwrap();

    tree.create_sub_folder(src, "bin").await.unwrap();
    assert!(dir.path().join("src/bin").is_dir());

    tree.rename(lib, "lib2.rs").await.unwrap();
    assert!(!dir.path().join("src/lib.rs").exists());
    assert!(dir.path().join("src/lib2.rs").is_file());

    tree.rename(src, "code").await.unwrap();
    assert!(dir.path().join("code/lib2.rs").is_file());
    assert_eq!(tree.node(lib).unwrap().path(), Path::new("code/lib2.rs"));

    tree.delete(lib).await.unwrap();
    assert!(!dir.path().join("code/lib2.rs").exists());
}

#[tokio::test]
async fn virtual_folders_redirect_to_their_target() {
    let dir = scratch();
    let elsewhere = scratch();
    let target = elsewhere.path().join("shared");
    std::fs::create_dir(&target).unwrap();
    std::fs::write(target.join("common.txt"), "shared text").unwrap();

    let backend: Arc<dyn Backend> = Arc::new(LocalBackend::new(dir.path()));
    backend.add_virtual_folder(&target).await.unwrap();
    let mut tree = Tree::open(backend, NodeFactory::new()).await.unwrap();

    // The target surfaces under its own name even though the base
    // directory has no such entry.
    let shared = match tree.find_by_path("shared") {
        Some(id) => id,
        None => tree.add_virtual_root("shared", 0).await.unwrap(),
    };
    tree.refresh(shared).await.unwrap();
    let common = tree.find_by_path("shared/common.txt").expect("redirected file");
    assert_eq!(tree.read_text(common).await.unwrap(), "shared text");
    assert!(!dir.path().join("shared").exists());
}

#[tokio::test]
async fn escaping_paths_are_rejected() {
    let dir = scratch();
    let backend = LocalBackend::new(dir.path());

    assert_eq!(
        backend.read_bytes(Path::new("../escape")).await,
        Err(Error::path_security("../escape"))
    );
    assert_eq!(
        backend.delete(Path::new("/etc/passwd")).await,
        Err(Error::path_security("/etc/passwd"))
    );
}

#[tokio::test]
async fn write_refreshes_the_text_cache() {
    let dir = scratch();
    std::fs::write(dir.path().join("a.txt"), "one").unwrap();
    let backend = LocalBackend::new(dir.path());

    assert_eq!(backend.read_text(Path::new("a.txt")).await.unwrap(), "one");
    backend.write_file(Path::new("a.txt"), b"two").await.unwrap();
    assert_eq!(backend.read_text(Path::new("a.txt")).await.unwrap(), "two");

    // External edits need an explicit invalidation.
    std::fs::write(dir.path().join("a.txt"), "three").unwrap();
    assert_eq!(backend.read_text(Path::new("a.txt")).await.unwrap(), "two");
    backend.invalidate(Path::new("a.txt"));
    assert_eq!(backend.read_text(Path::new("a.txt")).await.unwrap(), "three");
}

#[tokio::test]
async fn folder_moves_evict_cached_file_text() {
    let dir = scratch();
    std::fs::create_dir(dir.path().join("docs")).unwrap();
    std::fs::write(dir.path().join("docs/a.txt"), "old").unwrap();
    let backend = LocalBackend::new(dir.path());

    assert_eq!(backend.read_text(Path::new("docs/a.txt")).await.unwrap(), "old");

    backend
        .move_entry(Path::new("docs"), Path::new("notes"))
        .await
        .unwrap();
    std::fs::write(dir.path().join("notes/a.txt"), "new").unwrap();

    // A file recreated at the moved-away path must not resurrect the
    // cached copy of the original.
    std::fs::create_dir(dir.path().join("docs")).unwrap();
    std::fs::write(dir.path().join("docs/a.txt"), "fresh").unwrap();
    assert_eq!(backend.read_text(Path::new("docs/a.txt")).await.unwrap(), "fresh");
    assert_eq!(backend.read_text(Path::new("notes/a.txt")).await.unwrap(), "new");

    backend.delete(Path::new("notes")).await.unwrap();
    std::fs::create_dir(dir.path().join("notes")).unwrap();
    std::fs::write(dir.path().join("notes/a.txt"), "after").unwrap();
    assert_eq!(backend.read_text(Path::new("notes/a.txt")).await.unwrap(), "after");
}
