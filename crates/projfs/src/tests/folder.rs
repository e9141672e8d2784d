use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::{open_tree, record_events, taken};
use crate::error::Error;
use crate::events::{TreeEvent, Verdict};
use crate::memory::MemoryBackend;

fn seeded_backend() -> Arc<MemoryBackend> {
    let backend = Arc::new(MemoryBackend::new("proj"));
    backend.seed_dir("Bob");
    backend.seed_dir("Bob/Foo");
    backend.seed_file("Bob/Foo/C1.txt", b"one");
    backend.seed_file("Bob/Foo/C2.txt", b"two");
    backend.seed_dir("Baz");
    backend
}

#[tokio::test]
async fn open_mirrors_seeded_entries() {
    let backend = seeded_backend();
    let tree = open_tree(&backend).await;

    let root = tree.root();
    assert_eq!(tree.name(root).unwrap(), "proj");
    assert_eq!(tree.node(root).unwrap().path(), Path::new("."));

    let bob = tree.find_by_path("Bob").expect("Bob");
    let foo = tree.find_by_path("Bob/Foo").expect("Foo");
    let c1 = tree.find_by_path("Bob/Foo/C1.txt").expect("C1");

    assert_eq!(tree.node(bob).unwrap().parent(), Some(root));
    assert_eq!(tree.node(foo).unwrap().parent(), Some(bob));
    assert_eq!(tree.node(c1).unwrap().parent(), Some(foo));
    assert!(tree.node(foo).unwrap().is_folder());
    assert!(tree.node(c1).unwrap().is_file());

    // Every node's path is its parent's path joined with its name.
    for &child in tree.node(foo).unwrap().children() {
        let node = tree.node(child).unwrap();
        let name = node.path().file_name().unwrap();
        assert_eq!(node.path(), Path::new("Bob/Foo").join(name));
    }
}

#[tokio::test]
async fn create_sub_folder_hits_backend_once() {
    let backend = seeded_backend();
    let mut tree = open_tree(&backend).await;
    let bob = tree.find_by_path("Bob").unwrap();

    backend.clear_ops();
    let hat = tree.create_sub_folder(bob, "Hat").await.unwrap();
    assert_eq!(tree.node(hat).unwrap().path(), Path::new("Bob/Hat"));
    assert_eq!(tree.node(hat).unwrap().parent(), Some(bob));
    assert_eq!(backend.ops(), vec!["create_dir:Bob/Hat".to_string()]);

    // Creating the same folder again returns the existing node and
    // issues no further backend calls.
    backend.clear_ops();
    let again = tree.create_sub_folder(bob, "Hat").await.unwrap();
    assert_eq!(again, hat);
    assert!(backend.ops().is_empty());
}

#[tokio::test]
async fn create_rejects_kind_clash_and_bad_names() {
    let backend = seeded_backend();
    let mut tree = open_tree(&backend).await;
    let bob = tree.find_by_path("Bob").unwrap();
    let foo = tree.find_by_path("Bob/Foo").unwrap();

    assert_eq!(
        tree.create_file(bob, "Foo", b"").await,
        Err(Error::duplicate_name("Foo"))
    );
    assert_eq!(
        tree.create_sub_folder(foo, "C1.txt").await,
        Err(Error::duplicate_name("C1.txt"))
    );
    assert_eq!(
        tree.create_sub_folder(bob, "  ").await,
        Err(Error::invalid_rename("  "))
    );
    assert_eq!(
        tree.create_sub_folder(bob, "a/b").await,
        Err(Error::invalid_rename("a/b"))
    );
    assert_eq!(
        tree.create_sub_folder(bob, "..").await,
        Err(Error::invalid_rename(".."))
    );
}

#[tokio::test]
async fn dot_is_not_a_name() {
    // "Bob/." resolves to "Bob" itself; accepting it would leave two
    // live nodes at one path.
    let backend = seeded_backend();
    let mut tree = open_tree(&backend).await;
    let bob = tree.find_by_path("Bob").unwrap();

    assert_eq!(
        tree.create_sub_folder(bob, ".").await,
        Err(Error::invalid_rename("."))
    );
    assert_eq!(
        tree.create_file(bob, ".", b"").await,
        Err(Error::invalid_rename("."))
    );
    let foo = tree.find_by_path("Bob/Foo").unwrap();
    assert_eq!(tree.rename(foo, ".").await, Err(Error::invalid_rename(".")));
    assert!(tree.find_by_path("Bob/.").is_none());
    assert!(backend.ops().is_empty());
}

#[tokio::test]
async fn rename_issues_one_backend_move_and_cascades() {
    let backend = seeded_backend();
    let mut tree = open_tree(&backend).await;
    let foo = tree.find_by_path("Bob/Foo").unwrap();

    backend.clear_ops();
    tree.rename(foo, "Hat").await.unwrap();

    // One move for the folder; children follow in memory only.
    assert_eq!(backend.ops(), vec!["move:Bob/Foo:Bob/Hat".to_string()]);
    assert_eq!(tree.node(foo).unwrap().path(), Path::new("Bob/Hat"));
    assert!(tree.find_by_path("Bob/Foo").is_none());
    assert!(tree.find_by_path("Bob/Hat/C1.txt").is_some());
    assert!(tree.find_by_path("Bob/Hat/C2.txt").is_some());
}

#[tokio::test]
async fn rename_to_same_name_is_a_noop() {
    let backend = seeded_backend();
    let mut tree = open_tree(&backend).await;
    let events = record_events(&mut tree);
    let foo = tree.find_by_path("Bob/Foo").unwrap();

    backend.clear_ops();
    tree.rename(foo, "Foo").await.unwrap();

    assert!(backend.ops().is_empty());
    assert!(taken(&events).is_empty());
    assert_eq!(tree.node(foo).unwrap().path(), Path::new("Bob/Foo"));
}

#[tokio::test]
async fn rename_validation() {
    let backend = seeded_backend();
    let mut tree = open_tree(&backend).await;
    let root = tree.root();
    let foo = tree.find_by_path("Bob/Foo").unwrap();
    let c1 = tree.find_by_path("Bob/Foo/C1.txt").unwrap();

    assert_eq!(tree.rename(root, "other").await, Err(Error::invalid_rename("other")));
    assert_eq!(tree.rename(foo, "").await, Err(Error::invalid_rename("")));
    assert_eq!(
        tree.rename(c1, "C2.txt").await,
        Err(Error::duplicate_name("C2.txt"))
    );
}

#[tokio::test]
async fn veto_aborts_before_any_backend_call() {
    let backend = seeded_backend();
    let mut tree = open_tree(&backend).await;
    let events = record_events(&mut tree);
    tree.add_validator(Box::new(|_| Verdict::Veto("locked".to_string())));
    let foo = tree.find_by_path("Bob/Foo").unwrap();

    backend.clear_ops();
    assert_eq!(
        tree.rename(foo, "Hat").await,
        Err(Error::Vetoed("locked".to_string()))
    );
    assert_eq!(tree.delete(foo).await, Err(Error::Vetoed("locked".to_string())));

    // The veto reason surfaces verbatim and nothing was touched.
    assert!(backend.ops().is_empty());
    assert!(taken(&events).is_empty());
    assert_eq!(tree.node(foo).unwrap().path(), Path::new("Bob/Foo"));
    assert!(!tree.node(foo).unwrap().is_deleted());
}

#[tokio::test]
async fn move_to_cascades_descendant_paths() {
    let backend = seeded_backend();
    let mut tree = open_tree(&backend).await;
    let events = record_events(&mut tree);
    let foo = tree.find_by_path("Bob/Foo").unwrap();
    let bob = tree.find_by_path("Bob").unwrap();
    let baz = tree.find_by_path("Baz").unwrap();

    backend.clear_ops();
    tree.move_to(foo, baz).await.unwrap();

    assert_eq!(backend.ops(), vec!["move:Bob/Foo:Baz/Foo".to_string()]);
    assert_eq!(tree.node(foo).unwrap().path(), Path::new("Baz/Foo"));
    assert_eq!(tree.node(foo).unwrap().parent(), Some(baz));
    assert!(tree.node(bob).unwrap().children().iter().all(|&c| c != foo));
    assert!(tree.node(baz).unwrap().children().contains(&foo));
    assert!(tree.find_by_path("Baz/Foo/C1.txt").is_some());
    assert!(tree.find_by_path("Baz/Foo/C2.txt").is_some());
    assert_eq!(
        taken(&events),
        vec![TreeEvent::Moved {
            node: foo,
            old: PathBuf::from("Bob/Foo"),
            new: PathBuf::from("Baz/Foo"),
        }]
    );
}

#[tokio::test]
async fn move_cannot_create_cycles() {
    let backend = seeded_backend();
    let mut tree = open_tree(&backend).await;
    let root = tree.root();
    let bob = tree.find_by_path("Bob").unwrap();
    let foo = tree.find_by_path("Bob/Foo").unwrap();

    assert_eq!(
        tree.move_to(bob, foo).await,
        Err(Error::recursive_folder("Bob"))
    );
    assert_eq!(
        tree.move_to(root, bob).await,
        Err(Error::recursive_folder("."))
    );
}

#[tokio::test]
async fn move_to_path_resolves_the_destination() {
    let backend = seeded_backend();
    let mut tree = open_tree(&backend).await;
    let c1 = tree.find_by_path("Bob/Foo/C1.txt").unwrap();

    tree.move_to_path(c1, "Baz").await.unwrap();
    assert_eq!(tree.node(c1).unwrap().path(), Path::new("Baz/C1.txt"));

    tree.move_to_path(c1, ".").await.unwrap();
    assert_eq!(tree.node(c1).unwrap().path(), Path::new("C1.txt"));

    assert_eq!(
        tree.move_to_path(c1, "NoSuch").await,
        Err(Error::not_found("NoSuch"))
    );
}

#[tokio::test]
async fn delete_tombstones_and_detaches() {
    let backend = seeded_backend();
    let mut tree = open_tree(&backend).await;
    let events = record_events(&mut tree);
    let foo = tree.find_by_path("Bob/Foo").unwrap();
    let c1 = tree.find_by_path("Bob/Foo/C1.txt").unwrap();

    backend.clear_ops();
    tree.delete(c1).await.unwrap();

    assert_eq!(backend.ops(), vec!["delete:Bob/Foo/C1.txt".to_string()]);
    assert!(tree.node(c1).unwrap().is_deleted());
    assert!(tree.node(foo).unwrap().children().iter().all(|&c| c != c1));
    assert!(tree.find_by_path("Bob/Foo/C1.txt").is_none());
    assert_eq!(taken(&events), vec![TreeEvent::Deleted { node: c1 }]);

    // Tombstoned nodes reject further operations.
    assert_eq!(
        tree.rename(c1, "x.txt").await,
        Err(Error::node_deleted("Bob/Foo/C1.txt"))
    );
    assert_eq!(
        tree.delete(c1).await,
        Err(Error::node_deleted("Bob/Foo/C1.txt"))
    );
}

#[tokio::test]
async fn attach_child_implies_a_move_across_folders() {
    let backend = seeded_backend();
    let mut tree = open_tree(&backend).await;
    let events = record_events(&mut tree);
    let baz = tree.find_by_path("Baz").unwrap();
    let c1 = tree.find_by_path("Bob/Foo/C1.txt").unwrap();

    backend.clear_ops();
    tree.attach_child(baz, c1).await.unwrap();

    assert_eq!(backend.ops(), vec!["move:Bob/Foo/C1.txt:Baz/C1.txt".to_string()]);
    assert_eq!(tree.node(c1).unwrap().path(), Path::new("Baz/C1.txt"));
    assert_eq!(tree.node(c1).unwrap().parent(), Some(baz));
    assert_eq!(
        taken(&events),
        vec![TreeEvent::Moved {
            node: c1,
            old: PathBuf::from("Bob/Foo/C1.txt"),
            new: PathBuf::from("Baz/C1.txt"),
        }]
    );
}

#[tokio::test]
async fn detach_is_memory_only_and_reattach_restores() {
    let backend = seeded_backend();
    let mut tree = open_tree(&backend).await;
    let foo = tree.find_by_path("Bob/Foo").unwrap();
    let c1 = tree.find_by_path("Bob/Foo/C1.txt").unwrap();

    backend.clear_ops();
    tree.detach_child(foo, c1).unwrap();
    assert!(backend.ops().is_empty());
    assert_eq!(tree.node(c1).unwrap().parent(), None);

    // The path still sits under Foo, so reattaching is not a move.
    tree.attach_child(foo, c1).await.unwrap();
    assert!(backend.ops().is_empty());
    assert_eq!(tree.node(c1).unwrap().parent(), Some(foo));
}

#[tokio::test]
async fn refresh_adds_but_never_removes() {
    let backend = seeded_backend();
    let mut tree = open_tree(&backend).await;
    let events = record_events(&mut tree);
    let foo = tree.find_by_path("Bob/Foo").unwrap();

    backend.ext_create_file("Bob/Foo/C3.txt", b"three");
    backend.ext_remove("Bob/Foo/C1.txt");
    tree.refresh(foo).await.unwrap();

    assert!(tree.find_by_path("Bob/Foo/C3.txt").is_some());
    // The vanished entry stays until a watcher sweep reaps it.
    let c1 = tree.find_by_path("Bob/Foo/C1.txt").expect("C1 still present");
    assert!(!tree.node(c1).unwrap().is_deleted());
    assert_eq!(taken(&events), vec![TreeEvent::Refreshed { node: foo }]);
}
