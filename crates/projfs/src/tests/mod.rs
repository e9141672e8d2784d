mod folder;

use std::sync::{Arc, Mutex};

use crate::events::TreeEvent;
use crate::factory::NodeFactory;
use crate::memory::MemoryBackend;
use crate::tree::Tree;

pub(crate) async fn open_tree(backend: &Arc<MemoryBackend>) -> Tree {
    Tree::open(backend.clone(), NodeFactory::new())
        .await
        .expect("open tree")
}

/// Collects every committed event the tree fires.
pub(crate) fn record_events(tree: &mut Tree) -> Arc<Mutex<Vec<TreeEvent>>> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    tree.add_observer(Box::new(move |e| {
        sink.lock().expect("event sink").push(e.clone());
    }));
    events
}

pub(crate) fn taken(events: &Arc<Mutex<Vec<TreeEvent>>>) -> Vec<TreeEvent> {
    std::mem::take(&mut *events.lock().expect("event sink"))
}
