use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use projfs::TreeEvent;

use crate::common::open_project;

/// Sweep the watchers once and report what changed on disk since the
/// project was opened.
pub async fn check_command(root: &Path) -> Result<()> {
    let mut project = open_project(root).await?;

    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    project.tree_mut().add_observer(Box::new(move |e| {
        if let Ok(mut events) = sink.lock() {
            events.push(e.clone());
        }
    }));

    project.check_filesystem().await?;

    let events = seen.lock().map(|e| e.clone()).unwrap_or_default();
    if events.is_empty() {
        println!("No changes");
        return Ok(());
    }
    let tree = project.tree();
    for event in &events {
        match event {
            TreeEvent::Deleted { node } => {
                println!("removed:  {}", tree.node(*node)?.path().display());
            }
            TreeEvent::FileChanged { node } => {
                println!("modified: {}", tree.node(*node)?.path().display());
            }
            other => println!("changed: {other:?}"),
        }
    }
    println!("{} change(s)", events.len());
    Ok(())
}
