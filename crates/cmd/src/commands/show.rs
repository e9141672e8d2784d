use std::path::Path;

use anyhow::Result;
use projfs::{NodeId, Tree};

use crate::common::open_project;

pub async fn show_command(root: &Path) -> Result<()> {
    let project = open_project(root).await?;
    let tree = project.tree();
    println!("{}", tree.name(tree.root())?);
    print_subtree(tree, tree.root(), 1)?;
    Ok(())
}

fn print_subtree(tree: &Tree, folder: NodeId, depth: usize) -> Result<()> {
    for &child in tree.node(folder)?.children() {
        let node = tree.node(child)?;
        let name = tree.name(child)?;
        let tag = match node.type_name() {
            Some(t) => format!(" [{t}]"),
            None if node.is_folder() => "/".to_string(),
            None => String::new(),
        };
        println!("{:indent$}{name}{tag}", "", indent = depth * 2);
        if node.is_folder() {
            print_subtree(tree, child, depth + 1)?;
        }
    }
    Ok(())
}
