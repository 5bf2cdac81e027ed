use crate::output::print_json;
use chrono::Datelike;
use gob_core::tree::{self, NodeKind, TreeNode};
use std::path::Path;

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let year = chrono::Local::now().year();
    let nodes = tree::build(root, year)?;

    if json {
        return print_json(&serde_json::json!({
            "root": root.display().to_string(),
            "children": nodes,
        }));
    }

    println!("{}/", root.display());
    for node in &nodes {
        print_node(node, 1);
    }
    Ok(())
}

fn print_node(node: &TreeNode, depth: usize) {
    let suffix = match node.kind {
        NodeKind::Dir => "/",
        NodeKind::File => "",
    };
    println!("{}{}{}", "    ".repeat(depth), node.name, suffix);
    for child in &node.children {
        print_node(child, depth + 1);
    }
}
