//! Read-only overview of the store for `gob tree`.
//!
//! Each top-level directory is shown with its immediate sub-directories, and
//! ticket directories under `tickets/`. The health-check checkout is shown
//! only as its `health-checks/<year>/` documents for the requested year.

use crate::error::Result;
use crate::io;
use crate::paths;
use serde::Serialize;
use std::path::Path;
use walkdir::WalkDir;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Dir,
    File,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeNode {
    pub name: String,
    pub kind: NodeKind,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    fn dir(name: impl Into<String>, children: Vec<TreeNode>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Dir,
            children,
        }
    }

    fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::File,
            children: Vec::new(),
        }
    }
}

fn sorted_dirs(path: &Path) -> Result<Vec<String>> {
    let mut names = io::list_directories(path)?;
    names.sort();
    Ok(names)
}

pub fn build(root: &Path, year: i32) -> Result<Vec<TreeNode>> {
    let mut nodes = Vec::new();
    for name in sorted_dirs(root)? {
        if name == paths::HEALTH_CHECK_DIR {
            if let Some(node) = health_checks(root, year)? {
                nodes.push(node);
            }
            continue;
        }
        let dir = root.join(&name);
        let mut children = Vec::new();
        for sub in sorted_dirs(&dir)? {
            let grandchildren = if sub == paths::TICKETS_DIR {
                sorted_dirs(&dir.join(&sub))?
                    .into_iter()
                    .map(|t| TreeNode::dir(t, Vec::new()))
                    .collect()
            } else {
                Vec::new()
            };
            children.push(TreeNode::dir(sub, grandchildren));
        }
        nodes.push(TreeNode::dir(name, children));
    }
    Ok(nodes)
}

fn health_checks(root: &Path, year: i32) -> Result<Option<TreeNode>> {
    let base = paths::health_checks_dir(root);
    if !base.is_dir() {
        return Ok(None);
    }
    let year_dir = paths::health_check_year_dir(root, year);
    let mut children = Vec::new();
    if year_dir.is_dir() {
        let mut docs = Vec::new();
        for entry in WalkDir::new(&year_dir).min_depth(1) {
            let entry = entry.map_err(std::io::Error::from)?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if entry.file_type().is_file() && name.ends_with(".md") {
                docs.push(name);
            }
        }
        docs.sort();
        children.push(TreeNode::dir(
            year.to_string(),
            docs.into_iter().map(TreeNode::file).collect(),
        ));
    }
    Ok(Some(TreeNode::dir("health-checks", children)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{customer, ticket};
    use tempfile::TempDir;

    #[test]
    fn shows_customers_tickets_and_solved() {
        let dir = TempDir::new().unwrap();
        customer::add(dir.path(), "acme").unwrap();
        ticket::add(dir.path(), "acme", "T2").unwrap();
        ticket::add(dir.path(), "acme", "T1").unwrap();
        std::fs::create_dir_all(dir.path().join(".solved/T0")).unwrap();

        let nodes = build(dir.path(), 2025).unwrap();
        let names: Vec<&str> = nodes.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec![".solved", "Acme"]);

        let acme = &nodes[1];
        assert_eq!(acme.children.len(), 1);
        let tickets = &acme.children[0];
        assert_eq!(tickets.name, "tickets");
        let ids: Vec<&str> = tickets.children.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(ids, vec!["T1", "T2"]);
    }

    #[test]
    fn health_checks_only_for_requested_year() {
        let dir = TempDir::new().unwrap();
        let this_year = paths::health_check_year_dir(dir.path(), 2025);
        let last_year = paths::health_check_year_dir(dir.path(), 2024);
        std::fs::create_dir_all(&this_year).unwrap();
        std::fs::create_dir_all(&last_year).unwrap();
        std::fs::write(this_year.join("Acme-2025-03.md"), b"# Health Check").unwrap();
        std::fs::write(this_year.join("scratch.txt"), b"").unwrap();
        std::fs::write(last_year.join("Acme-2024-11.md"), b"").unwrap();

        let nodes = build(dir.path(), 2025).unwrap();
        assert_eq!(
            nodes,
            vec![TreeNode::dir(
                "health-checks",
                vec![TreeNode::dir("2025", vec![TreeNode::file("Acme-2025-03.md")])]
            )]
        );
    }

    #[test]
    fn empty_or_missing_root() {
        let dir = TempDir::new().unwrap();
        assert!(build(dir.path(), 2025).unwrap().is_empty());
        assert!(build(&dir.path().join("absent"), 2025).unwrap().is_empty());
    }
}
