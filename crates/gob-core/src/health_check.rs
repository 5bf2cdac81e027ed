//! Health-check documents kept in a git checkout of the knowledge base at
//! `<root>/health-check`.
//!
//! Each document lives at `premium/health-checks/<YYYY>/<Customer>-<YYYY>-<MM>.md`
//! and is written on its own branch of the same name, cut from the base branch.

use crate::error::{GobError, Result};
use crate::io;
use crate::paths;
use chrono::{Datelike, NaiveDate};
use std::path::{Path, PathBuf};
use std::process::Command;

// ---------------------------------------------------------------------------
// Git
// ---------------------------------------------------------------------------

fn git(dir: Option<&Path>, args: &[&str]) -> Result<String> {
    let bin = which::which("git").map_err(|_| GobError::GitNotFound)?;
    let mut cmd = Command::new(bin);
    if let Some(dir) = dir {
        cmd.arg("-C").arg(dir);
    }
    cmd.args(args);
    tracing::debug!(?args, "running git");

    let output = cmd.output()?;
    if !output.status.success() {
        return Err(GobError::Git {
            args: args.join(" "),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

// ---------------------------------------------------------------------------
// Repository
// ---------------------------------------------------------------------------

/// True when `<root>/health-check` is a non-empty git checkout.
pub fn is_repo(root: &Path) -> bool {
    let dir = paths::health_check_repo(root);
    let non_empty = std::fs::read_dir(&dir)
        .map(|mut entries| entries.next().is_some())
        .unwrap_or(false);
    non_empty && dir.join(".git").exists()
}

fn require_repo(root: &Path) -> Result<PathBuf> {
    if !is_repo(root) {
        return Err(GobError::HealthCheckRepoMissing(paths::health_check_repo(
            root,
        )));
    }
    Ok(paths::health_check_repo(root))
}

/// Clone `url` into `<root>/health-check`. An empty leftover directory is
/// cleared first so git will accept it as a target.
pub fn clone(root: &Path, url: &str) -> Result<PathBuf> {
    let dir = paths::health_check_repo(root);
    io::create_directory(root)?;
    if dir.is_dir() && std::fs::read_dir(&dir)?.next().is_none() {
        std::fs::remove_dir(&dir)?;
    }
    let target = dir.to_string_lossy().into_owned();
    git(None, &["clone", url, &target])?;
    tracing::info!(url, path = %dir.display(), "health-check repository cloned");
    Ok(dir)
}

pub fn current_branch(root: &Path) -> Result<String> {
    let dir = require_repo(root)?;
    git(Some(&dir), &["rev-parse", "--abbrev-ref", "HEAD"])
}

/// Push the current branch to `origin`, setting upstream. Returns the branch.
pub fn push(root: &Path) -> Result<String> {
    let dir = require_repo(root)?;
    let branch = current_branch(root)?;
    git(Some(&dir), &["push", "-u", "origin", &branch])?;
    tracing::info!(branch = %branch, "health-check branch pushed");
    Ok(branch)
}

// ---------------------------------------------------------------------------
// Documents
// ---------------------------------------------------------------------------

/// `<Customer>-<YYYY>-<MM>`, shared by the document stem and its branch.
pub fn document_stem(customer: &str, date: NaiveDate) -> String {
    format!(
        "{}-{}-{:02}",
        paths::canonical_customer_name(customer),
        date.year(),
        date.month()
    )
}

pub fn document_path(root: &Path, customer: &str, date: NaiveDate) -> PathBuf {
    paths::health_check_year_dir(root, date.year())
        .join(format!("{}.md", document_stem(customer, date)))
}

pub fn document_body(customer: &str, date: NaiveDate) -> String {
    format!(
        "# Health Check for {}\n\nDate: {}\n",
        paths::canonical_customer_name(customer),
        date.format("%Y-%m-%d")
    )
}

/// Write the document without touching git. Never overwrites.
pub fn write_document(root: &Path, customer: &str, date: NaiveDate) -> Result<PathBuf> {
    paths::validate_customer_name(customer)?;
    let path = document_path(root, customer, date);
    if !io::write_if_missing(&path, document_body(customer, date).as_bytes())? {
        return Err(GobError::HealthCheckExists(path));
    }
    Ok(path)
}

/// Switch to `base_branch`, cut the document's branch, and write the document.
pub fn add(root: &Path, customer: &str, date: NaiveDate, base_branch: &str) -> Result<PathBuf> {
    paths::validate_customer_name(customer)?;
    let dir = require_repo(root)?;
    let path = document_path(root, customer, date);
    if path.exists() {
        return Err(GobError::HealthCheckExists(path));
    }

    let branch = document_stem(customer, date);
    git(Some(&dir), &["checkout", base_branch])?;
    git(Some(&dir), &["checkout", "-b", &branch])?;
    let path = write_document(root, customer, date)?;
    tracing::info!(branch = %branch, path = %path.display(), "health check created");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn march() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 7).unwrap()
    }

    #[test]
    fn document_naming() {
        let root = Path::new("/tmp/gob");
        assert_eq!(document_stem("acme", march()), "Acme-2025-03");
        assert_eq!(
            document_path(root, "acme", march()),
            PathBuf::from("/tmp/gob/health-check/premium/health-checks/2025/Acme-2025-03.md")
        );
        assert_eq!(
            document_body("acme", march()),
            "# Health Check for Acme\n\nDate: 2025-03-07\n"
        );
    }

    #[test]
    fn write_document_never_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = write_document(dir.path(), "acme", march()).unwrap();
        std::fs::write(&path, b"# Health Check for Acme\n\nfindings\n").unwrap();

        assert!(matches!(
            write_document(dir.path(), "acme", march()),
            Err(GobError::HealthCheckExists(_))
        ));
        assert!(std::fs::read_to_string(&path).unwrap().contains("findings"));
    }

    #[test]
    fn repo_detection() {
        let dir = TempDir::new().unwrap();
        assert!(!is_repo(dir.path()));

        std::fs::create_dir_all(paths::health_check_repo(dir.path())).unwrap();
        assert!(!is_repo(dir.path()));

        std::fs::create_dir_all(paths::health_check_repo(dir.path()).join(".git")).unwrap();
        assert!(is_repo(dir.path()));
    }

    #[test]
    fn add_without_repo_is_reported() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            add(dir.path(), "acme", march(), "main"),
            Err(GobError::HealthCheckRepoMissing(_))
        ));
        assert!(matches!(
            push(dir.path()),
            Err(GobError::HealthCheckRepoMissing(_))
        ));
    }
}
