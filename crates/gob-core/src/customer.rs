use crate::confirm::{gated, Confirm, Decision};
use crate::error::{GobError, Result};
use crate::io;
use crate::paths;
use std::path::{Path, PathBuf};

/// Create the customer's directory. Returns `false` if it already existed.
pub fn add(root: &Path, name: &str) -> Result<bool> {
    paths::validate_customer_name(name)?;
    let dir = paths::customer_dir(root, name);
    let created = io::create_directory(&dir)?;
    if created {
        tracing::info!(customer = %paths::canonical_customer_name(name), "customer created");
    }
    Ok(created)
}

pub fn exists(root: &Path, name: &str) -> bool {
    paths::customer_dir(root, name).is_dir()
}

/// Resolve an existing customer's directory.
pub fn path(root: &Path, name: &str) -> Result<PathBuf> {
    paths::validate_customer_name(name)?;
    let dir = paths::customer_dir(root, name);
    if !dir.is_dir() {
        return Err(GobError::CustomerNotFound(paths::canonical_customer_name(name)));
    }
    Ok(dir)
}

/// Entry names directly inside the customer's directory.
pub fn contents(root: &Path, name: &str) -> Result<Vec<String>> {
    io::list_entries(&path(root, name)?)
}

/// Delete the customer and everything under it, after confirmation.
pub fn remove(root: &Path, name: &str, confirm: &mut dyn Confirm) -> Result<Decision> {
    let dir = path(root, name)?;
    let canonical = paths::canonical_customer_name(name);
    gated(
        confirm,
        &format!("Are you sure you want to delete customer directory {canonical}?"),
        || {
            io::remove_directory(&dir)?;
            tracing::info!(customer = %canonical, "customer removed");
            Ok(())
        },
    )
}

/// Customer names, sorted. Store internals (`.solved`, `health-check`) are
/// never listed.
pub fn list(root: &Path) -> Result<Vec<String>> {
    let mut customers: Vec<String> = io::list_directories(root)?
        .into_iter()
        .filter(|name| !paths::is_reserved_entry(name))
        .collect();
    customers.sort();
    Ok(customers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn add_is_idempotent() {
        let dir = TempDir::new().unwrap();
        assert!(add(dir.path(), "acme").unwrap());
        assert!(!add(dir.path(), "acme").unwrap());
        assert!(!add(dir.path(), "Acme").unwrap());
        assert_eq!(list(dir.path()).unwrap(), vec!["Acme"]);
    }

    #[test]
    fn add_creates_root_lazily() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("nested/.gob");
        assert!(add(&root, "acme").unwrap());
        assert!(root.join("Acme").is_dir());
    }

    #[test]
    fn add_rejects_bad_names() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            add(dir.path(), "../escape"),
            Err(GobError::InvalidName { .. })
        ));
        assert!(matches!(
            add(dir.path(), ".solved"),
            Err(GobError::InvalidName { .. })
        ));
        assert!(list(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn list_excludes_store_internals() {
        let dir = TempDir::new().unwrap();
        add(dir.path(), "zeta").unwrap();
        add(dir.path(), "acme").unwrap();
        std::fs::create_dir_all(dir.path().join(".solved/T1")).unwrap();
        std::fs::create_dir_all(dir.path().join("health-check/.git")).unwrap();
        std::fs::write(dir.path().join("config.yaml"), b"{}").unwrap();
        assert_eq!(list(dir.path()).unwrap(), vec!["Acme", "Zeta"]);
    }

    #[test]
    fn list_on_missing_root_is_empty() {
        let dir = TempDir::new().unwrap();
        assert!(list(&dir.path().join("absent")).unwrap().is_empty());
    }

    #[test]
    fn remove_requires_confirmation() {
        let dir = TempDir::new().unwrap();
        add(dir.path(), "acme").unwrap();

        let decision = remove(dir.path(), "acme", &mut |_: &str| false).unwrap();
        assert_eq!(decision, Decision::Cancelled);
        assert!(exists(dir.path(), "acme"));

        let decision = remove(dir.path(), "acme", &mut |_: &str| true).unwrap();
        assert_eq!(decision, Decision::Done);
        assert!(!exists(dir.path(), "acme"));
    }

    #[test]
    fn remove_missing_customer_never_prompts() {
        let dir = TempDir::new().unwrap();
        let mut asked = false;
        let err = remove(dir.path(), "ghost", &mut |_: &str| {
            asked = true;
            true
        })
        .unwrap_err();
        assert!(matches!(err, GobError::CustomerNotFound(name) if name == "Ghost"));
        assert!(!asked);
    }

    #[test]
    fn path_and_contents() {
        let dir = TempDir::new().unwrap();
        add(dir.path(), "acme").unwrap();
        std::fs::create_dir(dir.path().join("Acme/tickets")).unwrap();
        std::fs::write(dir.path().join("Acme/readme.md"), b"").unwrap();
        assert_eq!(path(dir.path(), "acme").unwrap(), dir.path().join("Acme"));
        assert_eq!(
            contents(dir.path(), "acme").unwrap(),
            vec!["readme.md", "tickets"]
        );
        assert!(matches!(
            path(dir.path(), "ghost"),
            Err(GobError::CustomerNotFound(_))
        ));
    }
}
