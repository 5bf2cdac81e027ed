use crate::error::{GobError, Result};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use walkdir::WalkDir;

/// Atomically write `data` to `path` using a tempfile in the same directory.
pub fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Write a file only if it does not already exist. Returns true if written.
pub fn write_if_missing(path: &Path, data: &[u8]) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    atomic_write(path, data)?;
    Ok(true)
}

/// Create a directory and all parents. Returns `false` if it was already there.
pub fn create_directory(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    std::fs::create_dir_all(path)?;
    tracing::debug!(path = %path.display(), "created directory");
    Ok(true)
}

/// Recursively delete a directory. Returns `false` if it was absent.
pub fn remove_directory(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(false);
    }
    std::fs::remove_dir_all(path)?;
    tracing::debug!(path = %path.display(), "removed directory");
    Ok(true)
}

/// Names of the directories directly under `path`, in filesystem order.
/// A missing `path` lists as empty.
pub fn list_directories(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let mut names = Vec::new();
    for entry in std::fs::read_dir(path)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    Ok(names)
}

/// Names of every entry (files and directories) directly under `path`, sorted.
pub fn list_entries(path: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(path)? {
        names.push(entry?.file_name().to_string_lossy().into_owned());
    }
    names.sort();
    Ok(names)
}

// ---------------------------------------------------------------------------
// Relocation
// ---------------------------------------------------------------------------

/// Move a file or directory tree from `from` to `to`.
///
/// `from` must exist, `to` must not, and `to`'s parent must already exist.
/// A plain rename is attempted first. When that fails (typically across
/// filesystems) the tree is copied, the copy is verified against the source,
/// and only then is the source removed. If the copy itself fails, the partial
/// destination is cleaned up and the source is untouched. If anything fails
/// after the copy landed, both trees are kept and [`GobError::PartialMove`]
/// names them.
pub fn relocate(from: &Path, to: &Path) -> Result<()> {
    let refuse = |reason: &str| GobError::MoveFailed {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        reason: reason.to_string(),
    };

    if std::fs::symlink_metadata(from).is_err() {
        return Err(refuse("source does not exist"));
    }
    if std::fs::symlink_metadata(to).is_ok() {
        return Err(refuse("destination already exists"));
    }
    match to.parent() {
        Some(parent) if parent.is_dir() => {}
        _ => return Err(refuse("destination parent does not exist")),
    }

    match std::fs::rename(from, to) {
        Ok(()) => {
            tracing::debug!(from = %from.display(), to = %to.display(), "renamed");
            return Ok(());
        }
        Err(e) => {
            tracing::debug!(error = %e, "rename failed, falling back to copy");
        }
    }

    copy_verify_remove(from, to, copy_tree, remove_any)
}

/// Fallback half of [`relocate`]: copy, compare manifests, then remove the
/// source. `copy` and `remove_source` are the tree operations to use.
fn copy_verify_remove<C, R>(from: &Path, to: &Path, copy: C, remove_source: R) -> Result<()>
where
    C: FnOnce(&Path, &Path) -> Result<()>,
    R: FnOnce(&Path) -> Result<()>,
{
    if let Err(e) = copy(from, to) {
        return match remove_any(to) {
            Ok(()) => Err(e),
            Err(cleanup) => Err(GobError::PartialMove {
                from: from.to_path_buf(),
                to: to.to_path_buf(),
                reason: format!("copy failed ({e}) and cleanup failed ({cleanup})"),
            }),
        };
    }

    let partial = |reason: String| GobError::PartialMove {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        reason,
    };

    match (tree_manifest(from), tree_manifest(to)) {
        (Ok(src), Ok(dst)) if src == dst => {}
        (Ok(_), Ok(_)) => return Err(partial("copy does not match source".into())),
        (Err(e), _) | (_, Err(e)) => return Err(partial(format!("verification failed: {e}"))),
    }

    remove_source(from).map_err(|e| partial(format!("source removal failed: {e}")))?;
    tracing::debug!(from = %from.display(), to = %to.display(), "copied and removed source");
    Ok(())
}

fn remove_any(path: &Path) -> Result<()> {
    match std::fs::symlink_metadata(path) {
        Ok(meta) if meta.is_dir() => std::fs::remove_dir_all(path)?,
        Ok(_) => std::fs::remove_file(path)?,
        Err(_) => {}
    }
    Ok(())
}

/// Recreate the symlink at `from` as `to`, pointing at the same target.
#[cfg(unix)]
fn copy_link(from: &Path, to: &Path) -> Result<()> {
    let target = std::fs::read_link(from)?;
    std::os::unix::fs::symlink(target, to)?;
    Ok(())
}

#[cfg(windows)]
fn copy_link(from: &Path, to: &Path) -> Result<()> {
    let target = std::fs::read_link(from)?;
    if std::fs::metadata(from).map(|m| m.is_dir()).unwrap_or(false) {
        std::os::windows::fs::symlink_dir(target, to)?;
    } else {
        std::os::windows::fs::symlink_file(target, to)?;
    }
    Ok(())
}

/// Copy a file, symlink, or directory tree. Symlinks are copied as links,
/// never followed.
fn copy_tree(from: &Path, to: &Path) -> Result<()> {
    let meta = std::fs::symlink_metadata(from)?;
    if meta.file_type().is_symlink() {
        return copy_link(from, to);
    }
    if !meta.is_dir() {
        std::fs::copy(from, to)?;
        return Ok(());
    }
    for entry in WalkDir::new(from) {
        let entry = entry.map_err(std::io::Error::from)?;
        let rel = entry
            .path()
            .strip_prefix(from)
            .map_err(|e| std::io::Error::other(e.to_string()))?;
        let target = to.join(rel);
        let kind = entry.file_type();
        if kind.is_symlink() {
            copy_link(entry.path(), &target)?;
        } else if kind.is_dir() {
            std::fs::create_dir_all(&target)?;
        } else {
            std::fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
enum ManifestEntry {
    Dir,
    File(u64),
    Link(PathBuf),
}

fn manifest_entry(path: &Path) -> Result<ManifestEntry> {
    let meta = std::fs::symlink_metadata(path)?;
    Ok(if meta.file_type().is_symlink() {
        ManifestEntry::Link(std::fs::read_link(path)?)
    } else if meta.is_dir() {
        ManifestEntry::Dir
    } else {
        ManifestEntry::File(meta.len())
    })
}

/// Relative path → kind and size (or link target) for every entry in a tree.
/// Symlinks are recorded, never followed.
fn tree_manifest(root: &Path) -> Result<BTreeMap<PathBuf, ManifestEntry>> {
    let mut manifest = BTreeMap::new();
    let top = manifest_entry(root)?;
    if top != ManifestEntry::Dir {
        manifest.insert(PathBuf::new(), top);
        return Ok(manifest);
    }
    for entry in WalkDir::new(root) {
        let entry = entry.map_err(std::io::Error::from)?;
        let rel = entry
            .path()
            .strip_prefix(root)
            .map_err(|e| std::io::Error::other(e.to_string()))?
            .to_path_buf();
        manifest.insert(rel, manifest_entry(entry.path())?);
    }
    Ok(manifest)
}
