use gob_core::paths;
use std::path::{Path, PathBuf};

/// Resolve the store root.
///
/// Priority:
/// 1. `--root` flag / `GOB_ROOT` env var (passed in as `explicit`)
/// 2. `~/.gob`
pub fn resolve_root(explicit: Option<&Path>) -> gob_core::Result<PathBuf> {
    if let Some(p) = explicit {
        return Ok(p.to_path_buf());
    }
    paths::default_root()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn explicit_root_wins() {
        let dir = TempDir::new().unwrap();
        let result = resolve_root(Some(dir.path())).unwrap();
        assert_eq!(result, dir.path());
    }

    #[test]
    fn default_root_is_under_home() {
        if let Some(home) = home::home_dir() {
            assert_eq!(resolve_root(None).unwrap(), home.join(".gob"));
        }
    }
}
