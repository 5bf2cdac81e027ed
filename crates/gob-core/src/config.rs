use crate::error::Result;
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// HealthCheckConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthCheckConfig {
    #[serde(default = "default_repo_url")]
    pub repo_url: String,
    #[serde(default = "default_base_branch")]
    pub base_branch: String,
}

fn default_repo_url() -> String {
    "https://github.com/github/helphub-knowledge-base.git".to_string()
}

fn default_base_branch() -> String {
    "main".to_string()
}

impl Default for HealthCheckConfig {
    fn default() -> Self {
        Self {
            repo_url: default_repo_url(),
            base_branch: default_base_branch(),
        }
    }
}

// ---------------------------------------------------------------------------
// WeeklyUpdateConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyUpdateConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_owner")]
    pub owner: String,
    #[serde(default = "default_repo")]
    pub repo: String,
    #[serde(default = "default_labels")]
    pub labels: String,
    /// ISO-8601 lower bound for issue creation.
    #[serde(default = "default_since")]
    pub since: String,
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_owner() -> String {
    "github".to_string()
}

fn default_repo() -> String {
    "premium-support".to_string()
}

fn default_labels() -> String {
    "team-meeting".to_string()
}

fn default_since() -> String {
    "2025-01-01T00:00:00Z".to_string()
}

impl Default for WeeklyUpdateConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            owner: default_owner(),
            repo: default_repo(),
            labels: default_labels(),
            since: default_since(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Optional `config.yaml` at the store root. Every field has a default, so a
/// missing file and an empty file mean the same thing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Command used to open customer and ticket directories. Falls back to
    /// `$EDITOR`, then the platform opener.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor: Option<String>,
    #[serde(default)]
    pub health_check: HealthCheckConfig,
    #[serde(default)]
    pub weekly_update: WeeklyUpdateConfig,
}

impl Config {
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(&path)?;
        if data.trim().is_empty() {
            return Ok(Self::default());
        }
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    /// Write the defaults to `config.yaml` unless a file is already there.
    /// Returns true if written.
    pub fn init(root: &Path) -> Result<bool> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(&Self::default())?;
        crate::io::write_if_missing(&path, data.as_bytes())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let cfg = Config::load(dir.path()).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.weekly_update.owner, "github");
        assert_eq!(cfg.health_check.base_branch, "main");
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("config.yaml"),
            "editor: code\nweekly_update:\n  repo: support-team\n",
        )
        .unwrap();
        let cfg = Config::load(dir.path()).unwrap();
        assert_eq!(cfg.editor.as_deref(), Some("code"));
        assert_eq!(cfg.weekly_update.repo, "support-team");
        assert_eq!(cfg.weekly_update.labels, "team-meeting");
        assert_eq!(cfg.health_check, HealthCheckConfig::default());
    }

    #[test]
    fn init_writes_defaults_once() {
        let dir = TempDir::new().unwrap();
        assert!(Config::init(dir.path()).unwrap());
        assert_eq!(Config::load(dir.path()).unwrap(), Config::default());

        std::fs::write(dir.path().join("config.yaml"), "editor: vim\n").unwrap();
        assert!(!Config::init(dir.path()).unwrap());
        assert_eq!(Config::load(dir.path()).unwrap().editor.as_deref(), Some("vim"));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("config.yaml"), "editor: [unclosed").unwrap();
        assert!(Config::load(dir.path()).is_err());
    }
}
