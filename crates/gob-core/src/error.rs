use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GobError {
    #[error("customer directory {0} does not exist")]
    CustomerNotFound(String),

    #[error("customer directory {0} already exists")]
    CustomerExists(String),

    #[error("ticket {id} does not exist {location}")]
    TicketNotFound { id: String, location: String },

    #[error("ticket {id} already exists {location}")]
    TicketExists { id: String, location: String },

    #[error("path {} does not exist", .0.display())]
    PathNotFound(PathBuf),

    #[error("cannot move {} to {}: {reason}", .from.display(), .to.display())]
    MoveFailed {
        from: PathBuf,
        to: PathBuf,
        reason: String,
    },

    #[error(
        "move from {} to {} was interrupted: {reason}; both copies were kept, resolve manually",
        .from.display(),
        .to.display()
    )]
    PartialMove {
        from: PathBuf,
        to: PathBuf,
        reason: String,
    },

    #[error("customer name is required unless --solved is given")]
    MissingCustomer,

    #[error("invalid name '{name}': {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("health check already exists: {}", .0.display())]
    HealthCheckExists(PathBuf),

    #[error("health-check repository not found at {}: run 'gob hc clone'", .0.display())]
    HealthCheckRepoMissing(PathBuf),

    #[error("no weekly update issues found")]
    NoIssues,

    #[error("home directory not found: set HOME or pass --root")]
    HomeNotFound,

    #[error("git not found on PATH")]
    GitNotFound,

    #[error("git {args} failed: {stderr}")]
    Git { args: String, stderr: String },

    #[error("GITHUB_TOKEN is not set: export GITHUB_TOKEN=$(gh auth token)")]
    MissingToken,

    #[error("GitHub API error ({status}): {body}")]
    GitHub { status: u16, body: String },

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl GobError {
    /// Domain failures are reported to the operator and leave the store
    /// untouched; everything else is treated as fatal by the CLI.
    pub fn is_domain(&self) -> bool {
        matches!(
            self,
            GobError::CustomerNotFound(_)
                | GobError::CustomerExists(_)
                | GobError::TicketNotFound { .. }
                | GobError::TicketExists { .. }
                | GobError::PathNotFound(_)
                | GobError::MoveFailed { .. }
                | GobError::MissingCustomer
                | GobError::InvalidName { .. }
                | GobError::HealthCheckExists(_)
                | GobError::HealthCheckRepoMissing(_)
                | GobError::NoIssues
        )
    }
}

pub type Result<T> = std::result::Result<T, GobError>;
