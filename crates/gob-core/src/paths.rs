use crate::error::{GobError, Result};
use std::fmt;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const GOB_DIR: &str = ".gob";
pub const SOLVED_DIR: &str = ".solved";
pub const TICKETS_DIR: &str = "tickets";
pub const HEALTH_CHECK_DIR: &str = "health-check";
pub const HEALTH_CHECKS_SUBDIR: &str = "premium/health-checks";

pub const CONFIG_FILE: &str = "config.yaml";
pub const NOTES_SH: &str = "notes.sh";
pub const NOTES_MD: &str = "notes.md";
pub const ORIGIN_FILE: &str = ".gob-origin";

// ---------------------------------------------------------------------------
// Root
// ---------------------------------------------------------------------------

/// `~/.gob`, the store root when nothing else is configured.
pub fn default_root() -> Result<PathBuf> {
    let home = home::home_dir().ok_or(GobError::HomeNotFound)?;
    Ok(home.join(GOB_DIR))
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

// ---------------------------------------------------------------------------
// Customers
// ---------------------------------------------------------------------------

/// Upper-case the first character, leave the rest untouched.
pub fn canonical_customer_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn customer_dir(root: &Path, name: &str) -> PathBuf {
    root.join(canonical_customer_name(name))
}

pub fn tickets_dir(root: &Path, customer: &str) -> PathBuf {
    customer_dir(root, customer).join(TICKETS_DIR)
}

// ---------------------------------------------------------------------------
// Tickets
// ---------------------------------------------------------------------------

pub fn solved_dir(root: &Path) -> PathBuf {
    root.join(SOLVED_DIR)
}

/// Where a ticket lives: under its customer while open, in the shared
/// solved store once closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketLocation {
    Open { customer: String },
    Solved,
}

impl TicketLocation {
    pub fn open(customer: &str) -> Self {
        TicketLocation::Open {
            customer: canonical_customer_name(customer),
        }
    }

    pub fn dir(&self, root: &Path, id: &str) -> PathBuf {
        match self {
            TicketLocation::Open { customer } => tickets_dir(root, customer).join(id),
            TicketLocation::Solved => solved_dir(root).join(id),
        }
    }
}

impl fmt::Display for TicketLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TicketLocation::Open { customer } => write!(f, "for customer {customer}"),
            TicketLocation::Solved => f.write_str("in the solved tickets"),
        }
    }
}

// ---------------------------------------------------------------------------
// Health checks
// ---------------------------------------------------------------------------

pub fn health_check_repo(root: &Path) -> PathBuf {
    root.join(HEALTH_CHECK_DIR)
}

pub fn health_checks_dir(root: &Path) -> PathBuf {
    health_check_repo(root).join(HEALTH_CHECKS_SUBDIR)
}

pub fn health_check_year_dir(root: &Path, year: i32) -> PathBuf {
    health_checks_dir(root).join(year.to_string())
}

// ---------------------------------------------------------------------------
// Name validation
// ---------------------------------------------------------------------------

fn validate_segment(name: &str) -> Result<()> {
    let invalid = |reason| GobError::InvalidName {
        name: name.to_string(),
        reason,
    };
    if name.trim().is_empty() {
        return Err(invalid("must not be empty"));
    }
    if name.contains(['/', '\\']) {
        return Err(invalid("must not contain path separators"));
    }
    if name.contains('\0') {
        return Err(invalid("must not contain NUL"));
    }
    if name.starts_with('.') {
        return Err(invalid("must not start with '.'"));
    }
    Ok(())
}

pub fn validate_customer_name(name: &str) -> Result<()> {
    validate_segment(name)?;
    if name.eq_ignore_ascii_case(HEALTH_CHECK_DIR) {
        return Err(GobError::InvalidName {
            name: name.to_string(),
            reason: "reserved for the health-check repository",
        });
    }
    Ok(())
}

pub fn validate_ticket_id(id: &str) -> Result<()> {
    validate_segment(id)
}

/// Top-level entries that are store internals rather than customers.
pub fn is_reserved_entry(name: &str) -> bool {
    name.starts_with('.') || name == HEALTH_CHECK_DIR
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonicalization_is_case_insensitive_on_first_char() {
        let root = Path::new("/tmp/gob");
        assert_eq!(customer_dir(root, "acme"), customer_dir(root, "Acme"));
        assert_eq!(customer_dir(root, "acme"), PathBuf::from("/tmp/gob/Acme"));
    }

    #[test]
    fn canonicalization_keeps_the_tail() {
        assert_eq!(canonical_customer_name("acmeCorp"), "AcmeCorp");
        assert_eq!(canonical_customer_name("ACME"), "ACME");
        assert_eq!(canonical_customer_name("élan"), "Élan");
        assert_eq!(canonical_customer_name(""), "");
    }

    #[test]
    fn path_helpers() {
        let root = Path::new("/tmp/gob");
        assert_eq!(
            TicketLocation::open("acme").dir(root, "T1"),
            PathBuf::from("/tmp/gob/Acme/tickets/T1")
        );
        assert_eq!(
            TicketLocation::Solved.dir(root, "T1"),
            PathBuf::from("/tmp/gob/.solved/T1")
        );
        assert_eq!(
            health_check_year_dir(root, 2025),
            PathBuf::from("/tmp/gob/health-check/premium/health-checks/2025")
        );
    }

    #[test]
    fn valid_names() {
        for name in ["acme", "Acme Corp", "T-1234", "ticket_5", "a.b"] {
            validate_customer_name(name).unwrap_or_else(|_| panic!("expected valid: {name}"));
            validate_ticket_id(name).unwrap_or_else(|_| panic!("expected valid: {name}"));
        }
    }

    #[test]
    fn invalid_names() {
        for name in ["", "   ", "a/b", "a\\b", ".", "..", ".solved", "nul\0"] {
            assert!(validate_ticket_id(name).is_err(), "expected invalid: {name:?}");
            assert!(validate_customer_name(name).is_err(), "expected invalid: {name:?}");
        }
    }

    #[test]
    fn health_check_is_reserved_for_customers_only() {
        assert!(validate_customer_name("health-check").is_err());
        assert!(validate_customer_name("Health-Check").is_err());
        assert!(validate_ticket_id("health-check").is_ok());
    }

    #[test]
    fn location_display() {
        assert_eq!(TicketLocation::open("acme").to_string(), "for customer Acme");
        assert_eq!(TicketLocation::Solved.to_string(), "in the solved tickets");
    }
}
