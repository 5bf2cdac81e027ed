//! Ticket lifecycle: `Absent → Open(customer) → Solved → Open(customer)`.
//!
//! A ticket's state is nothing more than where its directory sits. Every
//! transition checks the source and destination on disk before touching
//! anything, so a refused operation leaves the store exactly as it was.

use crate::confirm::{gated, Confirm, Decision};
use crate::customer;
use crate::error::{GobError, Result};
use crate::io;
use crate::paths::{self, TicketLocation};
use serde::Serialize;
use std::path::{Path, PathBuf};

pub const NOTES_SH_SEED: &str = "#!/bin/bash\n\n# Notes for ticket\n";
pub const NOTES_MD_SEED: &str = "# Notes\n\n";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketState {
    Open { customer: String },
    Solved,
    Absent,
}

/// A ticket addressed for removal: open under a customer, or in the solved store.
#[derive(Debug, Clone, Copy)]
pub enum TicketRef<'a> {
    Open { customer: &'a str, id: &'a str },
    Solved { id: &'a str },
}

impl<'a> TicketRef<'a> {
    /// `--solved` wins over `--customer`; without either the caller has not
    /// said where to look.
    pub fn from_args(customer: Option<&'a str>, id: &'a str, solved: bool) -> Result<Self> {
        match (solved, customer) {
            (true, _) => Ok(TicketRef::Solved { id }),
            (false, Some(customer)) => Ok(TicketRef::Open { customer, id }),
            (false, None) => Err(GobError::MissingCustomer),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TicketEntry {
    pub id: String,
    /// Customer the ticket was solved for, when known. Always `None` for open tickets.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reopened {
    pub path: PathBuf,
    pub origin: Option<String>,
}

// ---------------------------------------------------------------------------
// Lookups
// ---------------------------------------------------------------------------

pub fn state(root: &Path, customer: &str, id: &str) -> Result<TicketState> {
    paths::validate_customer_name(customer)?;
    paths::validate_ticket_id(id)?;
    if TicketLocation::open(customer).dir(root, id).is_dir() {
        return Ok(TicketState::Open {
            customer: paths::canonical_customer_name(customer),
        });
    }
    if TicketLocation::Solved.dir(root, id).is_dir() {
        return Ok(TicketState::Solved);
    }
    Ok(TicketState::Absent)
}

fn require(root: &Path, location: &TicketLocation, id: &str) -> Result<PathBuf> {
    paths::validate_ticket_id(id)?;
    let dir = location.dir(root, id);
    if !dir.is_dir() {
        return Err(GobError::TicketNotFound {
            id: id.to_string(),
            location: location.to_string(),
        });
    }
    Ok(dir)
}

fn require_open(root: &Path, customer: &str, id: &str) -> Result<PathBuf> {
    paths::validate_customer_name(customer)?;
    require(root, &TicketLocation::open(customer), id)
}

fn require_solved(root: &Path, id: &str) -> Result<PathBuf> {
    require(root, &TicketLocation::Solved, id)
}

/// Directory of an open ticket, for handing to an editor.
pub fn path(root: &Path, customer: &str, id: &str) -> Result<PathBuf> {
    require_open(root, customer, id)
}

fn read_origin(dir: &Path) -> Option<String> {
    let raw = std::fs::read_to_string(dir.join(paths::ORIGIN_FILE)).ok()?;
    let origin = raw.trim();
    (!origin.is_empty()).then(|| origin.to_string())
}

// ---------------------------------------------------------------------------
// Transitions
// ---------------------------------------------------------------------------

/// `Absent → Open(customer)`. Seeds `notes.sh` and `notes.md`.
pub fn add(root: &Path, customer: &str, id: &str) -> Result<PathBuf> {
    paths::validate_customer_name(customer)?;
    paths::validate_ticket_id(id)?;
    if !customer::exists(root, customer) {
        return Err(GobError::CustomerNotFound(paths::canonical_customer_name(
            customer,
        )));
    }

    let open = TicketLocation::open(customer);
    let dir = open.dir(root, id);
    let exists = |location: &TicketLocation| GobError::TicketExists {
        id: id.to_string(),
        location: location.to_string(),
    };
    match state(root, customer, id)? {
        TicketState::Open { .. } => return Err(exists(&open)),
        TicketState::Solved => return Err(exists(&TicketLocation::Solved)),
        TicketState::Absent => {}
    }

    io::create_directory(&paths::tickets_dir(root, customer))?;
    if !io::create_directory(&dir)? {
        return Err(exists(&open));
    }
    io::atomic_write(&dir.join(paths::NOTES_SH), NOTES_SH_SEED.as_bytes())?;
    io::atomic_write(&dir.join(paths::NOTES_MD), NOTES_MD_SEED.as_bytes())?;

    tracing::info!(ticket = id, %open, "ticket created");
    Ok(dir)
}

/// `Open(customer) → Solved`, after confirmation.
pub fn solve(root: &Path, customer: &str, id: &str, confirm: &mut dyn Confirm) -> Result<Decision> {
    let from = require_open(root, customer, id)?;
    let to = TicketLocation::Solved.dir(root, id);
    if to.exists() {
        return Err(GobError::MoveFailed {
            from,
            to,
            reason: "a solved ticket with this id already exists".into(),
        });
    }

    let canonical = paths::canonical_customer_name(customer);
    gated(
        confirm,
        &format!("Are you sure you want to mark ticket {id} as solved?"),
        || {
            io::create_directory(&paths::solved_dir(root))?;
            io::relocate(&from, &to)?;
            let marker = to.join(paths::ORIGIN_FILE);
            if let Err(e) = io::atomic_write(&marker, format!("{canonical}\n").as_bytes()) {
                tracing::warn!(error = %e, path = %marker.display(), "could not record ticket origin");
            }
            tracing::info!(ticket = id, customer = %canonical, "ticket solved");
            Ok(())
        },
    )
}

/// `Solved → Open(customer)`. The destination customer is whatever the caller
/// says; the recorded origin is only reported back.
pub fn reopen(root: &Path, customer: &str, id: &str) -> Result<Reopened> {
    paths::validate_customer_name(customer)?;
    let from = require_solved(root, id)?;
    if !customer::exists(root, customer) {
        return Err(GobError::CustomerNotFound(paths::canonical_customer_name(
            customer,
        )));
    }

    let open = TicketLocation::open(customer);
    let to = open.dir(root, id);
    if to.exists() {
        return Err(GobError::MoveFailed {
            from,
            to,
            reason: format!("ticket is already open {open}"),
        });
    }

    let origin = read_origin(&from);
    io::create_directory(&paths::tickets_dir(root, customer))?;
    io::relocate(&from, &to)?;

    let marker = to.join(paths::ORIGIN_FILE);
    if marker.exists() {
        if let Err(e) = std::fs::remove_file(&marker) {
            tracing::warn!(error = %e, path = %marker.display(), "could not strip ticket origin");
        }
    }

    let canonical = paths::canonical_customer_name(customer);
    match origin.as_deref() {
        Some(previous) if previous != canonical => {
            tracing::warn!(ticket = id, from = previous, to = %canonical, "ticket reopened under a different customer");
        }
        _ => tracing::info!(ticket = id, customer = %canonical, "ticket reopened"),
    }
    Ok(Reopened { path: to, origin })
}

/// Delete an open or solved ticket, after confirmation.
pub fn remove(root: &Path, target: TicketRef<'_>, confirm: &mut dyn Confirm) -> Result<Decision> {
    let (dir, prompt) = match target {
        TicketRef::Open { customer, id } => {
            let dir = require_open(root, customer, id)?;
            let canonical = paths::canonical_customer_name(customer);
            let prompt =
                format!("Are you sure you want to remove ticket {id} for customer {canonical}?");
            (dir, prompt)
        }
        TicketRef::Solved { id } => {
            let dir = require_solved(root, id)?;
            (dir, format!("Are you sure you want to remove solved ticket {id}?"))
        }
    };
    gated(confirm, &prompt, || {
        io::remove_directory(&dir)?;
        tracing::info!(path = %dir.display(), "ticket removed");
        Ok(())
    })
}

/// Ticket ids, sorted. `solved` lists the shared solved store and ignores
/// `customer`; otherwise a customer is required.
pub fn list(root: &Path, customer: Option<&str>, solved: bool) -> Result<Vec<TicketEntry>> {
    let mut entries: Vec<TicketEntry> = if solved {
        let dir = paths::solved_dir(root);
        io::list_directories(&dir)?
            .into_iter()
            .map(|id| TicketEntry {
                origin: read_origin(&dir.join(&id)),
                id,
            })
            .collect()
    } else {
        let customer = customer.ok_or(GobError::MissingCustomer)?;
        paths::validate_customer_name(customer)?;
        io::list_directories(&paths::tickets_dir(root, customer))?
            .into_iter()
            .map(|id| TicketEntry { id, origin: None })
            .collect()
    };
    entries.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(entries)
}

/// Move an arbitrary file or directory into an open ticket's directory,
/// keeping its name. Returns where it landed.
pub fn move_into(root: &Path, customer: &str, id: &str, external: &Path) -> Result<PathBuf> {
    let ticket = require_open(root, customer, id)?;
    if std::fs::symlink_metadata(external).is_err() {
        return Err(GobError::PathNotFound(external.to_path_buf()));
    }
    let refuse = |reason: &str| GobError::MoveFailed {
        from: external.to_path_buf(),
        to: ticket.clone(),
        reason: reason.to_string(),
    };

    let name = external
        .file_name()
        .ok_or_else(|| refuse("path has no file name"))?;
    if let (Ok(outer), Ok(inner)) = (
        std::fs::canonicalize(external),
        std::fs::canonicalize(&ticket),
    ) {
        if inner.starts_with(&outer) {
            return Err(refuse("cannot move a directory into itself"));
        }
    }

    let dest = ticket.join(name);
    io::relocate(external, &dest)?;
    tracing::info!(ticket = id, path = %dest.display(), "moved into ticket");
    Ok(dest)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
