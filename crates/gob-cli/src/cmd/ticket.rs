use crate::opener;
use crate::output::{failure, print_json, print_table, success};
use anyhow::Context;
use clap::Subcommand;
use gob_core::{
    config::Config,
    confirm::{Confirm, Decision},
    paths,
    ticket::{self, TicketRef},
};
use std::path::{Path, PathBuf};

#[derive(Subcommand)]
pub enum TicketSubcommand {
    /// Create a ticket for a customer
    Add {
        /// Ticket id
        id: String,
        #[arg(short = 'c', long = "customer", visible_alias = "customer-name")]
        customer: String,
    },
    /// Mark an open ticket as solved
    Solve {
        id: String,
        #[arg(short = 'c', long = "customer", visible_alias = "customer-name")]
        customer: String,
    },
    /// Move a solved ticket back under a customer
    Reopen {
        id: String,
        #[arg(short = 'c', long = "customer", visible_alias = "customer-name")]
        customer: String,
    },
    /// Delete an open ticket, or a solved one with --solved
    #[command(visible_alias = "rm")]
    Remove {
        id: String,
        #[arg(short = 'c', long = "customer", visible_alias = "customer-name")]
        customer: Option<String>,
        #[arg(short = 's', long)]
        solved: bool,
    },
    /// List a customer's open tickets, or solved tickets with --solved
    #[command(visible_alias = "ls")]
    List {
        #[arg(short = 'c', long = "customer", visible_alias = "customer-name")]
        customer: Option<String>,
        #[arg(short = 's', long)]
        solved: bool,
    },
    /// Open a ticket directory in the editor
    Open {
        id: String,
        #[arg(short = 'c', long = "customer", visible_alias = "customer-name")]
        customer: String,
    },
    /// Move a file or directory into a ticket
    #[command(visible_alias = "mv")]
    Move {
        id: String,
        #[arg(short = 'c', long = "customer", visible_alias = "customer-name")]
        customer: String,
        /// File or directory to move
        #[arg(short = 'p', long)]
        path: PathBuf,
    },
}

pub fn run(
    root: &Path,
    subcmd: TicketSubcommand,
    json: bool,
    confirm: &mut dyn Confirm,
) -> anyhow::Result<()> {
    match subcmd {
        TicketSubcommand::Add { id, customer } => add(root, &customer, &id, json),
        TicketSubcommand::Solve { id, customer } => solve(root, &customer, &id, json, confirm),
        TicketSubcommand::Reopen { id, customer } => reopen(root, &customer, &id, json),
        TicketSubcommand::Remove {
            id,
            customer,
            solved,
        } => remove(root, customer.as_deref(), &id, solved, json, confirm),
        TicketSubcommand::List { customer, solved } => {
            list(root, customer.as_deref(), solved, json)
        }
        TicketSubcommand::Open { id, customer } => open(root, &customer, &id),
        TicketSubcommand::Move { id, customer, path } => {
            move_into(root, &customer, &id, &path, json)
        }
    }
}

fn add(root: &Path, customer: &str, id: &str, json: bool) -> anyhow::Result<()> {
    let dir = ticket::add(root, customer, id)?;
    let canonical = paths::canonical_customer_name(customer);
    if json {
        print_json(&serde_json::json!({
            "id": id,
            "customer": canonical,
            "path": dir.display().to_string(),
        }))?;
    } else {
        success(&format!("Ticket {id} created for customer {canonical}."));
    }
    Ok(())
}

fn solve(
    root: &Path,
    customer: &str,
    id: &str,
    json: bool,
    confirm: &mut dyn Confirm,
) -> anyhow::Result<()> {
    let decision = ticket::solve(root, customer, id, confirm)?;
    if json {
        print_json(&serde_json::json!({ "id": id, "solved": decision.is_done() }))?;
        return Ok(());
    }
    match decision {
        Decision::Done => success(&format!("Ticket {id} marked as solved.")),
        Decision::Cancelled => println!("Operation cancelled."),
    }
    Ok(())
}

fn reopen(root: &Path, customer: &str, id: &str, json: bool) -> anyhow::Result<()> {
    let reopened = ticket::reopen(root, customer, id)?;
    let canonical = paths::canonical_customer_name(customer);
    if json {
        print_json(&serde_json::json!({
            "id": id,
            "customer": canonical,
            "previous_customer": reopened.origin,
            "path": reopened.path.display().to_string(),
        }))?;
        return Ok(());
    }
    success(&format!("Ticket {id} reopened for customer {canonical}."));
    if let Some(origin) = reopened.origin.filter(|o| *o != canonical) {
        println!("  note: ticket {id} was solved for customer {origin}");
    }
    Ok(())
}

fn remove(
    root: &Path,
    customer: Option<&str>,
    id: &str,
    solved: bool,
    json: bool,
    confirm: &mut dyn Confirm,
) -> anyhow::Result<()> {
    let target = TicketRef::from_args(customer, id, solved)?;
    let decision = ticket::remove(root, target, confirm)?;
    if json {
        print_json(&serde_json::json!({ "id": id, "removed": decision.is_done() }))?;
        return Ok(());
    }
    match (decision, target) {
        (Decision::Cancelled, _) => println!("Operation cancelled."),
        (Decision::Done, TicketRef::Solved { .. }) => {
            success(&format!("Solved ticket {id} has been removed."))
        }
        (Decision::Done, TicketRef::Open { customer, .. }) => success(&format!(
            "Ticket {id} for customer {} has been removed.",
            paths::canonical_customer_name(customer)
        )),
    }
    Ok(())
}

fn list(root: &Path, customer: Option<&str>, solved: bool, json: bool) -> anyhow::Result<()> {
    let entries = ticket::list(root, customer, solved)?;

    if json {
        return print_json(&entries);
    }

    if solved {
        if entries.is_empty() {
            failure("No solved tickets found.");
            return Ok(());
        }
        success("Solved tickets:");
        let rows = entries
            .into_iter()
            .map(|e| vec![e.id, e.origin.unwrap_or_else(|| "-".to_string())])
            .collect();
        print_table(&["ID", "ORIGIN"], rows);
        return Ok(());
    }

    let canonical = paths::canonical_customer_name(customer.unwrap_or_default());
    if entries.is_empty() {
        failure(&format!("No tickets found for customer {canonical}."));
        return Ok(());
    }
    success(&format!("Tickets for customer {canonical}:"));
    for entry in &entries {
        println!("  {}", entry.id);
    }
    Ok(())
}

fn open(root: &Path, customer: &str, id: &str) -> anyhow::Result<()> {
    let dir = ticket::path(root, customer, id)?;
    let config = Config::load(root).context("failed to load config")?;
    opener::open_path(&dir, config.editor.as_deref());
    Ok(())
}

fn move_into(
    root: &Path,
    customer: &str,
    id: &str,
    external: &Path,
    json: bool,
) -> anyhow::Result<()> {
    let dest = ticket::move_into(root, customer, id, external)?;
    if json {
        print_json(&serde_json::json!({
            "id": id,
            "path": dest.display().to_string(),
        }))?;
    } else {
        success(&format!(
            "Moved {} to ticket {id} for customer {}.",
            external.display(),
            paths::canonical_customer_name(customer)
        ));
    }
    Ok(())
}
