use crate::opener;
use crate::output::{failure, print_json, success};
use anyhow::Context;
use clap::Subcommand;
use gob_core::{
    config::Config,
    confirm::{Confirm, Decision},
    customer, paths, GobError,
};
use std::path::Path;

#[derive(Subcommand)]
pub enum CustomerSubcommand {
    /// Create a customer directory
    Add {
        /// Name of the customer
        #[arg(short = 'c', long = "customer", visible_alias = "customer-name")]
        customer: String,
    },
    /// Remove a customer directory and everything in it
    #[command(visible_alias = "rm")]
    Remove {
        #[arg(short = 'c', long = "customer", visible_alias = "customer-name")]
        customer: String,
    },
    /// List customers
    #[command(visible_alias = "ls")]
    List,
    /// Open a customer directory in the editor
    Open {
        #[arg(short = 'c', long = "customer", visible_alias = "customer-name")]
        customer: String,
    },
}

pub fn run(
    root: &Path,
    subcmd: CustomerSubcommand,
    json: bool,
    confirm: &mut dyn Confirm,
) -> anyhow::Result<()> {
    match subcmd {
        CustomerSubcommand::Add { customer } => add(root, &customer, json),
        CustomerSubcommand::Remove { customer } => remove(root, &customer, json, confirm),
        CustomerSubcommand::List => list(root, json),
        CustomerSubcommand::Open { customer } => open(root, &customer),
    }
}

fn add(root: &Path, name: &str, json: bool) -> anyhow::Result<()> {
    let canonical = paths::canonical_customer_name(name);
    if !customer::add(root, name)? {
        return Err(GobError::CustomerExists(canonical).into());
    }
    if json {
        print_json(&serde_json::json!({ "customer": canonical, "created": true }))?;
    } else {
        success(&format!("Customer directory {canonical} created."));
    }
    Ok(())
}

fn remove(root: &Path, name: &str, json: bool, confirm: &mut dyn Confirm) -> anyhow::Result<()> {
    let canonical = paths::canonical_customer_name(name);
    if !json {
        let contents = customer::contents(root, name)?;
        println!("Contents of {canonical} directory:");
        for item in &contents {
            println!("  {item}");
        }
    }

    let decision = customer::remove(root, name, confirm)?;
    if json {
        print_json(&serde_json::json!({
            "customer": canonical,
            "removed": decision.is_done(),
        }))?;
        return Ok(());
    }
    match decision {
        Decision::Done => success(&format!("Customer directory {canonical} has been removed.")),
        Decision::Cancelled => println!("Operation cancelled."),
    }
    Ok(())
}

fn list(root: &Path, json: bool) -> anyhow::Result<()> {
    let customers = customer::list(root).context("failed to list customers")?;

    if json {
        return print_json(&customers);
    }

    if customers.is_empty() {
        failure("No customer directories found.");
        return Ok(());
    }
    success("Customers:");
    for name in &customers {
        println!("  {name}");
    }
    Ok(())
}

fn open(root: &Path, name: &str) -> anyhow::Result<()> {
    let dir = customer::path(root, name)?;
    let config = Config::load(root).context("failed to load config")?;
    opener::open_path(&dir, config.editor.as_deref());
    Ok(())
}
