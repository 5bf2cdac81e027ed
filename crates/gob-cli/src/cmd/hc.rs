use crate::opener;
use crate::output::{print_json, success};
use anyhow::Context;
use clap::Subcommand;
use gob_core::{config::Config, confirm::Confirm, health_check, paths};
use std::path::Path;

#[derive(Subcommand)]
pub enum HcSubcommand {
    /// Clone the health-check repository into the store root
    Clone,
    /// Create this month's health check for a customer on a new branch
    Add {
        #[arg(short = 'c', long = "customer", visible_alias = "customer-name")]
        customer: String,
        /// Open the document once written
        #[arg(short = 'o', long)]
        open: bool,
    },
    /// Push the current branch to origin
    Push,
    /// Print the checkout path (use with `cd "$(gob hc path)"`)
    Path,
}

pub fn run(
    root: &Path,
    subcmd: HcSubcommand,
    json: bool,
    confirm: &mut dyn Confirm,
) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;
    match subcmd {
        HcSubcommand::Clone => clone(root, &config, json, confirm),
        HcSubcommand::Add { customer, open } => add(root, &config, &customer, open, json),
        HcSubcommand::Push => push(root, json),
        HcSubcommand::Path => path(root, json),
    }
}

fn clone(root: &Path, config: &Config, json: bool, confirm: &mut dyn Confirm) -> anyhow::Result<()> {
    let dir = paths::health_check_repo(root);
    if health_check::is_repo(root) {
        if json {
            print_json(&serde_json::json!({
                "path": dir.display().to_string(),
                "cloned": false,
            }))?;
        } else {
            success(&format!("{} is already a valid repository.", dir.display()));
        }
        return Ok(());
    }

    let url = &config.health_check.repo_url;
    let prompt = format!("Clone {url} into {}?", dir.display());
    if !confirm.confirm(&prompt)? {
        if json {
            print_json(&serde_json::json!({ "path": dir.display().to_string(), "cloned": false }))?;
        } else {
            println!("Operation cancelled.");
        }
        return Ok(());
    }

    let dir = health_check::clone(root, url)?;
    if json {
        print_json(&serde_json::json!({ "path": dir.display().to_string(), "cloned": true }))?;
    } else {
        success(&format!("Cloned {url} into {}.", dir.display()));
    }
    Ok(())
}

fn add(root: &Path, config: &Config, customer: &str, open: bool, json: bool) -> anyhow::Result<()> {
    let today = chrono::Local::now().date_naive();
    let doc = health_check::add(root, customer, today, &config.health_check.base_branch)?;
    let branch = health_check::document_stem(customer, today);

    if json {
        print_json(&serde_json::json!({
            "branch": branch,
            "path": doc.display().to_string(),
        }))?;
    } else {
        success(&format!(
            "Health check {} created on branch {branch}.",
            doc.display()
        ));
    }
    if open {
        opener::open_path(&doc, config.editor.as_deref());
    }
    Ok(())
}

fn push(root: &Path, json: bool) -> anyhow::Result<()> {
    let branch = health_check::push(root)?;
    if json {
        print_json(&serde_json::json!({ "branch": branch, "pushed": true }))?;
    } else {
        success(&format!("Pushed branch {branch} to origin."));
    }
    Ok(())
}

fn path(root: &Path, json: bool) -> anyhow::Result<()> {
    let dir = paths::health_check_repo(root);
    if json {
        return print_json(&serde_json::json!({ "path": dir.display().to_string() }));
    }
    println!("{}", dir.display());
    Ok(())
}
