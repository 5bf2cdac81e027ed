use crate::output::{print_json, success};
use anyhow::Context;
use clap::Subcommand;
use gob_core::{config::Config, paths};
use std::path::Path;

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Write config.yaml with default values if it does not exist
    Init,
    /// Print the effective configuration
    Show,
}

pub fn run(root: &Path, subcmd: ConfigSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        ConfigSubcommand::Init => init(root, json),
        ConfigSubcommand::Show => show(root, json),
    }
}

fn init(root: &Path, json: bool) -> anyhow::Result<()> {
    let path = paths::config_path(root);
    let written = Config::init(root).context("failed to write config")?;
    if json {
        return print_json(&serde_json::json!({
            "path": path.display().to_string(),
            "created": written,
        }));
    }
    if written {
        success(&format!("Wrote {}", path.display()));
    } else {
        println!("{} already exists; left unchanged.", path.display());
    }
    Ok(())
}

fn show(root: &Path, json: bool) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;
    if json {
        return print_json(&config);
    }
    print!("{}", serde_yaml::to_string(&config)?);
    Ok(())
}
