mod cmd;
mod opener;
mod output;
mod prompt;
mod root;

use clap::{Parser, Subcommand};
use cmd::{
    config::ConfigSubcommand, customer::CustomerSubcommand, hc::HcSubcommand,
    ticket::TicketSubcommand, wu::WuSubcommand,
};
use gob_core::GobError;
use prompt::TerminalPrompt;
use std::path::PathBuf;

/// Exit status for refused operations under `--strict`.
const EXIT_REFUSED: i32 = 2;

#[derive(Parser)]
#[command(
    name = "gob",
    about = "Customer and ticket folders for support engineers",
    version,
    propagate_version = true
)]
struct Cli {
    /// Store root (default: ~/.gob)
    #[arg(long, global = true, env = "GOB_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    /// Answer yes to every confirmation
    #[arg(long, global = true, short = 'y')]
    yes: bool,

    /// Exit with status 2 when an operation is refused
    #[arg(
        long,
        global = true,
        env = "GOB_STRICT",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    strict: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage customer directories
    #[command(visible_alias = "cx")]
    Customer {
        #[command(subcommand)]
        subcommand: CustomerSubcommand,
    },

    /// Manage tickets
    #[command(visible_alias = "tx")]
    Ticket {
        #[command(subcommand)]
        subcommand: TicketSubcommand,
    },

    /// Show customers, their tickets, and this year's health checks
    Tree,

    /// Work with the health-check repository
    Hc {
        #[command(subcommand)]
        subcommand: HcSubcommand,
    },

    /// Weekly team-meeting update
    Wu {
        #[command(subcommand)]
        subcommand: WuSubcommand,
    },

    /// Inspect or create config.yaml
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    // RUST_LOG replaces the default level entirely when set.
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let json = cli.json;
    let strict = cli.strict;
    let mut confirm = TerminalPrompt::new(cli.yes);

    let result = root::resolve_root(cli.root.as_deref())
        .map_err(anyhow::Error::from)
        .and_then(|root| match cli.command {
            Commands::Customer { subcommand } => {
                cmd::customer::run(&root, subcommand, json, &mut confirm)
            }
            Commands::Ticket { subcommand } => {
                cmd::ticket::run(&root, subcommand, json, &mut confirm)
            }
            Commands::Tree => cmd::tree::run(&root, json),
            Commands::Hc { subcommand } => cmd::hc::run(&root, subcommand, json, &mut confirm),
            Commands::Wu { subcommand } => cmd::wu::run(&root, subcommand, json),
            Commands::Config { subcommand } => cmd::config::run(&root, subcommand, json),
        });

    let Err(e) = result else {
        return;
    };

    if let Some(domain) = e.downcast_ref::<GobError>().filter(|d| d.is_domain()) {
        tracing::debug!(error = ?domain, "operation refused");
        if json {
            let _ = output::print_json(&serde_json::json!({
                "ok": false,
                "error": domain.to_string(),
            }));
        } else {
            output::failure(&domain.to_string());
        }
        if strict {
            std::process::exit(EXIT_REFUSED);
        }
        return;
    }

    // Print the full error chain (anyhow's alternate Display)
    eprintln!("error: {e:#}");
    std::process::exit(1);
}
