// Copyright 2026 Quotedeck Contributors
// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use quotedeck::cli;
use quotedeck::cli::cache_cmd::CacheAction;
use quotedeck::config::Config;

#[derive(Parser)]
#[command(
    name = "quotedeck",
    about = "Quotedeck — Scrape, collect, and restyle quotes in the terminal",
    version,
    after_help = "Run 'quotedeck <command> --help' for details on each command.\nRun 'quotedeck' with no command to enter interactive mode."
)]
struct Cli {
    /// Output results as JSON (machine-readable)
    #[arg(long, global = true)]
    json: bool,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Enable verbose/debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a random quote from the cache
    Quote,
    /// Scrape fresh quotes from the source site
    Fetch {
        /// Page to scrape (omit for a random page)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=10))]
        page: Option<u32>,
        /// Seconds to let the page settle before extraction
        #[arg(long, default_value_t = 2.0)]
        wait: f32,
    },
    /// List displayed quotes, or reload one by number
    History {
        /// History entry to reload (1 = most recent)
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        index: Option<u32>,
    },
    /// Render the current quote as a PNG card
    Export {
        /// Directory to write the card into
        #[arg(long, default_value = ".")]
        dir: PathBuf,
        /// Also copy the card to the clipboard
        #[arg(long)]
        copy: bool,
        /// Print an inline terminal preview of the card
        #[arg(long)]
        preview: bool,
    },
    /// Copy the current quote to the clipboard
    Copy {
        /// Copy the rendered card instead of plain text
        #[arg(long)]
        image: bool,
    },
    /// Build a tweet link for the current quote
    Share {
        /// Share the rendered card instead of text
        #[arg(long)]
        image: bool,
    },
    /// Show cache and API status
    Status,
    /// Manage the quote cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
    /// Check environment and diagnose issues
    Doctor,
    /// Generate shell completion scripts
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global flags via environment variables so all modules can check them
    if cli.json {
        std::env::set_var("QUOTEDECK_JSON", "1");
    }
    if cli.quiet {
        std::env::set_var("QUOTEDECK_QUIET", "1");
    }
    if cli.verbose {
        std::env::set_var("QUOTEDECK_VERBOSE", "1");
    }
    if cli.no_color {
        std::env::set_var("QUOTEDECK_NO_COLOR", "1");
    }

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(if cli.verbose {
            "quotedeck=debug"
        } else {
            "quotedeck=warn"
        })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env();

    let result = match cli.command {
        // No subcommand → launch the interactive session
        None => cli::session::run(&config).await,

        Some(Commands::Quote) => cli::quote_cmd::run(&config).await,
        Some(Commands::Fetch { page, wait }) => cli::fetch_cmd::run(&config, page, wait).await,
        Some(Commands::History { index }) => cli::history_cmd::run(&config, index).await,
        Some(Commands::Export { dir, copy, preview }) => {
            cli::export_cmd::run(&config, dir, copy, preview).await
        }
        Some(Commands::Copy { image }) => cli::copy_cmd::run(&config, image).await,
        Some(Commands::Share { image }) => cli::share_cmd::run(&config, image).await,
        Some(Commands::Status) => cli::status_cmd::run(&config),
        Some(Commands::Cache { action }) => cli::cache_cmd::run(&config, action),
        Some(Commands::Doctor) => cli::doctor::run(&config).await,
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "quotedeck", &mut std::io::stdout());
            Ok(())
        }
    };

    // Consistent exit codes: 0=success, 1=error
    if let Err(e) = &result {
        if !cli::output::is_quiet() && !cli::output::is_json() {
            eprintln!("  Error: {e:#}");
        }
        if cli::output::is_json() {
            cli::output::print_json(&serde_json::json!({
                "error": true,
                "message": format!("{e:#}"),
            }));
        }
        std::process::exit(1);
    }

    result
}
