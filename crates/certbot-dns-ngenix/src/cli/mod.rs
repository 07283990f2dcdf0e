//! CLI argument parsing and command dispatch.

pub mod args;
pub mod commands;

use anyhow::Result;
use args::{Cli, Commands};
use clap::Parser;
use tracing::error;

use crate::config::{Config, Settings};
use crate::logging;

/// Run the CLI application.
pub async fn run() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // Cleanup must not fail the Certbot run, not even on bad arguments
        Err(e) if e.use_stderr() && is_cleanup(std::env::args()) => {
            let _ = e.print();
            return Ok(());
        }
        Err(e) => e.exit(),
    };
    logging::init(cli.verbose);

    let settings = Config::load(cli.config.as_deref()).and_then(|config| Settings::resolve(&cli, config));

    match cli.command {
        Commands::Perform(args) => commands::perform::execute(settings?, args).await,
        Commands::Cleanup(args) => match settings {
            Ok(settings) => commands::cleanup::execute(settings, args).await,
            Err(e) => {
                // Cleanup must not fail the Certbot run
                error!("{e:#}");
                Ok(())
            }
        },
    }
}

/// Returns true if the command line names the cleanup hook
fn is_cleanup(args: impl IntoIterator<Item = String>) -> bool {
    args.into_iter().skip(1).any(|arg| arg == "cleanup")
}
