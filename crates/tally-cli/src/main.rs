//! Tally CLI - Personal finance analytics
//!
//! Usage:
//!   tally summary --month 2024-03     Monthly totals and category breakdown
//!   tally tips                        Saving tips for the current month
//!   tally trend --months 6            Income vs expenses, trailing months
//!   tally check                       Validate the transaction snapshot

mod cli;
mod commands;


use std::io::stdout;

use anyhow::Result;
use clap::Parser;
use tally_core::{Advisor, MemoryStore};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact().with_writer(std::io::stderr))
        .init();

    match &cli.command {
        Commands::Check => commands::cmd_check(&cli.data),
        Commands::Summary { month } => {
            let (store, user, advisor) = open_report(&cli)?;
            let period = commands::resolve_month(month.as_deref())?;
            commands::cmd_summary(&mut stdout(), &store, &user, period, &advisor, cli.json)
        }
        Commands::Tips { month } => {
            let (store, user, advisor) = open_report(&cli)?;
            let period = commands::resolve_month(month.as_deref())?;
            commands::cmd_tips(&mut stdout(), &store, &user, period, &advisor, cli.json)
        }
        Commands::Trend { month, months } => {
            let (store, user, advisor) = open_report(&cli)?;
            let period = commands::resolve_month(month.as_deref())?;
            commands::cmd_trend(&mut stdout(), &store, &user, period, *months, &advisor, cli.json)
        }
    }
}

/// Snapshot, selected user and configured advisor shared by every report
fn open_report(cli: &Cli) -> Result<(MemoryStore, String, Advisor)> {
    let store = commands::open_store(&cli.data)?;
    let user = commands::resolve_user(&store, cli.user.as_deref())?;
    let advisor = commands::load_advisor(cli.config.as_deref())?;
    Ok((store, user, advisor))
}
