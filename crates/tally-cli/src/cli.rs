//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Tally - Monthly income/expense analytics and saving tips
#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Personal finance tracker: monthly analytics and saving tips", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Transaction snapshot (JSON with "incomes" and "expenses" arrays)
    #[arg(long, default_value = "tally.json", global = true)]
    pub data: PathBuf,

    /// Only analyse this user's records
    ///
    /// Required when the snapshot holds records for more than one user.
    #[arg(long, global = true)]
    pub user: Option<String>,

    /// Advisor config file (defaults to ~/.local/share/tally/config/advisor.toml,
    /// then built-in defaults)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show totals, savings and category breakdown for a month
    Summary {
        /// Month as YYYY-MM (defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Show saving tips for a month
    Tips {
        /// Month as YYYY-MM (defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Show income vs expenses for the trailing months
    Trend {
        /// Last month of the trend as YYYY-MM (defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,

        /// Number of months to show
        #[arg(short = 'n', long, default_value = "6")]
        months: usize,
    },

    /// Validate the snapshot and show record counts per user
    Check,
}
