//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Hearth - Household finance dashboard
#[derive(Parser)]
#[command(name = "hearth")]
#[command(about = "Household finance analytics over a ledger snapshot", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Ledger snapshot (JSON)
    #[arg(long, default_value = "ledger.json", global = true)]
    pub snapshot: PathBuf,

    /// Date to treat as today (YYYY-MM-DD, defaults to the local date)
    #[arg(long, global = true)]
    pub today: Option<String>,

    /// Engine config file (TOML)
    ///
    /// Defaults to ~/.local/share/hearth/config/hearth.toml if present,
    /// else the built-in config.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print JSON instead of tables
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
    /// Monthly spending analytics and insights
    Analytics {
        /// Month to analyze (YYYY-MM, defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,

        /// Months of history to show (at most 120)
        #[arg(short, long)]
        lookback: Option<u32>,

        /// Ask the AI summarizer for a narrative
        ///
        /// Configure with AI_BACKEND and OPENAI_COMPATIBLE_HOST. Falls back
        /// to a local summary when unavailable.
        #[arg(long)]
        ai: bool,
    },

    /// Upcoming debit orders for this cycle
    Upcoming {
        /// Day salary lands, used for obligations with an invalid debit day
        #[arg(long)]
        payday: Option<u32>,
    },

    /// Early-payment discount status for a levy
    Levy {
        /// Obligation ID or name
        obligation: String,
    },

    /// Debts in payoff order with projections
    Debts,

    /// Months to pay off a balance
    Payoff {
        /// Outstanding balance
        #[arg(long)]
        balance: f64,

        /// Monthly payment
        #[arg(long)]
        payment: f64,

        /// Annual interest rate in percent
        #[arg(long, default_value = "0")]
        rate: f64,
    },

    /// Income, costs and free cash flow for a month
    Cashflow {
        /// Month (YYYY-MM, defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Budget usage for a month
    Budgets {
        /// Month (YYYY-MM, defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Suggest a category for an expense name
    Categorize {
        /// Expense name, e.g. "Woolworths Sandton"
        name: String,

        /// Keyword overrides file (JSON with "additions" and "removals")
        #[arg(long)]
        overrides: Option<PathBuf>,
    },
}
