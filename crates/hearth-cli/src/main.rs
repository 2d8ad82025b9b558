//! Hearth CLI - Household finance dashboard
//!
//! Usage:
//!   hearth analytics --month 2025-03     Spending analytics and insights
//!   hearth upcoming                      Debit orders due this cycle
//!   hearth levy levy                     Levy discount status
//!   hearth payoff --balance 45000 --payment 2500 --rate 11

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;
use commands::Session;

#[tokio::main]
async fn main() -> Result<()> {
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
        .with(fmt::layer().with_target(false).compact())
        .init();

    let session = || {
        Session::load(
            &cli.snapshot,
            cli.today.as_deref(),
            cli.config.as_deref(),
            cli.json,
        )
    };

    match &cli.command {
        Commands::Analytics {
            month,
            lookback,
            ai,
        } => commands::cmd_analytics(&session()?, month.as_deref(), *lookback, *ai).await,
        Commands::Upcoming { payday } => commands::cmd_upcoming(&session()?, *payday),
        Commands::Levy { obligation } => commands::cmd_levy(&session()?, obligation),
        Commands::Debts => commands::cmd_debts(&session()?),
        Commands::Payoff {
            balance,
            payment,
            rate,
        } => commands::cmd_payoff(*balance, *payment, *rate, cli.json),
        Commands::Cashflow { month } => commands::cmd_cashflow(&session()?, month.as_deref()),
        Commands::Budgets { month } => commands::cmd_budgets(&session()?, month.as_deref()),
        Commands::Categorize { name, overrides } => {
            commands::cmd_categorize(name, overrides.as_deref(), cli.json)
        }
    }
}
