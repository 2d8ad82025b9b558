//! Shared command utilities
//!
//! This module contains:
//! - `Session` - The loaded snapshot, reference date and engine config
//! - `resolve_today` / `resolve_month` - Date argument parsing
//! - `print_json` - JSON output for `--json`

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use hearth_core::{EngineConfig, LedgerSnapshot, MonthKey};
use serde::Serialize;
use tracing::debug;

/// Everything a snapshot-based command needs
pub struct Session {
    pub ledger: LedgerSnapshot,
    pub today: NaiveDate,
    pub config: EngineConfig,
    pub json: bool,
}

impl Session {
    pub fn load(
        snapshot: &Path,
        today: Option<&str>,
        config: Option<&Path>,
        json: bool,
    ) -> Result<Self> {
        let ledger = load_ledger(snapshot)?;
        let today = resolve_today(today)?;
        let config = load_config(config)?;

        // Issues are warned about once, by the dashboard
        debug!(
            snapshot = %snapshot.display(),
            today = %today,
            obligations = ledger.obligations.len(),
            expenses = ledger.expenses.len(),
            issues = ledger.validate().len(),
            "Loaded session"
        );

        Ok(Self {
            ledger,
            today,
            config,
            json,
        })
    }

    /// `--month` if given, else the month containing today
    pub fn month(&self, month: Option<&str>) -> Result<MonthKey> {
        resolve_month(month, self.today)
    }
}

/// Read and parse a JSON ledger snapshot
pub fn load_ledger(path: &Path) -> Result<LedgerSnapshot> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse snapshot {}", path.display()))
}

/// Explicit config file, or the default override/embedded config
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            EngineConfig::from_path(path)
                .with_context(|| format!("Failed to load config {}", path.display()))
        }
        None => EngineConfig::load().context("Failed to load config"),
    }
}

pub fn resolve_today(today: Option<&str>) -> Result<NaiveDate> {
    match today {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .context("Invalid --today date format (use YYYY-MM-DD)"),
        None => Ok(Local::now().date_naive()),
    }
}

pub fn resolve_month(month: Option<&str>, today: NaiveDate) -> Result<MonthKey> {
    match month {
        Some(s) => s
            .parse::<MonthKey>()
            .context("Invalid --month format (use YYYY-MM)"),
        None => Ok(MonthKey::from_date(today)),
    }
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Signed percentage for display, e.g. "+12.5%"
pub fn signed_pct(value: f64) -> String {
    format!("{:+.1}%", value)
}
