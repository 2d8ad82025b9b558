//! Engine configuration
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a two-layer resolution:
//! 1. Check for override in data dir (~/.local/share/hearth/config/hearth.toml)
//! 2. Fall back to embedded defaults (compiled into binary)
//!
//! Keys missing from an override keep their built-in values.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::analytics::DEFAULT_LOOKBACK_MONTHS;
use crate::error::Result;
use crate::insights::{InsightGenerator, InsightThresholds};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/hearth.toml");

/// Default time allowed for the AI summary
pub const DEFAULT_AI_TIMEOUT_SECS: u64 = 20;

/// Default day of month salary lands
pub const DEFAULT_PAYDAY: u32 = 25;

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Months in the analytics history window
    pub lookback_months: u32,
    /// Debit day used for obligations whose own day is out of range
    pub payday: u32,
    pub insights: InsightThresholds,
    /// Upper bound on the AI summary call
    pub ai_timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            lookback_months: DEFAULT_LOOKBACK_MONTHS,
            payday: DEFAULT_PAYDAY,
            insights: InsightThresholds::default(),
            ai_timeout: Duration::from_secs(DEFAULT_AI_TIMEOUT_SECS),
        }
    }
}

impl EngineConfig {
    /// Load from the default override location, else the embedded config
    pub fn load() -> Result<Self> {
        match default_config_path() {
            Some(path) if path.exists() => Self::from_path(&path),
            _ => Self::parse(DEFAULT_CONFIG),
        }
    }

    /// Load from an explicit file, falling back to the embedded config when
    /// the file doesn't exist
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Self::parse(DEFAULT_CONFIG);
        }

        let content = fs::read_to_string(path)?;
        debug!(path = %path.display(), "Loaded config override");
        Self::parse(&content)
    }

    /// Parse TOML over the built-in defaults
    pub fn parse(content: &str) -> Result<Self> {
        let raw: RawConfig = toml::from_str(content)?;
        let mut config = Self::default();

        if let Some(analytics) = raw.analytics {
            if let Some(months) = analytics.lookback_months {
                config.lookback_months = months;
            }
        }

        if let Some(payday) = raw.schedule.and_then(|s| s.payday) {
            config.payday = payday;
        }

        if let Some(insights) = raw.insights {
            let thresholds = &mut config.insights;
            if let Some(pct) = insights.trend_change_pct {
                thresholds.trend_change_pct = pct;
            }
            if let Some(pct) = insights.category_share_pct {
                thresholds.category_share_pct = pct;
            }
            if let Some(pct) = insights.category_change_pct {
                thresholds.category_change_pct = pct;
            }
            if let Some(amount) = insights.category_min_amount {
                thresholds.category_min_amount = amount;
            }
            if let Some(max) = insights.max_category_insights {
                thresholds.max_category_insights = max;
            }
        }

        if let Some(ai) = raw.ai {
            if let Some(secs) = ai.timeout_secs {
                config.ai_timeout = Duration::from_secs(secs);
            }
        }

        Ok(config)
    }

    /// Insight generator with the built-in rules and these thresholds
    pub fn insight_generator(&self) -> InsightGenerator {
        InsightGenerator::new(self.insights.clone())
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("hearth").join("config").join("hearth.toml"))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    analytics: Option<RawAnalytics>,
    schedule: Option<RawSchedule>,
    insights: Option<RawInsights>,
    ai: Option<RawAi>,
}

#[derive(Debug, Deserialize)]
struct RawAnalytics {
    lookback_months: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct RawSchedule {
    payday: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct RawInsights {
    trend_change_pct: Option<f64>,
    category_share_pct: Option<f64>,
    category_change_pct: Option<f64>,
    category_min_amount: Option<f64>,
    max_category_insights: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct RawAi {
    timeout_secs: Option<u64>,
}
