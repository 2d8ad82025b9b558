//! Categorizer command implementation

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use hearth_core::{Categorizer, KeywordOverrides};
use serde_json::json;

use super::print_json;

/// Read a keyword overrides file
pub fn load_overrides(path: &Path) -> Result<KeywordOverrides> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read overrides {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse overrides {}", path.display()))
}

pub fn cmd_categorize(name: &str, overrides: Option<&Path>, json: bool) -> Result<()> {
    let overrides = match overrides {
        Some(path) => load_overrides(path)?,
        None => KeywordOverrides::default(),
    };
    let categorizer = Categorizer::new(&overrides).context("Failed to build categorizer")?;

    let matched = categorizer.find_match(name);
    let category = categorizer.categorize(name);

    if json {
        return print_json(&json!({
            "name": name,
            "category": category,
            "keyword": matched,
        }));
    }

    match matched {
        Some(m) => {
            let origin = if m.user_defined { "your keyword" } else { "keyword" };
            println!(
                "🏷️  \"{}\" → {} ({} \"{}\")",
                name,
                category.label(),
                origin,
                m.keyword
            );
        }
        None => println!("🏷️  \"{}\" → {} (no keyword matched)", name, category.label()),
    }

    Ok(())
}
