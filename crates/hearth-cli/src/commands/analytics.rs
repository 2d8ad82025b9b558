//! Spending analytics command

use anyhow::Result;
use hearth_core::ai::{AIClient, NarrativeOutcome, NarrativeSource};
use hearth_core::analytics::{AnalyticsQuery, SpendingAnalytics};
use hearth_core::insights::InsightKind;
use hearth_core::Dashboard;
use serde_json::json;

use super::{print_json, signed_pct, Session};

/// Widest history bar, in characters
const BAR_WIDTH: usize = 30;

pub async fn cmd_analytics(
    session: &Session,
    month: Option<&str>,
    lookback: Option<u32>,
    ai: bool,
) -> Result<()> {
    let month = session.month(month)?;
    let query = AnalyticsQuery::new(month)
        .with_lookback(lookback.unwrap_or(session.config.lookback_months));

    // The local report is complete before the narrative is requested
    let report = Dashboard::build(&session.ledger, query, session.today, &session.config);

    let narrative = if ai {
        let client = AIClient::from_env();
        Some(report.narrate(client.as_ref(), session.config.ai_timeout).await)
    } else {
        None
    };

    if session.json {
        return print_json(&json!({
            "analytics": report.analytics,
            "narrative": narrative,
        }));
    }

    print_analytics(&report.analytics);
    if let Some(narrative) = &narrative {
        print_narrative(narrative);
    }

    Ok(())
}

fn print_analytics(analytics: &SpendingAnalytics) {
    let current = &analytics.current_month;

    println!();
    println!("📊 Spending Analytics: {}", current.month);
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   This month:  {:>12.2}  ({} expenses)",
        current.total, current.transaction_count
    );
    println!(
        "   Last month:  {:>12.2}",
        analytics.previous_month.total
    );
    if analytics.has_previous_data {
        println!(
            "   Change:      {:>12}",
            signed_pct(analytics.month_over_month_change)
        );
    } else {
        println!("   Change:      {:>12}  (no spending last month)", "n/a");
    }
    println!(
        "   Daily avg:   {:>12.2}  over {} days",
        analytics.avg_daily_spending, analytics.elapsed_days
    );

    if !analytics.top_categories.is_empty() {
        println!();
        println!("   Top categories");
        for share in &analytics.top_categories {
            println!(
                "   {:16} │ {:>10.2} │ {:>5.1}% │ {:>3}",
                share.category.label(),
                share.amount,
                share.percentage,
                share.transaction_count
            );
        }
    }

    let peak = analytics
        .history
        .iter()
        .map(|h| h.total)
        .fold(0.0_f64, f64::max);
    println!();
    println!("   History");
    for entry in &analytics.history {
        let width = if peak > 0.0 {
            ((entry.total / peak) * BAR_WIDTH as f64).round() as usize
        } else {
            0
        };
        println!(
            "   {} │ {:>10.2} │ {}",
            entry.month,
            entry.total,
            "█".repeat(width)
        );
    }

    if !analytics.insights.is_empty() {
        println!();
        println!("   Insights");
        for insight in &analytics.insights {
            let icon = match insight.kind {
                InsightKind::Increase => "📈",
                InsightKind::Decrease => "📉",
                InsightKind::Info => "💡",
                InsightKind::Warning => "⚠️ ",
            };
            println!("   {} {}", icon, insight.message);
        }
    }
}

fn print_narrative(narrative: &NarrativeOutcome) {
    let source = match &narrative.source {
        NarrativeSource::Ai { model } => format!("AI ({})", model),
        NarrativeSource::Fallback { reason } => format!("local summary ({})", reason.as_str()),
    };

    println!();
    println!("🤖 Summary [{}]", source);
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   {}", narrative.summary.summary);
    println!("   Trend: {}", narrative.summary.trend.as_str());

    for highlight in &narrative.summary.highlights {
        println!("   ✅ {}", highlight);
    }
    for recommendation in &narrative.summary.recommendations {
        println!("   👉 {}", recommendation);
    }
}
