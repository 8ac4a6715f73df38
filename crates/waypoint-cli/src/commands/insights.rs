//! Insight, projection and what-if commands

use anyhow::{Context, Result};
use waypoint_core::insights::{DriftSeverity, Projection, Severity};
use waypoint_core::{
    calculate_what_if, format_goal_value, AnalysisContext, Database, InsightEngine,
};

use super::truncate;

pub fn cmd_insights(db: &Database, user: &str, ctx: &AnalysisContext, json: bool) -> Result<()> {
    let summary = InsightEngine::new()
        .summarize_from_store(db, user, ctx)
        .context("Failed to generate insights")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    if summary.total_goals == 0 {
        println!("No active goals. Add one with:");
        println!("  waypoint goals add \"Emergency fund\" --target 10000 --unit '$'");
        return Ok(());
    }

    println!();
    println!("🧭 Goal Insights for {}", summary.generated_for);
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   {} goals: {} on track, {} at risk, {} critical, {} completed",
        summary.total_goals, summary.on_track, summary.at_risk, summary.critical, summary.completed
    );

    if !summary.insights.is_empty() {
        println!();
        for insight in &summary.insights {
            println!(
                "   {} {} - {}",
                severity_icon(insight.severity),
                insight.title,
                insight.description
            );
            if let Some(action) = &insight.action {
                println!("      → {} (goal #{})", action.label, insight.goal_id);
            }
        }
    }

    println!();
    for projection in &summary.projections {
        println!(
            "   {} {:<30} {:>5.1}%  {}",
            drift_icon(projection.drift),
            truncate(&projection.goal_title, 30),
            projection.display_percent(),
            completion_label(projection)
        );
    }

    Ok(())
}

pub fn cmd_project(db: &Database, id: i64, user: &str, ctx: &AnalysisContext) -> Result<()> {
    let goal = db.require_goal(id)?;
    let analysis = InsightEngine::new()
        .analyze_from_store(db, &goal, user, ctx)
        .with_context(|| format!("Failed to project goal {}", id))?;
    let p = &analysis.projection;

    println!();
    println!("🔭 {} as of {}", p.goal_title, ctx.today);
    println!("   ─────────────────────────────────────────────────────────────");

    if !p.projectable {
        println!("   {:.0}% complete (no rate-based forecast for this goal)", p.display_percent());
        return Ok(());
    }

    println!("   Progress:   {:.1}%", p.percent_complete);
    println!(
        "   Pace:       {} / month ({})",
        format_goal_value(p.progress_rate_monthly, &p.unit),
        p.trend
    );
    println!("   Drift:      {} {}", drift_icon(p.drift), p.drift);
    println!("   Completion: {}", completion_label(p));
    if let Some(days) = p.days_remaining {
        if days >= 0 {
            println!("   Deadline:   {} days left", days);
        } else {
            println!("   Deadline:   {} days overdue", -days);
        }
    }
    if let Some(shortfall) = p.shortfall.filter(|s| *s > 0.0) {
        println!("   Shortfall:  {}", format_goal_value(shortfall, &p.unit));
    }
    if let Some(required) = p.required_rate_monthly {
        println!(
            "   Needed:     {} / month",
            format_goal_value(required, &p.unit)
        );
    }

    for insight in &analysis.insights {
        println!();
        println!(
            "   {} {} - {}",
            severity_icon(insight.severity),
            insight.title,
            insight.description
        );
    }

    Ok(())
}

pub fn cmd_what_if(
    db: &Database,
    id: i64,
    monthly: f64,
    user: &str,
    ctx: &AnalysisContext,
) -> Result<()> {
    let goal = db.require_goal(id)?;
    let analysis = InsightEngine::new()
        .analyze_from_store(db, &goal, user, ctx)
        .with_context(|| format!("Failed to project goal {}", id))?;
    let p = &analysis.projection;

    let result = calculate_what_if(p, monthly, ctx.today);

    println!();
    println!(
        "🔮 What if you added {} per month to {}?",
        format_goal_value(monthly, &p.unit),
        p.goal_title
    );
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Now:      {}", completion_label(p));
    match result.new_completion_date {
        Some(date) => println!("   Then:     {}", date),
        None => println!("   Then:     no projected completion"),
    }
    println!(
        "   Pace:     {} / month",
        format_goal_value(result.new_rate * waypoint_core::insights::DAYS_PER_MONTH, &p.unit)
    );
    if result.days_saved > 0 {
        println!("   ⏩ {} days sooner", result.days_saved);
    }

    Ok(())
}

fn severity_icon(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical => "🔴",
        Severity::Warning => "🟠",
        Severity::Info => "🔵",
        Severity::Success => "🟢",
    }
}

fn drift_icon(drift: DriftSeverity) -> &'static str {
    match drift {
        DriftSeverity::None => "✅",
        DriftSeverity::Warning => "⚠️ ",
        DriftSeverity::Critical => "🚨",
    }
}

fn completion_label(projection: &Projection) -> String {
    match projection.estimated_completion_date {
        Some(date) if projection.percent_complete >= 100.0 => format!("reached {}", date),
        Some(date) => format!("on pace for {}", date),
        None if projection.projectable => "no completion at current pace".to_string(),
        None => "-".to_string(),
    }
}
