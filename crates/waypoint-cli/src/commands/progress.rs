//! Progress recording and history commands

use anyhow::{Context, Result};
use chrono::NaiveDate;
use waypoint_core::{format_goal_value, Database};

pub fn cmd_progress(db: &Database, id: i64, value: f64, date: Option<NaiveDate>) -> Result<()> {
    let goal = db.require_goal(id)?;
    let date = date.unwrap_or_else(|| chrono::Local::now().date_naive());

    db.record_progress(id, value, date)
        .with_context(|| format!("Failed to record progress for goal {}", id))?;

    let updated = db.require_goal(id)?;
    if updated.current_value != value {
        // Backdated entry; a newer snapshot still sets the current value
        println!(
            "✅ {}: {} recorded for {} (current value stays {})",
            goal.title,
            format_goal_value(value, &goal.unit),
            date,
            format_goal_value(updated.current_value, &goal.unit)
        );
        return Ok(());
    }

    let delta = value - goal.current_value;
    let sign = if delta >= 0.0 { "+" } else { "" };
    println!(
        "✅ {}: {} on {} ({}{})",
        goal.title,
        format_goal_value(value, &goal.unit),
        date,
        sign,
        format_goal_value(delta, &goal.unit)
    );
    Ok(())
}

pub fn cmd_history(db: &Database, id: i64, limit: usize) -> Result<()> {
    let goal = db.require_goal(id)?;
    let history = db.list_progress_history(id, limit)?;

    if history.is_empty() {
        println!("No progress recorded for {} yet. Record some with:", goal.title);
        println!("  waypoint progress {} <value>", id);
        return Ok(());
    }

    println!();
    println!("📈 {} - last {} snapshots", goal.title, history.len());
    println!("   ─────────────────────────────────────────────────────────────");

    for snapshot in history {
        println!(
            "   {} │ {:>16}",
            snapshot.date,
            format_goal_value(snapshot.value, &goal.unit)
        );
    }

    Ok(())
}
