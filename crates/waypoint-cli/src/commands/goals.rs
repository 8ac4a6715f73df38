//! Goal command implementations

use anyhow::{Context, Result};
use chrono::NaiveDate;
use waypoint_core::{format_goal_value, Database, GoalStatus, NewGoal, TargetType};

use super::truncate;

/// Arguments for `goals add`
pub struct GoalArgs {
    pub title: String,
    pub target_type: TargetType,
    pub target: Option<f64>,
    pub unit: String,
    pub category: Option<String>,
    pub current: f64,
    pub start: Option<NaiveDate>,
    pub deadline: Option<NaiveDate>,
}

pub fn cmd_goals_list(db: &Database, include_inactive: bool) -> Result<()> {
    let goals = db.list_goals(include_inactive)?;

    if goals.is_empty() {
        println!("No goals yet. Add one with:");
        println!("  waypoint goals add \"Emergency fund\" --target 10000 --unit '$'");
        return Ok(());
    }

    println!();
    println!("🎯 Goals");
    println!("   ─────────────────────────────────────────────────────────────");

    for goal in goals {
        let progress = match goal.target_value {
            Some(target) => format!(
                "{} / {}",
                format_goal_value(goal.current_value, &goal.unit),
                format_goal_value(target, &goal.unit)
            ),
            None => goal.target_type.to_string(),
        };
        let inactive = if goal.is_active { "" } else { " (inactive)" };

        println!(
            "   {:>4} │ {:<30} │ {:<12} │ {}{}",
            goal.id,
            truncate(&goal.title, 30),
            goal.status.as_str(),
            progress,
            inactive
        );
    }

    Ok(())
}

pub fn cmd_goals_add(db: &Database, args: GoalArgs) -> Result<i64> {
    let goal = NewGoal {
        title: args.title,
        category: args.category,
        target_type: args.target_type,
        target_value: args.target,
        current_value: args.current,
        unit: args.unit,
        start_date: Some(
            args.start
                .unwrap_or_else(|| chrono::Local::now().date_naive()),
        ),
        target_date: args.deadline,
    };

    let id = db.create_goal(&goal).context("Failed to create goal")?;

    // Seed the history so the first real update already yields a rate
    if goal.current_value > 0.0 {
        if let Some(start) = goal.start_date {
            db.record_progress(id, goal.current_value, start)?;
        }
    }

    println!("✅ Created goal #{}: {}", id, goal.title);
    Ok(id)
}

pub fn cmd_goals_show(db: &Database, id: i64) -> Result<()> {
    let goal = db.require_goal(id)?;
    let history = db.list_progress_history(id, 5)?;

    println!();
    println!("🎯 {} (#{})", goal.title, goal.id);
    println!("   ─────────────────────────────────────────────────────────────");
    if let Some(category) = &goal.category {
        println!("   Category:  {}", category);
    }
    println!("   Type:      {}", goal.target_type);
    println!("   Status:    {}", goal.status);
    println!(
        "   Current:   {}",
        format_goal_value(goal.current_value, &goal.unit)
    );
    if let Some(target) = goal.target_value {
        println!("   Target:    {}", format_goal_value(target, &goal.unit));
    }
    if let Some(start) = goal.start_date {
        println!("   Started:   {}", start);
    }
    if let Some(deadline) = goal.target_date {
        println!("   Deadline:  {}", deadline);
    }
    if !goal.is_active {
        println!("   ⚠️  Inactive");
    }

    if !history.is_empty() {
        println!();
        println!("   Recent progress:");
        for snapshot in history {
            println!(
                "   {} │ {}",
                snapshot.date,
                format_goal_value(snapshot.value, &goal.unit)
            );
        }
    }

    Ok(())
}

pub fn cmd_goals_status(db: &Database, id: i64, status: GoalStatus) -> Result<()> {
    db.update_goal_status(id, status)
        .with_context(|| format!("Failed to update goal {}", id))?;
    println!("✅ Goal #{} is now {}", id, status);
    Ok(())
}

pub fn cmd_goals_deactivate(db: &Database, id: i64) -> Result<()> {
    db.deactivate_goal(id)
        .with_context(|| format!("Failed to deactivate goal {}", id))?;
    println!("✅ Goal #{} deactivated (history kept)", id);
    Ok(())
}
