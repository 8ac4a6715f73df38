//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use std::io::Write;

use chrono::NaiveDate;
use waypoint_core::{AnalysisContext, Database, DriftSettings, GoalStatus, TargetType};

use crate::commands::{self, truncate, GoalArgs};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn setup_test_db() -> Database {
    Database::in_memory().unwrap()
}

fn house_args() -> GoalArgs {
    GoalArgs {
        title: "House deposit".to_string(),
        target_type: TargetType::Numeric,
        target: Some(1_000_000.0),
        unit: "$".to_string(),
        category: Some("Housing".to_string()),
        current: 200_000.0,
        start: Some(date(2024, 1, 1)),
        deadline: Some(date(2025, 1, 1)),
    }
}

// ========== Goal Command Tests ==========

#[test]
fn test_cmd_goals_add_seeds_history() {
    let db = setup_test_db();
    let id = commands::cmd_goals_add(&db, house_args()).unwrap();

    let goal = db.require_goal(id).unwrap();
    assert_eq!(goal.current_value, 200_000.0);
    assert_eq!(goal.status, GoalStatus::InProgress);

    let history = db.list_progress_history(id, 10).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].date, date(2024, 1, 1));
}

#[test]
fn test_cmd_goals_add_without_current_has_no_history() {
    let db = setup_test_db();
    let mut args = house_args();
    args.current = 0.0;
    let id = commands::cmd_goals_add(&db, args).unwrap();

    assert!(db.list_progress_history(id, 10).unwrap().is_empty());
    assert_eq!(db.require_goal(id).unwrap().status, GoalStatus::NotStarted);
}

#[test]
fn test_cmd_goals_add_rejects_missing_target() {
    let db = setup_test_db();
    let mut args = house_args();
    args.target = None;
    assert!(commands::cmd_goals_add(&db, args).is_err());
}

#[test]
fn test_cmd_goals_list_and_show() {
    let db = setup_test_db();
    assert!(commands::cmd_goals_list(&db, false).is_ok());

    let id = commands::cmd_goals_add(&db, house_args()).unwrap();
    assert!(commands::cmd_goals_list(&db, true).is_ok());
    assert!(commands::cmd_goals_show(&db, id).is_ok());
    assert!(commands::cmd_goals_show(&db, id + 1).is_err());
}

#[test]
fn test_cmd_goals_status_and_deactivate() {
    let db = setup_test_db();
    let id = commands::cmd_goals_add(&db, house_args()).unwrap();

    commands::cmd_goals_status(&db, id, GoalStatus::Paused).unwrap();
    assert_eq!(db.require_goal(id).unwrap().status, GoalStatus::Paused);

    commands::cmd_goals_deactivate(&db, id).unwrap();
    assert!(!db.require_goal(id).unwrap().is_active);

    assert!(commands::cmd_goals_status(&db, 999, GoalStatus::Completed).is_err());
}

// ========== Progress Command Tests ==========

#[test]
fn test_cmd_progress_and_history() {
    let db = setup_test_db();
    let id = commands::cmd_goals_add(&db, house_args()).unwrap();

    commands::cmd_progress(&db, id, 250_000.0, Some(date(2024, 7, 1))).unwrap();
    assert_eq!(db.require_goal(id).unwrap().current_value, 250_000.0);
    assert!(commands::cmd_history(&db, id, 20).is_ok());

    // Backdated correction is recorded without moving the current value
    commands::cmd_progress(&db, id, 220_000.0, Some(date(2024, 3, 1))).unwrap();
    assert_eq!(db.require_goal(id).unwrap().current_value, 250_000.0);
    assert_eq!(db.list_progress_history(id, 10).unwrap().len(), 3);

    assert!(commands::cmd_progress(&db, id, -1.0, Some(date(2024, 7, 2))).is_err());
    assert!(commands::cmd_progress(&db, 999, 1.0, None).is_err());
}

// ========== Insight Command Tests ==========

fn scenario_db() -> (Database, i64) {
    let db = setup_test_db();
    let id = commands::cmd_goals_add(&db, house_args()).unwrap();
    commands::cmd_progress(&db, id, 250_000.0, Some(date(2024, 7, 1))).unwrap();
    (db, id)
}

#[test]
fn test_cmd_insights() {
    let (db, _) = scenario_db();
    let ctx = AnalysisContext::for_date(date(2024, 7, 1));

    assert!(commands::cmd_insights(&db, "local", &ctx, false).is_ok());
    assert!(commands::cmd_insights(&db, "local", &ctx, true).is_ok());

    let empty = setup_test_db();
    assert!(commands::cmd_insights(&empty, "local", &ctx, false).is_ok());
}

#[test]
fn test_cmd_project_and_what_if() {
    let (db, id) = scenario_db();
    let ctx = AnalysisContext::for_date(date(2024, 7, 1));

    assert!(commands::cmd_project(&db, id, "local", &ctx).is_ok());
    assert!(commands::cmd_what_if(&db, id, 10_000.0, "local", &ctx).is_ok());
    assert!(commands::cmd_project(&db, id + 1, "local", &ctx).is_err());

    // Simulation leaves the store untouched
    assert_eq!(db.list_progress_history(id, 10).unwrap().len(), 2);
}

// ========== Settings Command Tests ==========

#[test]
fn test_cmd_settings() {
    let db = setup_test_db();
    let defaults = DriftSettings::default();
    assert!(commands::cmd_settings_show(&db, "local", &defaults).is_ok());

    commands::cmd_settings_set(&db, "local", 0.05, 0.2).unwrap();
    assert_eq!(
        db.drift_settings_for("local", &defaults).unwrap(),
        DriftSettings::new(0.05, 0.2)
    );
    assert!(commands::cmd_settings_show(&db, "local", &defaults).is_ok());

    assert!(commands::cmd_settings_set(&db, "local", 0.3, 0.2).is_err());
}

// ========== Utility Tests ==========

#[test]
fn test_load_engine_config_from_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[insights]\nmax_insights = 4").unwrap();

    let config = commands::load_engine_config(Some(file.path())).unwrap();
    assert_eq!(config.max_insights, 4);

    let ctx = commands::analysis_context(Some(file.path()), Some(date(2024, 2, 1))).unwrap();
    assert_eq!(ctx.today, date(2024, 2, 1));
    assert_eq!(ctx.config.max_insights, 4);
}

#[test]
fn test_load_engine_config_rejects_invalid() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[drift]\nwarning_threshold = 0.9").unwrap();
    assert!(commands::load_engine_config(Some(file.path())).is_err());
}

#[test]
fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("a much longer goal title", 10), "a much ...");
    assert_eq!(truncate("€€€€€€€€€€€€", 5), "€€...");
}
