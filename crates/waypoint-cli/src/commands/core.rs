//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` - Shared utility to open the database
//! - `load_engine_config` / `analysis_context` - Engine setup for a run
//! - `cmd_init` - Initialize the database

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use waypoint_core::{AnalysisContext, Database, EngineConfig};

/// Open (or create) the database
pub fn open_db(db_path: &Path) -> Result<Database> {
    let path_str = db_path
        .to_str()
        .context("Database path must be valid UTF-8")?;
    Database::new(path_str).context("Failed to open database")
}

/// Load engine config from an explicit path, the default override, or built-in defaults
pub fn load_engine_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::from_path(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => EngineConfig::load().context("Failed to load engine config"),
    }
}

/// Build the evaluation context, defaulting to today's date
pub fn analysis_context(config_path: Option<&Path>, date: Option<NaiveDate>) -> Result<AnalysisContext> {
    let config = load_engine_config(config_path)?;
    Ok(match date {
        Some(date) => AnalysisContext::new(date, config),
        None => AnalysisContext::today(config),
    })
}

pub fn cmd_init(db_path: &Path) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    let db = open_db(db_path)?;
    let goals = db.list_goals(true)?;
    println!("   {} existing goals", goals.len());

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Add a goal: waypoint goals add \"House deposit\" --target 100000 --unit '$' --deadline 2027-01-01");
    println!("  2. Record progress: waypoint progress 1 25000");
    println!("  3. See where you're heading: waypoint insights");

    Ok(())
}
