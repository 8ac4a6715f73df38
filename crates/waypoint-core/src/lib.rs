//! Waypoint Core Library
//!
//! Shared functionality for the Waypoint goal tracker:
//! - Goal, snapshot and drift-setting models
//! - Projection and insight engine
//! - SQLite storage with connection pooling and migrations
//! - Engine configuration with embedded defaults

pub mod config;
pub mod db;
pub mod error;
pub mod format;
pub mod insights;
pub mod models;
pub mod store;

pub use config::EngineConfig;
pub use db::Database;
pub use error::{Error, Result};
pub use format::format_goal_value;
pub use insights::{
    calculate_what_if, generate_insights_summary, AnalysisContext, InsightEngine, InsightsSummary,
    Projection, WhatIfResult,
};
pub use models::{DriftSettings, Goal, GoalStatus, NewGoal, ProgressSnapshot, TargetType};
pub use store::GoalStore;
