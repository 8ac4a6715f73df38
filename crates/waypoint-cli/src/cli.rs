//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use waypoint_core::{GoalStatus, TargetType};

/// Waypoint - See where your goals are heading
#[derive(Parser)]
#[command(name = "waypoint")]
#[command(about = "Goal progress projections and insights", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "waypoint.db", global = true)]
    pub db: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// User whose drift settings apply
    #[arg(long, default_value = "local", global = true)]
    pub user: String,

    /// Engine config override (defaults to ~/.local/share/waypoint/config/engine.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Manage goals
    Goals {
        #[command(subcommand)]
        action: Option<GoalsAction>,
    },

    /// Record a goal's current value
    Progress {
        /// Goal ID
        id: i64,

        /// New value
        value: f64,

        /// Date of the reading (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Show a goal's snapshot history
    History {
        /// Goal ID
        id: i64,

        /// Maximum snapshots to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show projections and insights for all active goals
    Insights {
        /// Evaluation date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Output the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the projection for one goal
    Project {
        /// Goal ID
        id: i64,

        /// Evaluation date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Simulate an extra monthly contribution
    WhatIf {
        /// Goal ID
        id: i64,

        /// Extra amount per month
        #[arg(short, long, allow_negative_numbers = true)]
        monthly: f64,

        /// Evaluation date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Show or change drift thresholds
    Settings {
        #[command(subcommand)]
        action: Option<SettingsAction>,
    },

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },
}

#[derive(Subcommand)]
pub enum GoalsAction {
    /// List goals (active only by default)
    List {
        /// Include deactivated goals
        #[arg(long)]
        all: bool,
    },

    /// Create a goal
    Add {
        /// Goal title
        title: String,

        /// Target type: numeric, boolean, milestone
        #[arg(long = "type", default_value = "numeric")]
        target_type: TargetType,

        /// Target value (required for numeric goals)
        #[arg(short, long)]
        target: Option<f64>,

        /// Display unit, e.g. "$", "km", "%"
        #[arg(short, long, default_value = "")]
        unit: String,

        /// Category
        #[arg(short, long)]
        category: Option<String>,

        /// Starting value
        #[arg(long, default_value = "0")]
        current: f64,

        /// Start date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        start: Option<NaiveDate>,

        /// Deadline (YYYY-MM-DD)
        #[arg(long)]
        deadline: Option<NaiveDate>,
    },

    /// Show a goal with its recent snapshots
    Show {
        /// Goal ID
        id: i64,
    },

    /// Change a goal's status
    Status {
        /// Goal ID
        id: i64,

        /// New status: not_started, in_progress, on_track, completed, paused
        status: GoalStatus,
    },

    /// Deactivate a goal (keeps its history)
    Deactivate {
        /// Goal ID
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Show the current thresholds
    Show,

    /// Set the thresholds (fractions, e.g. 0.10 = 10 points behind pace)
    Set {
        /// Warning threshold
        #[arg(long)]
        warning: f64,

        /// Critical threshold
        #[arg(long)]
        critical: f64,
    },
}
