//! Waypoint CLI - Goal progress projections and insights
//!
//! Usage:
//!   waypoint init                         Initialize database
//!   waypoint goals add "House" -t 100000  Create a goal
//!   waypoint progress 1 25000             Record progress
//!   waypoint insights                     Projections and insights
//!   waypoint serve --port 3000            Start web server

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db),
        Commands::Goals { action } => {
            let db = commands::open_db(&cli.db)?;
            match action {
                None => commands::cmd_goals_list(&db, false),
                Some(GoalsAction::List { all }) => commands::cmd_goals_list(&db, all),
                Some(GoalsAction::Add {
                    title,
                    target_type,
                    target,
                    unit,
                    category,
                    current,
                    start,
                    deadline,
                }) => commands::cmd_goals_add(
                    &db,
                    commands::GoalArgs {
                        title,
                        target_type,
                        target,
                        unit,
                        category,
                        current,
                        start,
                        deadline,
                    },
                )
                .map(|_| ()),
                Some(GoalsAction::Show { id }) => commands::cmd_goals_show(&db, id),
                Some(GoalsAction::Status { id, status }) => {
                    commands::cmd_goals_status(&db, id, status)
                }
                Some(GoalsAction::Deactivate { id }) => commands::cmd_goals_deactivate(&db, id),
            }
        }
        Commands::Progress { id, value, date } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_progress(&db, id, value, date)
        }
        Commands::History { id, limit } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_history(&db, id, limit)
        }
        Commands::Insights { date, json } => {
            let db = commands::open_db(&cli.db)?;
            let ctx = commands::analysis_context(config_path, date)?;
            commands::cmd_insights(&db, &cli.user, &ctx, json)
        }
        Commands::Project { id, date } => {
            let db = commands::open_db(&cli.db)?;
            let ctx = commands::analysis_context(config_path, date)?;
            commands::cmd_project(&db, id, &cli.user, &ctx)
        }
        Commands::WhatIf { id, monthly, date } => {
            let db = commands::open_db(&cli.db)?;
            let ctx = commands::analysis_context(config_path, date)?;
            commands::cmd_what_if(&db, id, monthly, &cli.user, &ctx)
        }
        Commands::Settings { action } => {
            let db = commands::open_db(&cli.db)?;
            match action {
                None | Some(SettingsAction::Show) => {
                    let config = commands::load_engine_config(config_path)?;
                    commands::cmd_settings_show(&db, &cli.user, &config.default_drift)
                }
                Some(SettingsAction::Set { warning, critical }) => {
                    commands::cmd_settings_set(&db, &cli.user, warning, critical)
                }
            }
        }
        Commands::Serve { port, host } => {
            let config = commands::load_engine_config(config_path)?;
            commands::cmd_serve(&cli.db, &host, port, config).await
        }
    }
}
