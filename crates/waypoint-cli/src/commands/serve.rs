//! Server command implementation

use std::path::Path;

use anyhow::Result;
use waypoint_core::EngineConfig;

use super::open_db;

pub async fn cmd_serve(db_path: &Path, host: &str, port: u16, config: EngineConfig) -> Result<()> {
    println!("🚀 Starting Waypoint web server...");
    println!("   Database: {}", db_path.display());
    println!("   Listening: http://{}:{}", host, port);

    // Comma-separated extra CORS origins
    let allowed_origins: Vec<String> = std::env::var("WAYPOINT_ALLOWED_ORIGINS")
        .unwrap_or_default()
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if !allowed_origins.is_empty() {
        println!(
            "   🌐 Allowed origins: {} (WAYPOINT_ALLOWED_ORIGINS)",
            allowed_origins.join(", ")
        );
    }
    println!();
    println!("   Press Ctrl+C to stop");

    let db = open_db(db_path)?;

    let server_config = waypoint_server::ServerConfig {
        allowed_origins,
        engine: config,
    };
    waypoint_server::serve_with_config(db, host, port, server_config).await?;

    Ok(())
}
