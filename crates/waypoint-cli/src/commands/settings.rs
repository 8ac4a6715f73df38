//! Drift settings commands

use anyhow::{Context, Result};
use waypoint_core::{Database, DriftSettings};

pub fn cmd_settings_show(db: &Database, user: &str, defaults: &DriftSettings) -> Result<()> {
    let stored = db.get_stored_drift_settings(user)?;
    let settings = stored.unwrap_or(*defaults);

    println!();
    println!("⚙️  Drift settings for {}", user);
    println!(
        "   Warning:  {:.0} points behind pace",
        settings.warning_threshold * 100.0
    );
    println!(
        "   Critical: {:.0} points behind pace",
        settings.critical_threshold * 100.0
    );
    if stored.is_none() {
        println!("   (defaults)");
    }
    Ok(())
}

pub fn cmd_settings_set(db: &Database, user: &str, warning: f64, critical: f64) -> Result<()> {
    let settings = DriftSettings::new(warning, critical);
    db.set_drift_settings(user, &settings)
        .context("Failed to save drift settings")?;

    println!(
        "✅ Drift thresholds for {} set to warning {} / critical {}",
        user, warning, critical
    );
    Ok(())
}
