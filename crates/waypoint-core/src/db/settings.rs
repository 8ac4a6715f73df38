//! Per-user drift settings

use rusqlite::{params, OptionalExtension};

use super::Database;
use crate::error::{Error, Result};
use crate::models::DriftSettings;

impl Database {
    /// Stored drift settings for a user, if any
    pub fn get_stored_drift_settings(&self, user_id: &str) -> Result<Option<DriftSettings>> {
        let conn = self.conn()?;
        let settings = conn
            .query_row(
                "SELECT warning_threshold, critical_threshold FROM drift_settings WHERE user_id = ?",
                params![user_id],
                |row| Ok(DriftSettings::new(row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        Ok(settings)
    }

    /// Drift settings for a user, falling back to `defaults`
    pub fn drift_settings_for(
        &self,
        user_id: &str,
        defaults: &DriftSettings,
    ) -> Result<DriftSettings> {
        Ok(self.get_stored_drift_settings(user_id)?.unwrap_or(*defaults))
    }

    /// Save drift settings for a user
    pub fn set_drift_settings(&self, user_id: &str, settings: &DriftSettings) -> Result<()> {
        settings.validate().map_err(Error::InvalidData)?;

        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO drift_settings (user_id, warning_threshold, critical_threshold)
            VALUES (?, ?, ?)
            ON CONFLICT(user_id) DO UPDATE SET
                warning_threshold = excluded.warning_threshold,
                critical_threshold = excluded.critical_threshold,
                updated_at = CURRENT_TIMESTAMP
            "#,
            params![user_id, settings.warning_threshold, settings.critical_threshold],
        )?;

        tracing::info!(
            user_id,
            warning = settings.warning_threshold,
            critical = settings.critical_threshold,
            "Drift settings updated"
        );
        Ok(())
    }
}
