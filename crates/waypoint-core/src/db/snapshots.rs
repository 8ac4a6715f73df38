//! Progress recording and snapshot history

use chrono::NaiveDate;
use rusqlite::params;

use super::{date_column, format_date, Database};
use crate::error::{Error, Result};
use crate::models::{GoalStatus, ProgressSnapshot};

impl Database {
    /// Record a goal's value on a date
    ///
    /// Upserts the snapshot for that date and sets the goal's current value
    /// to its newest snapshot, in one transaction. Backdated corrections
    /// therefore leave the current value alone. A goal that had not started
    /// moves to `in_progress`.
    pub fn record_progress(
        &self,
        goal_id: i64,
        value: f64,
        date: NaiveDate,
    ) -> Result<ProgressSnapshot> {
        if !value.is_finite() || value < 0.0 {
            return Err(Error::InvalidData(format!(
                "Progress value must be a non-negative number, got {}",
                value
            )));
        }

        let conn = self.conn()?;

        // Use explicit transaction for atomicity
        conn.execute("BEGIN TRANSACTION", [])?;

        let result = (|| -> Result<()> {
            let updated = conn.execute(
                "UPDATE goals SET status = CASE WHEN status = ? THEN ? ELSE status END WHERE id = ?",
                params![
                    GoalStatus::NotStarted.as_str(),
                    GoalStatus::InProgress.as_str(),
                    goal_id
                ],
            )?;
            if updated == 0 {
                return Err(Error::NotFound(format!("Goal {}", goal_id)));
            }

            conn.execute(
                r#"
                INSERT INTO progress_snapshots (goal_id, date, value) VALUES (?, ?, ?)
                ON CONFLICT(goal_id, date) DO UPDATE SET
                    value = excluded.value,
                    recorded_at = CURRENT_TIMESTAMP
                "#,
                params![goal_id, format_date(date), value],
            )?;

            conn.execute(
                r#"
                UPDATE goals SET current_value = (
                    SELECT value FROM progress_snapshots
                    WHERE goal_id = ?1 ORDER BY date DESC LIMIT 1
                )
                WHERE id = ?1
                "#,
                params![goal_id],
            )?;
            Ok(())
        })();

        match result {
            Ok(()) => {
                conn.execute("COMMIT", [])?;
                tracing::debug!(goal_id, value, date = %date, "Progress recorded");
                Ok(ProgressSnapshot::new(goal_id, date, value))
            }
            Err(e) => {
                let _ = conn.execute("ROLLBACK", []);
                Err(e)
            }
        }
    }

    /// Up to `limit` snapshots for a goal, newest first
    pub fn list_progress_history(
        &self,
        goal_id: i64,
        limit: usize,
    ) -> Result<Vec<ProgressSnapshot>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT goal_id, date, value FROM progress_snapshots WHERE goal_id = ? ORDER BY date DESC LIMIT ?",
        )?;

        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let snapshots = stmt
            .query_map(params![goal_id, limit], |row| {
                Ok(ProgressSnapshot {
                    goal_id: row.get(0)?,
                    date: date_column(row, 1)?,
                    value: row.get(2)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(snapshots)
    }
}
