//! Goal operations

use rusqlite::{params, OptionalExtension};

use super::{format_date, optional_date_column, parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{Goal, GoalStatus, NewGoal, TargetType};

const GOAL_COLUMNS: &str = "id, title, category, target_type, target_value, current_value, unit, \
     start_date, target_date, status, is_active, created_at";

impl Database {
    /// Create a goal and return its id
    pub fn create_goal(&self, goal: &NewGoal) -> Result<i64> {
        goal.validate().map_err(Error::InvalidData)?;

        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO goals (title, category, target_type, target_value, current_value, unit,
                               start_date, target_date, status)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
            params![
                goal.title.trim(),
                goal.category,
                goal.target_type.as_str(),
                goal.target_value,
                goal.current_value,
                goal.unit,
                goal.start_date.map(format_date),
                goal.target_date.map(format_date),
                GoalStatus::NotStarted.as_str(),
            ],
        )?;

        let id = conn.last_insert_rowid();
        tracing::debug!(goal_id = id, title = %goal.title, "Goal created");
        Ok(id)
    }

    /// Get a goal by ID
    pub fn get_goal(&self, id: i64) -> Result<Option<Goal>> {
        let conn = self.conn()?;
        let goal = conn
            .query_row(
                &format!("SELECT {} FROM goals WHERE id = ?", GOAL_COLUMNS),
                params![id],
                row_to_goal,
            )
            .optional()?;

        Ok(goal)
    }

    /// Get a goal by ID, failing with `NotFound` when it does not exist
    pub fn require_goal(&self, id: i64) -> Result<Goal> {
        self.get_goal(id)?
            .ok_or_else(|| Error::NotFound(format!("Goal {}", id)))
    }

    /// List goals in id order
    pub fn list_goals(&self, include_inactive: bool) -> Result<Vec<Goal>> {
        let conn = self.conn()?;
        let sql = if include_inactive {
            format!("SELECT {} FROM goals ORDER BY id", GOAL_COLUMNS)
        } else {
            format!(
                "SELECT {} FROM goals WHERE is_active = 1 ORDER BY id",
                GOAL_COLUMNS
            )
        };

        let mut stmt = conn.prepare(&sql)?;
        let goals = stmt
            .query_map([], row_to_goal)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(goals)
    }

    /// Change a goal's lifecycle status
    pub fn update_goal_status(&self, id: i64, status: GoalStatus) -> Result<()> {
        let conn = self.conn()?;
        let updated = conn.execute(
            "UPDATE goals SET status = ? WHERE id = ?",
            params![status.as_str(), id],
        )?;
        if updated == 0 {
            return Err(Error::NotFound(format!("Goal {}", id)));
        }
        Ok(())
    }

    /// Deactivate a goal; it drops out of analysis but keeps its history
    pub fn deactivate_goal(&self, id: i64) -> Result<()> {
        let conn = self.conn()?;
        let updated = conn.execute("UPDATE goals SET is_active = 0 WHERE id = ?", params![id])?;
        if updated == 0 {
            return Err(Error::NotFound(format!("Goal {}", id)));
        }
        Ok(())
    }
}

fn row_to_goal(row: &rusqlite::Row) -> rusqlite::Result<Goal> {
    let target_type_str: String = row.get(3)?;
    let status_str: String = row.get(9)?;
    let created_at_str: String = row.get(11)?;

    Ok(Goal {
        id: row.get(0)?,
        title: row.get(1)?,
        category: row.get(2)?,
        target_type: target_type_str.parse().unwrap_or(TargetType::Numeric),
        target_value: row.get(4)?,
        current_value: row.get(5)?,
        unit: row.get(6)?,
        start_date: optional_date_column(row, 7)?,
        target_date: optional_date_column(row, 8)?,
        status: status_str.parse().unwrap_or_default(),
        is_active: row.get(10)?,
        created_at: parse_datetime(&created_at_str),
    })
}
