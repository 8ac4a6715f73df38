//! Read-side contract between the engine and whatever persists goals

use crate::models::{DriftSettings, Goal, ProgressSnapshot};
use crate::Result;

/// Source of goals, snapshot histories and drift settings
///
/// Implemented by [`crate::db::Database`]. The engine only ever reads
/// through this trait.
pub trait GoalStore {
    /// All goals with `is_active` set, in id order
    fn list_active_goals(&self) -> Result<Vec<Goal>>;

    /// Up to `max_snapshots` snapshots for a goal, newest first
    fn get_progress_history(&self, goal_id: i64, max_snapshots: usize)
        -> Result<Vec<ProgressSnapshot>>;

    /// Drift settings a user has saved, if any
    fn get_stored_drift_settings(&self, user_id: &str) -> Result<Option<DriftSettings>>;

    /// Drift settings for a user, built-in defaults when none are stored
    fn get_drift_settings(&self, user_id: &str) -> Result<DriftSettings> {
        Ok(self.get_stored_drift_settings(user_id)?.unwrap_or_default())
    }
}
