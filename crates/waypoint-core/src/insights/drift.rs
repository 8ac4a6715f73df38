//! Drift Classifier
//!
//! Compares actual progress against a straight-line expected pace from the
//! goal's start date to its deadline. Goals without a deadline are measured
//! against a rolling default horizon (one year unless configured).

use chrono::{Duration, NaiveDate};

use crate::models::{DriftSettings, Goal};

use super::types::DriftSeverity;

/// Classifies how far behind expected pace a goal has drifted
#[derive(Debug, Clone, Copy)]
pub struct DriftClassifier {
    /// Horizon for expected pace when a goal has no target date
    default_horizon_days: i64,
}

impl DriftClassifier {
    pub fn new() -> Self {
        Self {
            default_horizon_days: 365,
        }
    }

    pub fn with_horizon_days(days: i64) -> Self {
        Self {
            default_horizon_days: days.max(1),
        }
    }

    /// Expected percent complete on `today` under a linear pace
    ///
    /// Returns `None` when the goal has no start date. The elapsed fraction
    /// is clamped to [0, 1], so a goal that has not started expects 0% and a
    /// goal past its deadline expects 100%.
    pub fn expected_percent(&self, goal: &Goal, today: NaiveDate) -> Option<f64> {
        let start = goal.start_date?;
        let end = goal
            .target_date
            .unwrap_or(start + Duration::days(self.default_horizon_days));

        let total_days = (end - start).num_days();
        if total_days <= 0 {
            return Some(if today >= end { 100.0 } else { 0.0 });
        }

        let elapsed_days = (today - start).num_days();
        let fraction = (elapsed_days as f64 / total_days as f64).clamp(0.0, 1.0);
        Some(fraction * 100.0)
    }

    /// Classify drift for a goal
    ///
    /// Completed and paused goals never drift. Goals without a numeric
    /// projection or a start date are not classified.
    pub fn classify(
        &self,
        goal: &Goal,
        settings: &DriftSettings,
        today: NaiveDate,
    ) -> DriftSeverity {
        if goal.status.suppresses_drift() || !goal.is_projectable() {
            return DriftSeverity::None;
        }

        let (Some(target), Some(expected)) =
            (goal.numeric_target(), self.expected_percent(goal, today))
        else {
            return DriftSeverity::None;
        };

        let actual = goal.current_value / target * 100.0;
        let deviation = (expected - actual) / 100.0;

        if deviation >= settings.critical_threshold {
            DriftSeverity::Critical
        } else if deviation >= settings.warning_threshold {
            DriftSeverity::Warning
        } else {
            DriftSeverity::None
        }
    }
}

impl Default for DriftClassifier {
    fn default() -> Self {
        Self::new()
    }
}
