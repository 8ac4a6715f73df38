//! Domain models for Waypoint

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A user-defined life goal tracked over time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub id: i64,
    pub title: String,
    /// Free-text category reference (e.g., "Housing", "Retirement")
    pub category: Option<String>,
    pub target_type: TargetType,
    /// Target amount; absent for boolean and milestone goals
    pub target_value: Option<f64>,
    pub current_value: f64,
    /// Display unit (e.g., "$", "km", "%")
    pub unit: String,
    pub start_date: Option<NaiveDate>,
    /// Deadline; goals without one are measured against a rolling horizon
    pub target_date: Option<NaiveDate>,
    pub status: GoalStatus,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Goal {
    /// Target value when it can anchor a rate-based projection
    ///
    /// Only numeric goals with a positive target qualify.
    pub fn numeric_target(&self) -> Option<f64> {
        match (self.target_type, self.target_value) {
            (TargetType::Numeric, Some(target)) if target > 0.0 => Some(target),
            _ => None,
        }
    }

    /// Whether the goal supports a rate-based projection
    ///
    /// Goals that violate the data invariants (negative values, deadline
    /// before start) are treated as non-projectable rather than rejected.
    pub fn is_projectable(&self) -> bool {
        if self.numeric_target().is_none() || self.current_value < 0.0 {
            return false;
        }
        match (self.start_date, self.target_date) {
            (Some(start), Some(deadline)) => deadline >= start,
            _ => true,
        }
    }

    /// Whether the numeric target has been reached
    pub fn is_target_reached(&self) -> bool {
        self.numeric_target()
            .map(|target| self.current_value >= target)
            .unwrap_or(false)
    }
}

/// Data for creating a new goal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewGoal {
    pub title: String,
    #[serde(default)]
    pub category: Option<String>,
    pub target_type: TargetType,
    #[serde(default)]
    pub target_value: Option<f64>,
    #[serde(default)]
    pub current_value: f64,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub target_date: Option<NaiveDate>,
}

impl NewGoal {
    /// Check the invariants the store enforces on write
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Goal title cannot be empty".to_string());
        }
        if !self.current_value.is_finite() || self.current_value < 0.0 {
            return Err("Current value must be a non-negative number".to_string());
        }
        match (self.target_type, self.target_value) {
            (TargetType::Numeric, None) => {
                return Err("Numeric goals require a target value".to_string())
            }
            (TargetType::Numeric, Some(target)) if !target.is_finite() || target <= 0.0 => {
                return Err("Target value must be a positive number".to_string())
            }
            _ => {}
        }
        if let (Some(start), Some(deadline)) = (self.start_date, self.target_date) {
            if deadline < start {
                return Err("Target date cannot be before start date".to_string());
            }
        }
        Ok(())
    }
}

/// How a goal's target is measured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetType {
    /// Reach an amount (savings balance, distance, weight)
    Numeric,
    /// Done or not done
    Boolean,
    /// Tracked through milestones rather than an amount
    Milestone,
}

impl TargetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Boolean => "boolean",
            Self::Milestone => "milestone",
        }
    }
}

impl std::str::FromStr for TargetType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "numeric" | "number" => Ok(Self::Numeric),
            "boolean" | "bool" => Ok(Self::Boolean),
            "milestone" => Ok(Self::Milestone),
            _ => Err(format!("Unknown target type: {}", s)),
        }
    }
}

impl std::fmt::Display for TargetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle status of a goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    #[default]
    NotStarted,
    InProgress,
    OnTrack,
    Completed,
    Paused,
}

impl GoalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::InProgress => "in_progress",
            Self::OnTrack => "on_track",
            Self::Completed => "completed",
            Self::Paused => "paused",
        }
    }

    /// Completed and paused goals are never evaluated for drift
    pub fn suppresses_drift(&self) -> bool {
        matches!(self, Self::Completed | Self::Paused)
    }
}

impl std::str::FromStr for GoalStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "not_started" => Ok(Self::NotStarted),
            "in_progress" => Ok(Self::InProgress),
            "on_track" => Ok(Self::OnTrack),
            "completed" => Ok(Self::Completed),
            "paused" => Ok(Self::Paused),
            _ => Err(format!("Unknown goal status: {}", s)),
        }
    }
}

impl std::fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A recorded value of a goal's progress on a given date
///
/// Identity is `(goal_id, date)`. Values are not guaranteed to be monotonic:
/// corrections and withdrawals are legal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub goal_id: i64,
    pub date: NaiveDate,
    pub value: f64,
}

impl ProgressSnapshot {
    pub fn new(goal_id: i64, date: NaiveDate, value: f64) -> Self {
        Self {
            goal_id,
            date,
            value,
        }
    }
}

/// Per-user sensitivity for drift classification
///
/// Thresholds are fractional deviations between expected and actual
/// progress: 0.10 means 10 percentage points behind pace.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DriftSettings {
    pub warning_threshold: f64,
    pub critical_threshold: f64,
}

impl DriftSettings {
    pub const DEFAULT_WARNING: f64 = 0.10;
    pub const DEFAULT_CRITICAL: f64 = 0.25;

    pub fn new(warning_threshold: f64, critical_threshold: f64) -> Self {
        Self {
            warning_threshold,
            critical_threshold,
        }
    }

    /// Thresholds must be in (0, 1] and warning must be below critical
    pub fn validate(&self) -> std::result::Result<(), String> {
        let in_range = |v: f64| v > 0.0 && v <= 1.0;
        if !in_range(self.warning_threshold) || !in_range(self.critical_threshold) {
            return Err("Drift thresholds must be between 0 and 1".to_string());
        }
        if self.warning_threshold >= self.critical_threshold {
            return Err("Warning threshold must be lower than critical threshold".to_string());
        }
        Ok(())
    }
}

impl Default for DriftSettings {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WARNING, Self::DEFAULT_CRITICAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goal(target_type: TargetType, target: Option<f64>, current: f64) -> Goal {
        Goal {
            id: 1,
            title: "Test".to_string(),
            category: None,
            target_type,
            target_value: target,
            current_value: current,
            unit: "$".to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            target_date: NaiveDate::from_ymd_opt(2025, 1, 1),
            status: GoalStatus::InProgress,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_status_round_trip_strings() {
        for status in [
            GoalStatus::NotStarted,
            GoalStatus::InProgress,
            GoalStatus::OnTrack,
            GoalStatus::Completed,
            GoalStatus::Paused,
        ] {
            assert_eq!(status.as_str().parse::<GoalStatus>().unwrap(), status);
        }
        assert!("archived".parse::<GoalStatus>().is_err());
    }

    #[test]
    fn test_projectable_requires_positive_numeric_target() {
        assert!(goal(TargetType::Numeric, Some(100.0), 10.0).is_projectable());
        assert!(!goal(TargetType::Numeric, Some(0.0), 10.0).is_projectable());
        assert!(!goal(TargetType::Numeric, Some(-5.0), 10.0).is_projectable());
        assert!(!goal(TargetType::Numeric, None, 10.0).is_projectable());
        assert!(!goal(TargetType::Boolean, None, 0.0).is_projectable());
        assert!(!goal(TargetType::Milestone, Some(3.0), 1.0).is_projectable());
    }

    #[test]
    fn test_deadline_before_start_is_not_projectable() {
        let mut g = goal(TargetType::Numeric, Some(100.0), 10.0);
        g.target_date = NaiveDate::from_ymd_opt(2023, 6, 1);
        assert!(!g.is_projectable());
    }

    #[test]
    fn test_new_goal_validation() {
        let mut new = NewGoal {
            title: "House".to_string(),
            category: None,
            target_type: TargetType::Numeric,
            target_value: Some(50_000.0),
            current_value: 0.0,
            unit: "$".to_string(),
            start_date: None,
            target_date: None,
        };
        assert!(new.validate().is_ok());

        new.target_value = None;
        assert!(new.validate().unwrap_err().contains("target value"));

        new.target_type = TargetType::Boolean;
        assert!(new.validate().is_ok());

        new.title = "  ".to_string();
        assert!(new.validate().is_err());
    }

    #[test]
    fn test_new_goal_rejects_non_finite_values() {
        let base = NewGoal {
            title: "House".to_string(),
            category: None,
            target_type: TargetType::Numeric,
            target_value: Some(50_000.0),
            current_value: 0.0,
            unit: "$".to_string(),
            start_date: None,
            target_date: None,
        };

        for target in [f64::NAN, f64::INFINITY] {
            let mut new = base.clone();
            new.target_value = Some(target);
            assert!(new.validate().is_err(), "target {} accepted", target);
        }

        for current in [f64::NAN, f64::INFINITY] {
            let mut new = base.clone();
            new.current_value = current;
            assert!(new.validate().is_err(), "current {} accepted", current);
        }
    }

    #[test]
    fn test_drift_settings_validation() {
        assert!(DriftSettings::default().validate().is_ok());
        assert!(DriftSettings::new(0.3, 0.2).validate().is_err());
        assert!(DriftSettings::new(0.0, 0.2).validate().is_err());
        assert!(DriftSettings::new(0.1, 1.5).validate().is_err());
    }
}
