//! Core types for the projection and insight engine

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Direction of a goal's progress rate over its history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    /// Later half of the history moves faster than the earlier half
    Improving,
    #[default]
    Steady,
    /// Later half of the history moves slower than the earlier half
    Declining,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Improving => "improving",
            Trend::Steady => "steady",
            Trend::Declining => "declining",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How far a goal has drifted behind its expected pace
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DriftSeverity {
    #[default]
    None,
    Warning,
    Critical,
}

impl DriftSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            DriftSeverity::None => "none",
            DriftSeverity::Warning => "warning",
            DriftSeverity::Critical => "critical",
        }
    }
}

impl fmt::Display for DriftSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Output of the rate estimator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct RateEstimate {
    /// Units of progress per day
    pub progress_rate: f64,
    /// `progress_rate * 30`
    pub progress_rate_monthly: f64,
    pub trend: Trend,
}

/// Derived forecast for a single goal (never persisted)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub goal_id: i64,
    pub goal_title: String,
    pub unit: String,
    pub current_value: f64,
    pub target_value: Option<f64>,
    /// Can exceed 100 once the target is passed
    pub percent_complete: f64,
    pub progress_rate: f64,
    pub progress_rate_monthly: f64,
    pub trend: Trend,
    pub drift: DriftSeverity,
    pub on_track: bool,
    pub estimated_completion_date: Option<NaiveDate>,
    /// Days until the deadline; negative once the deadline has passed
    pub days_remaining: Option<i64>,
    /// Amount the goal is projected to miss its deadline by
    pub shortfall: Option<f64>,
    /// Daily rate needed to reach the target by the deadline
    pub required_rate: Option<f64>,
    pub required_rate_monthly: Option<f64>,
    /// False for goals without a rate-based forecast (boolean, milestone, invalid)
    pub projectable: bool,
}

impl Projection {
    /// Percent complete capped at 100 for display
    pub fn display_percent(&self) -> f64 {
        self.percent_complete.min(100.0)
    }
}

/// Severity of an insight, ordered for ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Positive reinforcement, lowest priority
    Success,
    /// Informational - no action needed
    Info,
    /// Worth attention soon
    Warning,
    /// Requires immediate attention
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Critical => "critical",
        }
    }

    /// Numeric priority for sorting (higher = more urgent)
    pub fn priority(&self) -> u8 {
        match self {
            Severity::Success => 1,
            Severity::Info => 2,
            Severity::Warning => 3,
            Severity::Critical => 4,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "success" => Ok(Severity::Success),
            "info" => Ok(Severity::Info),
            "warning" => Ok(Severity::Warning),
            "critical" => Ok(Severity::Critical),
            _ => Err(format!("Unknown severity: {}", s)),
        }
    }
}

/// Closed set of insight kinds
///
/// The UI maps each kind to its own icon; the engine never deals in icon names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    /// Critical drift behind expected pace
    BehindPace,
    /// Warning drift with a projected shortfall
    FallingBehind,
    /// Target reached but goal not marked complete
    ReadyToComplete,
    /// At-risk goal whose rate is picking up
    Accelerating,
    /// Goal progressing as expected
    OnTrack,
}

impl InsightKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightKind::BehindPace => "behind_pace",
            InsightKind::FallingBehind => "falling_behind",
            InsightKind::ReadyToComplete => "ready_to_complete",
            InsightKind::Accelerating => "accelerating",
            InsightKind::OnTrack => "on_track",
        }
    }
}

impl fmt::Display for InsightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InsightKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "behind_pace" => Ok(InsightKind::BehindPace),
            "falling_behind" => Ok(InsightKind::FallingBehind),
            "ready_to_complete" => Ok(InsightKind::ReadyToComplete),
            "accelerating" => Ok(InsightKind::Accelerating),
            "on_track" => Ok(InsightKind::OnTrack),
            _ => Err(format!("Unknown insight kind: {}", s)),
        }
    }
}

/// Directive the UI can offer alongside an insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    NavigateToGoal,
    MarkGoalComplete,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::NavigateToGoal => "navigate_to_goal",
            ActionKind::MarkGoalComplete => "mark_goal_complete",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsightAction {
    pub kind: ActionKind,
    pub label: String,
}

/// A human-readable statement about one goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    /// Stable key, e.g. "goal:12:behind_pace"
    pub id: String,
    pub goal_id: i64,
    pub kind: InsightKind,
    pub severity: Severity,
    pub title: String,
    pub description: String,
    pub action: Option<InsightAction>,
}

impl Insight {
    /// Create an insight keyed by goal and kind
    pub fn new(
        goal_id: i64,
        kind: InsightKind,
        severity: Severity,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: format!("goal:{}:{}", goal_id, kind.as_str()),
            goal_id,
            kind,
            severity,
            title: title.into(),
            description: description.into(),
            action: None,
        }
    }

    /// Attach a suggested action
    pub fn with_action(mut self, kind: ActionKind, label: impl Into<String>) -> Self {
        self.action = Some(InsightAction {
            kind,
            label: label.into(),
        });
        self
    }
}

/// Aggregate result of one engine run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightsSummary {
    /// Evaluation date the projections were computed for
    pub generated_for: NaiveDate,
    pub total_goals: usize,
    pub on_track: usize,
    pub at_risk: usize,
    pub critical: usize,
    pub completed: usize,
    /// Most severe first, capped
    pub insights: Vec<Insight>,
    /// One per analyzed goal, in goal order
    pub projections: Vec<Projection>,
}

impl InsightsSummary {
    pub fn projection_for(&self, goal_id: i64) -> Option<&Projection> {
        self.projections.iter().find(|p| p.goal_id == goal_id)
    }
}

/// Result of a hypothetical contribution change
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WhatIfResult {
    pub new_rate: f64,
    pub new_completion_date: Option<NaiveDate>,
    pub days_saved: i64,
}
