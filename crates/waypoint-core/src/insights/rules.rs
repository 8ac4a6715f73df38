//! Built-in insight rules
//!
//! Each rule looks at one goal's assessment in isolation and emits at most
//! one insight. Rules are independent: a goal can trigger several of them.

use crate::format::format_goal_value;
use crate::models::GoalStatus;

use super::engine::{GoalAssessment, InsightRule};
use super::types::{ActionKind, DriftSeverity, Insight, InsightKind, Severity, Trend};

/// Critical drift behind expected pace
pub struct BehindPaceRule;

impl InsightRule for BehindPaceRule {
    fn kind(&self) -> InsightKind {
        InsightKind::BehindPace
    }

    fn name(&self) -> &'static str {
        "Behind Pace"
    }

    fn evaluate(&self, assessment: &GoalAssessment<'_>) -> Option<Insight> {
        let projection = assessment.projection;
        if projection.drift != DriftSeverity::Critical {
            return None;
        }

        let deadline = match assessment.goal.target_date {
            Some(date) => format!("by {}", date.format("%b %-d, %Y")),
            None => "within its horizon".to_string(),
        };
        let description = format!(
            "{} is only {:.0}% complete and well behind the pace needed to finish {}.",
            projection.goal_title,
            projection.display_percent(),
            deadline
        );

        Some(
            Insight::new(
                projection.goal_id,
                self.kind(),
                Severity::Critical,
                self.name(),
                description,
            )
            .with_action(ActionKind::NavigateToGoal, "View Goal"),
        )
    }
}

/// Warning drift with a projected shortfall at the deadline
pub struct FallingBehindRule;

impl InsightRule for FallingBehindRule {
    fn kind(&self) -> InsightKind {
        InsightKind::FallingBehind
    }

    fn name(&self) -> &'static str {
        "Falling Behind"
    }

    fn evaluate(&self, assessment: &GoalAssessment<'_>) -> Option<Insight> {
        let projection = assessment.projection;
        if projection.drift != DriftSeverity::Warning {
            return None;
        }
        let shortfall = projection.shortfall.filter(|s| *s > 0.0)?;

        let unit = &projection.unit;
        let mut description = format!(
            "At the current pace {} will fall {} short of its target.",
            projection.goal_title,
            format_goal_value(shortfall, unit)
        );
        match projection.required_rate_monthly {
            Some(monthly) => description.push_str(&format!(
                " Aim for {} per month to catch up.",
                format_goal_value(monthly, unit)
            )),
            None => description.push_str(" The deadline has already passed."),
        }

        Some(
            Insight::new(
                projection.goal_id,
                self.kind(),
                Severity::Warning,
                self.name(),
                description,
            )
            .with_action(ActionKind::NavigateToGoal, "View Goal"),
        )
    }
}

/// Numeric target reached but the goal is not marked complete
pub struct ReadyToCompleteRule;

impl InsightRule for ReadyToCompleteRule {
    fn kind(&self) -> InsightKind {
        InsightKind::ReadyToComplete
    }

    fn name(&self) -> &'static str {
        "Ready to Complete"
    }

    fn evaluate(&self, assessment: &GoalAssessment<'_>) -> Option<Insight> {
        let goal = assessment.goal;
        let projection = assessment.projection;
        if goal.status == GoalStatus::Completed || projection.percent_complete < 100.0 {
            return None;
        }
        let target = goal.numeric_target()?;

        let description = format!(
            "{} has reached its target of {}. Mark it complete to celebrate.",
            projection.goal_title,
            format_goal_value(target, &projection.unit)
        );

        Some(
            Insight::new(
                projection.goal_id,
                self.kind(),
                Severity::Info,
                self.name(),
                description,
            )
            .with_action(ActionKind::MarkGoalComplete, "Mark Complete"),
        )
    }
}

/// An at-risk goal whose pace is picking up
pub struct AcceleratingRule;

impl InsightRule for AcceleratingRule {
    fn kind(&self) -> InsightKind {
        InsightKind::Accelerating
    }

    fn name(&self) -> &'static str {
        "Accelerating"
    }

    fn evaluate(&self, assessment: &GoalAssessment<'_>) -> Option<Insight> {
        let projection = assessment.projection;
        if projection.trend != Trend::Improving || projection.drift == DriftSeverity::None {
            return None;
        }

        let description = format!(
            "Progress on {} has picked up to {} per month. Keep it going to close the gap.",
            projection.goal_title,
            format_goal_value(projection.progress_rate_monthly, &projection.unit)
        );

        Some(Insight::new(
            projection.goal_id,
            self.kind(),
            Severity::Info,
            self.name(),
            description,
        ))
    }
}

/// Goal progressing as expected
pub struct OnTrackRule;

impl InsightRule for OnTrackRule {
    fn kind(&self) -> InsightKind {
        InsightKind::OnTrack
    }

    fn name(&self) -> &'static str {
        "On Track"
    }

    fn evaluate(&self, assessment: &GoalAssessment<'_>) -> Option<Insight> {
        let goal = assessment.goal;
        let projection = assessment.projection;
        if projection.drift != DriftSeverity::None
            || !projection.on_track
            || !projection.projectable
            || projection.percent_complete >= 100.0
            || matches!(goal.status, GoalStatus::Paused | GoalStatus::Completed)
        {
            return None;
        }

        let mut description = format!(
            "{} is {:.0}% complete and keeping pace.",
            projection.goal_title,
            projection.display_percent()
        );
        if let Some(date) = projection.estimated_completion_date {
            description.push_str(&format!(
                " Expected to finish around {}.",
                date.format("%b %-d, %Y")
            ));
        }

        Some(Insight::new(
            projection.goal_id,
            self.kind(),
            Severity::Success,
            self.name(),
            description,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::projection::calculate_projection;
    use crate::insights::types::{Projection, RateEstimate};
    use crate::models::{Goal, TargetType};
    use chrono::{NaiveDate, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn goal(current: f64, status: GoalStatus) -> Goal {
        Goal {
            id: 9,
            title: "Vacation".to_string(),
            category: Some("Travel".to_string()),
            target_type: TargetType::Numeric,
            target_value: Some(5_000.0),
            current_value: current,
            unit: "$".to_string(),
            start_date: Some(date(2024, 1, 1)),
            target_date: Some(date(2024, 12, 31)),
            status,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    fn project(goal: &Goal, rate: f64, trend: Trend, drift: DriftSeverity) -> Projection {
        let estimate = RateEstimate {
            progress_rate: rate,
            progress_rate_monthly: rate * 30.0,
            trend,
        };
        calculate_projection(goal, &estimate, drift, None, date(2024, 7, 1))
    }

    fn run(rule: &dyn InsightRule, goal: &Goal, projection: &Projection) -> Option<Insight> {
        rule.evaluate(&GoalAssessment { goal, projection })
    }

    #[test]
    fn test_behind_pace_only_on_critical() {
        let g = goal(500.0, GoalStatus::InProgress);
        let critical = project(&g, 1.0, Trend::Steady, DriftSeverity::Critical);
        let warning = project(&g, 1.0, Trend::Steady, DriftSeverity::Warning);

        let insight = run(&BehindPaceRule, &g, &critical).unwrap();
        assert_eq!(insight.severity, Severity::Critical);
        assert_eq!(insight.action.unwrap().kind, ActionKind::NavigateToGoal);
        assert!(insight.description.contains("Dec 31, 2024"));

        assert!(run(&BehindPaceRule, &g, &warning).is_none());
    }

    #[test]
    fn test_falling_behind_quotes_shortfall_and_required_rate() {
        let g = goal(2_000.0, GoalStatus::InProgress);
        let p = project(&g, 5.0, Trend::Steady, DriftSeverity::Warning);
        // 183 days left: 2,000 + 5 * 183 = 2,915 -> short 2,085
        assert_eq!(p.shortfall, Some(2_085.0));

        let insight = run(&FallingBehindRule, &g, &p).unwrap();
        assert_eq!(insight.severity, Severity::Warning);
        assert!(insight.description.contains("$2,085"));
        let monthly = format_goal_value(p.required_rate_monthly.unwrap(), "$");
        assert!(insight.description.contains(&monthly));
    }

    #[test]
    fn test_falling_behind_needs_positive_shortfall() {
        let g = goal(2_000.0, GoalStatus::InProgress);
        let p = project(&g, 100.0, Trend::Steady, DriftSeverity::Warning);
        assert_eq!(p.shortfall, Some(0.0));
        assert!(run(&FallingBehindRule, &g, &p).is_none());
    }

    #[test]
    fn test_ready_to_complete() {
        let g = goal(5_000.0, GoalStatus::InProgress);
        let p = project(&g, 10.0, Trend::Steady, DriftSeverity::None);

        let insight = run(&ReadyToCompleteRule, &g, &p).unwrap();
        assert_eq!(insight.kind, InsightKind::ReadyToComplete);
        let action = insight.action.unwrap();
        assert_eq!(action.kind, ActionKind::MarkGoalComplete);
        assert_eq!(action.label, "Mark Complete");

        let done = goal(5_000.0, GoalStatus::Completed);
        let p = project(&done, 10.0, Trend::Steady, DriftSeverity::None);
        assert!(run(&ReadyToCompleteRule, &done, &p).is_none());
    }

    #[test]
    fn test_accelerating_requires_drift() {
        let g = goal(1_000.0, GoalStatus::InProgress);
        let at_risk = project(&g, 10.0, Trend::Improving, DriftSeverity::Warning);
        let healthy = project(&g, 10.0, Trend::Improving, DriftSeverity::None);

        let insight = run(&AcceleratingRule, &g, &at_risk).unwrap();
        assert_eq!(insight.severity, Severity::Info);
        assert!(insight.action.is_none());
        assert!(insight.description.contains("$300"));

        assert!(run(&AcceleratingRule, &g, &healthy).is_none());
    }

    #[test]
    fn test_on_track_exclusions() {
        let g = goal(3_000.0, GoalStatus::InProgress);
        let p = project(&g, 10.0, Trend::Steady, DriftSeverity::None);
        let insight = run(&OnTrackRule, &g, &p).unwrap();
        assert_eq!(insight.severity, Severity::Success);
        assert!(insight.description.contains("60%"));

        let paused = goal(3_000.0, GoalStatus::Paused);
        let p = project(&paused, 10.0, Trend::Steady, DriftSeverity::None);
        assert!(run(&OnTrackRule, &paused, &p).is_none());

        let reached = goal(5_000.0, GoalStatus::InProgress);
        let p = project(&reached, 10.0, Trend::Steady, DriftSeverity::None);
        assert!(run(&OnTrackRule, &reached, &p).is_none());
    }
}
