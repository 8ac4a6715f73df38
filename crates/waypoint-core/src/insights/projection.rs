//! Projection Calculator
//!
//! Combines a goal's current value, target, estimated rate and deadline into
//! a forecast: when the goal will complete, how much it will miss its
//! deadline by, and what daily rate would be needed to hit it.

use chrono::{Days, NaiveDate};

use crate::models::{Goal, GoalStatus};

use super::rate::DAYS_PER_MONTH;
use super::types::{DriftSeverity, Projection, RateEstimate};

/// Projected completion date for a remaining amount at a given rate
///
/// `None` when the rate is not positive or the date would overflow the
/// calendar. A target that is already reached completes `today`.
pub fn completion_date(
    current_value: f64,
    target_value: f64,
    progress_rate: f64,
    today: NaiveDate,
) -> Option<NaiveDate> {
    let remaining = target_value - current_value;
    if remaining <= 0.0 {
        return Some(today);
    }
    if progress_rate <= 0.0 || !progress_rate.is_finite() {
        return None;
    }

    let days = (remaining / progress_rate).ceil();
    if !days.is_finite() || days > u32::MAX as f64 {
        return None;
    }
    today.checked_add_days(Days::new(days as u64))
}

/// Build the projection for a single goal
///
/// `latest_snapshot` is the date of the newest recorded snapshot, used as
/// the completion date of goals that have already reached their target.
pub fn calculate_projection(
    goal: &Goal,
    estimate: &RateEstimate,
    drift: DriftSeverity,
    latest_snapshot: Option<NaiveDate>,
    today: NaiveDate,
) -> Projection {
    let mut projection = Projection {
        goal_id: goal.id,
        goal_title: goal.title.clone(),
        unit: goal.unit.clone(),
        current_value: goal.current_value,
        target_value: goal.target_value,
        percent_complete: 0.0,
        progress_rate: estimate.progress_rate,
        progress_rate_monthly: estimate.progress_rate_monthly,
        trend: estimate.trend,
        drift,
        on_track: drift == DriftSeverity::None,
        estimated_completion_date: None,
        days_remaining: None,
        shortfall: None,
        required_rate: None,
        required_rate_monthly: None,
        projectable: false,
    };

    let target = match goal.numeric_target() {
        Some(target) if goal.is_projectable() => target,
        _ => {
            // Boolean and milestone goals only know done / not done
            if goal.status == GoalStatus::Completed {
                projection.percent_complete = 100.0;
            }
            return projection;
        }
    };

    projection.projectable = true;
    projection.percent_complete = (goal.current_value / target * 100.0).max(0.0);

    let remaining = target - goal.current_value;
    let days_remaining = goal.target_date.map(|deadline| (deadline - today).num_days());
    projection.days_remaining = days_remaining;

    if remaining <= 0.0 {
        projection.estimated_completion_date = Some(latest_snapshot.unwrap_or(today));
        projection.shortfall = Some(0.0);
    } else {
        projection.estimated_completion_date =
            completion_date(goal.current_value, target, estimate.progress_rate, today);

        if let Some(days) = days_remaining {
            if estimate.progress_rate >= 0.0 {
                let projected_at_deadline =
                    goal.current_value + estimate.progress_rate * days.max(0) as f64;
                projection.shortfall = Some((target - projected_at_deadline).max(0.0));
            }
        }
    }

    if let Some(days) = days_remaining.filter(|d| *d > 0) {
        let required = (remaining / days as f64).max(0.0);
        projection.required_rate = Some(required);
        projection.required_rate_monthly = Some(required * DAYS_PER_MONTH);
    }

    projection
}
