//! What-If Simulator
//!
//! Recomputes a goal's completion date under a hypothetical extra monthly
//! contribution. Works purely on an existing projection; nothing is written.

use chrono::NaiveDate;

use super::projection::completion_date;
use super::rate::DAYS_PER_MONTH;
use super::types::{Projection, WhatIfResult};

/// Simulate adding `hypothetical_monthly` to a goal's current pace
pub fn calculate_what_if(
    projection: &Projection,
    hypothetical_monthly: f64,
    today: NaiveDate,
) -> WhatIfResult {
    let new_rate = projection.progress_rate + hypothetical_monthly / DAYS_PER_MONTH;

    let new_completion_date = if !projection.projectable {
        None
    } else if projection.percent_complete >= 100.0 {
        projection.estimated_completion_date
    } else {
        projection
            .target_value
            .and_then(|target| completion_date(projection.current_value, target, new_rate, today))
    };

    let days_saved = match (projection.estimated_completion_date, new_completion_date) {
        (Some(old), Some(new)) => (old - new).num_days().max(0),
        _ => 0,
    };

    WhatIfResult {
        new_rate,
        new_completion_date,
        days_saved,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::types::{DriftSeverity, Trend};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn projection(current: f64, target: f64, rate: f64, today: NaiveDate) -> Projection {
        Projection {
            goal_id: 1,
            goal_title: "Car".to_string(),
            unit: "$".to_string(),
            current_value: current,
            target_value: Some(target),
            percent_complete: current / target * 100.0,
            progress_rate: rate,
            progress_rate_monthly: rate * 30.0,
            trend: Trend::Steady,
            drift: DriftSeverity::None,
            on_track: true,
            estimated_completion_date: completion_date(current, target, rate, today),
            days_remaining: None,
            shortfall: None,
            required_rate: None,
            required_rate_monthly: None,
            projectable: true,
        }
    }

    #[test]
    fn test_zero_contribution_changes_nothing() {
        let today = date(2024, 6, 1);
        let p = projection(1_000.0, 10_000.0, 10.0, today);
        let result = calculate_what_if(&p, 0.0, today);

        assert_eq!(result.new_rate, 10.0);
        assert_eq!(result.new_completion_date, p.estimated_completion_date);
        assert_eq!(result.days_saved, 0);
    }

    #[test]
    fn test_extra_contribution_saves_days() {
        let today = date(2024, 6, 1);
        // 9,000 remaining at 10/day -> 900 days; at 20/day -> 450 days
        let p = projection(1_000.0, 10_000.0, 10.0, today);
        let result = calculate_what_if(&p, 300.0, today);

        assert_eq!(result.new_rate, 20.0);
        assert_eq!(result.new_completion_date, Some(date(2025, 8, 25)));
        assert_eq!(result.days_saved, 450);
    }

    #[test]
    fn test_contribution_rescues_stalled_goal() {
        let today = date(2024, 6, 1);
        let p = projection(1_000.0, 2_000.0, 0.0, today);
        assert_eq!(p.estimated_completion_date, None);

        let result = calculate_what_if(&p, 300.0, today);
        assert_eq!(result.new_completion_date, Some(date(2024, 9, 9)));
        // No old date to compare against
        assert_eq!(result.days_saved, 0);
    }

    #[test]
    fn test_negative_contribution_never_reports_negative_savings() {
        let today = date(2024, 6, 1);
        let p = projection(1_000.0, 10_000.0, 10.0, today);
        let result = calculate_what_if(&p, -150.0, today);

        assert_eq!(result.new_rate, 5.0);
        assert_eq!(result.days_saved, 0);
    }

    #[test]
    fn test_completed_goal_keeps_its_date() {
        let today = date(2024, 6, 1);
        let mut p = projection(12_000.0, 10_000.0, 10.0, today);
        p.estimated_completion_date = Some(date(2024, 5, 2));

        let result = calculate_what_if(&p, 500.0, today);
        assert_eq!(result.new_completion_date, Some(date(2024, 5, 2)));
        assert_eq!(result.days_saved, 0);
    }

    #[test]
    fn test_non_projectable_has_no_date() {
        let today = date(2024, 6, 1);
        let mut p = projection(0.0, 1.0, 0.0, today);
        p.projectable = false;
        p.target_value = None;
        p.estimated_completion_date = None;

        let result = calculate_what_if(&p, 100.0, today);
        assert_eq!(result.new_completion_date, None);
        assert_eq!(result.days_saved, 0);
    }
}
