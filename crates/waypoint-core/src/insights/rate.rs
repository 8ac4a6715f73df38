//! Rate Estimator
//!
//! Derives a per-day progress rate and a trend from a goal's snapshot
//! history. Histories are sparse and irregular, so the rate is a simple
//! first-to-last linear slope and the trend compares the slope of the
//! earlier half of the history with the later half.

use chrono::{Duration, NaiveDate};

use crate::models::ProgressSnapshot;

use super::types::{RateEstimate, Trend};

/// Days used to convert a daily rate into a monthly one
pub const DAYS_PER_MONTH: f64 = 30.0;

/// Estimates progress rate and trend from snapshot histories
#[derive(Debug, Clone, Copy)]
pub struct RateEstimator {
    /// Relative change between half-rates that counts as a trend
    trend_threshold: f64,
}

impl RateEstimator {
    pub fn new() -> Self {
        Self {
            trend_threshold: 0.10,
        }
    }

    pub fn with_trend_threshold(trend_threshold: f64) -> Self {
        Self { trend_threshold }
    }

    /// Estimate rate and trend for a goal
    ///
    /// Snapshots may arrive in any order; they are sorted chronologically
    /// here. The goal's current value stands in for the newest snapshot's
    /// value. Fewer than two snapshots yields a zero rate and a steady trend.
    pub fn estimate(&self, snapshots: &[ProgressSnapshot], current_value: f64) -> RateEstimate {
        if snapshots.len() < 2 {
            return RateEstimate::default();
        }

        let mut points: Vec<(NaiveDate, f64)> =
            snapshots.iter().map(|s| (s.date, s.value)).collect();
        points.sort_by_key(|(date, _)| *date);
        if let Some(last) = points.last_mut() {
            last.1 = current_value;
        }

        let first = points[0];
        let last = points[points.len() - 1];
        let progress_rate = linear_rate(first, last);

        RateEstimate {
            progress_rate,
            progress_rate_monthly: progress_rate * DAYS_PER_MONTH,
            trend: self.trend(&points),
        }
    }

    /// Compare the rate over the earlier half of the history with the later half
    ///
    /// The split is at the midpoint date. Both halves share the boundary
    /// snapshot and each needs at least two points, so three snapshots is
    /// the minimum for anything other than steady.
    fn trend(&self, points: &[(NaiveDate, f64)]) -> Trend {
        let n = points.len();
        if n < 3 {
            return Trend::Steady;
        }

        let boundary = midpoint_boundary(points);
        let earlier = linear_rate(points[0], points[boundary]);
        let later = linear_rate(points[boundary], points[n - 1]);

        classify_trend(earlier, later, self.trend_threshold)
    }
}

/// Index of the last point on or before the midpoint date, kept off both ends
///
/// Expects chronologically sorted points, at least three of them.
fn midpoint_boundary(points: &[(NaiveDate, f64)]) -> usize {
    let n = points.len();
    let first_date = points[0].0;
    let span_days = (points[n - 1].0 - first_date).num_days();
    let midpoint = first_date + Duration::days(span_days / 2);

    points
        .iter()
        .rposition(|(date, _)| *date <= midpoint)
        .unwrap_or(0)
        .clamp(1, n - 2)
}

impl Default for RateEstimator {
    fn default() -> Self {
        Self::new()
    }
}

/// Whole days between two dates, with same-day spans counted as one day
pub fn days_between(from: NaiveDate, to: NaiveDate) -> f64 {
    (to - from).num_days().max(1) as f64
}

fn linear_rate(from: (NaiveDate, f64), to: (NaiveDate, f64)) -> f64 {
    (to.1 - from.1) / days_between(from.0, to.0)
}

fn classify_trend(earlier: f64, later: f64, threshold: f64) -> Trend {
    if earlier.abs() < f64::EPSILON {
        return if later > f64::EPSILON {
            Trend::Improving
        } else if later < -f64::EPSILON {
            Trend::Declining
        } else {
            Trend::Steady
        };
    }

    let relative_change = (later - earlier) / earlier.abs();
    if relative_change > threshold {
        Trend::Improving
    } else if relative_change < -threshold {
        Trend::Declining
    } else {
        Trend::Steady
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn snap(y: i32, m: u32, d: u32, value: f64) -> ProgressSnapshot {
        ProgressSnapshot::new(1, date(y, m, d), value)
    }

    #[test]
    fn test_insufficient_history_is_steady_zero() {
        let estimator = RateEstimator::new();

        let empty = estimator.estimate(&[], 100.0);
        assert_eq!(empty.progress_rate, 0.0);
        assert_eq!(empty.trend, Trend::Steady);

        let single = estimator.estimate(&[snap(2024, 1, 1, 50.0)], 100.0);
        assert_eq!(single.progress_rate, 0.0);
        assert_eq!(single.progress_rate_monthly, 0.0);
        assert_eq!(single.trend, Trend::Steady);
    }

    #[test]
    fn test_linear_rate_from_reverse_chronological_input() {
        // Store hands back newest first
        let history = vec![snap(2024, 7, 1, 250_000.0), snap(2024, 1, 1, 200_000.0)];
        let estimate = RateEstimator::new().estimate(&history, 250_000.0);

        // 2024 is a leap year: Jan 1 -> Jul 1 is 182 days
        let expected = 50_000.0 / 182.0;
        assert!((estimate.progress_rate - expected).abs() < 1e-9);
        assert!((estimate.progress_rate_monthly - expected * 30.0).abs() < 1e-9);
        assert!((estimate.progress_rate - 274.7).abs() < 0.1);
    }

    #[test]
    fn test_same_day_snapshots_count_as_one_day() {
        let history = vec![snap(2024, 3, 1, 10.0), snap(2024, 3, 1, 40.0)];
        let estimate = RateEstimator::new().estimate(&history, 40.0);
        assert_eq!(estimate.progress_rate, 30.0);
    }

    #[test]
    fn test_current_value_supersedes_newest_snapshot() {
        let history = vec![snap(2024, 1, 1, 0.0), snap(2024, 1, 11, 50.0)];
        let estimate = RateEstimator::new().estimate(&history, 100.0);
        assert_eq!(estimate.progress_rate, 10.0);
    }

    #[test]
    fn test_negative_rate_for_withdrawals() {
        let history = vec![snap(2024, 1, 1, 1_000.0), snap(2024, 1, 21, 800.0)];
        let estimate = RateEstimator::new().estimate(&history, 800.0);
        assert_eq!(estimate.progress_rate, -10.0);
    }

    #[test]
    fn test_two_snapshots_always_steady() {
        let history = vec![snap(2024, 1, 1, 0.0), snap(2024, 2, 1, 500.0)];
        assert_eq!(
            RateEstimator::new().estimate(&history, 500.0).trend,
            Trend::Steady
        );
    }

    #[test]
    fn test_improving_trend() {
        // 1/day for 30 days, then 3/day for 30 days
        let history = vec![
            snap(2024, 1, 1, 0.0),
            snap(2024, 1, 31, 30.0),
            snap(2024, 3, 1, 120.0),
        ];
        let estimate = RateEstimator::new().estimate(&history, 120.0);
        assert_eq!(estimate.trend, Trend::Improving);
    }

    #[test]
    fn test_declining_trend() {
        let history = vec![
            snap(2024, 1, 1, 0.0),
            snap(2024, 1, 31, 90.0),
            snap(2024, 3, 1, 120.0),
        ];
        let estimate = RateEstimator::new().estimate(&history, 120.0);
        assert_eq!(estimate.trend, Trend::Declining);
    }

    #[test]
    fn test_small_change_is_steady() {
        // 1.0/day then 1.05/day: inside the 10% band
        let history = vec![
            snap(2024, 1, 1, 0.0),
            snap(2024, 1, 21, 20.0),
            snap(2024, 2, 10, 41.0),
        ];
        let estimate = RateEstimator::new().estimate(&history, 41.0);
        assert_eq!(estimate.trend, Trend::Steady);
    }

    #[test]
    fn test_custom_threshold() {
        let history = vec![
            snap(2024, 1, 1, 0.0),
            snap(2024, 1, 21, 20.0),
            snap(2024, 2, 10, 41.0),
        ];
        let estimate = RateEstimator::with_trend_threshold(0.01).estimate(&history, 41.0);
        assert_eq!(estimate.trend, Trend::Improving);
    }

    #[test]
    fn test_flat_start_then_growth_is_improving() {
        let history = vec![
            snap(2024, 1, 1, 10.0),
            snap(2024, 1, 15, 10.0),
            snap(2024, 2, 1, 40.0),
        ];
        let estimate = RateEstimator::new().estimate(&history, 40.0);
        assert_eq!(estimate.trend, Trend::Improving);
    }

    fn clustered_history() -> Vec<ProgressSnapshot> {
        // Four snapshots in the first week, then one two months later
        vec![
            snap(2024, 1, 1, 0.0),
            snap(2024, 1, 2, 1.0),
            snap(2024, 1, 3, 2.0),
            snap(2024, 1, 4, 100.0),
            snap(2024, 3, 1, 200.0),
        ]
    }

    #[test]
    fn test_split_follows_dates_not_snapshot_count() {
        let points: Vec<(NaiveDate, f64)> = clustered_history()
            .iter()
            .map(|s| (s.date, s.value))
            .collect();

        // Midpoint date is Jan 31, so the boundary is Jan 4 rather than the
        // middle snapshot (Jan 3)
        assert_eq!(midpoint_boundary(&points), 3);
    }

    #[test]
    fn test_clustered_history_trend_uses_date_split() {
        // Jan 1..Jan 4 climbs ~33/day, Jan 4..Mar 1 only ~1.75/day. Splitting
        // on the middle snapshot instead would read as improving.
        let estimate = RateEstimator::new().estimate(&clustered_history(), 200.0);
        assert_eq!(estimate.trend, Trend::Declining);
    }

    #[test]
    fn test_days_between_guard() {
        assert_eq!(days_between(date(2024, 1, 1), date(2024, 1, 1)), 1.0);
        assert_eq!(days_between(date(2024, 1, 1), date(2024, 1, 11)), 10.0);
    }
}
