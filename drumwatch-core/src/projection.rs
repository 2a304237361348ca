//! Service projection: usage rate since install and the date a drum runs dry.

use chrono::{NaiveDateTime, TimeDelta};
use drumwatch_schemas::projection::{EmptyDate, Projection};

const MS_PER_DAY: f64 = 86_400_000.0;

/// Projects when a drum will be empty, assuming it was full at `installed_at`
/// and has been drained at a constant rate since.
///
/// The rate is the average over the whole service life, not a recent trend.
/// `percent` is clamped to `0.0..=100.0` (NaN counts as empty). Never fails:
/// degenerate inputs yield `EmptyDate::Unavailable`.
pub fn project(installed_at: NaiveDateTime, now: NaiveDateTime, percent: f64) -> Projection {
    let percent = if percent.is_nan() { 0.0 } else { percent.clamp(0.0, 100.0) };

    // Floor at one day so install day (or a future install) never divides by zero.
    let days_in_service = (now - installed_at).num_days().max(1);
    let usage_rate = (100.0 - percent) / days_in_service as f64;

    if usage_rate > 0.0 && percent > 0.0 {
        let days_left = percent / usage_rate;
        let ahead_ms = (days_left * MS_PER_DAY).round() as i64;
        let estimated_empty_date = TimeDelta::try_milliseconds(ahead_ms)
            .and_then(|ahead| now.checked_add_signed(ahead))
            .map_or(EmptyDate::Unavailable, |empty_at| {
                EmptyDate::Estimated(empty_at.date())
            });

        Projection {
            days_in_service,
            usage_rate,
            days_left: Some(days_left),
            estimated_empty_date,
        }
    } else {
        Projection {
            days_in_service,
            usage_rate,
            days_left: None,
            estimated_empty_date: EmptyDate::Unavailable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn test_reference_scenario() {
        let projection = project(ts(2025, 11, 1, 9, 0), ts(2025, 11, 3, 9, 0), 40.0);
        assert_eq!(projection.days_in_service, 2);
        assert!(
            (projection.usage_rate - 30.0).abs() < 1e-9,
            "usage rate should be 30 %/day, got {}",
            projection.usage_rate
        );
        let days_left = projection.days_left.unwrap();
        assert!((days_left - 4.0 / 3.0).abs() < 1e-9, "got {} days left", days_left);
        assert_eq!(
            projection.estimated_empty_date,
            EmptyDate::Estimated(NaiveDate::from_ymd_opt(2025, 11, 4).unwrap())
        );
    }

    #[test]
    fn test_same_day_is_floored_to_one_day() {
        let projection = project(ts(2025, 11, 3, 0, 5), ts(2025, 11, 3, 23, 55), 90.0);
        assert_eq!(projection.days_in_service, 1);
        assert!((projection.usage_rate - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_partial_days_are_floored() {
        let projection = project(ts(2025, 11, 1, 9, 0), ts(2025, 11, 4, 8, 59), 70.0);
        assert_eq!(projection.days_in_service, 2);
    }

    #[test]
    fn test_future_install_is_floored_to_one_day() {
        let projection = project(ts(2025, 12, 25, 9, 0), ts(2025, 11, 3, 9, 0), 80.0);
        assert_eq!(projection.days_in_service, 1);
        assert!((projection.usage_rate - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_full_drum_has_no_projection() {
        let now = ts(2025, 11, 3, 9, 0);
        let projection = project(now, now, 100.0);
        assert_eq!(projection.usage_rate, 0.0);
        assert_eq!(projection.days_left, None);
        assert_eq!(projection.estimated_empty_date, EmptyDate::Unavailable);
    }

    #[test]
    fn test_empty_drum_has_no_projection() {
        for installed_at in [ts(2025, 1, 1, 0, 0), ts(2025, 11, 3, 9, 0), ts(2026, 1, 1, 0, 0)] {
            let projection = project(installed_at, ts(2025, 11, 3, 9, 0), 0.0);
            assert_eq!(projection.estimated_empty_date, EmptyDate::Unavailable);
            assert!(projection.usage_rate > 0.0);
        }
    }

    #[test]
    fn test_out_of_range_percent_is_clamped() {
        let now = ts(2025, 11, 3, 9, 0);
        let over = project(ts(2025, 11, 1, 9, 0), now, 130.0);
        assert_eq!(over.usage_rate, 0.0);
        assert_eq!(over.estimated_empty_date, EmptyDate::Unavailable);

        let nan = project(ts(2025, 11, 1, 9, 0), now, f64::NAN);
        assert_eq!(nan.estimated_empty_date, EmptyDate::Unavailable);
        assert!((nan.usage_rate - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_projection_is_idempotent() {
        let installed_at = ts(2025, 10, 20, 14, 30);
        let now = ts(2025, 11, 3, 9, 0);
        assert_eq!(project(installed_at, now, 37.0), project(installed_at, now, 37.0));
    }

    #[test]
    fn test_projection_beyond_calendar_is_unavailable() {
        let installed_at = NaiveDate::MIN.and_hms_opt(0, 0, 0).unwrap();
        let projection = project(installed_at, ts(2025, 11, 3, 9, 0), 99.0);
        assert!(projection.days_left.is_some());
        assert_eq!(projection.estimated_empty_date, EmptyDate::Unavailable);
    }
}
