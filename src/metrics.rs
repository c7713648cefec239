use chrono::{Datelike, NaiveDate};

/// Default width of the on-track band used by [`pace_status`], as a fraction
/// of the target (2 percentage points either side of the elapsed fraction).
pub const DEFAULT_PACE_TOLERANCE: f64 = 0.02;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pace {
    Ahead,
    OnTrack,
    Behind,
}

/// Completion percentage clamped to `[0, 100]`. Total over the whole numeric
/// domain: non-positive or non-finite inputs yield 0 rather than NaN.
pub fn percent_complete(actual: f64, target: f64) -> f64 {
    if !actual.is_finite() || !target.is_finite() || target <= 0.0 {
        return 0.0;
    }
    (100.0 * actual / target).clamp(0.0, 100.0)
}

/// Hours still to log before the target is met. Never negative; over-completion
/// reports 0 remaining.
pub fn remaining(actual: f64, target: f64) -> f64 {
    if !actual.is_finite() || !target.is_finite() {
        return 0.0;
    }
    (target - actual).max(0.0)
}

/// Classifies progress against how much of the period has elapsed.
/// `elapsed_fraction` is in `[0, 1]` (out-of-range values are clamped) and
/// `tolerance` is the half-width of the on-track band; pass
/// [`DEFAULT_PACE_TOLERANCE`] unless the caller has its own policy.
pub fn pace_status(actual: f64, target: f64, elapsed_fraction: f64, tolerance: f64) -> Pace {
    let completed = percent_complete(actual, target) / 100.0;
    let elapsed = if elapsed_fraction.is_finite() {
        elapsed_fraction.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let band = if tolerance.is_finite() { tolerance.abs() } else { 0.0 };

    let delta = completed - elapsed;
    if delta > band {
        Pace::Ahead
    } else if delta < -band {
        Pace::Behind
    } else {
        Pace::OnTrack
    }
}

/// Signed hour distance from the pace line: positive means ahead of schedule.
pub fn pace_delta_hours(actual: f64, target: f64, elapsed_fraction: f64) -> f64 {
    if !actual.is_finite() || !target.is_finite() || !elapsed_fraction.is_finite() {
        return 0.0;
    }
    actual - target * elapsed_fraction.clamp(0.0, 1.0)
}

/// Hours per remaining day needed to close the gap. Zero when no days remain.
pub fn catch_up_per_day(hours_left: f64, days_left: u32) -> f64 {
    if days_left == 0 || !hours_left.is_finite() {
        return 0.0;
    }
    hours_left.max(0.0) / f64::from(days_left)
}

pub fn daily_average(total_hours: f64, days_elapsed: u32) -> f64 {
    if days_elapsed == 0 || !total_hours.is_finite() {
        return 0.0;
    }
    total_hours / f64::from(days_elapsed)
}

/// Fraction of the calendar year elapsed as of `today`, leap years included.
pub fn elapsed_year_fraction(today: NaiveDate) -> f64 {
    let days_in_year = if today.leap_year() { 366.0 } else { 365.0 };
    f64::from(today.ordinal()) / days_in_year
}

/// Fraction of `today`'s month elapsed as of `today`.
pub fn elapsed_month_fraction(today: NaiveDate) -> f64 {
    let days = crate::calendar::days_in_month(today.year(), today.month()).unwrap_or(1);
    f64::from(today.day()) / f64::from(days.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_is_zero_for_non_positive_targets() {
        assert_eq!(percent_complete(50.0, 0.0), 0.0);
        assert_eq!(percent_complete(50.0, -10.0), 0.0);
        assert_eq!(percent_complete(-5.0, 0.0), 0.0);
        assert_eq!(percent_complete(1.0, f64::NAN), 0.0);
    }

    #[test]
    fn percent_clamps_over_completion() {
        assert_eq!(percent_complete(200.0, 100.0), 100.0);
        assert_eq!(percent_complete(-3.0, 100.0), 0.0);
    }

    #[test]
    fn percent_is_monotone_in_actual() {
        let target = 150.0;
        let mut last = 0.0;
        for actual in [0.0, 10.0, 75.0, 145.0, 150.0, 400.0] {
            let pct = percent_complete(actual, target);
            assert!(pct >= last, "{pct} < {last} at actual {actual}");
            assert!((0.0..=100.0).contains(&pct));
            last = pct;
        }
    }

    #[test]
    fn remaining_never_negative() {
        assert_eq!(remaining(145.0, 150.0), 5.0);
        assert_eq!(remaining(160.0, 150.0), 0.0);
        assert_eq!(remaining(f64::NAN, 150.0), 0.0);
    }

    #[test]
    fn pace_band_edges() {
        // 50% complete against 50% elapsed, tolerance 2%.
        assert_eq!(pace_status(50.0, 100.0, 0.50, 0.02), Pace::OnTrack);
        assert_eq!(pace_status(51.9, 100.0, 0.50, 0.02), Pace::OnTrack);
        assert_eq!(pace_status(53.0, 100.0, 0.50, 0.02), Pace::Ahead);
        assert_eq!(pace_status(47.0, 100.0, 0.50, 0.02), Pace::Behind);
    }

    #[test]
    fn pace_handles_zero_target() {
        // Zero target reads as 0% complete, so late in the period it is behind.
        assert_eq!(
            pace_status(10.0, 0.0, 0.9, DEFAULT_PACE_TOLERANCE),
            Pace::Behind
        );
    }

    #[test]
    fn catch_up_guards_empty_remainder() {
        assert_eq!(catch_up_per_day(100.0, 0), 0.0);
        assert_eq!(catch_up_per_day(-4.0, 10), 0.0);
        assert_eq!(catch_up_per_day(100.0, 50), 2.0);
    }

    #[test]
    fn month_fraction_spans_the_whole_month() {
        let leap_feb = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(elapsed_month_fraction(leap_feb), 1.0);
        let mid_april = NaiveDate::from_ymd_opt(2025, 4, 15).unwrap();
        assert_eq!(elapsed_month_fraction(mid_april), 0.5);
    }

    #[test]
    fn year_fraction_accounts_for_leap_years() {
        let leap = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        let common = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        assert_eq!(elapsed_year_fraction(leap), 1.0);
        assert_eq!(elapsed_year_fraction(common), 1.0);
        let mid = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert!((elapsed_year_fraction(mid) - 60.0 / 366.0).abs() < 1e-12);
    }
}
