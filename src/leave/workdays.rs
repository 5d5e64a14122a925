use std::collections::HashSet;

use chrono::{Datelike, NaiveDate, Weekday};

/// Count the working days in `[start, end]` inclusive.
///
/// A date counts unless it falls on a weekend or on one of the dates in
/// `blocked` (the tenant's non-optional holidays). Optional holidays must
/// not be passed in: employees work through them unless they apply for
/// that day as leave. Whole-day granularity only.
pub fn count_leave_days(start: NaiveDate, end: NaiveDate, blocked: &HashSet<NaiveDate>) -> f64 {
    if end < start {
        return 0.0;
    }

    let mut days = 0u32;
    let mut current = start;
    loop {
        let weekend = matches!(current.weekday(), Weekday::Sat | Weekday::Sun);
        if !weekend && !blocked.contains(&current) {
            days += 1;
        }
        if current == end {
            break;
        }
        match current.succ_opt() {
            Some(next) => current = next,
            None => break,
        }
    }

    f64::from(days)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn plain_weekday_range_counts_every_day() {
        // 2025-03-10 is a Monday
        let days = count_leave_days(d(2025, 3, 10), d(2025, 3, 14), &HashSet::new());
        assert_eq!(days, 5.0);
    }

    #[test]
    fn weekend_only_range_counts_nothing() {
        let days = count_leave_days(d(2025, 3, 15), d(2025, 3, 16), &HashSet::new());
        assert_eq!(days, 0.0);
    }

    #[test]
    fn range_spanning_a_weekend_skips_it() {
        // Thu 2025-03-13 .. Tue 2025-03-18: Thu, Fri, Mon, Tue
        let days = count_leave_days(d(2025, 3, 13), d(2025, 3, 18), &HashSet::new());
        assert_eq!(days, 4.0);
    }

    #[test]
    fn blocked_holiday_inside_the_range_reduces_the_count() {
        let blocked: HashSet<NaiveDate> = [d(2025, 3, 12)].into_iter().collect();
        let days = count_leave_days(d(2025, 3, 10), d(2025, 3, 14), &blocked);
        assert_eq!(days, 4.0);
    }

    #[test]
    fn blocked_date_on_a_weekend_changes_nothing() {
        let blocked: HashSet<NaiveDate> = [d(2025, 3, 15)].into_iter().collect();
        let days = count_leave_days(d(2025, 3, 10), d(2025, 3, 16), &blocked);
        assert_eq!(days, 5.0);
    }

    #[test]
    fn single_weekday() {
        assert_eq!(count_leave_days(d(2025, 3, 10), d(2025, 3, 10), &HashSet::new()), 1.0);
    }

    #[test]
    fn inverted_range_is_zero() {
        assert_eq!(count_leave_days(d(2025, 3, 14), d(2025, 3, 10), &HashSet::new()), 0.0);
    }

    #[test]
    fn range_across_month_boundary() {
        // Fri 2025-02-28 .. Tue 2025-03-04: Fri, Mon, Tue
        let days = count_leave_days(d(2025, 2, 28), d(2025, 3, 4), &HashSet::new());
        assert_eq!(days, 3.0);
    }
}
