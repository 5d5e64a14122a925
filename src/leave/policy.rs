use chrono::NaiveDate;

use crate::error::ApiError;

/// Inclusive interval overlap: `a.start <= b.end && a.end >= b.start`.
pub fn overlaps(a_start: NaiveDate, a_end: NaiveDate, b_start: NaiveDate, b_end: NaiveDate) -> bool {
    a_start <= b_end && a_end >= b_start
}

/// Notice period in calendar days. The lead time goes negative when the
/// start date is already in the past, so backdated requests fail too.
pub fn check_notice(today: NaiveDate, start: NaiveDate, min_notice_days: i32) -> Result<(), ApiError> {
    if min_notice_days <= 0 {
        return Ok(());
    }
    let lead = (start - today).num_days();
    if lead < i64::from(min_notice_days) {
        return Err(ApiError::bad_request(format!(
            "Leave must be applied at least {} days in advance",
            min_notice_days
        )));
    }
    Ok(())
}

pub fn check_consecutive(days: f64, max_consecutive_days: Option<i32>) -> Result<(), ApiError> {
    if let Some(max) = max_consecutive_days {
        if days > f64::from(max) {
            return Err(ApiError::bad_request(format!(
                "Leave exceeds the maximum of {} consecutive days",
                max
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn overlap_cases() {
        // identical
        assert!(overlaps(d(2025, 3, 10), d(2025, 3, 14), d(2025, 3, 10), d(2025, 3, 14)));
        // touching at a single day
        assert!(overlaps(d(2025, 3, 10), d(2025, 3, 14), d(2025, 3, 14), d(2025, 3, 20)));
        // contained
        assert!(overlaps(d(2025, 3, 1), d(2025, 3, 31), d(2025, 3, 10), d(2025, 3, 12)));
        // disjoint
        assert!(!overlaps(d(2025, 3, 10), d(2025, 3, 14), d(2025, 3, 15), d(2025, 3, 20)));
        assert!(!overlaps(d(2025, 3, 15), d(2025, 3, 20), d(2025, 3, 10), d(2025, 3, 14)));
    }

    #[test]
    fn notice_period_enforced_in_calendar_days() {
        let today = d(2025, 3, 8);
        assert!(check_notice(today, d(2025, 3, 10), 2).is_ok());
        assert!(check_notice(today, d(2025, 3, 9), 2).is_err());
        // weekend days still count toward notice
        assert!(check_notice(today, d(2025, 3, 11), 3).is_ok());
    }

    #[test]
    fn past_start_date_fails_notice() {
        let today = d(2025, 3, 8);
        assert!(check_notice(today, d(2025, 3, 1), 1).is_err());
    }

    #[test]
    fn zero_notice_accepts_same_day() {
        let today = d(2025, 3, 8);
        assert!(check_notice(today, today, 0).is_ok());
    }

    #[test]
    fn consecutive_cap_is_inclusive() {
        assert!(check_consecutive(10.0, Some(10)).is_ok());
        assert!(check_consecutive(11.0, Some(10)).is_err());
        assert!(check_consecutive(365.0, None).is_ok());
    }
}
