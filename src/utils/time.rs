//! Time utilities

use chrono::{DateTime, Days, NaiveDate, Utc};

/// Get current UTC time
pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// Whole seconds elapsed between a client-reported start (epoch millis) and
/// `now`, rounded down.
///
/// A start time in the future yields `None`: it cannot describe a real solve.
pub fn elapsed_seconds(start_millis: i64, now: DateTime<Utc>) -> Option<i64> {
    let elapsed_ms = now.timestamp_millis().checked_sub(start_millis)?;
    if elapsed_ms < 0 {
        return None;
    }
    Some(elapsed_ms / 1000)
}

/// Number of consecutive UTC days with at least one solve, counting back from
/// `today`. A streak stays alive until a full day passes without a solve, so
/// it may end yesterday.
pub fn solve_streak(times: &[DateTime<Utc>], today: NaiveDate) -> u32 {
    let mut days: Vec<NaiveDate> = times.iter().map(|t| t.date_naive()).collect();
    days.sort_unstable_by(|a, b| b.cmp(a));
    days.dedup();

    let mut days = days.into_iter().skip_while(|d| *d > today).peekable();

    let mut expected = match days.peek() {
        Some(d) if *d == today => today,
        Some(d) if Some(*d) == today.checked_sub_days(Days::new(1)) => *d,
        _ => return 0,
    };

    let mut streak = 0;
    for day in days {
        if day != expected {
            break;
        }
        streak += 1;
        match expected.checked_sub_days(Days::new(1)) {
            Some(prev) => expected = prev,
            None => break,
        }
    }

    streak
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_elapsed_seconds() {
        let now = at(2024, 5, 1, 12);
        let start = (now - Duration::milliseconds(299_999)).timestamp_millis();
        assert_eq!(elapsed_seconds(start, now), Some(299));

        let start = (now - Duration::seconds(300)).timestamp_millis();
        assert_eq!(elapsed_seconds(start, now), Some(300));

        assert_eq!(elapsed_seconds(now.timestamp_millis(), now), Some(0));
    }

    #[test]
    fn test_elapsed_seconds_future_start() {
        let now = at(2024, 5, 1, 12);
        let start = (now + Duration::seconds(5)).timestamp_millis();
        assert_eq!(elapsed_seconds(start, now), None);
    }

    #[test]
    fn test_streak_counts_consecutive_days() {
        let times = vec![
            at(2024, 5, 10, 9),
            at(2024, 5, 10, 18),
            at(2024, 5, 9, 23),
            at(2024, 5, 8, 1),
            at(2024, 5, 6, 12),
        ];
        assert_eq!(solve_streak(&times, day(2024, 5, 10)), 3);
    }

    #[test]
    fn test_streak_survives_until_end_of_next_day() {
        let times = vec![at(2024, 5, 9, 10), at(2024, 5, 8, 10)];
        assert_eq!(solve_streak(&times, day(2024, 5, 10)), 2);
        assert_eq!(solve_streak(&times, day(2024, 5, 11)), 0);
    }

    #[test]
    fn test_streak_empty() {
        assert_eq!(solve_streak(&[], day(2024, 5, 10)), 0);
    }
}
