//! Streak Calculator - Consecutive-day activity measured back from "now"
//!
//! Dates are sorted newest first and walked from the current instant. A date
//! extends the streak when its whole-day gap from the reference point is at
//! most `streak + 1`; the reference then moves to that date. Duplicate days
//! and future dates both extend the streak, and the allowed gap widens as the
//! streak grows.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::entities::MemoryRecord;
use crate::ports::{Clock, SystemClock};

const SECONDS_PER_DAY: i64 = 86_400;

/// Computes the day streak of a memory collection
#[derive(Clone)]
pub struct StreakCalculator {
    clock: Arc<dyn Clock>,
}

impl Default for StreakCalculator {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

impl StreakCalculator {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Streak length in days, measured from the injected clock
    pub fn streak_days(&self, records: &[MemoryRecord]) -> usize {
        let dates: Vec<NaiveDate> = records.iter().map(|r| r.calendar_date()).collect();
        streak_from(dates, self.clock.now())
    }
}

/// Streak over calendar dates (midnight UTC) as seen from `now`
pub fn streak_from(mut dates: Vec<NaiveDate>, now: DateTime<Utc>) -> usize {
    dates.sort_unstable_by(|a, b| b.cmp(a));

    let mut streak = 0usize;
    let mut reference = now;

    for date in dates {
        let midnight = date.and_time(chrono::NaiveTime::MIN).and_utc();
        let gap = whole_days_between(midnight, reference);

        if gap <= streak as i64 + 1 {
            streak += 1;
            reference = midnight;
        } else {
            break;
        }
    }

    streak
}

/// Floor of `(later - earlier)` in days; negative when `earlier` is after `later`
fn whole_days_between(earlier: DateTime<Utc>, later: DateTime<Utc>) -> i64 {
    (later - earlier).num_seconds().div_euclid(SECONDS_PER_DAY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 14, 30, 0).unwrap()
    }

    fn days_ago(days: &[i64]) -> Vec<NaiveDate> {
        let today = now().date_naive();
        days.iter().map(|d| today - Duration::days(*d)).collect()
    }

    #[test]
    fn test_empty_is_zero() {
        assert_eq!(streak_from(vec![], now()), 0);
    }

    #[test]
    fn test_consecutive_days() {
        assert_eq!(streak_from(days_ago(&[0, 1, 2, 3]), now()), 4);
    }

    #[test]
    fn test_yesterday_only_still_counts() {
        assert_eq!(streak_from(days_ago(&[1]), now()), 1);
    }

    #[test]
    fn test_stale_collection_is_zero() {
        assert_eq!(streak_from(days_ago(&[3, 4, 5]), now()), 0);
    }

    #[test]
    fn test_duplicate_days_extend_streak() {
        assert_eq!(streak_from(days_ago(&[0, 0, 0]), now()), 3);
    }

    #[test]
    fn test_gap_allowance_grows_with_streak() {
        // 0 -> gap 0 (<=1), 2 -> gap 2 (<=2), 5 -> gap 3 (<=3), 9 -> gap 4 (<=4)
        assert_eq!(streak_from(days_ago(&[0, 2, 5, 9]), now()), 4);
        // 20 -> gap 11 (> 5) stops the walk
        assert_eq!(streak_from(days_ago(&[0, 2, 5, 9, 20]), now()), 4);
    }

    #[test]
    fn test_future_dates_count() {
        let future = now().date_naive() + Duration::days(30);
        assert_eq!(streak_from(vec![future], now()), 1);
    }

    #[test]
    fn test_input_order_is_irrelevant() {
        assert_eq!(streak_from(days_ago(&[2, 0, 1]), now()), 3);
    }

    #[test]
    fn test_calculator_uses_injected_clock() {
        use crate::domain::entities::MemoryDraft;
        use crate::domain::services::SentimentClassifier;
        use crate::ports::FixedClock;

        let classifier = SentimentClassifier::default();
        let records: Vec<MemoryRecord> = days_ago(&[0, 1])
            .into_iter()
            .map(|date| {
                let draft = MemoryDraft {
                    title: "Walk".to_string(),
                    description: "Park".to_string(),
                    date: date.format("%Y-%m-%d").to_string(),
                    ..Default::default()
                };
                MemoryRecord::create(draft, &classifier, now()).unwrap()
            })
            .collect();

        let today = StreakCalculator::new(Arc::new(FixedClock(now())));
        assert_eq!(today.streak_days(&records), 2);

        let next_week = StreakCalculator::new(Arc::new(FixedClock(now() + Duration::days(7))));
        assert_eq!(next_week.streak_days(&records), 0);
    }
}
