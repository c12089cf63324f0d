//! Timeline - Year-grouped view and human-friendly relative dates

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};

use crate::domain::entities::{MemoryRecord, TimelineGroup};

/// Sort records newest first and group them by year, newest year first
pub fn group_by_year(records: &[MemoryRecord]) -> Vec<TimelineGroup> {
    let mut dated: Vec<(NaiveDate, &MemoryRecord)> =
        records.iter().map(|r| (r.calendar_date(), r)).collect();
    // stable, so same-day records keep collection order
    dated.sort_by(|a, b| b.0.cmp(&a.0));

    let mut groups: Vec<TimelineGroup> = Vec::new();
    for (date, record) in dated {
        match groups.last_mut() {
            Some(group) if group.year == date.year() => group.memories.push(record.clone()),
            _ => groups.push(TimelineGroup {
                year: date.year(),
                memories: vec![record.clone()],
            }),
        }
    }
    groups
}

/// `Today`, `Yesterday`, `3 days ago`, `2 weeks ago`, `5 months ago`, `1 years ago`
pub fn relative_date(date: NaiveDate, now: DateTime<Utc>) -> String {
    let midnight = date.and_time(NaiveTime::MIN).and_utc();
    let days = (now - midnight).num_seconds().div_euclid(86_400);

    match days {
        0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        d if d < 7 => format!("{} days ago", d),
        d if d < 30 => format!("{} weeks ago", d / 7),
        d if d < 365 => format!("{} months ago", d / 30),
        d => format!("{} years ago", d / 365),
    }
}
