//! Badge Engine - Threshold rules evaluated against aggregated stats
//!
//! Rules are independent; every satisfied rule yields a badge stamped with
//! the evaluation instant. Nothing remembers when a badge was first earned,
//! so `unlocked_at` moves forward on every evaluation.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::entities::{
    Badge, BadgeDefinition, BadgeMetric, BadgeProgress, MemoryRecord, UserStats,
};
use crate::ports::{Clock, SystemClock};

/// Badge rule table (configurable)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BadgeConfig {
    pub badges: Vec<BadgeDefinition>,
}

impl Default for BadgeConfig {
    fn default() -> Self {
        Self {
            badges: vec![
                BadgeDefinition::new(
                    "first-memory",
                    "First Step",
                    "Created your first memory",
                    "👶",
                    BadgeMetric::MemoryCount,
                    1,
                ),
                BadgeDefinition::new(
                    "memory-collector",
                    "Memory Collector",
                    "Saved 10 memories",
                    "📚",
                    BadgeMetric::MemoryCount,
                    10,
                ),
                BadgeDefinition::new(
                    "world-explorer",
                    "World Explorer",
                    "Visited 5 different countries",
                    "🌍",
                    BadgeMetric::RegionCount,
                    5,
                ),
                BadgeDefinition::new(
                    "storyteller",
                    "Storyteller",
                    "Generated 5 AI stories",
                    "📖",
                    BadgeMetric::StoryCount,
                    5,
                ),
            ],
        }
    }
}

/// Evaluates badge rules
#[derive(Clone)]
pub struct BadgeEngine {
    config: BadgeConfig,
    clock: Arc<dyn Clock>,
}

impl Default for BadgeEngine {
    fn default() -> Self {
        Self::new(None, Arc::new(SystemClock))
    }
}

impl BadgeEngine {
    pub fn new(config: Option<BadgeConfig>, clock: Arc<dyn Clock>) -> Self {
        Self {
            config: config.unwrap_or_default(),
            clock,
        }
    }

    /// Badges whose rule currently holds, in table order
    pub fn evaluate(&self, stats: &UserStats, records: &[MemoryRecord]) -> Vec<Badge> {
        let now = self.clock.now();
        let badges: Vec<Badge> = self
            .config
            .badges
            .iter()
            .filter(|def| {
                metric_value(def.requirement.metric, stats, records) >= def.requirement.threshold
            })
            .map(|def| Badge::unlocked(def, now))
            .collect();

        tracing::debug!("{} of {} badges unlocked", badges.len(), self.config.badges.len());
        badges
    }

    /// Every rule with its current metric value, locked or not
    pub fn progress(&self, stats: &UserStats, records: &[MemoryRecord]) -> Vec<BadgeProgress> {
        self.config
            .badges
            .iter()
            .map(|def| {
                let current = metric_value(def.requirement.metric, stats, records);
                BadgeProgress {
                    badge: def.clone(),
                    current,
                    unlocked: current >= def.requirement.threshold,
                }
            })
            .collect()
    }
}

fn metric_value(metric: BadgeMetric, stats: &UserStats, records: &[MemoryRecord]) -> usize {
    match metric {
        BadgeMetric::MemoryCount => stats.total_memories,
        BadgeMetric::RegionCount => stats.regions_visited,
        BadgeMetric::StoryCount => records.iter().filter(|r| r.has_story()).count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::FixedClock;
    use chrono::{DateTime, TimeZone, Utc};

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    fn engine() -> BadgeEngine {
        BadgeEngine::new(None, Arc::new(FixedClock(at())))
    }

    fn stats(total: usize, regions: usize) -> UserStats {
        UserStats {
            total_memories: total,
            regions_visited: regions,
            ..Default::default()
        }
    }

    fn story_record(story: Option<&str>) -> MemoryRecord {
        MemoryRecord {
            id: "id".to_string(),
            title: "t".to_string(),
            description: "d".to_string(),
            latitude: 0.0,
            longitude: 0.0,
            date: "2024-06-15".to_string(),
            photos: vec![],
            video_links: vec![],
            ai_story: story.map(str::to_string),
            mood: None,
            mood_score: None,
            tags: vec![],
            is_private: false,
            created_at: at(),
            updated_at: at(),
        }
    }

    fn ids(badges: &[Badge]) -> Vec<&str> {
        badges.iter().map(|b| b.id.as_str()).collect()
    }

    #[test]
    fn test_nothing_unlocked_for_empty_stats() {
        assert!(engine().evaluate(&UserStats::default(), &[]).is_empty());
    }

    #[test]
    fn test_thresholds_are_inclusive() {
        let badges = engine().evaluate(&stats(10, 5), &[]);
        assert_eq!(
            ids(&badges),
            vec!["first-memory", "memory-collector", "world-explorer"]
        );
        assert!(badges.iter().all(|b| b.unlocked_at == Some(at())));
    }

    #[test]
    fn test_storyteller_counts_non_empty_stories() {
        let mut records: Vec<MemoryRecord> =
            (0..4).map(|_| story_record(Some("Once upon a time"))).collect();
        records.push(story_record(Some("")));
        records.push(story_record(None));

        let badges = engine().evaluate(&stats(6, 1), &records);
        assert!(!ids(&badges).contains(&"storyteller"));

        records.push(story_record(Some("The end")));
        let badges = engine().evaluate(&stats(7, 1), &records);
        assert!(ids(&badges).contains(&"storyteller"));
    }

    #[test]
    fn test_unlock_time_is_evaluation_time() {
        let later = at() + chrono::Duration::days(3);
        let first = engine().evaluate(&stats(1, 1), &[]);
        let second =
            BadgeEngine::new(None, Arc::new(FixedClock(later))).evaluate(&stats(1, 1), &[]);
        assert_eq!(first[0].unlocked_at, Some(at()));
        assert_eq!(second[0].unlocked_at, Some(later));
    }

    #[test]
    fn test_progress_reports_locked_rules() {
        let progress = engine().progress(&stats(3, 2), &[]);
        assert_eq!(progress.len(), 4);
        assert!(progress[0].unlocked);
        assert!(!progress[1].unlocked);
        assert_eq!(progress[1].current, 3);
        assert!((progress[1].ratio() - 0.3).abs() < 1e-9);
        assert_eq!(progress[2].current, 2);
    }
}
