//! Stats Aggregator - Folds a memory collection into dashboard numbers
//!
//! Recomputed from the full collection on every call; nothing is cached.

use std::collections::{BTreeMap, HashSet};

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::domain::entities::{MemoryRecord, MonthlyBucket, MoodBreakdown, UserStats};
use crate::domain::services::{GeoAttributor, StreakCalculator};

/// Aggregation settings (configurable)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StatsConfig {
    /// Most recent calendar months kept in the monthly view
    pub monthly_window: usize,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self { monthly_window: 12 }
    }
}

/// Builds [`UserStats`] and the monthly chart view
#[derive(Clone, Default)]
pub struct StatsAggregator {
    geo: GeoAttributor,
    streak: StreakCalculator,
    config: StatsConfig,
}

impl StatsAggregator {
    pub fn new(geo: GeoAttributor, streak: StreakCalculator, config: Option<StatsConfig>) -> Self {
        Self {
            geo,
            streak,
            config: config.unwrap_or_default(),
        }
    }

    pub fn geo(&self) -> &GeoAttributor {
        &self.geo
    }

    /// Summary counts, mood breakdown and streak
    pub fn aggregate(&self, records: &[MemoryRecord]) -> UserStats {
        let mut regions = HashSet::new();
        let mut mood_breakdown = MoodBreakdown::default();

        for record in records {
            regions.insert(self.geo.region_of(record.latitude, record.longitude));
            if let Some(mood) = record.mood {
                mood_breakdown.increment(mood);
            }
        }

        let stats = UserStats {
            total_memories: records.len(),
            regions_visited: regions.len(),
            mood_breakdown,
            streak_days: self.streak.streak_days(records),
        };

        tracing::debug!(
            "Aggregated {} memories: {} regions, {} day streak",
            stats.total_memories,
            stats.regions_visited,
            stats.streak_days
        );
        stats
    }

    /// Per-month counts, oldest first, limited to the most recent months
    pub fn monthly(&self, records: &[MemoryRecord]) -> Vec<MonthlyBucket> {
        let mut counts: BTreeMap<(i32, u32), usize> = BTreeMap::new();
        for record in records {
            let date = record.calendar_date();
            *counts.entry((date.year(), date.month())).or_default() += 1;
        }

        let skip = counts.len().saturating_sub(self.config.monthly_window);
        counts
            .into_iter()
            .skip(skip)
            .map(|((year, month), count)| MonthlyBucket { year, month, count })
            .collect()
    }
}
