//! Badge - Achievement unlocked when an aggregate metric crosses a threshold

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metric a badge rule reads
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BadgeMetric {
    /// Total number of memories
    MemoryCount,
    /// Number of distinct regions
    RegionCount,
    /// Number of memories carrying a generated narrative
    StoryCount,
}

impl std::fmt::Display for BadgeMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BadgeMetric::MemoryCount => write!(f, "memory_count"),
            BadgeMetric::RegionCount => write!(f, "region_count"),
            BadgeMetric::StoryCount => write!(f, "story_count"),
        }
    }
}

/// Unlock rule: `metric >= threshold`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BadgeRequirement {
    pub metric: BadgeMetric,
    pub threshold: usize,
}

/// Static description of a badge
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BadgeDefinition {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub requirement: BadgeRequirement,
}

impl BadgeDefinition {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        icon: impl Into<String>,
        metric: BadgeMetric,
        threshold: usize,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            icon: icon.into(),
            requirement: BadgeRequirement { metric, threshold },
        }
    }
}

/// A badge as shown to the user.
///
/// `unlocked_at` is the evaluation instant, not the first time the rule held.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub requirement: BadgeRequirement,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unlocked_at: Option<DateTime<Utc>>,
}

impl Badge {
    pub fn unlocked(definition: &BadgeDefinition, at: DateTime<Utc>) -> Self {
        Self {
            id: definition.id.clone(),
            name: definition.name.clone(),
            description: definition.description.clone(),
            icon: definition.icon.clone(),
            requirement: definition.requirement,
            unlocked_at: Some(at),
        }
    }
}

/// Where a rule currently stands, locked or not
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BadgeProgress {
    pub badge: BadgeDefinition,
    pub current: usize,
    pub unlocked: bool,
}

impl BadgeProgress {
    /// Fraction of the threshold reached, capped at 1.0
    pub fn ratio(&self) -> f64 {
        let threshold = self.badge.requirement.threshold;
        if threshold == 0 {
            return 1.0;
        }
        (self.current as f64 / threshold as f64).min(1.0)
    }
}
