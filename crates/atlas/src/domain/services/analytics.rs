//! Analytics - Wires the derivation services into one pipeline
//!
//! Classifier, attributor and streak calculator are leaves; the stats
//! aggregator consumes the latter two and feeds the badge engine.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::entities::{
    percentage, Badge, BadgeProgress, Dashboard, MemoryRecord, MonthlyBucket, MoodShare,
    UserStats,
};
use crate::domain::services::{
    BadgeConfig, BadgeEngine, GeoAttributor, GeoConfig, SentimentClassifier, SentimentConfig,
    StatsAggregator, StatsConfig, StreakCalculator,
};
use crate::domain::errors::DomainError;
use crate::domain::value_objects::SentimentAnalysis;
use crate::ports::{Clock, SystemClock};

/// All rule tables in one place, each defaulting to the built-in table
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub sentiment: SentimentConfig,
    pub geo: GeoConfig,
    pub stats: StatsConfig,
    pub badges: BadgeConfig,
}

/// Entry point for every derivation over a memory collection
#[derive(Clone)]
pub struct Analytics {
    classifier: SentimentClassifier,
    aggregator: StatsAggregator,
    badges: BadgeEngine,
    clock: Arc<dyn Clock>,
}

impl Default for Analytics {
    fn default() -> Self {
        Self::new(AnalyticsConfig::default(), Arc::new(SystemClock))
    }
}

impl AnalyticsConfig {
    /// Reject rule tables that cannot produce meaningful results
    pub fn validate(&self) -> Result<(), DomainError> {
        for set in &self.sentiment.categories {
            if set.keywords.iter().any(|k| k.trim().is_empty()) {
                return Err(DomainError::Config(format!(
                    "blank keyword in the {} keyword set",
                    set.mood
                )));
            }
        }
        let fallback = &self.sentiment.fallback;
        if !(0.0..=1.0).contains(&fallback.score) || !(0.0..=1.0).contains(&fallback.confidence) {
            return Err(DomainError::Config(
                "fallback score and confidence must lie in 0.0..=1.0".to_string(),
            ));
        }
        for region in &self.geo.regions {
            if region.min_lat >= region.max_lat || region.min_lng >= region.max_lng {
                return Err(DomainError::Config(format!("region box {:?} is empty", region.region)));
            }
        }
        if self.stats.monthly_window == 0 {
            return Err(DomainError::Config("monthly_window must be at least 1".to_string()));
        }
        let mut ids = HashSet::new();
        for badge in &self.badges.badges {
            if !ids.insert(badge.id.as_str()) {
                return Err(DomainError::Config(format!("duplicate badge id {:?}", badge.id)));
            }
        }
        Ok(())
    }
}

impl Analytics {
    pub fn new(config: AnalyticsConfig, clock: Arc<dyn Clock>) -> Self {
        let geo = GeoAttributor::new(Some(config.geo));
        let streak = StreakCalculator::new(clock.clone());

        Self {
            classifier: SentimentClassifier::new(Some(config.sentiment)),
            aggregator: StatsAggregator::new(geo, streak, Some(config.stats)),
            badges: BadgeEngine::new(Some(config.badges), clock.clone()),
            clock,
        }
    }

    pub fn classifier(&self) -> &SentimentClassifier {
        &self.classifier
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn classify(&self, text: &str) -> SentimentAnalysis {
        self.classifier.classify(text)
    }

    pub fn region_of(&self, lat: f64, lng: f64) -> &str {
        self.aggregator.geo().region_of(lat, lng)
    }

    pub fn aggregate(&self, records: &[MemoryRecord]) -> UserStats {
        self.aggregator.aggregate(records)
    }

    pub fn monthly(&self, records: &[MemoryRecord]) -> Vec<MonthlyBucket> {
        self.aggregator.monthly(records)
    }

    pub fn evaluate(&self, stats: &UserStats, records: &[MemoryRecord]) -> Vec<Badge> {
        self.badges.evaluate(stats, records)
    }

    pub fn badge_progress(&self, records: &[MemoryRecord]) -> Vec<BadgeProgress> {
        let stats = self.aggregate(records);
        self.badges.progress(&stats, records)
    }

    /// Full dashboard in one pass over the collection
    pub fn dashboard(&self, records: &[MemoryRecord]) -> Dashboard {
        let stats = self.aggregate(records);
        let badges = self.evaluate(&stats, records);
        let total = stats.total_memories;

        let mood_shares: Vec<MoodShare> = stats
            .mood_breakdown
            .iter()
            .map(|(mood, count)| MoodShare {
                mood,
                count,
                percentage: percentage(count, total),
            })
            .collect();

        // first maximum wins, so ties follow label order
        let dominant_mood = mood_shares
            .iter()
            .filter(|share| share.count > 0)
            .fold(None::<MoodShare>, |best, share| match best {
                Some(b) if b.count >= share.count => Some(b),
                _ => Some(*share),
            });

        let stories = records.iter().filter(|r| r.has_story()).count();
        let public = records.iter().filter(|r| !r.is_private).count();

        Dashboard {
            generated_at: self.clock.now(),
            monthly: self.monthly(records),
            badges,
            mood_shares,
            dominant_mood,
            stories,
            story_percentage: percentage(stories, total),
            public_percentage: percentage(public, total),
            stats,
        }
    }
}
