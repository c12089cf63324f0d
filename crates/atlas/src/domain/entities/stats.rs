//! Stats - Derived, ephemeral aggregates
//!
//! None of these are persisted; they are rebuilt from the full memory
//! collection on every read.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::domain::entities::{Badge, MemoryRecord};
use crate::domain::value_objects::Mood;

/// Count per mood label; every label is always present
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct MoodBreakdown {
    pub happy: usize,
    pub nostalgic: usize,
    pub sad: usize,
    pub excited: usize,
    pub neutral: usize,
}

impl MoodBreakdown {
    pub fn get(&self, mood: Mood) -> usize {
        match mood {
            Mood::Happy => self.happy,
            Mood::Nostalgic => self.nostalgic,
            Mood::Sad => self.sad,
            Mood::Excited => self.excited,
            Mood::Neutral => self.neutral,
        }
    }

    pub fn increment(&mut self, mood: Mood) {
        let slot = match mood {
            Mood::Happy => &mut self.happy,
            Mood::Nostalgic => &mut self.nostalgic,
            Mood::Sad => &mut self.sad,
            Mood::Excited => &mut self.excited,
            Mood::Neutral => &mut self.neutral,
        };
        *slot += 1;
    }

    /// (label, count) pairs in [`Mood::ALL`] order
    pub fn iter(&self) -> impl Iterator<Item = (Mood, usize)> + '_ {
        Mood::ALL.into_iter().map(move |mood| (mood, self.get(mood)))
    }

    pub fn total(&self) -> usize {
        self.iter().map(|(_, count)| count).sum()
    }
}

/// Summary numbers for the dashboard
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct UserStats {
    pub total_memories: usize,
    /// Distinct region labels, `Unknown` included
    pub regions_visited: usize,
    pub mood_breakdown: MoodBreakdown,
    pub streak_days: usize,
}

/// Memories recorded in one calendar month
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct MonthlyBucket {
    pub year: i32,
    pub month: u32,
    pub count: usize,
}

impl MonthlyBucket {
    /// Chart label such as `Jun 24`
    pub fn label(&self) -> String {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .map(|d| d.format("%b %y").to_string())
            .unwrap_or_else(|| format!("{:04}-{:02}", self.year, self.month))
    }
}

/// Share of memories carrying one mood
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct MoodShare {
    pub mood: Mood,
    pub count: usize,
    /// Rounded percentage of all memories
    pub percentage: u32,
}

/// Everything the dashboard renders, computed in one pass
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Dashboard {
    pub generated_at: DateTime<Utc>,
    pub stats: UserStats,
    pub badges: Vec<Badge>,
    pub monthly: Vec<MonthlyBucket>,
    pub mood_shares: Vec<MoodShare>,
    /// Most common mood, `None` when no memory has one
    pub dominant_mood: Option<MoodShare>,
    pub stories: usize,
    pub story_percentage: u32,
    pub public_percentage: u32,
}

/// Memories of one year, newest first
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TimelineGroup {
    pub year: i32,
    pub memories: Vec<MemoryRecord>,
}

/// Counts shown on the profile page
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct ProfileSummary {
    pub total_memories: usize,
    pub public_memories: usize,
    pub private_memories: usize,
    pub memories_with_stories: usize,
    pub memories_with_photos: usize,
    pub memories_with_videos: usize,
    /// Distinct whole-degree latitudes among public memories
    pub public_locations: usize,
}

/// Rounded `part / whole` percentage, 0 when `whole` is 0
pub fn percentage(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    (part as f64 / whole as f64 * 100.0).round() as u32
}
