//! Export - Profile counts, share blurb and file exports

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{MemoryRecord, ProfileSummary};
use crate::domain::errors::DomainError;
use crate::domain::value_objects::Mood;

/// Export file format
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    #[default]
    Json,
    Markdown,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Markdown => "txt",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Markdown => write!(f, "markdown"),
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "markdown" | "md" | "text" | "txt" => Ok(ExportFormat::Markdown),
            _ => Err(format!("Unknown export format: {}", s)),
        }
    }
}

/// Counts for the profile page
pub fn profile_summary(records: &[MemoryRecord]) -> ProfileSummary {
    let public: Vec<&MemoryRecord> = records.iter().filter(|r| !r.is_private).collect();
    let locations: HashSet<i64> = public.iter().map(|r| r.latitude.floor() as i64).collect();

    ProfileSummary {
        total_memories: records.len(),
        public_memories: public.len(),
        private_memories: records.len() - public.len(),
        memories_with_stories: records.iter().filter(|r| r.has_story()).count(),
        memories_with_photos: records.iter().filter(|r| !r.photos.is_empty()).count(),
        memories_with_videos: records.iter().filter(|r| !r.video_links.is_empty()).count(),
        public_locations: locations.len(),
    }
}

/// Share text for public memories; `None` when there is nothing public
pub fn share_text(summary: &ProfileSummary) -> Option<String> {
    if summary.public_memories == 0 {
        return None;
    }
    Some(format!(
        "Check out my travel memories! I've documented {} memories across {} different locations.",
        summary.public_memories, summary.public_locations
    ))
}

/// Default export file name, e.g. `memory-atlas-2024-06-15.json`
pub fn export_file_name(format: ExportFormat, now: DateTime<Utc>) -> String {
    format!("memory-atlas-{}.{}", now.format("%Y-%m-%d"), format.extension())
}

/// Render the collection in the requested format
pub fn export(
    records: &[MemoryRecord],
    format: ExportFormat,
    now: DateTime<Utc>,
) -> Result<String, DomainError> {
    match format {
        ExportFormat::Json => serde_json::to_string_pretty(records)
            .map_err(|e| DomainError::Serialization(format!("JSON export failed: {}", e))),
        ExportFormat::Markdown => Ok(markdown(records, now)),
    }
}

fn markdown(records: &[MemoryRecord], now: DateTime<Utc>) -> String {
    let mut out = String::new();
    out.push_str("# Memory Atlas Export\n\n");
    out.push_str(&format!("Generated on: {}\n", now.format("%Y-%m-%d")));
    out.push_str(&format!("Total Memories: {}\n", records.len()));

    for record in records {
        out.push_str(&format!("\n## {}\n", record.title));
        out.push_str(&format!("**Date:** {}\n", record.calendar_date().format("%Y-%m-%d")));
        out.push_str(&format!("**Location:** {}\n", record.coordinate()));
        out.push_str(&format!("**Mood:** {}\n\n", record.mood.unwrap_or(Mood::Neutral)));
        out.push_str(&record.description);
        out.push('\n');

        if let Some(story) = record.story() {
            out.push_str(&format!("\n**AI Story:**\n{}\n", story));
        }
        if !record.tags.is_empty() {
            out.push_str(&format!("\n**Tags:** {}\n", record.tags.join(", ")));
        }
        out.push_str("\n---\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 8, 0, 0).unwrap()
    }

    fn record(title: &str, lat: f64, private: bool) -> MemoryRecord {
        MemoryRecord {
            id: title.to_lowercase(),
            title: title.to_string(),
            description: format!("About {}", title),
            latitude: lat,
            longitude: 10.0,
            date: "2024-05-01".to_string(),
            photos: vec![],
            video_links: vec![],
            ai_story: None,
            mood: Some(Mood::Happy),
            mood_score: Some(0.5),
            tags: vec![],
            is_private: private,
            created_at: now(),
            updated_at: now(),
        }
    }

    #[test]
    fn test_profile_summary_counts() {
        let mut a = record("A", 10.2, false);
        a.photos.push("a.jpg".to_string());
        a.ai_story = Some("story".to_string());
        let b = record("B", 10.9, false);
        let mut c = record("C", -3.5, true);
        c.video_links.push("https://video".to_string());

        let summary = profile_summary(&[a, b, c]);
        assert_eq!(summary.total_memories, 3);
        assert_eq!(summary.public_memories, 2);
        assert_eq!(summary.private_memories, 1);
        assert_eq!(summary.memories_with_stories, 1);
        assert_eq!(summary.memories_with_photos, 1);
        assert_eq!(summary.memories_with_videos, 1);
        // 10.2 and 10.9 share a whole-degree latitude
        assert_eq!(summary.public_locations, 1);
        assert!(share_text(&summary).unwrap().contains("2 memories across 1 different"));
    }

    #[test]
    fn test_share_needs_public_memories() {
        let summary = profile_summary(&[record("A", 1.0, true)]);
        assert!(share_text(&summary).is_none());
    }

    #[test]
    fn test_markdown_export() {
        let mut a = record("Lisbon", 38.7223, false);
        a.tags = vec!["city".to_string(), "food".to_string()];
        a.ai_story = Some("Trams and tarts".to_string());
        let mut b = record("Porto", 41.1579, false);
        b.mood = None;
        b.ai_story = Some("   ".to_string());

        let text = export(&[a, b], ExportFormat::Markdown, now()).unwrap();
        assert!(text.starts_with("# Memory Atlas Export"));
        assert!(text.contains("Total Memories: 2"));
        assert!(text.contains("## Lisbon"));
        assert!(text.contains("**Location:** 38.7223, 10.0000"));
        assert!(text.contains("**Tags:** city, food"));
        assert!(text.contains("**AI Story:**\nTrams and tarts"));
        assert!(text.contains("**Mood:** neutral"));
        assert_eq!(text.matches("**AI Story:**").count(), 1);
    }

    #[test]
    fn test_json_export_reads_back() {
        let records = vec![record("A", 1.0, false)];
        let text = export(&records, ExportFormat::Json, now()).unwrap();
        let parsed: Vec<MemoryRecord> = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, records);
    }

    #[test]
    fn test_file_name_and_format_parsing() {
        assert_eq!(
            export_file_name(ExportFormat::Markdown, now()),
            "memory-atlas-2024-06-15.txt"
        );
        assert_eq!("MD".parse::<ExportFormat>(), Ok(ExportFormat::Markdown));
        assert!("pdf".parse::<ExportFormat>().is_err());
    }
}
