//! Memory - A geotagged personal journal entry
//!
//! Records are immutable-by-replacement: an edit produces a new value with
//! the same identity. Mood is derived only in [`MemoryRecord::create`] and
//! [`MemoryRecord::revise`], never implicitly afterwards.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;
use crate::domain::services::SentimentClassifier;
use crate::domain::value_objects::{Coordinate, Mood};

/// Calendar date used when a record's `date` cannot be parsed (1970-01-01)
pub fn fallback_date() -> NaiveDate {
    NaiveDate::default()
}

/// MemoryRecord - A single user-authored, geotagged entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MemoryRecord {
    /// Opaque identity, stable for the record's lifetime
    pub id: String,
    pub title: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Calendar date the memory refers to, as supplied by the author
    pub date: String,
    #[serde(default)]
    pub photos: Vec<String>,
    #[serde(default)]
    pub video_links: Vec<String>,
    /// Generated narrative for the memory, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_story: Option<String>,
    #[serde(default, alias = "sentiment", skip_serializing_if = "Option::is_none")]
    pub mood: Option<Mood>,
    /// Mood strength (0.0 - 1.0)
    #[serde(default, alias = "sentimentScore", skip_serializing_if = "Option::is_none")]
    pub mood_score: Option<f64>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_private: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// MemoryDraft - Form data a record is created from or revised with
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MemoryDraft {
    pub title: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub date: String,
    #[serde(default)]
    pub photos: Vec<String>,
    #[serde(default)]
    pub video_links: Vec<String>,
    #[serde(default)]
    pub ai_story: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_private: bool,
}

impl MemoryDraft {
    /// Check the fields the form requires before a record can be built
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.title.trim().is_empty() {
            return Err(DomainError::Validation("title must not be empty".to_string()));
        }
        if self.description.trim().is_empty() {
            return Err(DomainError::Validation(
                "description must not be empty".to_string(),
            ));
        }
        if !Coordinate::new(self.latitude, self.longitude).is_valid() {
            return Err(DomainError::Validation(format!(
                "coordinate out of range: ({}, {})",
                self.latitude, self.longitude
            )));
        }
        Ok(())
    }

    /// Text the mood is derived from
    pub fn sentiment_text(&self) -> String {
        format!("{} {}", self.title, self.description)
    }

    /// Add a tag unless it is blank or already present
    pub fn add_tag(&mut self, tag: &str) {
        let tag = tag.trim();
        if !tag.is_empty() && !self.tags.iter().any(|t| t == tag) {
            self.tags.push(tag.to_string());
        }
    }

    /// Remove a tag; returns whether it was present
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        self.tags.len() != before
    }
}

impl MemoryRecord {
    /// Build a new record from a validated draft, classifying its text once
    pub fn create(
        draft: MemoryDraft,
        classifier: &SentimentClassifier,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        Self::build(uuid::Uuid::new_v4().to_string(), draft, classifier, now, now)
    }

    /// Replace this record's content, keeping identity and creation time
    pub fn revise(
        &self,
        draft: MemoryDraft,
        classifier: &SentimentClassifier,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        Self::build(self.id.clone(), draft, classifier, self.created_at, now)
    }

    fn build(
        id: String,
        draft: MemoryDraft,
        classifier: &SentimentClassifier,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        draft.validate()?;
        if parse_calendar_date(&draft.date).is_none() {
            tracing::warn!(
                "Unparseable date {:?} on memory {}; it will be read as {}",
                draft.date,
                id,
                fallback_date()
            );
        }
        let analysis = classifier.classify(&draft.sentiment_text());

        Ok(Self {
            id,
            title: draft.title,
            description: draft.description,
            latitude: draft.latitude,
            longitude: draft.longitude,
            date: draft.date,
            photos: draft.photos,
            video_links: draft.video_links,
            ai_story: draft.ai_story.filter(|s| !s.trim().is_empty()),
            mood: Some(analysis.mood),
            mood_score: Some(analysis.score),
            tags: draft.tags,
            is_private: draft.is_private,
            created_at,
            updated_at,
        })
    }

    /// Turn the record back into editable form data
    pub fn to_draft(&self) -> MemoryDraft {
        MemoryDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            latitude: self.latitude,
            longitude: self.longitude,
            date: self.date.clone(),
            photos: self.photos.clone(),
            video_links: self.video_links.clone(),
            ai_story: self.ai_story.clone(),
            tags: self.tags.clone(),
            is_private: self.is_private,
        }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }

    /// Whether the record carries a generated narrative that is not blank
    pub fn has_story(&self) -> bool {
        self.story().is_some()
    }

    /// The generated narrative, if present and not blank
    pub fn story(&self) -> Option<&str> {
        self.ai_story.as_deref().filter(|s| !s.trim().is_empty())
    }

    /// Calendar date of the memory, ignoring time of day.
    ///
    /// Accepts `YYYY-MM-DD`, RFC 3339 timestamps and naive `YYYY-MM-DDTHH:MM:SS`.
    /// Anything else maps to [`fallback_date`].
    pub fn calendar_date(&self) -> NaiveDate {
        parse_calendar_date(&self.date).unwrap_or_else(|| {
            tracing::debug!("Reading memory {} with unparseable date {:?}", self.id, self.date);
            fallback_date()
        })
    }
}

fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc).date_naive());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|ts| ts.date())
}
