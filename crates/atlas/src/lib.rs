//! Memory Atlas Domain Library
//!
//! Derivation engine for a geotagged memory journal: mood classification,
//! region attribution, day streaks, dashboard statistics and badges.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain/`): Pure business entities and logic
//!   - `entities/`: MemoryRecord, MemoryDraft, Badge, UserStats, Dashboard
//!   - `value_objects/`: Immutable value types (Mood, Coordinate)
//!   - `services/`: Stateless derivations driven by declarative rule tables
//!   - `errors/`: Domain-specific error types
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `clock`: Injected source of "now"
//!   - `repositories/`: Memory collection access
//!
//! - **Application** (`application/`): Use cases over a repository
//!
//! # Usage
//!
//! ```rust,ignore
//! use atlas::{Analytics, MemoryRecord};
//!
//! let analytics = Analytics::default();
//! let stats = analytics.aggregate(&records);
//! let badges = analytics.evaluate(&stats, &records);
//! ```

pub mod application;
pub mod domain;
pub mod ports;

// Re-export commonly used types
pub use application::MemoryService;
pub use domain::{
    export_file_name, group_by_year, profile_summary, relative_date, share_text, Analytics,
    AnalyticsConfig, Badge, BadgeConfig, BadgeDefinition, BadgeEngine, BadgeMetric, BadgeProgress,
    Coordinate, Dashboard, DomainError, ExportFormat, GeoAttributor, GeoConfig, MemoryDraft,
    MemoryRecord, MonthlyBucket, Mood, MoodBreakdown, MoodShare, ProfileSummary,
    SentimentAnalysis, SentimentClassifier, SentimentConfig, StatsAggregator, StatsConfig,
    StreakCalculator, TimelineGroup, UserStats,
};
pub use ports::{Clock, FixedClock, MemoryRepository, SystemClock};
