//! Memory Application Service (Use Case)
//!
//! Orchestrates record creation and the read-time derivations.

use std::sync::Arc;

use crate::domain::{
    export, group_by_year, profile_summary, Analytics, Badge, BadgeProgress, Dashboard,
    DomainError, ExportFormat, MemoryDraft, MemoryRecord, ProfileSummary, TimelineGroup,
    UserStats,
};
use crate::ports::MemoryRepository;

/// Application service for memory operations
pub struct MemoryService<R: MemoryRepository> {
    repo: Arc<R>,
    analytics: Analytics,
}

impl<R: MemoryRepository> MemoryService<R> {
    pub fn new(repo: Arc<R>, analytics: Analytics) -> Self {
        Self { repo, analytics }
    }

    pub fn analytics(&self) -> &Analytics {
        &self.analytics
    }

    /// All memories in collection order
    pub fn list(&self) -> Result<Vec<MemoryRecord>, DomainError> {
        self.repo.list()
    }

    pub fn get(&self, id: &str) -> Result<MemoryRecord, DomainError> {
        self.repo
            .find_by_id(id)?
            .ok_or_else(|| DomainError::not_found("Memory", id))
    }

    /// Create a memory, deriving its mood from title and description
    pub fn create(&self, draft: MemoryDraft) -> Result<MemoryRecord, DomainError> {
        let now = self.analytics.clock().now();
        let record = MemoryRecord::create(draft, self.analytics.classifier(), now)?;
        let saved = self.repo.upsert(record)?;

        tracing::info!(
            "Created memory: {} ({}) [{}]",
            saved.title,
            saved.id,
            saved.mood.unwrap_or_default()
        );
        Ok(saved)
    }

    /// Replace a memory's content, re-deriving its mood
    pub fn update(&self, id: &str, draft: MemoryDraft) -> Result<MemoryRecord, DomainError> {
        let current = self.get(id)?;
        let now = self.analytics.clock().now();
        let revised = current.revise(draft, self.analytics.classifier(), now)?;
        let saved = self.repo.upsert(revised)?;

        tracing::info!("Updated memory: {} ({})", saved.title, saved.id);
        Ok(saved)
    }

    pub fn delete(&self, id: &str) -> Result<bool, DomainError> {
        let deleted = self.repo.delete(id)?;
        if deleted {
            tracing::info!("Deleted memory: {}", id);
        }
        Ok(deleted)
    }

    pub fn clear(&self) -> Result<usize, DomainError> {
        let removed = self.repo.clear()?;
        tracing::info!("Cleared {} memories", removed);
        Ok(removed)
    }

    pub fn stats(&self) -> Result<UserStats, DomainError> {
        Ok(self.analytics.aggregate(&self.repo.list()?))
    }

    pub fn badges(&self) -> Result<Vec<Badge>, DomainError> {
        let records = self.repo.list()?;
        let stats = self.analytics.aggregate(&records);
        Ok(self.analytics.evaluate(&stats, &records))
    }

    pub fn badge_progress(&self) -> Result<Vec<BadgeProgress>, DomainError> {
        Ok(self.analytics.badge_progress(&self.repo.list()?))
    }

    pub fn dashboard(&self) -> Result<Dashboard, DomainError> {
        Ok(self.analytics.dashboard(&self.repo.list()?))
    }

    pub fn timeline(&self) -> Result<Vec<TimelineGroup>, DomainError> {
        Ok(group_by_year(&self.repo.list()?))
    }

    pub fn profile(&self) -> Result<ProfileSummary, DomainError> {
        Ok(profile_summary(&self.repo.list()?))
    }

    pub fn export(&self, format: ExportFormat) -> Result<String, DomainError> {
        export(&self.repo.list()?, format, self.analytics.clock().now())
    }
}
