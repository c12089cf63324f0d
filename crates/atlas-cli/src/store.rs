//! JSON file memory store
//!
//! Keeps the whole collection in one pretty-printed JSON array. Writes go to
//! a sibling temp file first and are renamed into place.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use atlas::{DomainError, MemoryRecord, MemoryRepository};

pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Vec<MemoryRecord>, DomainError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path).map_err(|e| {
            DomainError::Repository(format!("Failed to read {:?}: {}", self.path, e))
        })?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&content).map_err(|e| {
            DomainError::Repository(format!("Failed to parse {:?}: {}", self.path, e))
        })
    }

    fn write(&self, records: &[MemoryRecord]) -> Result<(), DomainError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(|e| {
                DomainError::Repository(format!("Failed to create {:?}: {}", dir, e))
            })?;
        }
        let content = serde_json::to_string_pretty(records)
            .map_err(|e| DomainError::Repository(format!("Failed to serialize memories: {}", e)))?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content)
            .and_then(|_| fs::rename(&tmp, &self.path))
            .map_err(|e| {
                DomainError::Repository(format!("Failed to write {:?}: {}", self.path, e))
            })?;

        tracing::debug!("Wrote {} memories to {:?}", records.len(), self.path);
        Ok(())
    }

    fn guard(&self) -> Result<std::sync::MutexGuard<'_, ()>, DomainError> {
        self.lock
            .lock()
            .map_err(|_| DomainError::Repository("store lock poisoned".to_string()))
    }
}

impl MemoryRepository for JsonFileStore {
    fn list(&self) -> Result<Vec<MemoryRecord>, DomainError> {
        let _guard = self.guard()?;
        self.read()
    }

    fn find_by_id(&self, id: &str) -> Result<Option<MemoryRecord>, DomainError> {
        let _guard = self.guard()?;
        Ok(self.read()?.into_iter().find(|r| r.id == id))
    }

    fn upsert(&self, record: MemoryRecord) -> Result<MemoryRecord, DomainError> {
        let _guard = self.guard()?;
        let mut records = self.read()?;
        match records.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => *existing = record.clone(),
            None => records.push(record.clone()),
        }
        self.write(&records)?;
        Ok(record)
    }

    fn delete(&self, id: &str) -> Result<bool, DomainError> {
        let _guard = self.guard()?;
        let mut records = self.read()?;
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Ok(false);
        }
        self.write(&records)?;
        Ok(true)
    }

    fn clear(&self) -> Result<usize, DomainError> {
        let _guard = self.guard()?;
        let removed = self.read()?.len();
        self.write(&[])?;
        Ok(removed)
    }
}
