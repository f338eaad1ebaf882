use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::models::SearchHistoryEntry;

/// Ordered log of completed searches, newest first.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    async fn append(&self, entry: SearchHistoryEntry) -> Result<()>;
    async fn list(&self, offset: usize, limit: usize) -> Result<Vec<SearchHistoryEntry>>;
    async fn delete(&self, id: Uuid) -> Result<bool>;
}

/// History kept as one JSON array document that is rewritten on every mutation.
pub struct JsonFileHistoryRepo {
    path: PathBuf,
    // Serializes read-modify-write cycles within the process.
    write_lock: Mutex<()>,
}

impl JsonFileHistoryRepo {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Vec<SearchHistoryEntry>> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to read history file: {}", self.path.display())
                })
            }
        };
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&content)
            .with_context(|| format!("Corrupt history file: {}", self.path.display()))
    }

    async fn store(&self, entries: &[SearchHistoryEntry]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.with_context(|| {
                format!("Failed to create history directory: {}", parent.display())
            })?;
        }
        let json = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, json)
            .await
            .with_context(|| format!("Failed to write history file: {}", self.path.display()))
    }
}

#[async_trait]
impl HistoryStore for JsonFileHistoryRepo {
    async fn append(&self, entry: SearchHistoryEntry) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut history = self.load().await?;
        history.insert(0, entry);
        self.store(&history).await
    }

    async fn list(&self, offset: usize, limit: usize) -> Result<Vec<SearchHistoryEntry>> {
        let history = self.load().await?;
        Ok(history.into_iter().skip(offset).take(limit).collect())
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let _guard = self.write_lock.lock().await;
        let mut history = self.load().await?;
        let before = history.len();
        history.retain(|entry| entry.id != id);
        if history.len() == before {
            return Ok(false);
        }
        self.store(&history).await?;
        Ok(true)
    }
}
