use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

use crate::models::{ImageItem, SourcesParams};
use crate::services::TtlCache;
use crate::utils::cache_key;

/// Read path over the static image catalog, memoized per filter combination.
#[derive(Clone)]
pub struct CatalogService {
    path: PathBuf,
    cache: Arc<Mutex<TtlCache<Vec<ImageItem>>>>,
}

impl CatalogService {
    pub fn new(path: impl Into<PathBuf>, cache: TtlCache<Vec<ImageItem>>) -> Self {
        Self {
            path: path.into(),
            cache: Arc::new(Mutex::new(cache)),
        }
    }

    pub async fn list_images(&self, params: &SourcesParams) -> Result<Vec<ImageItem>> {
        let key = filter_key(params);
        if let Some(images) = self.cache.lock().await.get(&key) {
            debug!(key = %key, "Catalog cache hit");
            return Ok(images);
        }
        debug!(key = %key, "Catalog cache miss");

        // The lock is not held across the read; two concurrent misses both load and
        // the later write wins.
        let images = self.load().await?;
        let filtered = apply_filters(images, params);

        let mut cache = self.cache.lock().await;
        cache.set(key, filtered.clone(), None);
        debug!(entries = cache.len(), "Catalog cache updated");
        Ok(filtered)
    }

    async fn load(&self) -> Result<Vec<ImageItem>> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read catalog: {}", self.path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Invalid catalog JSON: {}", self.path.display()))
    }
}

fn filter_key(params: &SourcesParams) -> String {
    let from = params.from_date.map(|d| d.to_rfc3339()).unwrap_or_default();
    let to = params.to_date.map(|d| d.to_rfc3339()).unwrap_or_default();
    let keywords = params.keywords.as_deref().unwrap_or_default();
    cache_key(&["images", &from, &to, keywords])
}

fn apply_filters(images: Vec<ImageItem>, params: &SourcesParams) -> Vec<ImageItem> {
    let wanted: HashSet<String> = params
        .keywords
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .map(|kw| kw.trim().to_lowercase())
        .filter(|kw| !kw.is_empty())
        .collect();

    images
        .into_iter()
        .filter(|img| params.from_date.map_or(true, |from| img.date_created >= from))
        .filter(|img| params.to_date.map_or(true, |to| img.date_created <= to))
        .filter(|img| {
            wanted.is_empty()
                || img
                    .keywords
                    .iter()
                    .any(|kw| wanted.contains(&kw.to_lowercase()))
        })
        .collect()
}
