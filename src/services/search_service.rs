use std::sync::Arc;
use tracing::{error, info};

use crate::models::{ImageItem, SearchHistoryEntry};
use crate::repositories::HistoryStore;
use crate::services::ImageSource;
use crate::utils::compute_confidence;

/// Answers a search end to end: fetch, record, score, rank.
#[derive(Clone)]
pub struct SearchService {
    source: Arc<dyn ImageSource>,
    history: Arc<dyn HistoryStore>,
}

impl SearchService {
    pub fn new(source: Arc<dyn ImageSource>, history: Arc<dyn HistoryStore>) -> Self {
        Self { source, history }
    }

    /// Runs `query` against the upstream source and returns the hits ranked by
    /// confidence, highest first. Hits with equal confidence keep upstream order.
    ///
    /// A non-empty search is appended to history with the unscored snapshot. A failed
    /// history write is logged and does not fail the search.
    pub async fn search(&self, query: &str) -> Vec<ImageItem> {
        let mut images = self.source.fetch_images(query).await;
        if images.is_empty() {
            info!(query, "Search returned no results");
            return images;
        }

        let entry = SearchHistoryEntry::new(query, images.clone());
        if let Err(e) = self.history.append(entry).await {
            error!(query, error = %format!("{e:#}"), "Failed to record search history");
        }

        for image in &mut images {
            image.confidence = Some(compute_confidence(
                query,
                &image.title,
                image.description.as_deref().unwrap_or(""),
                &image.keywords,
            ));
        }

        // Stable sort: ties stay in upstream order.
        images.sort_by(|a, b| {
            let a = a.confidence.unwrap_or(0.0);
            let b = b.confidence.unwrap_or(0.0);
            b.total_cmp(&a)
        });

        info!(query, results = images.len(), "Search completed");
        images
    }
}
