use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::UpstreamSettings;
use crate::error::UpstreamError;
use crate::models::ImageItem;

const DEFAULT_TITLE: &str = "No Title";
const DEFAULT_DESCRIPTION: &str = "No Description";
const PREVIEW_REL: &str = "preview";

/// Provider of raw search hits.
///
/// Implementations swallow recoverable failures and answer with an empty list.
#[async_trait]
pub trait ImageSource: Send + Sync {
    async fn fetch_images(&self, query: &str) -> Vec<ImageItem>;
}

/// Client for the NASA image library search endpoint.
#[derive(Clone)]
pub struct NasaClient {
    http: reqwest::Client,
    settings: UpstreamSettings,
}

impl NasaClient {
    pub fn new(settings: UpstreamSettings) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .build()?;
        Ok(Self { http, settings })
    }

    async fn request(&self, query: &str) -> Result<Value, UpstreamError> {
        let response = self
            .http
            .get(&self.settings.base_url)
            .query(&[("q", query), ("media_type", self.settings.media_type.as_str())])
            .send()
            .await
            .map_err(UpstreamError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status));
        }

        response.json::<Value>().await.map_err(UpstreamError::Decode)
    }
}

#[async_trait]
impl ImageSource for NasaClient {
    async fn fetch_images(&self, query: &str) -> Vec<ImageItem> {
        match self.request(query).await {
            Ok(payload) => parse_collection(&payload, self.settings.max_results),
            Err(e) => {
                warn!(query, error = %e, "Upstream search failed");
                Vec::new()
            }
        }
    }
}

/// Normalizes the first `limit` items of a `{collection: {items: [...]}}` payload.
/// Items without a preview link are dropped; upstream order is kept.
pub fn parse_collection(payload: &Value, limit: usize) -> Vec<ImageItem> {
    let items = payload
        .get("collection")
        .and_then(|collection| collection.get("items"))
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    items
        .iter()
        .take(limit)
        .filter_map(|item| {
            let parsed = normalize_item(item);
            if parsed.is_none() {
                debug!("Skipping upstream item without a preview link");
            }
            parsed
        })
        .collect()
}

/// Turns one raw upstream item into an [`ImageItem`], or `None` when no preview URL
/// can be resolved.
pub fn normalize_item(item: &Value) -> Option<ImageItem> {
    let empty = Value::Object(Default::default());
    let metadata = item
        .get("data")
        .and_then(Value::as_array)
        .and_then(|data| data.first())
        .unwrap_or(&empty);

    let url = item
        .get("links")
        .and_then(Value::as_array)
        .and_then(|links| {
            links
                .iter()
                .find(|link| link.get("rel").and_then(Value::as_str) == Some(PREVIEW_REL))
        })
        .and_then(|link| link.get("href"))
        .and_then(Value::as_str)
        .filter(|href| !href.is_empty())?;

    let title = text_field(metadata, "title").unwrap_or_else(|| DEFAULT_TITLE.to_string());
    let description =
        text_field(metadata, "description").unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string());
    let date_created = metadata
        .get("date_created")
        .and_then(Value::as_str)
        .and_then(parse_timestamp)
        .unwrap_or_else(Utc::now);
    let keywords = metadata
        .get("keywords")
        .and_then(Value::as_array)
        .map(|keywords| {
            keywords
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    Some(ImageItem {
        title,
        description: Some(description),
        url: url.to_string(),
        date_created,
        keywords,
        confidence: None,
    })
}

fn text_field(metadata: &Value, field: &str) -> Option<String> {
    metadata
        .get(field)
        .and_then(Value::as_str)
        .filter(|text| !text.trim().is_empty())
        .map(str::to_string)
}

/// Parses an ISO-8601 timestamp. A trailing `Z` is rewritten to `+00:00`; values
/// without an offset are taken as UTC, and a bare date as its midnight.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    let normalized = match raw.strip_suffix('Z') {
        Some(stripped) => format!("{stripped}+00:00"),
        None => raw.to_string(),
    };

    if let Ok(parsed) = DateTime::parse_from_rfc3339(&normalized) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(&normalized, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(&normalized, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
