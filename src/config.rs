use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub upstream: UpstreamSettings,
    pub cache: CacheSettings,
    pub storage: StorageSettings,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
    pub max_json_payload_size: usize,
}

/// Settings for the third-party image search provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamSettings {
    pub base_url: String,
    pub media_type: String,
    pub max_results: usize,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheSettings {
    pub ttl_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSettings {
    pub history_file: PathBuf,
    pub catalog_file: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub allowed_origins: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
                workers: num_cpus::get(),
                max_json_payload_size: 64 * 1024,
            },
            upstream: UpstreamSettings {
                base_url: "https://images-api.nasa.gov/search".to_string(),
                media_type: "image".to_string(),
                max_results: 50,
                timeout_seconds: 10,
            },
            cache: CacheSettings { ttl_seconds: 300 },
            storage: StorageSettings {
                history_file: PathBuf::from("data/history.json"),
                catalog_file: PathBuf::from("data/images_mock.json"),
            },
            security: SecurityConfig {
                allowed_origins: vec![
                    "http://localhost:3000".to_string(),
                    "http://localhost:5173".to_string(),
                ],
            },
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        let mut config = Config::default();

        // Server configuration
        if let Ok(host) = env::var("HOST") {
            config.server.host = host;
        }
        if let Ok(port) = env::var("PORT") {
            config.server.port = port.parse()?;
        }
        if let Ok(workers) = env::var("WORKERS") {
            config.server.workers = workers.parse()?;
        }
        if let Ok(max_json_payload_size) = env::var("MAX_JSON_PAYLOAD_SIZE") {
            config.server.max_json_payload_size = max_json_payload_size.parse()?;
        }

        // Upstream configuration
        if let Ok(base_url) = env::var("NASA_API_URL") {
            config.upstream.base_url = base_url;
        }
        if let Ok(media_type) = env::var("NASA_MEDIA_TYPE") {
            config.upstream.media_type = media_type;
        }
        if let Ok(max_results) = env::var("NASA_MAX_RESULTS") {
            config.upstream.max_results = max_results.parse()?;
        }
        if let Ok(timeout_seconds) = env::var("NASA_TIMEOUT_SECONDS") {
            config.upstream.timeout_seconds = timeout_seconds.parse()?;
        }

        // Cache configuration
        if let Ok(ttl_seconds) = env::var("CACHE_TTL_SECONDS") {
            config.cache.ttl_seconds = ttl_seconds.parse()?;
        }

        // Storage configuration
        if let Ok(history_file) = env::var("HISTORY_FILE") {
            config.storage.history_file = PathBuf::from(history_file);
        }
        if let Ok(catalog_file) = env::var("CATALOG_FILE") {
            config.storage.catalog_file = PathBuf::from(catalog_file);
        }

        // Security configuration
        if let Ok(allowed_origins) = env::var("ALLOWED_ORIGINS") {
            config.security.allowed_origins = allowed_origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        Ok(config)
    }
}
