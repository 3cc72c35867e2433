//! Server configuration from the environment.

use docsift_extractors::ExtractionConfig;

/// Default upload ceiling: 50 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Request bodies above this size are rejected before extraction.
    pub max_upload_bytes: usize,
    /// Exact origins allowed by CORS. Empty means any origin.
    pub allowed_origins: Vec<String>,
    /// Process-wide key for the OCR/transcription API.
    pub openai_api_key: Option<String>,
    pub extraction: ExtractionConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            allowed_origins: Vec::new(),
            openai_api_key: None,
            extraction: ExtractionConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let mut config = Self {
            extraction: ExtractionConfig::from_env(),
            ..Self::default()
        };

        if let Ok(host) = std::env::var("DOCSIFT_HOST") {
            config.host = host;
        }

        if let Ok(port) = std::env::var("DOCSIFT_PORT") {
            match port.parse() {
                Ok(port) => config.port = port,
                Err(_) => tracing::warn!(value = %port, "DOCSIFT_PORT is not a valid port, using default"),
            }
        }

        if let Ok(limit) = std::env::var("DOCSIFT_MAX_UPLOAD_BYTES") {
            match limit.parse() {
                Ok(limit) => config.max_upload_bytes = limit,
                Err(_) => tracing::warn!(value = %limit, "DOCSIFT_MAX_UPLOAD_BYTES is not a number, using default"),
            }
        }

        if let Ok(origins) = std::env::var("DOCSIFT_ALLOWED_ORIGINS") {
            config.allowed_origins = parse_origins(&origins);
        }

        config.openai_api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());

        config
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|origin| origin.trim().trim_end_matches('/'))
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}
