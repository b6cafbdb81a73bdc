use anyhow::{Context, Result};
use std::env;

/// Runtime configuration, loaded once at startup and injected into the
/// components that need it.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Media provider cloud (account) name
    pub cloud_name: String,

    /// Media provider API key
    pub api_key: String,

    /// Media provider API secret used for request signing
    pub api_secret: String,

    /// Listening port (default: 5000)
    pub port: u16,

    /// Remote folder uploads are stored under (default: "my_uploads")
    pub upload_folder: String,

    /// Local transient staging directory (default: "uploads")
    pub uploads_dir: String,

    /// Maximum accepted request body size in bytes (default: 25 MB)
    pub max_upload_size: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cloud_name: String::new(),
            api_key: String::new(),
            api_secret: String::new(),
            port: 5000,
            upload_folder: "my_uploads".to_string(),
            uploads_dir: "uploads".to_string(),
            max_upload_size: 25 * 1024 * 1024, // 25 MB
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    /// Provider credentials are required; everything else has a default.
    pub fn from_env() -> Result<Self> {
        let default = Self::default();

        Ok(Self {
            cloud_name: env::var("CLOUD_NAME").context("CLOUD_NAME must be set")?,

            api_key: env::var("API_KEY").context("API_KEY must be set")?,

            api_secret: env::var("API_SECRET").context("API_SECRET must be set")?,

            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.port),

            upload_folder: env::var("UPLOAD_FOLDER").unwrap_or(default.upload_folder),

            uploads_dir: env::var("UPLOADS_DIR").unwrap_or(default.uploads_dir),

            max_upload_size: env::var("MAX_UPLOAD_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.max_upload_size),
        })
    }

    /// Create config for development and tests (dummy credentials)
    pub fn development() -> Self {
        Self {
            cloud_name: "demo".to_string(),
            api_key: "123456789012345".to_string(),
            api_secret: "dev-secret".to_string(),
            ..Self::default()
        }
    }
}
