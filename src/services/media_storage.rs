use anyhow::Result;
use async_trait::async_trait;
use std::path::Path;

/// A stored asset as reported by the remote provider.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RemoteAsset {
    pub public_id: String,
    pub secure_url: String,
}

/// Outcome of a destroy call. The provider reports "ok" or "not found"
/// in the response body rather than via HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestroyOutcome {
    Destroyed,
    NotFound,
}

impl DestroyOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            DestroyOutcome::Destroyed => "ok",
            DestroyOutcome::NotFound => "not found",
        }
    }
}

#[async_trait]
pub trait MediaStorage: Send + Sync {
    /// Provider identifier (e.g., "cloudinary")
    fn provider_id(&self) -> &'static str;

    /// Upload a staged local file into the given remote folder.
    async fn upload(&self, local_path: &Path, folder: &str) -> Result<RemoteAsset>;

    /// Request deletion of a previously uploaded asset.
    async fn destroy(&self, public_id: &str) -> Result<DestroyOutcome>;
}
