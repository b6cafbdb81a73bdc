use crate::config::AppConfig;
use crate::services::media_storage::{DestroyOutcome, MediaStorage, RemoteAsset};
use anyhow::{Context, Result, anyhow, bail};
use async_trait::async_trait;
use chrono::Utc;
use sha2::{Digest, Sha256};
use std::path::Path;

const DEFAULT_API_BASE: &str = "https://api.cloudinary.com/v1_1";

/// Signed HTTP client for the Cloudinary upload API.
pub struct CloudinaryClient {
    http: reqwest::Client,
    api_base: String,
    cloud_name: String,
    api_key: String,
    api_secret: String,
}

#[derive(serde::Deserialize)]
struct UploadApiResponse {
    public_id: String,
    secure_url: String,
}

#[derive(serde::Deserialize)]
struct DestroyApiResponse {
    result: String,
}

#[derive(serde::Deserialize)]
struct ApiErrorBody {
    error: ApiErrorMessage,
}

#[derive(serde::Deserialize)]
struct ApiErrorMessage {
    message: String,
}

impl CloudinaryClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: DEFAULT_API_BASE.to_string(),
            cloud_name: config.cloud_name.clone(),
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
        }
    }

    fn endpoint(&self, action: &str) -> String {
        format!("{}/{}/image/{}", self.api_base, self.cloud_name, action)
    }

    /// SHA-256 request signature over the alphabetically ordered signed
    /// parameters, with the API secret appended.
    fn sign(params: &[(&str, &str)], api_secret: &str) -> String {
        let mut sorted: Vec<_> = params.to_vec();
        sorted.sort_by_key(|(k, _)| *k);

        let to_sign = sorted
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");

        let mut hasher = Sha256::new();
        hasher.update(to_sign.as_bytes());
        hasher.update(api_secret.as_bytes());
        hex::encode(hasher.finalize())
    }

    async fn api_error(res: reqwest::Response) -> anyhow::Error {
        let status = res.status();
        match res.json::<ApiErrorBody>().await {
            Ok(body) => anyhow!("media provider returned {}: {}", status, body.error.message),
            Err(_) => anyhow!("media provider returned {}", status),
        }
    }
}

#[async_trait]
impl MediaStorage for CloudinaryClient {
    fn provider_id(&self) -> &'static str {
        "cloudinary"
    }

    async fn upload(&self, local_path: &Path, folder: &str) -> Result<RemoteAsset> {
        let timestamp = Utc::now().timestamp().to_string();
        let signature = Self::sign(
            &[("folder", folder), ("timestamp", &timestamp)],
            &self.api_secret,
        );

        let file_name = local_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();

        let data = tokio::fs::read(local_path)
            .await
            .with_context(|| format!("failed to read staged file {}", local_path.display()))?;

        let form = reqwest::multipart::Form::new()
            .part(
                "file",
                reqwest::multipart::Part::bytes(data).file_name(file_name),
            )
            .text("api_key", self.api_key.clone())
            .text("timestamp", timestamp)
            .text("folder", folder.to_string())
            .text("signature", signature);

        let res = self
            .http
            .post(self.endpoint("upload"))
            .multipart(form)
            .send()
            .await
            .context("upload request to media provider failed")?;

        if !res.status().is_success() {
            return Err(Self::api_error(res).await);
        }

        let body: UploadApiResponse = res
            .json()
            .await
            .context("malformed upload response from media provider")?;

        Ok(RemoteAsset {
            public_id: body.public_id,
            secure_url: body.secure_url,
        })
    }

    async fn destroy(&self, public_id: &str) -> Result<DestroyOutcome> {
        let timestamp = Utc::now().timestamp().to_string();
        let signature = Self::sign(
            &[("public_id", public_id), ("timestamp", &timestamp)],
            &self.api_secret,
        );

        let form = [
            ("public_id", public_id.to_string()),
            ("api_key", self.api_key.clone()),
            ("timestamp", timestamp),
            ("signature", signature),
        ];

        let res = self
            .http
            .post(self.endpoint("destroy"))
            .form(&form)
            .send()
            .await
            .context("destroy request to media provider failed")?;

        if !res.status().is_success() {
            return Err(Self::api_error(res).await);
        }

        let body: DestroyApiResponse = res
            .json()
            .await
            .context("malformed destroy response from media provider")?;

        match body.result.as_str() {
            "ok" => Ok(DestroyOutcome::Destroyed),
            "not found" => Ok(DestroyOutcome::NotFound),
            other => bail!("unexpected destroy result from media provider: {other}"),
        }
    }
}
