use crate::utils::validation::staging_filename;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::io::{AsyncRead, AsyncWriteExt};

/// Transient local staging for uploads awaiting forwarding to remote
/// storage. Each staged file gets a collision-resistant generated name,
/// so concurrent requests never contend.
pub struct StagingArea {
    dir: PathBuf,
}

/// A single staged file. Must be removed once the remote call returns,
/// whatever the outcome.
pub struct StagedFile {
    path: PathBuf,
}

impl StagingArea {
    pub async fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir)
            .await
            .with_context(|| format!("failed to create staging directory {}", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Stream the upload body into a freshly named staged file.
    pub async fn stage<R>(&self, original_filename: &str, mut reader: R) -> Result<StagedFile>
    where
        R: AsyncRead + Unpin + Send,
    {
        let path = self.dir.join(staging_filename(original_filename));

        let mut file = tokio::fs::File::create(&path)
            .await
            .with_context(|| format!("failed to create staged file {}", path.display()))?;

        if let Err(e) = tokio::io::copy(&mut reader, &mut file).await {
            let _ = tokio::fs::remove_file(&path).await;
            return Err(e).with_context(|| format!("failed to write staged file {}", path.display()));
        }

        file.flush()
            .await
            .with_context(|| format!("failed to flush staged file {}", path.display()))?;

        Ok(StagedFile { path })
    }
}

impl StagedFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove the staged copy. Failure to unlink only leaks a temp file,
    /// so it is logged rather than surfaced to the caller.
    pub async fn remove(self) {
        if let Err(e) = tokio::fs::remove_file(&self.path).await {
            tracing::warn!(
                "Failed to remove staged file {}: {}",
                self.path.display(),
                e
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_stage_writes_content() {
        let dir = tempfile::tempdir().unwrap();
        let staging = StagingArea::new(dir.path()).await.unwrap();

        let staged = staging
            .stage("photo.png", &b"fake image bytes"[..])
            .await
            .unwrap();

        assert!(staged.path().exists());
        let content = tokio::fs::read(staged.path()).await.unwrap();
        assert_eq!(content, b"fake image bytes");
    }

    #[tokio::test]
    async fn test_remove_deletes_file() {
        let dir = tempfile::tempdir().unwrap();
        let staging = StagingArea::new(dir.path()).await.unwrap();

        let staged = staging.stage("photo.png", &b"data"[..]).await.unwrap();
        let path = staged.path().to_path_buf();

        staged.remove().await;
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_same_original_name_gets_distinct_paths() {
        let dir = tempfile::tempdir().unwrap();
        let staging = StagingArea::new(dir.path()).await.unwrap();

        let a = staging.stage("photo.png", &b"a"[..]).await.unwrap();
        let b = staging.stage("photo.png", &b"b"[..]).await.unwrap();

        assert_ne!(a.path(), b.path());
        assert!(a.path().exists());
        assert!(b.path().exists());
    }

    #[tokio::test]
    async fn test_caller_name_does_not_shape_path() {
        let dir = tempfile::tempdir().unwrap();
        let staging = StagingArea::new(dir.path()).await.unwrap();

        let staged = staging
            .stage("../../etc/passwd.png", &b"x"[..])
            .await
            .unwrap();

        // Staged file stays inside the staging directory.
        assert_eq!(staged.path().parent().unwrap(), dir.path());
    }
}
