use std::path::{Path, PathBuf};

use async_trait::async_trait;
use uuid::Uuid;

use crate::application::ports::{AudioStore, AudioStoreError, TempAudioFile};

/// Writes uploaded audio bytes to a uuid-named file under the configured
/// temporary directory, preserving the upload's extension so the conversion
/// tool can probe the container format.
pub struct LocalUploadStore {
    temp_dir: PathBuf,
}

impl LocalUploadStore {
    pub fn new(temp_dir: PathBuf) -> Result<Self, AudioStoreError> {
        std::fs::create_dir_all(&temp_dir)?;
        Ok(Self { temp_dir })
    }
}

#[async_trait]
impl AudioStore for LocalUploadStore {
    async fn write_upload(
        &self,
        data: &[u8],
        filename: &str,
    ) -> Result<TempAudioFile, AudioStoreError> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("wav");
        let path = self.temp_dir.join(format!("{}.{}", Uuid::new_v4(), extension));

        tokio::fs::write(&path, data).await?;

        tracing::debug!(
            path = %path.display(),
            bytes = data.len(),
            "Stored uploaded audio"
        );

        Ok(TempAudioFile::new(path))
    }
}
