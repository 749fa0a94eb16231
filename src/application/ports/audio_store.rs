use async_trait::async_trait;

use super::TempAudioFile;

/// Persists an uploaded audio payload to a local temporary file so the
/// pipeline can hand a path to the external conversion tool.
#[async_trait]
pub trait AudioStore: Send + Sync {
    async fn write_upload(
        &self,
        data: &[u8],
        filename: &str,
    ) -> Result<TempAudioFile, AudioStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AudioStoreError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}
