use std::path::Path;

use async_trait::async_trait;

use super::TempAudioFile;

/// Converts an arbitrary audio file to mono 16 kHz WAV in a fresh temporary
/// file. Each call produces an independent file; the returned guard owns
/// deletion.
#[async_trait]
pub trait AudioNormalizer: Send + Sync {
    async fn normalize(&self, input: &Path) -> Result<TempAudioFile, NormalizerError>;
}

#[derive(Debug, thiserror::Error)]
pub enum NormalizerError {
    #[error("conversion tool failed: {0}")]
    ToolFailed(String),
    #[error("conversion tool could not be started: {0}")]
    ToolUnavailable(#[from] std::io::Error),
}
