use async_trait::async_trait;

use super::TempAudioFile;

/// Fetches the audio track of a video by its platform id into a local
/// temporary file. The download mechanism is an external tool.
#[async_trait]
pub trait VideoDownloader: Send + Sync {
    async fn download_audio(&self, video_id: &str) -> Result<TempAudioFile, VideoDownloadError>;
}

#[derive(Debug, thiserror::Error)]
pub enum VideoDownloadError {
    #[error("invalid video id: {0}")]
    InvalidVideoId(String),
    #[error("download tool failed: {0}")]
    ToolFailed(String),
    #[error("download tool could not be started: {0}")]
    ToolUnavailable(#[from] std::io::Error),
}
