use std::path::Path;

use async_trait::async_trait;

use crate::application::services::TransientError;
use crate::domain::AudioSegment;

/// Remote speech-to-text service. Two entry points: one segment carved out of
/// the waveform, or a whole file uploaded as-is.
#[async_trait]
pub trait TranscriptionEngine: Send + Sync {
    async fn transcribe_segment(&self, segment: &AudioSegment)
    -> Result<String, TranscriptionError>;

    async fn transcribe_file(&self, path: &Path) -> Result<String, TranscriptionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("request timed out: {0}")]
    Timeout(String),
    #[error("connection failed: {0}")]
    Connection(String),
    #[error("rate limited")]
    RateLimited,
    #[error("server error: {0}")]
    Server(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("audio encoding failed: {0}")]
    EncodingFailed(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

impl TransientError for TranscriptionError {
    /// The remote error classes worth retrying. Malformed-request responses
    /// are included: the upstream API intermittently returns 400 for audio it
    /// accepts on a later attempt.
    fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Timeout(_)
                | Self::Connection(_)
                | Self::RateLimited
                | Self::Server(_)
                | Self::BadRequest(_)
        )
    }
}
