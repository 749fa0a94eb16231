use std::path::Path;
use std::time::Duration;

use crate::domain::AudioSegment;

/// Voice-activity detection over a normalized mono WAV file.
///
/// Returns speech segments ordered by start time, each no longer than
/// `max_segment`. An empty result is a valid outcome (silence-only audio or
/// nothing above the detection threshold), not an error: the caller is
/// expected to fall back to whole-file transcription.
pub trait SpeechSegmenter: Send + Sync {
    fn segment(
        &self,
        wav_path: &Path,
        max_segment: Duration,
    ) -> Result<Vec<AudioSegment>, SegmenterError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SegmenterError {
    #[error("audio decoding failed: {0}")]
    Decode(String),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}
