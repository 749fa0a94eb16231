use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{
    AudioNormalizer, NormalizerError, SegmenterError, SpeechSegmenter, TranscriptionEngine,
    TranscriptionError,
};
use crate::application::services::{RetryError, RetryPolicy};
use crate::domain::{ChunkPolicy, Transcript};

/// Orchestrates the chunked transcription pipeline: normalize the input to
/// mono 16 kHz, detect speech, transcribe each speech segment in order, and
/// join the pieces into one transcript.
///
/// Falls back to a single whole-file transcription call on the original input
/// when chunking is disabled, when detection finds no speech, or when any
/// step of the chunked path fails.
pub struct ChunkedTranscriber<E>
where
    E: TranscriptionEngine,
{
    normalizer: Arc<dyn AudioNormalizer>,
    segmenter: Arc<dyn SpeechSegmenter>,
    engine: Arc<E>,
    retry: RetryPolicy,
}

impl<E> ChunkedTranscriber<E>
where
    E: TranscriptionEngine,
{
    pub fn new(
        normalizer: Arc<dyn AudioNormalizer>,
        segmenter: Arc<dyn SpeechSegmenter>,
        engine: Arc<E>,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            normalizer,
            segmenter,
            engine,
            retry,
        }
    }

    pub async fn transcribe(
        &self,
        input: &Path,
        policy: ChunkPolicy,
    ) -> Result<Transcript, TranscribeError> {
        let chunk_seconds = match policy {
            ChunkPolicy::Disabled => {
                tracing::info!("Backend chunking disabled, transcribing in a single pass");
                return self.transcribe_single_pass(input).await;
            }
            ChunkPolicy::Chunked(secs) => secs,
        };

        match self.transcribe_chunked(input, chunk_seconds).await {
            Ok(Some(transcript)) => {
                tracing::info!(
                    chunk_seconds,
                    transcript_chars = transcript.char_count(),
                    "Chunked transcription complete"
                );
                Ok(transcript)
            }
            Ok(None) => {
                tracing::warn!("No speech segments detected, falling back to single transcription call");
                self.transcribe_single_pass(input).await
            }
            Err(e) => {
                tracing::warn!(error = %e, "Chunked transcription failed, falling back to single transcription call");
                self.transcribe_single_pass(input).await
            }
        }
    }

    /// The chunked path. `Ok(None)` means segmentation found no speech; the
    /// normalized temporary file is removed on every way out of this
    /// function, including the error paths, via the guard's drop.
    async fn transcribe_chunked(
        &self,
        input: &Path,
        chunk_seconds: u32,
    ) -> Result<Option<Transcript>, TranscribeError> {
        let normalized = self.normalizer.normalize(input).await?;

        let segments = self.segmenter.segment(
            normalized.path(),
            Duration::from_secs(u64::from(chunk_seconds)),
        )?;
        if segments.is_empty() {
            return Ok(None);
        }

        let total_chunks = segments.len();
        tracing::info!(chunk_seconds, total_chunks, "Starting chunked transcription");

        let mut pieces = Vec::with_capacity(total_chunks);
        for (index, segment) in segments.iter().enumerate() {
            tracing::info!(chunk = index + 1, total_chunks, "Transcribing chunk");
            let text = self
                .retry
                .run(|| self.engine.transcribe_segment(segment))
                .await?;
            pieces.push(text);
        }

        Ok(Some(Transcript::join(&pieces)))
    }

    /// Whole-file fallback: upload the original input as-is, one remote call
    /// under the same retry policy.
    pub async fn transcribe_single_pass(
        &self,
        input: &Path,
    ) -> Result<Transcript, TranscribeError> {
        let text = self
            .retry
            .run(|| self.engine.transcribe_file(input))
            .await?;
        let transcript = Transcript::from_raw(text);
        tracing::info!(
            total_chunks = 1,
            transcript_chars = transcript.char_count(),
            "Single-pass transcription complete"
        );
        Ok(transcript)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TranscribeError {
    #[error("audio normalization failed: {0}")]
    Normalize(#[from] NormalizerError),
    #[error("speech segmentation failed: {0}")]
    Segment(#[from] SegmenterError),
    #[error("transcription failed: {0}")]
    Remote(#[from] RetryError<TranscriptionError>),
}
