use std::path::Path;
use std::sync::Arc;

use crate::application::ports::{ChatClient, TranscriptionEngine};
use crate::application::services::{
    ChunkedTranscriber, DialogueError, DialogueExtractor, TranscribeError,
};
use crate::domain::{ChunkPolicy, Transcript};

/// One full diarization run: transcribe the recording, then relabel the
/// transcript into per-speaker dialogue. All steps are sequential within a
/// request and nothing survives the request.
pub struct DiarizationService<E, C>
where
    E: TranscriptionEngine,
    C: ChatClient,
{
    transcriber: Arc<ChunkedTranscriber<E>>,
    dialogue: Arc<DialogueExtractor<C>>,
}

#[derive(Debug)]
pub struct DiarizationOutcome {
    pub transcript: Transcript,
    pub dialogue: String,
}

impl<E, C> DiarizationService<E, C>
where
    E: TranscriptionEngine,
    C: ChatClient,
{
    pub fn new(transcriber: Arc<ChunkedTranscriber<E>>, dialogue: Arc<DialogueExtractor<C>>) -> Self {
        Self {
            transcriber,
            dialogue,
        }
    }

    pub async fn diarize_file(
        &self,
        audio_path: &Path,
        policy: ChunkPolicy,
    ) -> Result<DiarizationOutcome, DiarizationError> {
        let transcript = self.transcriber.transcribe(audio_path, policy).await?;
        let dialogue = self.dialogue.extract(&transcript, None).await?;
        Ok(DiarizationOutcome {
            transcript,
            dialogue,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DiarizationError {
    #[error(transparent)]
    Transcription(#[from] TranscribeError),
    #[error(transparent)]
    Dialogue(#[from] DialogueError),
}
