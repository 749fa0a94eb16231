mod chunked_transcriber;
mod dialogue_extractor;
mod diarization_service;
mod retry;
mod token_counter;

pub use chunked_transcriber::{ChunkedTranscriber, TranscribeError};
pub use dialogue_extractor::{DialogueError, DialogueExtractor};
pub use diarization_service::{DiarizationError, DiarizationOutcome, DiarizationService};
pub use retry::{RetryError, RetryPolicy, TransientError};
pub use token_counter::count_tokens;
