mod audio_segment;
mod chunk_policy;
mod speech_span;
mod transcript;

pub use audio_segment::AudioSegment;
pub use chunk_policy::ChunkPolicy;
pub use speech_span::SpeechSpan;
pub use transcript::Transcript;
