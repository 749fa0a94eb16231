mod energy_splitter;
mod ffmpeg_normalizer;
mod openai_whisper_engine;
pub mod wav_codec;

pub use energy_splitter::EnergySplitter;
pub use ffmpeg_normalizer::FfmpegNormalizer;
pub use openai_whisper_engine::OpenAiWhisperEngine;
