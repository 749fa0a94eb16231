mod audio_normalizer;
mod audio_store;
mod chat_client;
mod speech_segmenter;
mod temp_audio;
mod transcription_engine;
mod video_downloader;

pub use audio_normalizer::{AudioNormalizer, NormalizerError};
pub use audio_store::{AudioStore, AudioStoreError};
pub use chat_client::{ChatClient, ChatClientError, ChatMessage};
pub use speech_segmenter::{SegmenterError, SpeechSegmenter};
pub use temp_audio::TempAudioFile;
pub use transcription_engine::{TranscriptionEngine, TranscriptionError};
pub use video_downloader::{VideoDownloadError, VideoDownloader};
