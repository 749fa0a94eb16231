use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use kinabalu::application::ports::{
    AudioNormalizer, NormalizerError, SegmenterError, SpeechSegmenter, TempAudioFile,
    TranscriptionEngine, TranscriptionError,
};
use kinabalu::application::services::{ChunkedTranscriber, RetryPolicy};
use kinabalu::domain::{AudioSegment, ChunkPolicy, SpeechSpan};

struct MockNormalizer {
    calls: AtomicUsize,
    fail: bool,
}

impl MockNormalizer {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail: false,
        }
    }

    fn failing() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail: true,
        }
    }
}

#[async_trait]
impl AudioNormalizer for MockNormalizer {
    async fn normalize(&self, _input: &Path) -> Result<TempAudioFile, NormalizerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(NormalizerError::ToolFailed("ffmpeg exited with 1".to_string()));
        }
        let path = std::env::temp_dir().join(format!("{}.wav", uuid::Uuid::new_v4()));
        Ok(TempAudioFile::new(path))
    }
}

struct MockSegmenter {
    segments: Vec<AudioSegment>,
    calls: AtomicUsize,
}

impl MockSegmenter {
    fn with_segments(count: usize) -> Self {
        let segments = (0..count)
            .map(|i| {
                let span = SpeechSpan::new(i as f64, i as f64 + 1.0);
                AudioSegment::new(vec![100; 16_000], 16_000, span)
            })
            .collect();
        Self {
            segments,
            calls: AtomicUsize::new(0),
        }
    }

    fn empty() -> Self {
        Self::with_segments(0)
    }
}

impl SpeechSegmenter for MockSegmenter {
    fn segment(
        &self,
        _wav_path: &Path,
        _max_segment: Duration,
    ) -> Result<Vec<AudioSegment>, SegmenterError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.segments.clone())
    }
}

/// Engine whose per-call results are scripted up front. Once a script runs
/// out, further calls return empty text.
struct ScriptedEngine {
    segment_results: Mutex<VecDeque<Result<String, TranscriptionError>>>,
    file_results: Mutex<VecDeque<Result<String, TranscriptionError>>>,
    segment_calls: AtomicUsize,
    file_calls: AtomicUsize,
    file_paths: Mutex<Vec<PathBuf>>,
}

impl ScriptedEngine {
    fn new(
        segment_results: Vec<Result<String, TranscriptionError>>,
        file_results: Vec<Result<String, TranscriptionError>>,
    ) -> Self {
        Self {
            segment_results: Mutex::new(segment_results.into()),
            file_results: Mutex::new(file_results.into()),
            segment_calls: AtomicUsize::new(0),
            file_calls: AtomicUsize::new(0),
            file_paths: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl TranscriptionEngine for ScriptedEngine {
    async fn transcribe_segment(
        &self,
        _segment: &AudioSegment,
    ) -> Result<String, TranscriptionError> {
        self.segment_calls.fetch_add(1, Ordering::SeqCst);
        self.segment_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(String::new()))
    }

    async fn transcribe_file(&self, path: &Path) -> Result<String, TranscriptionError> {
        self.file_calls.fetch_add(1, Ordering::SeqCst);
        self.file_paths.lock().unwrap().push(path.to_path_buf());
        self.file_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(String::new()))
    }
}

fn transcriber(
    normalizer: MockNormalizer,
    segmenter: MockSegmenter,
    engine: Arc<ScriptedEngine>,
) -> ChunkedTranscriber<ScriptedEngine> {
    ChunkedTranscriber::new(
        Arc::new(normalizer),
        Arc::new(segmenter),
        engine,
        RetryPolicy::remote_api(),
    )
}

#[tokio::test]
async fn given_disabled_chunking_when_transcribing_then_only_whole_file_is_called() {
    let engine = Arc::new(ScriptedEngine::new(
        vec![],
        vec![Ok("full transcript".to_string())],
    ));
    let normalizer = MockNormalizer::new();
    let segmenter = MockSegmenter::with_segments(3);
    let sut = ChunkedTranscriber::new(
        Arc::new(normalizer),
        Arc::new(segmenter),
        Arc::clone(&engine),
        RetryPolicy::remote_api(),
    );

    let transcript = sut
        .transcribe(Path::new("/tmp/input.mp3"), ChunkPolicy::Disabled)
        .await
        .unwrap();

    assert_eq!(transcript.as_str(), "full transcript");
    assert_eq!(engine.file_calls.load(Ordering::SeqCst), 1);
    assert_eq!(engine.segment_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn given_no_speech_detected_when_transcribing_then_falls_back_to_whole_file() {
    let engine = Arc::new(ScriptedEngine::new(
        vec![],
        vec![Ok("whole-file result".to_string())],
    ));
    let sut = transcriber(MockNormalizer::new(), MockSegmenter::empty(), Arc::clone(&engine));

    let transcript = sut
        .transcribe(Path::new("/tmp/input.wav"), ChunkPolicy::Chunked(120))
        .await
        .unwrap();

    assert_eq!(transcript.as_str(), "whole-file result");
    assert_eq!(engine.segment_calls.load(Ordering::SeqCst), 0);
    assert_eq!(engine.file_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn given_segments_when_transcribing_then_pieces_joined_in_span_order() {
    let engine = Arc::new(ScriptedEngine::new(
        vec![
            Ok("  hello  ".to_string()),
            Ok("".to_string()),
            Ok("world".to_string()),
        ],
        vec![],
    ));
    let sut = transcriber(
        MockNormalizer::new(),
        MockSegmenter::with_segments(3),
        Arc::clone(&engine),
    );

    let transcript = sut
        .transcribe(Path::new("/tmp/input.wav"), ChunkPolicy::Chunked(120))
        .await
        .unwrap();

    assert_eq!(transcript.as_str(), "hello world");
    assert_eq!(engine.segment_calls.load(Ordering::SeqCst), 3);
    assert_eq!(engine.file_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn given_three_rate_limits_then_success_when_transcribing_then_four_calls_made() {
    let engine = Arc::new(ScriptedEngine::new(
        vec![
            Err(TranscriptionError::RateLimited),
            Err(TranscriptionError::RateLimited),
            Err(TranscriptionError::RateLimited),
            Ok("recovered text".to_string()),
        ],
        vec![],
    ));
    let sut = transcriber(
        MockNormalizer::new(),
        MockSegmenter::with_segments(1),
        Arc::clone(&engine),
    );

    let transcript = sut
        .transcribe(Path::new("/tmp/input.wav"), ChunkPolicy::Chunked(120))
        .await
        .unwrap();

    assert_eq!(transcript.as_str(), "recovered text");
    assert_eq!(engine.segment_calls.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn given_rate_limit_on_every_attempt_when_transcribing_then_error_names_retry_budget() {
    let file_results = (0..7).map(|_| Err(TranscriptionError::RateLimited)).collect();
    let engine = Arc::new(ScriptedEngine::new(vec![], file_results));
    let sut = transcriber(MockNormalizer::new(), MockSegmenter::empty(), Arc::clone(&engine));

    let error = sut
        .transcribe(Path::new("/tmp/input.wav"), ChunkPolicy::Disabled)
        .await
        .unwrap_err();

    assert!(error.to_string().contains("7"), "got: {}", error);
    assert_eq!(engine.file_calls.load(Ordering::SeqCst), 7);
}

#[tokio::test]
async fn given_normalizer_failure_when_transcribing_then_falls_back_on_original_path() {
    let engine = Arc::new(ScriptedEngine::new(
        vec![],
        vec![Ok("fallback transcript".to_string())],
    ));
    let sut = transcriber(
        MockNormalizer::failing(),
        MockSegmenter::with_segments(2),
        Arc::clone(&engine),
    );

    let input = Path::new("/tmp/original-input.mp3");
    let transcript = sut
        .transcribe(input, ChunkPolicy::Chunked(120))
        .await
        .unwrap();

    assert_eq!(transcript.as_str(), "fallback transcript");
    assert_eq!(engine.segment_calls.load(Ordering::SeqCst), 0);
    let paths = engine.file_paths.lock().unwrap();
    assert_eq!(paths.as_slice(), &[input.to_path_buf()]);
}

#[tokio::test]
async fn given_segment_retries_exhausted_when_transcribing_then_whole_file_rescues_the_request() {
    let segment_results = (0..7).map(|_| Err(TranscriptionError::RateLimited)).collect();
    let engine = Arc::new(ScriptedEngine::new(
        segment_results,
        vec![Ok("rescued".to_string())],
    ));
    let sut = transcriber(
        MockNormalizer::new(),
        MockSegmenter::with_segments(1),
        Arc::clone(&engine),
    );

    let transcript = sut
        .transcribe(Path::new("/tmp/input.wav"), ChunkPolicy::Chunked(120))
        .await
        .unwrap();

    assert_eq!(transcript.as_str(), "rescued");
    assert_eq!(engine.segment_calls.load(Ordering::SeqCst), 7);
    assert_eq!(engine.file_calls.load(Ordering::SeqCst), 1);
}
