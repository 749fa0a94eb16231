use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use kinabalu::application::services::{
    ChunkedTranscriber, DialogueExtractor, DiarizationService, RetryPolicy,
};
use kinabalu::infrastructure::audio::{EnergySplitter, FfmpegNormalizer, OpenAiWhisperEngine};
use kinabalu::infrastructure::llm::OpenAiChatClient;
use kinabalu::infrastructure::media::{LocalUploadStore, YtDlpDownloader};
use kinabalu::infrastructure::observability::{TracingConfig, init_tracing};
use kinabalu::presentation::{AppState, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env()?;

    init_tracing(TracingConfig::default(), settings.server.port);

    let temp_dir = settings.audio.temp_dir.clone();
    let normalizer = Arc::new(FfmpegNormalizer::new(temp_dir.clone())?);
    let segmenter = Arc::new(EnergySplitter::default());
    let engine = Arc::new(OpenAiWhisperEngine::new(
        settings.openai.api_key.clone(),
        settings.openai.base_url.clone(),
        Some(settings.openai.transcription_model.clone()),
    ));
    let chat = Arc::new(OpenAiChatClient::new(
        settings.openai.api_key.clone(),
        settings.openai.base_url.clone(),
        Some(settings.openai.chat_model.clone()),
    ));

    let transcriber = Arc::new(ChunkedTranscriber::new(
        normalizer,
        segmenter,
        engine,
        RetryPolicy::remote_api(),
    ));
    let dialogue = Arc::new(DialogueExtractor::new(chat, RetryPolicy::remote_api()));
    let diarization_service = Arc::new(DiarizationService::new(transcriber, dialogue));

    let upload_store = Arc::new(LocalUploadStore::new(temp_dir.clone())?);
    let video_downloader = Arc::new(YtDlpDownloader::new(temp_dir)?);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;

    let state = AppState {
        diarization_service,
        upload_store,
        video_downloader,
        settings,
    };

    let router = create_router(state);

    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
