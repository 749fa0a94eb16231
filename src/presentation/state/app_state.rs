use std::sync::Arc;

use crate::application::ports::{AudioStore, ChatClient, TranscriptionEngine, VideoDownloader};
use crate::application::services::DiarizationService;
use crate::presentation::config::Settings;

pub struct AppState<E, C>
where
    E: TranscriptionEngine,
    C: ChatClient,
{
    pub diarization_service: Arc<DiarizationService<E, C>>,
    pub upload_store: Arc<dyn AudioStore>,
    pub video_downloader: Arc<dyn VideoDownloader>,
    pub settings: Settings,
}

impl<E, C> Clone for AppState<E, C>
where
    E: TranscriptionEngine,
    C: ChatClient,
{
    fn clone(&self) -> Self {
        Self {
            diarization_service: Arc::clone(&self.diarization_service),
            upload_store: Arc::clone(&self.upload_store),
            video_downloader: Arc::clone(&self.video_downloader),
            settings: self.settings.clone(),
        }
    }
}
