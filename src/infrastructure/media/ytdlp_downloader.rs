use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use uuid::Uuid;

use crate::application::ports::{TempAudioFile, VideoDownloadError, VideoDownloader};

/// Fetches the audio track of a YouTube video via the yt-dlp CLI, extracting
/// it as WAV into the configured temporary directory.
pub struct YtDlpDownloader {
    temp_dir: PathBuf,
}

impl YtDlpDownloader {
    pub fn new(temp_dir: PathBuf) -> Result<Self, std::io::Error> {
        std::fs::create_dir_all(&temp_dir)?;
        Ok(Self { temp_dir })
    }
}

#[async_trait]
impl VideoDownloader for YtDlpDownloader {
    async fn download_audio(&self, video_id: &str) -> Result<TempAudioFile, VideoDownloadError> {
        // YouTube ids are url-safe; anything else is rejected before it
        // reaches the command line.
        if video_id.is_empty()
            || !video_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(VideoDownloadError::InvalidVideoId(video_id.to_string()));
        }

        let output_path = self.temp_dir.join(format!("{}.wav", Uuid::new_v4()));
        let url = format!("https://www.youtube.com/watch?v={}", video_id);

        tracing::info!(video_id, output = %output_path.display(), "Downloading video audio");

        let status = Command::new("yt-dlp")
            .args(["-f", "bestaudio", "-x", "--audio-format", "wav", "-o"])
            .arg(&output_path)
            .arg(&url)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await?;

        if !status.success() || !output_path.exists() {
            let _partial = TempAudioFile::new(output_path);
            return Err(VideoDownloadError::ToolFailed(format!(
                "yt-dlp exited with {} for video {}",
                status, video_id
            )));
        }

        Ok(TempAudioFile::new(output_path))
    }
}
