use std::path::Path;

use async_trait::async_trait;
use reqwest::multipart;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};
use crate::domain::AudioSegment;

use super::wav_codec;

/// Speech-to-text over the OpenAI transcription API. Segments are encoded as
/// WAV in memory and uploaded as multipart form data; whole files are
/// uploaded byte-for-byte.
pub struct OpenAiWhisperEngine {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiWhisperEngine {
    pub fn new(api_key: String, base_url: Option<String>, model: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: base_url.unwrap_or_else(|| "https://api.openai.com/v1".to_string()),
            model: model.unwrap_or_else(|| "gpt-4o-mini-transcribe".to_string()),
        }
    }

    async fn upload(&self, audio: Vec<u8>, file_name: String) -> Result<String, TranscriptionError> {
        let url = format!("{}/audio/transcriptions", self.base_url);

        let file_part = multipart::Part::bytes(audio)
            .file_name(file_name)
            .mime_str("audio/wav")
            .map_err(|e| TranscriptionError::EncodingFailed(format!("mime: {}", e)))?;

        let form = multipart::Form::new()
            .text("model", self.model.clone())
            .text("response_format", "text")
            .part("file", file_part);

        tracing::debug!(model = %self.model, "Sending audio to transcription API");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(map_request_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(map_status_error(status, body));
        }

        let transcript = response
            .text()
            .await
            .map_err(|e| TranscriptionError::InvalidResponse(format!("body: {}", e)))?;

        tracing::debug!(chars = transcript.len(), "Transcription API call completed");

        Ok(transcript.trim().to_string())
    }
}

#[async_trait]
impl TranscriptionEngine for OpenAiWhisperEngine {
    async fn transcribe_segment(
        &self,
        segment: &AudioSegment,
    ) -> Result<String, TranscriptionError> {
        let wav = wav_codec::encode_mono_wav(&segment.samples, segment.sample_rate)
            .map_err(|e| TranscriptionError::EncodingFailed(e.to_string()))?;
        self.upload(wav, "segment.wav".to_string()).await
    }

    async fn transcribe_file(&self, path: &Path) -> Result<String, TranscriptionError> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "audio.wav".to_string());
        self.upload(bytes, file_name).await
    }
}

fn map_request_error(e: reqwest::Error) -> TranscriptionError {
    if e.is_timeout() {
        TranscriptionError::Timeout(e.to_string())
    } else {
        TranscriptionError::Connection(e.to_string())
    }
}

fn map_status_error(status: reqwest::StatusCode, body: String) -> TranscriptionError {
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        TranscriptionError::RateLimited
    } else if status.is_server_error() {
        TranscriptionError::Server(format!("status {}: {}", status, body))
    } else {
        TranscriptionError::BadRequest(format!("status {}: {}", status, body))
    }
}
