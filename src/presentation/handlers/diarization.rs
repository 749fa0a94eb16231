use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::ports::{ChatClient, TranscriptionEngine, VideoDownloadError};
use crate::domain::ChunkPolicy;
use crate::infrastructure::observability::sanitize_transcript;
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct DiarizationResponse {
    pub transcript: String,
    pub diarization_result: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Perform speaker diarization on an uploaded audio file or a YouTube video.
///
/// Multipart form fields: `audio_file` (binary, optional),
/// `youtube_video_id` (text, optional), `chunk_seconds` (string-encoded
/// integer, optional; `<= 0` disables backend chunking). Exactly one of the
/// two inputs must be provided; `audio_file` wins when both are present.
///
/// This is the outermost recovery boundary: bad input is a 400 with a
/// message, anything else is logged in full and surfaced as a bare 500.
#[tracing::instrument(skip(state, multipart))]
pub async fn diarization_handler<E, C>(
    State(state): State<AppState<E, C>>,
    mut multipart: Multipart,
) -> Response
where
    E: TranscriptionEngine + 'static,
    C: ChatClient + 'static,
{
    let mut upload: Option<(Vec<u8>, String)> = None;
    let mut youtube_video_id: Option<String> = None;
    let mut chunk_seconds_raw: Option<String> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(f)) => f,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read multipart body");
                return bad_request(format!("Failed to read multipart body: {}", e));
            }
        };

        match field.name() {
            Some("audio_file") => {
                let filename = field.file_name().unwrap_or("upload.wav").to_string();
                match field.bytes().await {
                    Ok(data) => upload = Some((data.to_vec(), filename)),
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to read audio_file field");
                        return bad_request(format!("Failed to read audio_file: {}", e));
                    }
                }
            }
            Some("youtube_video_id") => match field.text().await {
                Ok(text) => youtube_video_id = Some(text),
                Err(e) => return bad_request(format!("Failed to read youtube_video_id: {}", e)),
            },
            Some("chunk_seconds") => match field.text().await {
                Ok(text) => chunk_seconds_raw = Some(text),
                Err(e) => return bad_request(format!("Failed to read chunk_seconds: {}", e)),
            },
            _ => {}
        }
    }

    let requested = match &chunk_seconds_raw {
        None => None,
        Some(raw) => match raw.trim().parse::<i64>() {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(value = %raw, "Rejecting non-integer chunk_seconds");
                return bad_request(
                    "Invalid chunk_seconds: must be an integer (use <= 0 to disable backend chunking).",
                );
            }
        },
    };
    let policy = ChunkPolicy::resolve(requested, state.settings.audio.default_chunk_seconds);
    tracing::info!(policy = ?policy, "Resolved chunk policy");

    let audio = if let Some((data, filename)) = upload {
        match state.upload_store.write_upload(&data, &filename).await {
            Ok(file) => file,
            Err(e) => {
                tracing::error!(error = %e, "Failed to store uploaded audio");
                return internal_error();
            }
        }
    } else if let Some(video_id) = youtube_video_id.filter(|v| !v.trim().is_empty()) {
        match state.video_downloader.download_audio(video_id.trim()).await {
            Ok(file) => file,
            Err(VideoDownloadError::InvalidVideoId(id)) => {
                tracing::warn!(video_id = %id, "Rejecting invalid video id");
                return bad_request(format!("Invalid youtube_video_id: {}", id));
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to download video audio");
                return internal_error();
            }
        }
    } else {
        return bad_request("Provide either audio_file or youtube_video_id");
    };

    // `audio` is dropped on every path below, removing the temporary file.
    match state
        .diarization_service
        .diarize_file(audio.path(), policy)
        .await
    {
        Ok(outcome) => {
            tracing::info!(
                transcript = %sanitize_transcript(outcome.transcript.as_str()),
                "Speaker diarization complete"
            );
            (
                StatusCode::OK,
                Json(DiarizationResponse {
                    transcript: outcome.transcript.into_inner(),
                    diarization_result: outcome.dialogue,
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Speaker diarization failed");
            internal_error()
        }
    }
}

fn bad_request(message: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: "Internal server error".to_string(),
        }),
    )
        .into_response()
}
