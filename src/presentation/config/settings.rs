use std::path::PathBuf;

use crate::domain::ChunkPolicy;

/// Runtime configuration, resolved from environment variables at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub openai: OpenAiSettings,
    pub audio: AudioSettings,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct OpenAiSettings {
    pub api_key: String,
    pub base_url: Option<String>,
    pub transcription_model: String,
    pub chat_model: String,
}

#[derive(Debug, Clone)]
pub struct AudioSettings {
    pub temp_dir: PathBuf,
    pub default_chunk_seconds: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),
    #[error("invalid value for {name}: {value}")]
    InvalidVar { name: &'static str, value: String },
}

impl Settings {
    pub fn from_env() -> Result<Self, SettingsError> {
        let port = match std::env::var("SERVER_PORT") {
            Ok(raw) => raw.parse().map_err(|_| SettingsError::InvalidVar {
                name: "SERVER_PORT",
                value: raw,
            })?,
            Err(_) => 3000,
        };

        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| SettingsError::MissingVar("OPENAI_API_KEY"))?;

        // A malformed CHUNK_SECONDS falls back to the built-in default, and
        // any value is clamped to the safe range, matching request handling.
        let default_chunk_seconds = std::env::var("CHUNK_SECONDS")
            .ok()
            .and_then(|raw| match raw.trim().parse::<i64>() {
                Ok(v) => Some(v),
                Err(_) => {
                    tracing::warn!(value = %raw, "Ignoring non-integer CHUNK_SECONDS");
                    None
                }
            })
            .map(ChunkPolicy::clamp_seconds)
            .unwrap_or(ChunkPolicy::DEFAULT_SECONDS);

        let temp_dir = std::env::var("AUDIO_TEMP_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| std::env::temp_dir().join("kinabalu-audio"));

        Ok(Self {
            server: ServerSettings {
                host: std::env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port,
            },
            openai: OpenAiSettings {
                api_key,
                base_url: std::env::var("OPENAI_BASE_URL").ok(),
                transcription_model: std::env::var("TRANSCRIPTION_MODEL")
                    .unwrap_or_else(|_| "gpt-4o-mini-transcribe".to_string()),
                chat_model: std::env::var("CHAT_MODEL")
                    .unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            },
            audio: AudioSettings {
                temp_dir,
                default_chunk_seconds,
            },
        })
    }
}
