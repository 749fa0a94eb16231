use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use uuid::Uuid;

use crate::application::ports::{AudioNormalizer, NormalizerError, TempAudioFile};

const TARGET_SAMPLE_RATE: u32 = 16_000;

/// Converts arbitrary input audio to mono 16 kHz WAV by shelling out to
/// ffmpeg. Each call writes a fresh uuid-named file under the configured
/// temporary directory.
pub struct FfmpegNormalizer {
    temp_dir: PathBuf,
}

impl FfmpegNormalizer {
    pub fn new(temp_dir: PathBuf) -> Result<Self, NormalizerError> {
        std::fs::create_dir_all(&temp_dir)?;
        Ok(Self { temp_dir })
    }
}

#[async_trait]
impl AudioNormalizer for FfmpegNormalizer {
    async fn normalize(&self, input: &Path) -> Result<TempAudioFile, NormalizerError> {
        let output_path = self.temp_dir.join(format!("{}.wav", Uuid::new_v4()));

        tracing::debug!(
            input = %input.display(),
            output = %output_path.display(),
            "Converting audio to mono 16 kHz WAV"
        );

        let status = Command::new("ffmpeg")
            .arg("-i")
            .arg(input)
            .args(["-ar", &TARGET_SAMPLE_RATE.to_string(), "-ac", "1", "-y"])
            .arg(&output_path)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await?;

        if !status.success() {
            // Claim the partial output so it is cleaned up with everything else.
            let _partial = TempAudioFile::new(output_path);
            return Err(NormalizerError::ToolFailed(format!(
                "ffmpeg exited with {} for {}",
                status,
                input.display()
            )));
        }

        Ok(TempAudioFile::new(output_path))
    }
}
