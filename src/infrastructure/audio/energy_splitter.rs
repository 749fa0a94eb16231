use std::path::Path;
use std::time::Duration;

use crate::application::ports::{SegmenterError, SpeechSegmenter};
use crate::domain::{AudioSegment, SpeechSpan};

use super::wav_codec;

/// Frame length used for energy analysis.
const FRAME_SECS: f64 = 0.01;

/// Energy-based voice activity detection over a normalized mono waveform.
///
/// A 10 ms frame counts as speech when 10·log10 of its mean squared 16-bit
/// amplitude reaches the energy threshold. Consecutive speech frames are
/// grown into regions, tolerating up to `max_silence` of quiet inside a
/// region; regions shorter than `min_duration` are dropped and regions
/// reaching the caller's maximum segment duration are split there, with
/// detection continuing on the remainder.
pub struct EnergySplitter {
    min_duration: Duration,
    max_silence: Duration,
    energy_threshold_db: f64,
}

impl EnergySplitter {
    pub fn new(min_duration: Duration, max_silence: Duration, energy_threshold_db: f64) -> Self {
        Self {
            min_duration,
            max_silence,
            energy_threshold_db,
        }
    }

    fn detect_spans(&self, samples: &[i16], sample_rate: u32, max_segment: Duration) -> Vec<SpeechSpan> {
        let frame_len = ((sample_rate as f64 * FRAME_SECS) as usize).max(1);
        let max_silence_frames = (self.max_silence.as_secs_f64() / FRAME_SECS).round() as usize;
        let max_segment_frames = ((max_segment.as_secs_f64() / FRAME_SECS).round() as usize).max(1);

        let mut spans = Vec::new();
        let mut region_start: Option<usize> = None;
        let mut last_active = 0usize;
        let mut silence_run = 0usize;

        let total_frames = samples.len() / frame_len;
        for frame_idx in 0..total_frames {
            let frame = &samples[frame_idx * frame_len..(frame_idx + 1) * frame_len];
            let active = frame_energy_db(frame) >= self.energy_threshold_db;

            match region_start {
                None => {
                    if active {
                        region_start = Some(frame_idx);
                        last_active = frame_idx;
                        silence_run = 0;
                    }
                }
                Some(start) => {
                    if active {
                        last_active = frame_idx;
                        silence_run = 0;
                    } else {
                        silence_run += 1;
                        if silence_run > max_silence_frames {
                            self.close_region(&mut spans, start, last_active);
                            region_start = None;
                            continue;
                        }
                    }
                    // Split long speech runs at the duration cap and keep
                    // detecting from the next frame.
                    if frame_idx + 1 - start >= max_segment_frames {
                        self.close_region(&mut spans, start, frame_idx);
                        region_start = None;
                        silence_run = 0;
                    }
                }
            }
        }

        if let Some(start) = region_start {
            self.close_region(&mut spans, start, last_active);
        }

        spans
    }

    fn close_region(&self, spans: &mut Vec<SpeechSpan>, start_frame: usize, end_frame: usize) {
        let start_secs = start_frame as f64 * FRAME_SECS;
        let end_secs = (end_frame + 1) as f64 * FRAME_SECS;
        if end_secs - start_secs >= self.min_duration.as_secs_f64() {
            spans.push(SpeechSpan::new(start_secs, end_secs));
        }
    }
}

impl Default for EnergySplitter {
    /// Detection parameters of the production pipeline: 0.5 s minimum
    /// segment, 0.3 s tolerated intra-segment silence, 30 dB threshold.
    fn default() -> Self {
        Self::new(
            Duration::from_millis(500),
            Duration::from_millis(300),
            30.0,
        )
    }
}

impl SpeechSegmenter for EnergySplitter {
    fn segment(
        &self,
        wav_path: &Path,
        max_segment: Duration,
    ) -> Result<Vec<AudioSegment>, SegmenterError> {
        let (samples, sample_rate) = wav_codec::read_mono_wav(wav_path)?;
        let spans = self.detect_spans(&samples, sample_rate, max_segment);

        let segments = spans
            .into_iter()
            .map(|span| {
                let start = (span.start_secs() * sample_rate as f64) as usize;
                let end = ((span.end_secs() * sample_rate as f64) as usize).min(samples.len());
                AudioSegment::new(samples[start..end].to_vec(), sample_rate, span)
            })
            .collect::<Vec<_>>();

        tracing::debug!(
            segments = segments.len(),
            duration_secs = samples.len() as f64 / sample_rate as f64,
            "Speech detection finished"
        );

        Ok(segments)
    }
}

fn frame_energy_db(frame: &[i16]) -> f64 {
    let mean_square = frame
        .iter()
        .map(|&s| {
            let s = s as f64;
            s * s
        })
        .sum::<f64>()
        / frame.len() as f64;
    10.0 * mean_square.max(f64::MIN_POSITIVE).log10()
}
