use super::SpeechSpan;

/// A slice of decoded mono audio carved out of the full waveform by the
/// speech segmenter. Consumed exactly once by the transcription engine.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioSegment {
    pub samples: Vec<i16>,
    pub sample_rate: u32,
    pub span: SpeechSpan,
}

impl AudioSegment {
    pub fn new(samples: Vec<i16>, sample_rate: u32, span: SpeechSpan) -> Self {
        Self {
            samples,
            sample_rate,
            span,
        }
    }

    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }
}
